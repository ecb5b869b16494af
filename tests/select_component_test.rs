//! End-to-end tests: option file on disk → service container → select widget.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use tempfile::TempDir;

use mlselect::cli::args::Cli;
use mlselect::cli::commands::{execute_command, SelectReport};
use mlselect::config::Settings;
use mlselect::domain::{SelectionCollection, SelectionState};
use mlselect::infrastructure::ServiceContainer;
use mlselect::util::testing::{self, pid};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const OPTIONS: &str = r#"
[[options]]
label = "Fruit"

  [[options.nested]]
  label = "Citrus"
  nested = [{ label = "Lemon" }, { label = "Orange" }]

  [[options.nested]]
  label = "Apple"

[[options]]
label = "Nuts"
"#;

fn option_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("options.toml");
    fs::write(&path, OPTIONS).expect("write option file");
    path
}

#[test]
fn given_option_file_when_selecting_through_widget_then_chips_and_rows_follow() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let container = ServiceContainer::new(Settings::default());
    let tree = container.option_loader().load(&option_file(&dir)).unwrap();

    let changes = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&changes);
    let mut widget = container
        .select_component(tree)
        .with_listener(move |_: &SelectionCollection| *counter.borrow_mut() += 1);

    // Act
    widget.handle_select(&pid("fruit.citrus.orange")).unwrap();
    widget.handle_select(&pid("nuts")).unwrap();
    widget.handle_select(&pid("fruit.apple")).unwrap();

    // Assert
    assert_eq!(*changes.borrow(), 3);
    assert_eq!(widget.display_text(), "Fruit, Nuts");
    let chips = widget.chips();
    assert_eq!(chips[0].detail, ["Orange", "Apple"]);

    widget.load_nested(&pid("fruit")).unwrap();
    widget.load_nested(&pid("fruit.citrus")).unwrap();
    let states: Vec<_> = widget.rows().iter().map(|r| r.state).collect();
    assert_eq!(states, [SelectionState::Unselected, SelectionState::Selected]);

    widget.go_back().unwrap();
    let states: Vec<_> = widget.rows().iter().map(|r| r.state).collect();
    assert_eq!(states, [SelectionState::Partial, SelectionState::Selected]);
}

#[test]
fn given_chip_removed_when_selecting_again_then_branch_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let container = ServiceContainer::new(Settings::default());
    let tree = container.option_loader().load(&option_file(&dir)).unwrap();
    let mut widget = container.select_component(tree);

    widget.handle_select(&pid("fruit.apple")).unwrap();
    widget.remove_filter(&pid("fruit"));
    assert_eq!(widget.display_text(), "Multi Level Selector");

    widget.handle_select(&pid("fruit.citrus.lemon")).unwrap();
    assert_eq!(widget.chips()[0].detail, ["Lemon"]);
}

#[test]
fn given_widget_state_when_building_report_then_serializes_selection() {
    let dir = TempDir::new().unwrap();
    let container = ServiceContainer::new(Settings::default());
    let tree = container.option_loader().load(&option_file(&dir)).unwrap();
    let mut widget = container.select_component(tree);
    widget.handle_select(&pid("fruit.citrus.lemon")).unwrap();

    let json = serde_json::to_value(SelectReport::from_widget(&widget)).unwrap();

    assert_eq!(json["selection"][0]["id"], "fruit");
    assert_eq!(json["selection"][0]["nested"][0]["nested"][0]["label"], "Lemon");
    assert_eq!(json["chips"][0]["detail"][0], "Lemon");
    assert_eq!(json["rows"][0]["state"], "partial");
    assert_eq!(json["rows"][1]["state"], "unselected");
}

#[test]
fn given_select_command_when_executed_then_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = option_file(&dir);
    let file = file.to_str().unwrap();

    let cli = Cli::try_parse_from([
        "mlselect", "select", file, "fruit.apple", "nuts", "--remove", "nuts", "--open", "fruit",
    ])
    .unwrap();

    execute_command(&cli, Settings::default()).unwrap();
}

#[test]
fn given_unknown_identifier_when_executing_select_then_dataerr() {
    let dir = TempDir::new().unwrap();
    let file = option_file(&dir);

    let cli = Cli::try_parse_from(["mlselect", "select", file.to_str().unwrap(), "fruit.kiwi"])
        .unwrap();

    let err = execute_command(&cli, Settings::default()).unwrap_err();
    assert_eq!(err.exit_code(), mlselect::exitcode::DATAERR);
}

#[test]
fn given_missing_file_when_executing_tree_then_noinput() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let cli = Cli::try_parse_from(["mlselect", "tree", missing.to_str().unwrap()]).unwrap();

    let err = execute_command(&cli, Settings::default()).unwrap_err();
    assert_eq!(err.exit_code(), mlselect::exitcode::NOINPUT);
}
