//! Command dispatch: one function per subcommand

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde::Serialize;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::MultiLevelSelect;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::{Chip, PathId, Row, SelectionCollection};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Machine-readable result of `mlselect select`.
#[derive(Debug, Serialize)]
pub struct SelectReport {
    pub selection: SelectionCollection,
    pub chips: Vec<Chip>,
    pub rows: Vec<Row>,
}

impl SelectReport {
    pub fn from_widget(widget: &MultiLevelSelect) -> Self {
        Self {
            selection: widget.selection().clone(),
            chips: widget.chips(),
            rows: widget.rows(),
        }
    }
}

pub fn execute_command(cli: &Cli, settings: Settings) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    match &cli.command {
        Some(Commands::Tree { file }) => cmd_tree(&container, file),
        Some(Commands::Select {
            file,
            ids,
            remove,
            open,
            json,
        }) => cmd_select(&container, file, ids, remove, open, *json),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let tree = container.option_loader().load(file)?;
    debug!("cmd_tree: {} options", tree.len());

    let leaves: Vec<_> = tree.nodes().iter().map(output::option_tree).collect();
    output::info(&Tree::new(file.display().to_string()).with_leaves(leaves));
    Ok(())
}

/// Replay a sequence of widget interactions and print the outcome.
///
/// Order: toggles, then chip removals, then drill-downs.
#[instrument(skip(container))]
fn cmd_select(
    container: &ServiceContainer,
    file: &Path,
    ids: &[PathId],
    remove: &[PathId],
    open: &[PathId],
    json: bool,
) -> CliResult<()> {
    let tree = container.option_loader().load(file)?;
    let mut widget = container
        .select_component(tree)
        .with_listener(|selection: &SelectionCollection| {
            debug!("selection changed: {:?}", selection.selected_ids());
        });

    for id in ids {
        widget.handle_select(id)?;
    }
    for id in remove {
        widget.remove_filter(id);
    }
    for id in open {
        widget.load_nested(id)?;
    }

    let settings = &container.settings;
    if json || settings.output == OutputFormat::Json {
        let report = SelectReport::from_widget(&widget);
        let text = serde_json::to_string_pretty(&report).map_err(|e| {
            InfraError::parse(file, format!("serialize selection: {e}"))
        })?;
        output::info(&text);
        return Ok(());
    }

    output::header(&widget.display_text());
    let leaves: Vec<_> = widget
        .selection()
        .iter()
        .map(output::selection_tree)
        .collect();
    if !leaves.is_empty() {
        output::info(&Tree::new("selection".to_string()).with_leaves(leaves));
    }

    let chips = widget.chips();
    if !chips.is_empty() {
        output::header("chips");
        for chip in &chips {
            output::detail(&output::chip_line(chip));
        }
    }

    output::header("options");
    if !widget.is_at_root() {
        output::detail(&format!("‹ {}", settings.back_label));
    }
    for row in widget.rows() {
        output::detail(&output::row_line(&row));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory".to_string(),
                ))
            }
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
