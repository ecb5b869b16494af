//! Shared test setup: tracing subscriber and option fixtures

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{OptionSpec, OptionTree, OptionTreeBuilder, PathId};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "mlselect=trace");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Parse a path identifier in tests.
///
/// # Panics
/// On malformed input.
pub fn pid(text: &str) -> PathId {
    match PathId::parse(text) {
        Ok(id) => id,
        Err(e) => panic!("bad test identifier {text:?}: {e}"),
    }
}

/// Three-level option tree used across tests.
///
/// ```text
/// 1 Fruit
///   1.1 Citrus
///     1.1.1 Lemon
///     1.1.2 Orange
///   1.2 Apple
/// 2 Vegetables
///   2.1 Carrot
///   2.2 Leek
/// 3 Nuts
/// ```
pub fn sample_tree() -> OptionTree {
    let specs = vec![
        OptionSpec::new("Fruit").with_key("1").with_nested(vec![
            OptionSpec::new("Citrus").with_key("1").with_nested(vec![
                OptionSpec::new("Lemon").with_key("1"),
                OptionSpec::new("Orange").with_key("2"),
            ]),
            OptionSpec::new("Apple").with_key("2"),
        ]),
        OptionSpec::new("Vegetables").with_key("2").with_nested(vec![
            OptionSpec::new("Carrot").with_key("1"),
            OptionSpec::new("Leek").with_key("2"),
        ]),
        OptionSpec::new("Nuts").with_key("3"),
    ];
    match OptionTreeBuilder::new().build(&specs) {
        Ok(tree) => tree,
        Err(e) => panic!("sample tree is valid: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sample_tree_when_built_then_has_three_levels() {
        init_test_setup();
        let tree = sample_tree();
        assert_eq!(tree.nodes().len(), 3);
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.find(&pid("1.1.2")).unwrap().label, "Orange");
    }
}
