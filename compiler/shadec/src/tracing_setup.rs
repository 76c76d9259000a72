//! Subscriber installation for binaries and tests built on the front end.

use std::sync::Once;

/// Filter directives for shade's own logging, e.g. `shade_transform=trace`.
pub const LOG_ENV: &str = "SHADE_LOG";

/// When set, events are printed as an indented span tree instead of one
/// line each.
pub const LOG_TREE_ENV: &str = "SHADE_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Install a global subscriber filtered by `SHADE_LOG`, or `RUST_LOG` when
/// `SHADE_LOG` is unset. Does nothing when neither is set, or when another
/// subscriber is already installed. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var(LOG_ENV) {
            Ok(directives) => EnvFilter::new(directives),
            Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            Err(_) => return,
        };

        let tree = std::env::var_os(LOG_TREE_ENV).is_some();
        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let fmt_layer = (!tree).then(|| fmt::layer().with_target(true).with_level(true));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(tree_layer)
            .with(fmt_layer)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}
