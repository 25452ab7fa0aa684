//! Vela backend driver.
//!
//! Lowers whole declarations through `vela_lower`: the method header's
//! result type comes from the refinement resolver, the body from the
//! statement lowerer. Recoverable problems from every declaration are
//! gathered into one [`DiagnosticQueue`](vela_diagnostic::DiagnosticQueue)
//! and handed back sorted by [`Backend::finish`].
//!
//! # Debugging
//!
//! Set `VELA_LOG` to an `EnvFilter` directive (`VELA_LOG=vela_lower=trace`)
//! and call [`init_tracing`] to see what the lowerers decide. Add
//! `VELA_LOG_TREE=1` for indented span output.

mod backend;

pub use backend::Backend;

use std::sync::Once;

/// Filter directives for the tracing subscriber.
pub const LOG_VAR: &str = "VELA_LOG";

/// Set to `1` for hierarchical output.
pub const LOG_TREE_VAR: &str = "VELA_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `VELA_LOG` is set, and
/// leaves an already installed global subscriber alone.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var(LOG_VAR) else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let registry = tracing_subscriber::registry().with(filter);
        let installed = if std::env::var(LOG_TREE_VAR).is_ok_and(|v| v == "1") {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()
        };
        if installed.is_err() {
            tracing::debug!("a global subscriber is already installed");
        }
    });
}
