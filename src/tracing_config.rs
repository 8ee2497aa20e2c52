//! Tracing setup for the `sigtype` binary.
//!
//! The subscriber is only installed when `SIGTYPE_LOG` (or `RUST_LOG`) is
//! set. `SIGTYPE_LOG_FORMAT=json` switches to one JSON object per event.
//! Output always goes to stderr so it never mixes with reports on stdout.
//!
//! ```bash
//! SIGTYPE_LOG=debug sigtype suite -i 'fixtures/*.json'
//! SIGTYPE_LOG=sigtype::suite=debug SIGTYPE_LOG_FORMAT=json sigtype suite -i fixtures/unions.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("SIGTYPE_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `SIGTYPE_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("SIGTYPE_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

pub fn init_tracing() {
    let has_own_log = std::env::var("SIGTYPE_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
