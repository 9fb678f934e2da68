// main.rs
//
// Writes hybrid_vcarve.png to the working directory. Extra log
// directives can be passed through RUST_LOG.

use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use vcarve_diagram::{DiagramConfig, generate_hybrid_visual};

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for this crate.
    let filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("vcarve_diagram=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match generate_hybrid_visual(&DiagramConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("failed to generate diagram: {err}");
            ExitCode::FAILURE
        },
    }
}
