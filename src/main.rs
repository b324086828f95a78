use std::process;

use flattener::cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    init_logging(&args);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flags
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
