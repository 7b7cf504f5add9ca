//! Shows that `process::exit` skips pending scoped cleanup.
//!
//! Usage:
//!   exit-cleanup            # prints "ctor guard", "dtor guard", exits 0
//!   exit-cleanup --abrupt   # prints "ctor guard" only, exits non-zero

use clap::Parser;
use dispatch_bench::lifecycle::exit_cleanup::{run_scenario, ExitPath, Journal};

#[derive(Parser)]
#[command(name = "exit-cleanup")]
#[command(about = "Demonstrates that abrupt process exit skips scoped cleanup")]
struct Cli {
    /// Terminate with process::exit from inside the guarded scope
    #[arg(long)]
    abrupt: bool,
}

fn main() {
    dispatch_bench::utils::logging::init_tracing();
    let cli = Cli::parse();

    let path = if cli.abrupt {
        ExitPath::Abrupt
    } else {
        ExitPath::Return
    };

    let journal = Journal::echoing();
    run_scenario(path, &journal);
}
