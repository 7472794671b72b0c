//! CLI entry point for batch polyomino packing

use clap::Parser;
use tilefit::io::cli::{BatchRunner, Cli};
use tilefit::io::logging::init_logging;
use tilefit::io::report::render_summary;

fn main() -> tilefit::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let summary = BatchRunner::new(cli).run()?;
    print_summary(&render_summary(&summary));
    Ok(())
}

// The summary is the program's output; logs and progress go to stderr
#[allow(clippy::print_stdout)]
fn print_summary(text: &str) {
    print!("{text}");
}
