use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::Level;

mod cli;
mod commands;

const EXIT_TROUBLE: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let color = std::io::stdout().is_terminal();
    let mut stdout = std::io::stdout().lock();
    match commands::run_command(&cli, &mut stdout, color) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(EXIT_TROUBLE)
        }
    }
}
