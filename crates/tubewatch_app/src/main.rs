mod app;
mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::initialize(cli.debug, cli.log_file.as_deref());

    match app::run(&cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(2)
        }
    }
}
