//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use ecoroute_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match ecoroute_cli::run() {
        Ok(()) => {}
        // Clap formats help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("ecoroute: {err}");
            std::process::exit(1);
        }
    }
}
