//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use poimap_cli::CliError;

fn main() {
    env_logger::init();
    match poimap_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn report(err: &CliError) {
    eprintln!("poimap: {err}");
}
