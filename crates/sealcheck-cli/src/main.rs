use clap::Parser;

mod cli;

use cli::args::Cli;
use sealcheck_evidence::EXIT_FAIL;

fn main() {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);
    let code = match cli::verify::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            EXIT_FAIL
        }
    };
    std::process::exit(code);
}
