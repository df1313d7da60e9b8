use std::process::ExitCode;

use parse_comb_grammars::{cli, ini::ini};

fn main() -> ExitCode {
    env_logger::init();
    cli::main(std::env::args(), &ini())
}
