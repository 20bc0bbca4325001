use std::process::ExitCode;

use nym_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    nym_driver::run(argument)
}
