use clap::Parser;
use prelint::args::Args;
use prelint::status::ExitStatus;
use std::process::ExitCode;

fn main() -> ExitCode {
    match prelint::run(Args::parse()) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitStatus::Error.into()
        }
    }
}
