use std::process::ExitCode;

fn main() -> ExitCode {
    pgportal::cli::run()
}
