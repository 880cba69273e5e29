use std::process::ExitCode;

fn main() -> ExitCode {
    valstore_cli::run()
}
