use std::process::ExitCode;

fn main() -> ExitCode {
    gocards::cli::run()
}
