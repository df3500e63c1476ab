use std::process::ExitCode;

fn main() -> ExitCode {
    tally::init();
    match tally::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
