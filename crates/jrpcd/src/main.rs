use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match jrpcd::run_daemon().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("jrpcd: {error}");
            ExitCode::FAILURE
        }
    }
}
