use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match readmission_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Readmission Risk failed to start");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
