use docker_registry_api::cli::{Args, RunStatus, Runner};
use docker_registry_api::logging::{Logger, init_tracing};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let runner = match Runner::from_args(&args) {
        Ok(runner) => runner,
        Err(e) => {
            Logger::default().error(&e.to_string());
            return ExitCode::from(2);
        }
    };

    match runner.run().await {
        Ok(RunStatus::Completed) => ExitCode::SUCCESS,
        Ok(RunStatus::Failed) => ExitCode::FAILURE,
        Err(e) => {
            Logger::default().error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
