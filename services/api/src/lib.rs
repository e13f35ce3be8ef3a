mod assess;
mod cli;
mod infra;
mod routes;
mod server;

use mindful_assessment::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
