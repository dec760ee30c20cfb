mod cli;
mod commands;
mod infra;
mod render;

use nexus_watch::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
