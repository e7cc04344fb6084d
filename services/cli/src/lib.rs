mod cli;
mod demo;
mod infra;

use trial_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
