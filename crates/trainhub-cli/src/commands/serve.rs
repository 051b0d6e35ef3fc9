//! Server command.

use trainhub_core::config::AppConfig;
use trainhub_core::error::AppError;

/// Run the HTTP server in the foreground.
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    trainhub_api::run_server(config).await
}
