//! Command executor dispatching parsed CLI commands to their handlers

use std::sync::Arc;

use super::handlers::{
    ConfigureCommandHandler, PublishCommandHandler, ShowCommandHandler,
    TestConnectionCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::error::NotifierResult;
use crate::models::BuildOutcome;
use crate::services::NotifierDescriptor;

/// Execute a CLI command against the loaded notifier
///
/// # Returns
/// `Ok(false)` when the command ran but reported a failure (a failed
/// connection test), `Ok(true)` otherwise
///
/// # Errors
/// Validation and storage errors from `configure`, storage errors from `publish`
pub async fn execute_command(cli: &Cli, descriptor: Arc<NotifierDescriptor>) -> NotifierResult<bool> {
    match &cli.command {
        Commands::Configure {
            connection,
            recipients,
            include_url,
            notify_every_build,
            hudson_url,
            form,
        } => {
            let form = match form {
                Some(form) => form.clone(),
                None => ConfigureCommandHandler::form_from_args(
                    connection,
                    recipients.as_deref(),
                    *include_url,
                    *notify_every_build,
                    hudson_url.as_deref(),
                ),
            };
            ConfigureCommandHandler::new(descriptor).execute(&form)?;
            Ok(true)
        }
        Commands::TestConnection { connection } => {
            let check = TestConnectionCommandHandler::new(descriptor)
                .execute(connection)
                .await;
            Ok(check.is_ok())
        }
        Commands::Publish {
            project,
            result,
            previous,
            build_path,
            recipients,
        } => {
            let mut outcome = BuildOutcome::new(project.clone(), result.clone(), build_path.clone());
            if let Some(previous) = previous {
                outcome = outcome.with_previous(previous.clone());
            }
            PublishCommandHandler::new(descriptor)
                .execute(&outcome, recipients.clone())
                .await;
            Ok(true)
        }
        Commands::Show => {
            ShowCommandHandler::new(descriptor).execute();
            Ok(true)
        }
    }
}
