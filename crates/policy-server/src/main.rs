//! Main entry point for the `policy` command.

use clap::Parser;
use policy_persistence::{ApplicationReader, ApplicationWriter, DatabaseClient};
use policy_server::cli::{Cli, Command};
use policy_server::model::Configuration;
use policy_server::startup;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let configuration = Configuration::load(&cli)?;

    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    // Collaborators are built once and shared by every command.
    let db = configuration.database_connection().await?;
    let client = DatabaseClient::new(db);
    let approval_vendor = startup::approval_vendor(&configuration.approval_vendor_config())?;
    let reader = ApplicationReader::new(client.clone());
    let writer = ApplicationWriter::new(client, approval_vendor);

    let result = match &cli.command {
        Command::Apps(command) => command.run(&reader, &writer).await,
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
