//! `policy` command line

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use policy_common::{ApprovalStatus, PolicyError};
use policy_persistence::{AppFilter, Application, ApplicationReader, ApplicationWriter};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "policy", about = "Application policy storage")]
pub struct Cli {
    /// Configuration file (default `conf/application.yml`, optional)
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read and store applications
    #[command(subcommand)]
    Apps(AppsCommand),
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// Print stored applications as JSON
    List {
        #[arg(long)]
        id: Option<i32>,
        #[arg(long)]
        uuid: Option<String>,
        #[arg(long)]
        status: Option<ApprovalStatus>,
    },
    /// Store one application read from a JSON file
    Store { file: PathBuf },
}

impl AppsCommand {
    pub async fn run(
        &self,
        reader: &ApplicationReader,
        writer: &ApplicationWriter,
    ) -> anyhow::Result<String> {
        match self {
            AppsCommand::List { id, uuid, status } => {
                let filter = AppFilter {
                    id: *id,
                    uuid: uuid.clone(),
                    approval_status: *status,
                };
                let apps = reader.find_apps(&filter).await?;
                if apps.is_empty()
                    && let Some(uuid) = uuid
                {
                    return Err(PolicyError::ApplicationNotExist(uuid.clone()).into());
                }
                to_json(&apps)
            }
            AppsCommand::Store { file } => {
                let app = read_application(file)?;
                let stored = writer.store_app(&app).await?;
                to_json(&stored)
            }
        }
    }
}

/// Parse one application write-object from a JSON file
pub fn read_application(path: &Path) -> anyhow::Result<Application> {
    let contents = std::fs::read_to_string(path)?;
    let app = serde_json::from_str(&contents).map_err(|e| {
        PolicyError::IllegalArgument(format!("{}: {}", path.display(), e))
    })?;
    Ok(app)
}

fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PolicyError::InternalError(e.to_string()).into())
}
