use anyhow::{bail, Result};
use clap::Subcommand;
use mediastore_storage::{ObjectStorageClient, UploadHandle, UploadOutcome};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Command {
    /// Upload a file to an explicit key
    Upload {
        file: PathBuf,
        /// Object key, e.g. recordings/stream1.mp4
        #[arg(long)]
        key: String,
        /// Delete the local file once the upload completed
        #[arg(long)]
        delete_local: bool,
    },
    /// Upload a file under a type directory, keeping the local file
    Save {
        file: PathBuf,
        /// Type directory, e.g. recordings or previews
        #[arg(value_name = "TYPE")]
        type_dir: String,
    },
    /// List object keys under a prefix
    Ls {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Check whether an object exists
    Exists { key: String },
    /// Delete an object
    Rm { key: String },
}

pub async fn run(command: Command, client: &ObjectStorageClient) -> Result<()> {
    match command {
        Command::Upload { file, key, delete_local } => {
            wait_for(client.upload(&key, &file, delete_local)).await
        }
        Command::Save { file, type_dir } => wait_for(client.save(&file, &type_dir)?).await,
        Command::Ls { prefix } => {
            for key in client.list_objects(&prefix).await? {
                println!("{}", key);
            }
            Ok(())
        }
        Command::Exists { key } => {
            let exists = client.exists(&key).await?;
            println!("{}", exists);
            Ok(())
        }
        Command::Rm { key } => {
            client.delete(&key).await?;
            Ok(())
        }
    }
}

// The process would exit before a background upload finishes
async fn wait_for(handle: Option<UploadHandle>) -> Result<()> {
    let Some(handle) = handle else {
        tracing::warn!("Object storage is disabled, nothing was uploaded");
        return Ok(());
    };

    let key = handle.key().to_string();
    match handle.wait().await {
        UploadOutcome::Completed => Ok(()),
        UploadOutcome::Failed(error) => bail!("upload of {} failed: {}", key, error),
    }
}
