use anyhow::{bail, Result};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Brings a stuck satellite back
#[async_trait::async_trait]
pub trait Recovery: Send + Sync {
    async fn recover(&self) -> Result<(), RecoveryError>;
}

/// Recovers by running an external command, `systemctl restart satellite` by default
pub struct CommandRecovery {
    program: String,
    args: Vec<String>,
}

impl CommandRecovery {
    pub fn new(command: &[String]) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("Recovery command must not be empty");
        };

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait::async_trait]
impl Recovery for CommandRecovery {
    async fn recover(&self) -> Result<(), RecoveryError> {
        info!("Running {}", self.command_line());

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| RecoveryError::Spawn {
                command: self.command_line(),
                source,
            })?;

        if !status.success() {
            return Err(RecoveryError::Failed {
                command: self.command_line(),
                status,
            });
        }

        Ok(())
    }
}
