use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;
use tokio::task;

use crate::error::{Error, Result};
use crate::prune::batch::Batch;
use crate::prune::confirm::{AFFIRMATIVE, Confirmer, RunPlan, is_affirmative};

/// Source of operator confirmations
#[derive(Debug, Clone, Copy)]
pub enum Prompt {
    /// Console-based interactive prompts using dialoguer
    Console,
    /// Line-based answers read from a non-terminal stdin
    Piped,
    /// Approve everything without asking (`--force`)
    AutoApprove,
}

impl Prompt {
    pub fn new(force: bool) -> Self {
        if force {
            Self::AutoApprove
        } else if io::stdin().is_terminal() {
            Self::Console
        } else {
            Self::Piped
        }
    }

    /// Ask for one line of input. `None` means end of input.
    ///
    /// Ctrl-C is not handled here: the run-wide [`Interrupt`] cancels the
    /// pending prompt.
    ///
    /// [`Interrupt`]: crate::prune::Interrupt
    async fn ask(&self, message: String) -> Result<Option<String>> {
        let read = match self {
            Prompt::Console => task::spawn_blocking(move || -> Result<Option<String>> {
                match Input::<String>::new()
                    .with_prompt(message)
                    .allow_empty(true)
                    .interact_text()
                {
                    Ok(answer) => Ok(Some(answer)),
                    Err(dialoguer::Error::IO(err))
                        if matches!(
                            err.kind(),
                            io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
                        ) =>
                    {
                        Ok(None)
                    }
                    Err(err) => Err(Error::InvalidArgument {
                        message: err.to_string(),
                    }),
                }
            }),
            Prompt::Piped => task::spawn_blocking(move || -> Result<Option<String>> {
                let mut stdout = io::stdout();
                write!(stdout, "{message}: ")?;
                stdout.flush()?;
                let mut line = String::new();
                let read = io::stdin().lock().read_line(&mut line)?;
                println!();
                Ok((read > 0).then_some(line))
            }),
            Prompt::AutoApprove => return Ok(Some(String::new())),
        };

        read.await.map_err(join_error)?
    }
}

impl Confirmer for Prompt {
    async fn confirm_run(&mut self, plan: &RunPlan<'_>) -> Result<bool> {
        if let Prompt::AutoApprove = self {
            log::warn!(
                "--force: deleting {} entries under {} without confirmation",
                plan.total,
                plan.target
            );
            return Ok(true);
        }
        let message = format!(
            "Type '{AFFIRMATIVE}' to delete {} entries under {} in {} batch(es)",
            plan.total, plan.target, plan.batches
        );
        Ok(self
            .ask(message)
            .await?
            .is_some_and(|answer| is_affirmative(&answer)))
    }

    async fn confirm_batch(&mut self, batch: &Batch, total_batches: usize) -> Result<bool> {
        if let Prompt::AutoApprove = self {
            return Ok(true);
        }
        let message = format!(
            "Press Enter to delete batch {}/{} ({} entries, first {}), Ctrl-C to stop",
            batch.index,
            total_batches,
            batch.len(),
            batch.entries.first().map(String::as_str).unwrap_or("-")
        );
        Ok(self.ask(message).await?.is_some())
    }
}

fn join_error(err: task::JoinError) -> Error {
    Error::Io {
        source: io::Error::other(err.to_string()),
    }
}
