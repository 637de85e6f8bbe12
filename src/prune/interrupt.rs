//! Out-of-band stop signal for a running prune.
//!
//! One listener owns SIGINT for the whole process. Every part of the run that
//! can be stopped (the gap between entries, the delay between batches, a
//! pending prompt) observes the same flag, so a Ctrl-C is never lost between
//! prompts.

use tokio::sync::watch;

/// Raises the stop flag.
#[derive(Debug)]
pub struct InterruptHandle {
    tx: watch::Sender<bool>,
}

impl InterruptHandle {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes the stop flag.
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

impl Interrupt {
    pub fn channel() -> (InterruptHandle, Interrupt) {
        let (tx, rx) = watch::channel(false);
        (InterruptHandle { tx }, Interrupt { rx })
    }

    /// A flag nothing can raise.
    pub fn never() -> Self {
        Self::channel().1
    }

    /// Raise the flag on the first Ctrl-C. A second Ctrl-C exits at once,
    /// leaving the batch state behind for `--resume`.
    pub fn on_ctrl_c() -> Self {
        let (handle, interrupt) = Self::channel();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::warn!("cannot listen for Ctrl-C: {err}");
                return;
            }
            log::warn!("interrupted: finishing the current entry, then stopping");
            handle.trigger();

            if tokio::signal::ctrl_c().await.is_ok() {
                log::error!("interrupted twice, exiting without cleanup");
                std::process::exit(130);
            }
        });
        interrupt
    }

    pub fn is_set(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the flag is raised; pend forever if it never can be.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|set| *set).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::never()
    }
}
