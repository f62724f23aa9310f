use chime_fixed::Fixed;
use chime_ports::Clock;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{CancellationToken, Result, Strike, StrikeError};

/// A schedule running on its own task
///
/// Struck values arrive through [`recv`](StrikeHandle::recv). Dropping the
/// handle cancels the schedule.
#[derive(Debug)]
pub struct StrikeHandle {
    id: Uuid,
    receiver: mpsc::Receiver<Fixed>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<C: Clock + 'static> Strike<C> {
    /// Run this schedule on a tokio task, buffering up to `capacity` values
    ///
    /// # Panics
    /// If `capacity` is zero, or when called outside a tokio runtime.
    pub fn spawn(self, capacity: usize) -> StrikeHandle {
        let (sender, receiver) = mpsc::channel(capacity);
        let id = self.id();
        let token = self.token().clone();
        let task = tokio::spawn(self.run(sender));
        StrikeHandle {
            id,
            receiver,
            token,
            task: Some(task),
        }
    }

    async fn run(mut self, sender: mpsc::Sender<Fixed>) {
        info!("Strike {} started on {}", self.id(), self.clock().name());
        while let Some(value) = self.next().await {
            tokio::select! {
                sent = sender.send(value) => {
                    if sent.is_err() {
                        debug!("Strike {} receiver dropped", self.id());
                        self.cancel();
                        break;
                    }
                }
                _ = self.token().cancelled() => break,
            }
        }
        info!("Strike {} stopped", self.id());
    }
}

impl StrikeHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next struck value, `None` once the schedule has finished
    pub async fn recv(&mut self) -> Option<Fixed> {
        self.receiver.recv().await
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the task to finish without cancelling it
    pub async fn join(mut self) -> Result<()> {
        match self.task.take() {
            Some(task) => task.await.map_err(|e| StrikeError::Task(e.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for StrikeHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
