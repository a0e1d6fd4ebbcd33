use tokio::task::JoinHandle;

/// A handle to a background task that can be used to control it
#[derive(Debug)]
pub struct DaemonHandle {
    join_handle: JoinHandle<anyhow::Result<()>>,
}

impl DaemonHandle {
    pub(super) fn new(join_handle: JoinHandle<anyhow::Result<()>>) -> Self {
        Self { join_handle }
    }

    /// Stop the running task
    pub fn stop(&mut self) {
        self.join_handle.abort();
    }

    /// Whether the task is currently (still) running
    pub fn is_running(&self) -> bool {
        !self.join_handle.is_finished()
    }

    /// Join the execution of this background task into the currently running task
    pub async fn join(self) -> anyhow::Result<()> {
        match self.join_handle.await {
            Ok(task_result) => task_result,
            Err(tokio_err) => Err(tokio_err.into()),
        }
    }
}
