use crate::submit::port::{Ack, SubmitError, SubmitPort, SubmitRequest};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SubmitInvocation {
    pub run_id: u64,
    pub request: SubmitRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitCompletion {
    pub run_id: u64,
    pub request: SubmitRequest,
    pub result: Result<Ack, SubmitError>,
}

/// Runs port calls on worker threads and queues their results for the
/// owning form to pick up on its next tick.
pub struct SubmitExecutor {
    port: Arc<dyn SubmitPort>,
    completion_tx: Sender<SubmitCompletion>,
    completion_rx: Receiver<SubmitCompletion>,
}

impl SubmitExecutor {
    pub fn new(port: Arc<dyn SubmitPort>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmitCompletion>();
        Self {
            port,
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, invocation: SubmitInvocation) {
        let port = Arc::clone(&self.port);
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            // A panicking port still has to settle the form.
            let result = panic::catch_unwind(AssertUnwindSafe(|| port.submit(&invocation.request)))
                .unwrap_or_else(|_| {
                    tracing::error!(
                        form = %invocation.request.form,
                        run_id = invocation.run_id,
                        "submit port panicked"
                    );
                    Err(SubmitError::Abandoned)
                });
            let _ = completion_tx.send(SubmitCompletion {
                run_id: invocation.run_id,
                request: invocation.request,
                result,
            });
        });
    }

    pub fn drain_ready(&self) -> Vec<SubmitCompletion> {
        let mut out = Vec::<SubmitCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until the next completion arrives or `timeout` passes.
    pub fn wait_next(&self, timeout: Duration) -> Option<SubmitCompletion> {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
