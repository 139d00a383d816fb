//! Background worker for logging runs without blocking the UI.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use super::row::RunLogRow;
use super::sheets::{ExternalServiceError, RunSink};

/// Request sent to the background worker
#[derive(Debug)]
pub enum LogRequest {
    Append { row: RunLogRow },
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug, PartialEq)]
pub enum LogResponse {
    Logged,
    Failed(ExternalServiceError),
}

/// Appends rows to a [`RunSink`] on a separate thread
pub struct RemoteLogWorker {
    request_tx: Sender<LogRequest>,
    response_rx: Receiver<LogResponse>,
    thread: Option<JoinHandle<()>>,
}

impl RemoteLogWorker {
    pub fn new(sink: Box<dyn RunSink>) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        let thread = thread::spawn(move || {
            run(sink.as_ref(), &request_rx, &response_tx);
        });

        Self {
            request_tx,
            response_rx,
            thread: Some(thread),
        }
    }

    /// Queue a row; returns false when the worker has stopped
    pub fn send(&self, row: RunLogRow) -> bool {
        self.request_tx.send(LogRequest::Append { row }).is_ok()
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<LogResponse> {
        self.response_rx.try_recv().ok()
    }

    pub fn shutdown(&self) {
        let _ = self.request_tx.send(LogRequest::Shutdown);
    }
}

impl Drop for RemoteLogWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run(sink: &dyn RunSink, request_rx: &Receiver<LogRequest>, response_tx: &Sender<LogResponse>) {
    while let Ok(request) = request_rx.recv() {
        match request {
            LogRequest::Shutdown => break,
            LogRequest::Append { row } => {
                let response = match sink.append(&row) {
                    Ok(()) => {
                        tracing::info!("Run logged");
                        LogResponse::Logged
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Run logging failed");
                        LogResponse::Failed(e)
                    }
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::context::RunContext;
    use launchcast_core::{ScenarioAssumptions, compute};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    struct MemorySink {
        rows: Arc<Mutex<Vec<RunLogRow>>>,
        fail: bool,
    }

    impl RunSink for MemorySink {
        fn append(&self, row: &RunLogRow) -> Result<(), ExternalServiceError> {
            if self.fail {
                return Err(ExternalServiceError::Status {
                    code: 403,
                    body: "denied".to_string(),
                });
            }
            self.rows.lock().unwrap().push(row.clone());
            Ok(())
        }
    }

    fn sample_row() -> RunLogRow {
        let record = compute(&ScenarioAssumptions::default()).unwrap();
        RunLogRow::new(&record, &RunContext::default(), "test", "ts".to_string())
    }

    fn wait_for(worker: &RemoteLogWorker) -> LogResponse {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(response) = worker.try_recv() {
                return response;
            }
            assert!(Instant::now() < deadline, "worker did not respond");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_rows_reach_sink() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let worker = RemoteLogWorker::new(Box::new(MemorySink {
            rows: rows.clone(),
            fail: false,
        }));

        assert!(worker.send(sample_row()));
        assert_eq!(wait_for(&worker), LogResponse::Logged);
        drop(worker);

        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells()[1], "test");
    }

    #[test]
    fn test_failure_is_reported() {
        let worker = RemoteLogWorker::new(Box::new(MemorySink {
            rows: Arc::default(),
            fail: true,
        }));

        worker.send(sample_row());
        match wait_for(&worker) {
            LogResponse::Failed(ExternalServiceError::Status { code, .. }) => {
                assert_eq!(code, 403)
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
