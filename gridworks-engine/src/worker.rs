use crate::dispatcher::Dispatcher;
use crate::protocol::{Envelope, Response};
use gridworks_core::EngineConfig;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

/// The isolated execution context hosting a dispatcher. Requests and
/// responses cross as serialized JSON strings over channels, so nothing
/// is shared by reference with the caller; within the task, requests run
/// to completion in arrival order (FIFO per worker instance).
pub struct WorkerRuntime;

/// Caller-side sending half of a worker's request channel.
#[derive(Clone)]
pub struct WorkerHandle {
    requests: UnboundedSender<String>,
}

impl WorkerHandle {
    /// Queues one serialized request. Fails only if the worker task has
    /// stopped.
    pub fn send(&self, raw: String) -> gridworks_core::Result<()> {
        self.requests
            .send(raw)
            .map_err(|_| gridworks_core::Error::Protocol("worker has shut down".to_string()))
    }
}

impl WorkerRuntime {
    /// Spawns the worker task and returns the request handle plus the
    /// stream of serialized responses. The task exits when every request
    /// sender is dropped.
    pub fn spawn(config: EngineConfig) -> (WorkerHandle, UnboundedReceiver<String>) {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<String>();
        let (response_tx, response_rx) = mpsc::unbounded_channel::<String>();
        let dispatcher = Dispatcher::new(config);

        tokio::spawn(async move {
            info!("worker runtime started");
            while let Some(raw) = request_rx.recv().await {
                let response = match serde_json::from_str::<Envelope>(&raw) {
                    Ok(envelope) => dispatcher.handle(&envelope),
                    Err(e) => {
                        // An unparseable request has no recoverable
                        // correlation id; answer with an empty one so the
                        // fault is at least visible on the response stream.
                        error!(error = %e, "malformed request envelope");
                        Response::failure(
                            String::new(),
                            format!("Malformed request: {}", e),
                            None,
                        )
                    }
                };
                match serde_json::to_string(&response) {
                    Ok(serialized) => {
                        if response_tx.send(serialized).is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(error = %e, "failed to serialize response"),
                }
            }
            info!("worker runtime stopped");
        });

        (WorkerHandle { requests: request_tx }, response_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn round_trip(handle: &WorkerHandle, rx: &mut UnboundedReceiver<String>, envelope: serde_json::Value) -> Response {
        handle.send(envelope.to_string()).unwrap();
        let raw = rx.recv().await.unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_fifo_processing_and_correlation() {
        let (handle, mut rx) = WorkerRuntime::spawn(EngineConfig::default());
        for id in ["first", "second", "third"] {
            let envelope = json!({
                "operationTag": "FILTER",
                "correlationId": id,
                "payload": {"records": [], "clauses": []}
            });
            handle.send(envelope.to_string()).unwrap();
        }
        for expected in ["first", "second", "third"] {
            let raw = rx.recv().await.unwrap();
            let response: Response = serde_json::from_str(&raw).unwrap();
            assert_eq!(response.correlation_id, expected);
            assert!(response.success);
        }
    }

    #[tokio::test]
    async fn test_worker_survives_failed_request() {
        let (handle, mut rx) = WorkerRuntime::spawn(EngineConfig::default());

        let bad = json!({"operationTag": "SHUFFLE", "correlationId": "bad", "payload": {}});
        let response = round_trip(&handle, &mut rx, bad).await;
        assert!(!response.success);

        let good = json!({
            "operationTag": "SEARCH",
            "correlationId": "good",
            "payload": {"records": [{"name": "Alice"}], "query": "ali", "fields": ["name"], "fuzzy": false}
        });
        let response = round_trip(&handle, &mut rx, good).await;
        assert!(response.success, "worker must keep serving after a failure");
        assert_eq!(response.result.unwrap().as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_request_yields_failure_response() {
        let (handle, mut rx) = WorkerRuntime::spawn(EngineConfig::default());
        handle.send("this is not json".to_string()).unwrap();
        let raw = rx.recv().await.unwrap();
        let response: Response = serde_json::from_str(&raw).unwrap();
        assert!(!response.success);
        assert!(response.correlation_id.is_empty());
        assert!(response.error_message.unwrap().contains("Malformed"));
    }
}
