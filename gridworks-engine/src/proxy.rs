use crate::protocol::{Envelope, OpKind, Response};
use crate::worker::{WorkerHandle, WorkerRuntime};
use dashmap::DashMap;
use gridworks_core::{EngineConfig, Error, Record, Result};
use gridworks_ops::{AggregateSpec, FieldSummary, FilterClause, SearchSpec, SortSpec, StatsSpec, TransformStep};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::oneshot;
use uuid::Uuid;
use tracing::warn;

/// Host-side handle to a worker. Each call gets a fresh UUID correlation
/// id and a oneshot parked in the pending table; a router task resolves
/// the matching entry when the worker answers. Many requests may be in
/// flight at once even though the worker serves them one at a time.
///
/// There is no cancellation: dropping the returned future abandons the
/// pending entry and the eventual response is discarded by the router.
pub struct EngineProxy {
    worker: WorkerHandle,
    pending: Arc<DashMap<String, oneshot::Sender<Response>>>,
}

impl EngineProxy {
    pub fn connect(config: EngineConfig) -> Self {
        let (worker, mut responses) = WorkerRuntime::spawn(config);
        let pending: Arc<DashMap<String, oneshot::Sender<Response>>> = Arc::new(DashMap::new());

        let table = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(raw) = responses.recv().await {
                let response: Response = match serde_json::from_str(&raw) {
                    Ok(response) => response,
                    Err(e) => {
                        warn!(error = %e, "discarding undecodable response");
                        continue;
                    }
                };
                match table.remove(&response.correlation_id) {
                    Some((_, tx)) => {
                        // A dropped receiver means the caller gave up;
                        // late responses are ignored by design.
                        let _ = tx.send(response);
                    }
                    None => warn!(
                        correlation_id = %response.correlation_id,
                        "response without a pending request"
                    ),
                }
            }
        });

        Self { worker, pending }
    }

    /// Sends one request and waits for its correlated response. The
    /// response may report failure; that is surfaced as a normal value
    /// here so callers can distinguish operation failures from a dead
    /// worker.
    pub async fn submit(&self, kind: OpKind, payload: serde_json::Value) -> Result<Response> {
        let correlation_id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending.insert(correlation_id.clone(), tx);

        let envelope = Envelope {
            operation_tag: kind.tag().to_string(),
            correlation_id: correlation_id.clone(),
            payload,
        };
        let raw = serde_json::to_string(&envelope)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        if let Err(e) = self.worker.send(raw) {
            self.pending.remove(&correlation_id);
            return Err(e);
        }

        rx.await.map_err(|_| {
            Error::Protocol("worker dropped the request without responding".to_string())
        })
    }

    pub async fn sort(&self, records: &[Record], spec: &SortSpec) -> Result<Vec<Record>> {
        self.call(OpKind::Sort, json!({ "records": records, "key": spec.key, "direction": spec.direction, "valueType": spec.value_type }))
            .await
    }

    pub async fn filter(&self, records: &[Record], clauses: &[FilterClause]) -> Result<Vec<Record>> {
        self.call(OpKind::Filter, json!({ "records": records, "clauses": clauses }))
            .await
    }

    pub async fn aggregate(&self, records: &[Record], spec: &AggregateSpec) -> Result<Vec<Record>> {
        self.call(
            OpKind::Aggregate,
            json!({ "records": records, "groupByKey": spec.group_by_key, "aggregations": spec.aggregations }),
        )
        .await
    }

    pub async fn search(&self, records: &[Record], spec: &SearchSpec) -> Result<Vec<Record>> {
        self.call(
            OpKind::Search,
            json!({ "records": records, "query": spec.query, "fields": spec.fields, "fuzzy": spec.fuzzy }),
        )
        .await
    }

    pub async fn transform(&self, records: &[Record], steps: &[TransformStep]) -> Result<Vec<Record>> {
        self.call(OpKind::Transform, json!({ "records": records, "steps": steps }))
            .await
    }

    pub async fn stats(&self, records: &[Record], spec: &StatsSpec) -> Result<Vec<FieldSummary>> {
        self.call(OpKind::Stats, json!({ "records": records, "fields": spec.fields }))
            .await
    }

    async fn call<T: DeserializeOwned>(&self, kind: OpKind, payload: serde_json::Value) -> Result<T> {
        let response = self.submit(kind, payload).await?;
        if !response.success {
            return Err(Error::Operation(
                response
                    .error_message
                    .unwrap_or_else(|| "unspecified engine failure".to_string()),
            ));
        }
        let result = response
            .result
            .ok_or_else(|| Error::Protocol("success response carried no result".to_string()))?;
        serde_json::from_value(result).map_err(|e| Error::Serialization(e.to_string()))
    }
}
