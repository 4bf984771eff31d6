use crate::protocol::{
    AggregateJob, Envelope, FilterJob, OpKind, Response, SearchJob, SortJob, StatsJob,
    TransformJob,
};
use gridworks_core::{EngineConfig, Error, Result};
use gridworks_ops::{
    aggregate_records, compute_stats, filter_records, search_records, sort_records,
    transform_records,
};
use serde::de::DeserializeOwned;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Decodes a request's operation tag, runs the matching library function
/// and wraps the outcome in a response envelope. Every failure mode -
/// unknown tag, bad payload, over-limit request, or a panic inside an
/// operation - becomes a failure response; nothing escapes across the
/// worker boundary.
pub struct Dispatcher {
    config: EngineConfig,
}

impl Dispatcher {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, envelope: &Envelope) -> Response {
        let started = Instant::now();
        let correlation_id = envelope.correlation_id.clone();

        let kind = match OpKind::from_tag(&envelope.operation_tag) {
            Some(kind) => kind,
            None => {
                warn!(tag = %envelope.operation_tag, "unknown operation tag");
                return Response::failure(
                    correlation_id,
                    format!("Unknown operation tag: {}", envelope.operation_tag),
                    Some(elapsed_ms(started)),
                );
            }
        };

        // Isolation boundary: a panicking operation must not take the
        // worker loop down with it.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(kind, &envelope.payload)));
        let duration_ms = elapsed_ms(started);

        if duration_ms as u64 > self.config.slow_request_ms {
            warn!(op = kind.tag(), duration_ms, "slow request");
        }

        match outcome {
            Ok(Ok(result)) => {
                debug!(op = kind.tag(), duration_ms, "request completed");
                Response::ok(correlation_id, result, duration_ms)
            }
            Ok(Err(err)) => {
                warn!(op = kind.tag(), error = %err, "request failed");
                Response::failure(correlation_id, err.to_string(), Some(duration_ms))
            }
            Err(payload) => {
                let message = panic_message(payload);
                error!(op = kind.tag(), message = %message, "operation panicked");
                Response::failure(
                    correlation_id,
                    format!("Operation panicked: {}", message),
                    Some(duration_ms),
                )
            }
        }
    }

    fn execute(&self, kind: OpKind, payload: &serde_json::Value) -> Result<serde_json::Value> {
        match kind {
            OpKind::Sort => {
                let job: SortJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(sort_records(&job.records, &job.spec))
            }
            OpKind::Filter => {
                let job: FilterJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(filter_records(&job.records, &job.clauses))
            }
            OpKind::Aggregate => {
                let job: AggregateJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(aggregate_records(&job.records, &job.spec))
            }
            OpKind::Search => {
                let job: SearchJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(search_records(&job.records, &job.spec))
            }
            OpKind::Transform => {
                let job: TransformJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(transform_records(&job.records, &job.steps))
            }
            OpKind::Stats => {
                let job: StatsJob = self.decode(payload)?;
                self.config.check_record_count(job.records.len())?;
                encode(compute_stats(&job.records, &job.spec))
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, payload: &serde_json::Value) -> Result<T> {
        serde_json::from_value(payload.clone())
            .map_err(|e| Error::Protocol(format!("invalid payload: {}", e)))
    }
}

fn encode<T: serde::Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
