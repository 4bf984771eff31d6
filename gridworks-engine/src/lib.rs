// Gridworks engine - the message-passing boundary around the operation
// library. The worker runtime owns a dispatcher and processes serialized
// requests FIFO; the host proxy correlates responses back to callers by id.

pub mod dispatcher;
pub mod protocol;
pub mod proxy;
pub mod worker;

pub use dispatcher::Dispatcher;
pub use protocol::{Envelope, OpKind, Response};
pub use proxy::EngineProxy;
pub use worker::WorkerRuntime;
