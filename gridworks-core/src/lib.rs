pub mod config;
pub mod error;
pub mod record;
pub mod value;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use record::Record;
pub use value::Value;
