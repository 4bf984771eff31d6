// Gridworks operation library - six stateless algorithms over record sets.
// Each is a pure function from (records, spec) to a fresh result; input
// collections are never mutated.

pub mod aggregate;
pub mod filter;
pub mod search;
pub mod sort;
pub mod spec;
pub mod stats;
pub mod transform;

pub use aggregate::aggregate_records;
pub use filter::filter_records;
pub use search::search_records;
pub use sort::sort_records;
pub use spec::{
    AggregateOp, AggregateSpec, Aggregation, Direction, FilterClause, FilterOp, SearchSpec,
    SortSpec, StatsSpec, TransformOp, TransformStep, ValueType,
};
pub use stats::{compute_stats, FieldSummary};
pub use transform::transform_records;
