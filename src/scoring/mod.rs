// Signal scoring — the types that flow out of every detector and the
// aggregation step that turns them into a single classified result.

pub mod aggregate;
pub mod signal;

pub use aggregate::aggregate;
pub use signal::{AggregatedResult, RiskLevel, Signal};
