/// Rule module for route patterns
///
/// Parsing (`parser`) and compilation (`pattern`) of route rules.
/// Both are pure: the same rule text always yields the same result.

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{parse_rule, Segment, DEFAULT_CONVERTER};
pub use pattern::CompiledRule;
