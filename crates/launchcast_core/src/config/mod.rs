//! Scenario configuration
//!
//! - `builder` - fluent construction of validated assumptions
//! - `bounds` - input ranges and edit steps for each assumption

pub mod bounds;
pub mod builder;

pub use bounds::{FieldRange, InputBounds, ParameterField};
pub use builder::ScenarioBuilder;
