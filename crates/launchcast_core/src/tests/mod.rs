//! Tests for the launch scenario engine
//!
//! Tests are organized by topic:
//! - `ramp` - Ramp curve shape and resampling properties
//! - `scenario` - Year-by-year rollup, investment window, break-even
//! - `builder_dsl` - Builder API and input bounds
//! - `export` - CSV output of run records

mod ramp;
