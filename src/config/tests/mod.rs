//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, event, and bot name resolution tests

mod helpers;
