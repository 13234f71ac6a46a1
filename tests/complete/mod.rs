//! End-to-end completion tests
//!
//! - Dependency-property generation through the whole run
//! - Class completion
//! - Dispatch policies and configuration errors
//! - Result aggregation across entities and units
//! - Envelopes and output routing
//! - Stub declarations

pub mod tests_aggregation;
pub mod tests_class;
pub mod tests_configuration;
pub mod tests_dependency_properties;
pub mod tests_routing;
pub mod tests_stubs;
