//! Common utilities for integration tests


// Re-export commonly used items
pub use fixtures::TestRepo;
