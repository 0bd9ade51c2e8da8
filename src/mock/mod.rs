//! Mocks for the external collaborators, useful for testing.

pub mod transport;
