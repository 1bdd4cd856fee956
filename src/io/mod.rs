//! Input/output: the i2c bus transport and subprocess plumbing.

/// Subprocess spawn and output pumping.
pub mod child;
/// Linux i2c-dev transport and the transport trait.
pub mod i2c;
/// Recording transport for tests.
pub mod mock;
