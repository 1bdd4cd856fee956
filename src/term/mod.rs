//! Terminal emulation over the display.

/// Scrolling terminal writer.
pub mod writer;
