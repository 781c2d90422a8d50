//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - the per-item bar driven by the batch invoker

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
