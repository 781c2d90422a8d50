//! Pipeline module orchestrating bootstrap, batch download and reconciliation.
//!
//! - `pipeline` - the [`Pipeline`] run and its [`Report`]
//! - `builder` - [`PipelineBuilder`] for configuration
//! - `config` - [`PipelineConfig`] and its defaults
//!
//! ```rust,no_run
//! use zomboid_workshop::{Identifier, PipelineBuilder};
//!
//! # async fn example() -> zomboid_workshop::Result<()> {
//! let pipeline = PipelineBuilder::new().build()?;
//! let report = pipeline.run(&[Identifier::from("2169435993")]).await?;
//! println!("{} mods installed", report.installed.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use builder::PipelineBuilder;
pub use config::PipelineConfig;
pub use pipeline::{Pipeline, Report};
