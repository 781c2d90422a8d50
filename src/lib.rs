//! Zomboid Workshop installs Project Zomboid workshop items through SteamCMD.
//!
//! A run has three phases: fetch and unpack SteamCMD for the host platform,
//! invoke it once per workshop identifier, and copy every downloaded mod into
//! the game's `mods` directory.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zomboid_workshop::{read_identifiers, Error, PipelineBuilder};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let identifiers = read_identifiers(Path::new("server-mods.txt"))?;
//! let pipeline = PipelineBuilder::new().build()?;
//! let report = pipeline.run(&identifiers).await?;
//! println!("{} of {} items downloaded", report.succeeded(), identifiers.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`archive`] - zip and tar.gz extraction
//! - [`batch`] - sequential SteamCMD invocation with per-item [`Summary`]
//! - [`bootstrap`] - acquiring SteamCMD before the batch
//! - [`download`] - the single-shot HTTP transfer used by the bootstrap
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality
//! - [`layout`] - fixed paths below the install root
//! - [`list`] - identifier list discovery, selection and parsing
//! - [`pipeline`] - the [`Pipeline`] and [`PipelineBuilder`]
//! - [`platform`] - per-OS [`PlatformProfile`]
//! - [`progress`] - Progress bar styling and display management
//! - [`reconcile`] - copying payloads into the destination

pub mod archive;
pub mod batch;
pub mod bootstrap;
pub mod download;
pub mod error;
pub mod http;
pub mod layout;
pub mod list;
pub mod pipeline;
pub mod platform;
pub mod progress;
pub mod reconcile;

pub use archive::{extract, ArchiveKind};
pub use batch::{BatchInvoker, Status, Summary};
pub use bootstrap::Bootstrap;
pub use download::{Download, Fetcher};
pub use error::{Error, Result};
pub use http::{create_http_client, parse_proxy, HttpClientConfig};
pub use layout::{default_destination, Layout};
pub use list::{discover_lists, read_identifiers, select_list, Identifier};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineConfig, Report};
pub use platform::{Launch, OsKind, PlatformProfile, Tool};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use reconcile::{Installed, Reconciler};
