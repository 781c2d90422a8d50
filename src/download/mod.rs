//! Download module containing the fetch side of the bootstrap.
//!
//! - [`download`] - the [`Download`] struct and URL handling
//! - [`fetch`] - the [`Fetcher`] writing a response body to disk
//!
//! # Examples
//!
//! ```rust,no_run
//! use zomboid_workshop::download::{Download, Fetcher};
//! use zomboid_workshop::http::HttpClientConfig;
//! use zomboid_workshop::progress::ProgressBarOpts;
//! use std::path::Path;
//!
//! # async fn example() -> zomboid_workshop::Result<()> {
//! let fetcher = Fetcher::from_config(HttpClientConfig::default(), ProgressBarOpts::hidden())?;
//! let download = Download::try_from("https://steamcdn-a.akamaihd.net/client/installer/steamcmd.zip")?;
//! fetcher.fetch(&download, Path::new("steamcmd.zip")).await?;
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod download;
pub mod fetch;

pub use download::Download;
pub use fetch::Fetcher;
