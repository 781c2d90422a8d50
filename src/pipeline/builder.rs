//! Builder pattern implementation for creating [`Pipeline`] instances.
//!
//! ```rust,no_run
//! use zomboid_workshop::PipelineBuilder;
//! use std::path::PathBuf;
//!
//! # fn example() -> zomboid_workshop::Result<()> {
//! let pipeline = PipelineBuilder::new()
//!     .root(PathBuf::from("/opt/zomboid-workshop"))
//!     .destination(PathBuf::from("/srv/zomboid/mods"))
//!     .on_complete(|summary| println!("{} done", summary.identifier()))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::PipelineConfig, pipeline::Pipeline};
use crate::batch::{BatchInvoker, InvokeCallback, Summary};
use crate::download::Fetcher;
use crate::error::Result;
use crate::layout::{default_destination, Layout};
use crate::platform::PlatformProfile;
use crate::reconcile::Reconciler;
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::{path::PathBuf, sync::Arc};

/// A builder used to create a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PipelineBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = PipelineBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the install root holding `steamcmd/` and `mods/`.
    pub fn root(mut self, root: PathBuf) -> Self {
        self.config.root = Some(root);
        self
    }

    /// Sets the directory payloads are copied into.
    pub fn destination(mut self, destination: PathBuf) -> Self {
        self.config.destination = Some(destination);
        self
    }

    /// Overrides the platform profile chosen from the host OS.
    pub fn profile(mut self, profile: PlatformProfile) -> Self {
        self.config.profile = Some(profile);
        self
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Route the bootstrap transfer through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Add the http headers.
    ///
    /// You need to pass in a `HeaderMap`, not a `HeaderName`.
    /// `HeaderMap` is a set of http headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config
            .http
            .headers
            .get_or_insert_with(HeaderMap::new)
            .extend(headers);
        self
    }

    /// Add the http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.config
            .http
            .headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Set a callback to be called when each identifier has been processed.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        let callback: InvokeCallback = Box::new(callback);
        self.config.on_complete = Some(Arc::new(callback));
        self
    }

    /// Create the [`Pipeline`] with the specified options.
    ///
    /// Unset paths and the platform profile are resolved here, so environment
    /// errors surface before any work starts.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config;

        let layout = match config.root {
            Some(root) => Layout::new(root),
            None => Layout::from_current_exe()?,
        };
        let destination = match config.destination {
            Some(destination) => destination,
            None => default_destination()?,
        };
        let profile = match config.profile {
            Some(profile) => profile,
            None => PlatformProfile::current()?,
        };

        let fetcher = Fetcher::from_config(config.http, config.style_options.child().clone())?;
        let invoker = BatchInvoker::new(profile.clone(), layout.clone())
            .style_options(config.style_options)
            .with_callback(config.on_complete);
        let reconciler = Reconciler::new(layout.content_dir(), destination);

        Ok(Pipeline::new(profile, layout, fetcher, invoker, reconciler))
    }
}
