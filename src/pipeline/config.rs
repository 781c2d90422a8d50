//! Configuration structures and defaults for the pipeline.
//!
//! Every path and the platform profile are optional here; whatever is left
//! unset is resolved from the environment when the pipeline is built.

use crate::batch::InvokeCallback;
use crate::http::HttpClientConfig;
use crate::platform::PlatformProfile;
use crate::StyleOptions;

use std::path::PathBuf;
use std::sync::Arc;

/// Configuration structure for the pipeline.
#[derive(Clone, Default)]
pub struct PipelineConfig {
    /// Install root holding `steamcmd/` and `mods/`. Defaults to the
    /// directory of the running program.
    pub root: Option<PathBuf>,
    /// Reconciliation target. Defaults to `<home>/Zomboid/mods`.
    pub destination: Option<PathBuf>,
    /// Platform strategy. Defaults to the host operating system.
    pub profile: Option<PlatformProfile>,
    /// Progress bar style options.
    pub style_options: StyleOptions,
    /// Proxy and headers for the bootstrap transfer.
    pub http: HttpClientConfig,
    /// Callback for when each identifier has been processed.
    pub on_complete: Option<Arc<InvokeCallback>>,
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("root", &self.root)
            .field("destination", &self.destination)
            .field("profile", &self.profile)
            .field("style_options", &self.style_options)
            .field("http", &self.http)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
