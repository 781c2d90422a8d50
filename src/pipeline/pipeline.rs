//! The acquisition-and-reconciliation run.

use crate::batch::{BatchInvoker, Summary};
use crate::download::Fetcher;
use crate::error::Result;
use crate::layout::Layout;
use crate::list::Identifier;
use crate::platform::PlatformProfile;
use crate::reconcile::{Installed, Reconciler};

use std::path::Path;
use tracing::{info, warn};

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct Report {
    /// One summary per requested identifier, in list order.
    pub summaries: Vec<Summary>,
    /// Payloads copied into the destination.
    pub installed: Vec<Installed>,
}

impl Report {
    pub fn succeeded(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_success()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &Summary> {
        self.summaries.iter().filter(|s| !s.is_success())
    }
}

/// Bootstrap, then batch download, then reconcile.
#[derive(Debug, Clone)]
pub struct Pipeline {
    profile: PlatformProfile,
    layout: Layout,
    fetcher: Fetcher,
    invoker: BatchInvoker,
    reconciler: Reconciler,
}

impl Pipeline {
    pub(crate) fn new(
        profile: PlatformProfile,
        layout: Layout,
        fetcher: Fetcher,
        invoker: BatchInvoker,
        reconciler: Reconciler,
    ) -> Self {
        Self {
            profile,
            layout,
            fetcher,
            invoker,
            reconciler,
        }
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn destination(&self) -> &Path {
        self.reconciler.destination()
    }

    /// Run every phase in sequence.
    ///
    /// Bootstrap and reconciliation errors abort the run. Invocation failures
    /// only show up as failed summaries in the [`Report`].
    pub async fn run(&self, identifiers: &[Identifier]) -> Result<Report> {
        info!("Preparing SteamCMD for {:?}", self.profile.kind());
        self.profile
            .bootstrap()
            .run(&self.fetcher, &self.layout.tool_dir())
            .await?;

        let summaries = self.invoker.run(identifiers).await;
        let succeeded = summaries.iter().filter(|s| s.is_success()).count();
        if succeeded < summaries.len() {
            warn!(
                "{} of {} workshop items failed to download",
                summaries.len() - succeeded,
                summaries.len()
            );
        }
        info!("Downloaded {} of {} workshop items", succeeded, summaries.len());

        info!("Copying mods into {:?}", self.reconciler.destination());
        let installed = self.reconciler.run()?;
        info!("Installed {} mods", installed.len());

        Ok(Report {
            summaries,
            installed,
        })
    }
}
