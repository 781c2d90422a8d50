//! Sequential SteamCMD invocation over an identifier list.

use super::summary::{Status, Summary};
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::list::Identifier;
use crate::platform::PlatformProfile;
use crate::progress::{ProgressDisplay, StyleOptions};

use std::fmt;
use std::process::Stdio;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback type for invocation completion events.
pub type InvokeCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Lines of tool output repeated in the log when an invocation fails.
const FAILURE_OUTPUT_LINES: usize = 10;

/// Runs SteamCMD once per identifier, in order.
///
/// A failing identifier is logged and skipped; it never stops the batch.
#[derive(Clone)]
pub struct BatchInvoker {
    profile: PlatformProfile,
    layout: Layout,
    style_options: StyleOptions,
    on_complete: Option<Arc<InvokeCallback>>,
}

impl fmt::Debug for BatchInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchInvoker")
            .field("profile", &self.profile)
            .field("layout", &self.layout)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl BatchInvoker {
    pub fn new(profile: PlatformProfile, layout: Layout) -> Self {
        Self {
            profile,
            layout,
            style_options: StyleOptions::default(),
            on_complete: None,
        }
    }

    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }

    pub(crate) fn with_callback(mut self, on_complete: Option<Arc<InvokeCallback>>) -> Self {
        self.on_complete = on_complete;
        self
    }

    /// Set a callback receiving every [`Summary`] as soon as it is known.
    pub fn on_complete<F>(self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        let callback: InvokeCallback = Box::new(callback);
        self.with_callback(Some(Arc::new(callback)))
    }

    /// Invoke SteamCMD for every identifier.
    ///
    /// Always returns exactly one summary per identifier, in input order.
    pub async fn run(&self, identifiers: &[Identifier]) -> Vec<Summary> {
        let display = ProgressDisplay::new(&self.style_options, identifiers.len());
        let mut summaries = Vec::with_capacity(identifiers.len());

        for identifier in identifiers {
            display.set_current(identifier.as_str());
            info!("Downloading workshop item {}", identifier);

            let summary = match self.invoke(identifier).await {
                Ok(output) => {
                    debug!("steamcmd output for {}:\n{}", identifier, output);
                    Summary::new(identifier.clone(), Status::Success).with_output(output)
                }
                Err(e) => {
                    warn!("Failed to download workshop item {}: {}", identifier, e.report());
                    let output = match e {
                        Error::ToolExit { ref output, .. } => {
                            let tail = tail(output, FAILURE_OUTPUT_LINES);
                            if !tail.is_empty() {
                                warn!("steamcmd output for {}:\n{}", identifier, tail);
                            }
                            output.clone()
                        }
                        _ => String::new(),
                    };
                    Summary::new(identifier.clone(), Status::Fail(e.report())).with_output(output)
                }
            };

            if let Some(ref callback) = self.on_complete {
                callback(&summary);
            }
            display.increment();
            summaries.push(summary);
        }

        display.finish();
        summaries
    }

    /// Run SteamCMD for a single identifier and wait for it to exit.
    ///
    /// Returns the captured output on success: all of stdout, then all of
    /// stderr. The two streams are not interleaved.
    pub async fn invoke(&self, identifier: &Identifier) -> Result<String> {
        let mut cmd = self.profile.command(
            &self.layout.tool_dir(),
            &self.layout.mods_dir(),
            identifier.as_str(),
        );
        cmd.stdin(Stdio::null());
        debug!("Running {:?}", cmd);

        let output = cmd.output().await.map_err(|source| Error::Spawn {
            identifier: identifier.to_string(),
            source,
        })?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(captured)
        } else {
            Err(Error::ToolExit {
                identifier: identifier.to_string(),
                status: output.status,
                output: captured,
            })
        }
    }
}

fn tail(output: &str, lines: usize) -> String {
    let all: Vec<&str> = output.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
