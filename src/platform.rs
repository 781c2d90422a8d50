//! Per-OS strategy for acquiring and running SteamCMD.
//!
//! A [`PlatformProfile`] is selected once per run by
//! [`PlatformProfile::current`]. Everything downstream asks the profile what to
//! do instead of checking the operating system again.

use crate::archive::ArchiveKind;
use crate::bootstrap::Bootstrap;
use crate::error::{Error, Result};
use crate::layout::APP_ID;

use reqwest::Url;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const STEAMCMD_WINDOWS_URL: &str = "https://steamcdn-a.akamaihd.net/client/installer/steamcmd.zip";
const STEAMCMD_LINUX_URL: &str =
    "https://steamcdn-a.akamaihd.net/client/installer/steamcmd_linux.tar.gz";

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Windows,
    Linux,
    MacOs,
}

/// Where the SteamCMD executable is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    /// Path relative to the bootstrapped tool directory.
    Bundled(PathBuf),
    /// Program name resolved through `PATH`, or an absolute path.
    System(PathBuf),
}

impl Tool {
    pub fn resolve(&self, tool_dir: &Path) -> PathBuf {
        match self {
            Tool::Bundled(relative) => tool_dir.join(relative),
            Tool::System(program) => program.clone(),
        }
    }
}

/// How the invocation is handed to the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Spawn the executable with the arguments as argv.
    Direct,
    /// Run one quoted command line through `/bin/sh -c`.
    Shell,
}

/// The active platform strategy.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    kind: OsKind,
    bootstrap: Bootstrap,
    tool: Tool,
    launch: Launch,
}

impl PlatformProfile {
    pub fn new(kind: OsKind, bootstrap: Bootstrap, tool: Tool, launch: Launch) -> Self {
        Self {
            kind,
            bootstrap,
            tool,
            launch,
        }
    }

    /// Profile for the operating system this binary was built for.
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "windows" => Self::for_kind(OsKind::Windows),
            "linux" => Self::for_kind(OsKind::Linux),
            "macos" => Self::for_kind(OsKind::MacOs),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Built-in profile for an OS family.
    pub fn for_kind(kind: OsKind) -> Result<Self> {
        let profile = match kind {
            OsKind::Windows => Self::new(
                kind,
                Bootstrap::Archive {
                    url: parse_url(STEAMCMD_WINDOWS_URL)?,
                    kind: ArchiveKind::Zip,
                },
                Tool::Bundled("steamcmd.exe".into()),
                Launch::Direct,
            ),
            OsKind::Linux => Self::new(
                kind,
                Bootstrap::Archive {
                    url: parse_url(STEAMCMD_LINUX_URL)?,
                    kind: ArchiveKind::TarGz,
                },
                Tool::Bundled("steamcmd.sh".into()),
                Launch::Shell,
            ),
            // steamcmd is expected to be installed already, e.g. through Homebrew.
            OsKind::MacOs => Self::new(
                kind,
                Bootstrap::Preinstalled,
                Tool::System("steamcmd".into()),
                Launch::Shell,
            ),
        };
        Ok(profile)
    }

    pub fn kind(&self) -> OsKind {
        self.kind
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn launch(&self) -> Launch {
        self.launch
    }

    /// Build the SteamCMD process downloading one workshop item.
    pub fn command(&self, tool_dir: &Path, mods_dir: &Path, identifier: &str) -> Command {
        let program = self.tool.resolve(tool_dir);
        let args = invocation_args(mods_dir, identifier);

        match self.launch {
            Launch::Direct => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Launch::Shell => {
                let mut cmd = Command::new("/bin/sh");
                cmd.arg("-c").arg(shell_line(&program, &args));
                cmd
            }
        }
    }
}

/// `+force_install_dir <mods> +login anonymous +workshop_download_item <app> <id> +quit`
pub fn invocation_args(mods_dir: &Path, identifier: &str) -> Vec<OsString> {
    vec![
        "+force_install_dir".into(),
        mods_dir.as_os_str().to_owned(),
        "+login".into(),
        "anonymous".into(),
        "+workshop_download_item".into(),
        APP_ID.into(),
        identifier.into(),
        "+quit".into(),
    ]
}

fn shell_line(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|token| {
            let token = token.to_string_lossy();
            shlex::try_quote(&token)
                .map(|quoted| quoted.into_owned())
                // Only NUL bytes fail to quote; hand them over unquoted.
                .unwrap_or_else(|_| token.into_owned())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("the url \"{url}\" cannot be parsed: {e}")))
}
