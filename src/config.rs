//! Run configuration for each tool.
//!
//! Every tool takes one of these values instead of reading process-wide state;
//! the binaries build them from their positional arguments.
use std::path::PathBuf;
use std::time::Duration;

use smol_str::SmolStr;

/// Product name used in generated documents.
pub const PRODUCT_NAME: &str = "Dock 3 firmware";

/// Token sent in the dock authentication message.
pub const DEFAULT_AUTH_TOKEN: &str = "0000";

pub const DEFAULT_REPEAT_DURATION: Duration = Duration::from_millis(2000);
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_millis(200);
pub const TORTURE_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_TORTURE_CODE: &str = "17;0x2A4C0A86028E;48;0";

pub const DEFAULT_TEMPLATES_DIR: &str = "_templates";
pub const DEFAULT_PROJECT_LICENSE: &str = "../../LICENSE";
pub const DEFAULT_RELEASE_NOTES_DIR: &str = "../../../doc/release";
pub const DEFAULT_DEPLOYMENT_OUTPUT: &str = "deployment.json";

#[derive(Debug, Clone)]
pub struct LicenseDocConfig {
    pub manifest: PathBuf,
    pub output: PathBuf,
    /// Holds `licenses-header.md` and `licenses-footer.md`.
    pub templates_dir: PathBuf,
    /// Parent of the per-module directories holding license files.
    pub modules_dir: PathBuf,
    pub project_license: PathBuf,
}

impl LicenseDocConfig {
    pub fn new(manifest: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            output: output.into(),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            modules_dir: PathBuf::from("."),
            project_license: PathBuf::from(DEFAULT_PROJECT_LICENSE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepeatConfig {
    pub url: String,
    pub code: SmolStr,
    pub repeat: u32,
    /// Total window in which repeat signals are sent.
    pub duration: Duration,
    /// Spacing between repeat signals. Must be non-zero.
    pub delay: Duration,
}

impl RepeatConfig {
    pub fn new(url: impl Into<String>, code: impl Into<SmolStr>, repeat: u32) -> Self {
        Self {
            url: url.into(),
            code: code.into(),
            repeat,
            duration: DEFAULT_REPEAT_DURATION,
            delay: DEFAULT_REPEAT_DELAY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TortureConfig {
    pub url: String,
    pub code: SmolStr,
    pub interval: Duration,
}

impl TortureConfig {
    pub fn new(url: impl Into<String>, code: Option<SmolStr>) -> Self {
        Self {
            url: url.into(),
            code: code.unwrap_or_else(|| SmolStr::new_static(DEFAULT_TORTURE_CODE)),
            interval: TORTURE_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FirmwareMetaConfig {
    pub firmware: PathBuf,
    pub version: String,
    pub channel: String,
    pub output: PathBuf,
    pub release_notes_dir: PathBuf,
}

impl FirmwareMetaConfig {
    pub fn new(
        firmware: impl Into<PathBuf>,
        version: impl Into<String>,
        channel: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            firmware: firmware.into(),
            version: version.into(),
            channel: channel.into(),
            output: output.into(),
            release_notes_dir: PathBuf::from(DEFAULT_RELEASE_NOTES_DIR),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentMetaConfig {
    pub version: String,
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
}

impl DeploymentMetaConfig {
    pub fn new(version: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            version: version.into(),
            files,
            output: PathBuf::from(DEFAULT_DEPLOYMENT_OUTPUT),
        }
    }
}
