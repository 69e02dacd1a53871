use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{FirmwareMetaConfig, PRODUCT_NAME};
use crate::error::{Error, Result};
use crate::utils::{ensure_file_exists, file_size};

/// Placeholder id; the OTA server assigns the real one.
pub const FIRMWARE_ID_PLACEHOLDER: &str = "$replaced_by_core";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_DESCRIPTION: &str = "New release";

/// Firmware descriptor included in a hawkBit deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareMetadata {
    pub id: String,
    pub title: String,
    /// Two-letter language code to release notes.
    pub description: IndexMap<String, String>,
    pub version: String,
    pub channel: String,
    /// Serialized as `YYYY-MM-DD`.
    pub release_date: NaiveDate,
    pub size: u64,
}

impl FirmwareMetadata {
    pub fn new(version: &str, channel: &str, release_date: NaiveDate, size: u64) -> Self {
        let mut description = IndexMap::new();
        description.insert(DEFAULT_LANGUAGE.to_string(), DEFAULT_DESCRIPTION.to_string());
        Self {
            id: FIRMWARE_ID_PLACEHOLDER.to_string(),
            title: PRODUCT_NAME.to_string(),
            description,
            version: version.to_string(),
            channel: channel.to_string(),
            release_date,
            size,
        }
    }
}

/// A `release-notes_<lang>.md` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub language: String,
    pub path: PathBuf,
}

static RELEASE_NOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^release-notes_([a-z]{2})\.md$").unwrap());

/// Language code of a release-notes file name.
pub fn release_notes_language(file_name: &str) -> Option<&str> {
    RELEASE_NOTES
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|lang| lang.as_str())
}

/// Release-notes files in `dir`, ordered by file name.
pub fn find_release_notes(dir: &Path) -> Result<Vec<ReleaseNotes>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut notes = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(lang) = release_notes_language(file_name) {
            notes.push(ReleaseNotes {
                language: lang.to_string(),
                path: entry.path(),
            });
        }
    }
    notes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(notes)
}

/// Builds the descriptor for `config` with the given release date.
pub fn build(config: &FirmwareMetaConfig, release_date: NaiveDate) -> Result<FirmwareMetadata> {
    ensure_file_exists(&config.firmware)?;
    let size = file_size(&config.firmware)?;
    let mut metadata = FirmwareMetadata::new(&config.version, &config.channel, release_date, size);

    let notes = find_release_notes(&config.release_notes_dir)?;
    let files: Vec<_> = notes.iter().map(|n| n.path.display().to_string()).collect();
    info!("Including release notes: {:?}", files);

    for note in notes {
        info!("Processing release note language: {}", note.language);
        let text = fs::read_to_string(&note.path).map_err(|e| Error::io(&note.path, e))?;
        metadata.description.insert(note.language, text);
    }

    Ok(metadata)
}

/// Builds the descriptor dated today (UTC) and writes it to `config.output`.
pub fn generate(config: &FirmwareMetaConfig) -> Result<FirmwareMetadata> {
    let metadata = build(config, Utc::now().date_naive())?;
    super::write_json(&config.output, &metadata)?;
    info!("Wrote {}", config.output.display());
    Ok(metadata)
}
