use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DeploymentMetaConfig, PRODUCT_NAME};
use crate::error::{Error, Result};
use crate::utils::{ensure_file_exists, file_size};

/// Download link prefix; the variables are substituted by the deployment
/// pipeline.
pub const HREF_PREFIX: &str = "${UC_DOWNLOAD_URL}${UC_OTA_TENANT}/${ARTIFACT_PATH}/";

pub const MD5_SUFFIX: &str = ".MD5SUM";
pub const SHA1_SUFFIX: &str = ".sha1sum";
pub const SHA256_SUFFIX: &str = ".sha256sum";

const CHUNK_PART: &str = "dock";

/// hawkBit DDI software deployment object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub download: String,
    pub update: String,
    pub maintenance_window: String,
    pub chunks: Vec<Chunk>,
}

impl Deployment {
    /// A deployment with one empty firmware chunk.
    pub fn new(version: &str) -> Self {
        Self {
            download: "attempt".to_string(),
            update: "skip".to_string(),
            maintenance_window: "unavailable".to_string(),
            chunks: vec![Chunk {
                part: CHUNK_PART.to_string(),
                version: version.to_string(),
                name: PRODUCT_NAME.to_string(),
                artifacts: Vec::new(),
            }],
        }
    }

    pub fn push_artifact(&mut self, artifact: Artifact) {
        if let Some(chunk) = self.chunks.first_mut() {
            chunk.artifacts.push(artifact);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub part: String,
    pub version: String,
    pub name: String,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub filename: String,
    pub hashes: Hashes,
    pub size: u64,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashes {
    pub sha1: String,
    pub md5: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub download: Link,
    pub md5sum: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn artifact(path: &str) -> Self {
        Self {
            href: format!("{HREF_PREFIX}{path}"),
        }
    }
}

/// Checksum sidecars next to a deployment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecars {
    pub md5: PathBuf,
    pub sha1: PathBuf,
    pub sha256: PathBuf,
}

impl Sidecars {
    pub fn for_file(file: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut path = file.as_os_str().to_owned();
            path.push(suffix);
            PathBuf::from(path)
        };
        Self {
            md5: with_suffix(MD5_SUFFIX),
            sha1: with_suffix(SHA1_SUFFIX),
            sha256: with_suffix(SHA256_SUFFIX),
        }
    }

    fn ensure_exist(&self) -> Result<()> {
        ensure_file_exists(&self.md5)?;
        ensure_file_exists(&self.sha1)?;
        ensure_file_exists(&self.sha256)
    }
}

/// Hash value of a `sha256sum`-style line: the first whitespace-delimited token.
pub fn parse_hash(contents: &str) -> Option<&str> {
    contents.split_whitespace().next()
}

fn read_hash_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_hash(&contents)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidHashFile(path.to_path_buf()))
}

/// Builds the artifact record for one deployment file.
pub fn artifact(file: &Path) -> Result<Artifact> {
    let sidecars = Sidecars::for_file(file);
    ensure_file_exists(file)?;
    sidecars.ensure_exist()?;

    info!("Including deployment file: {}", file.display());
    let filename = file.display().to_string();
    Ok(Artifact {
        hashes: Hashes {
            sha1: read_hash_file(&sidecars.sha1)?,
            md5: read_hash_file(&sidecars.md5)?,
            sha256: read_hash_file(&sidecars.sha256)?,
        },
        size: file_size(file)?,
        links: Links {
            download: Link::artifact(&filename),
            md5sum: Link::artifact(&sidecars.md5.display().to_string()),
        },
        filename,
    })
}

/// Builds the deployment for all files; the first invalid file aborts.
pub fn build(config: &DeploymentMetaConfig) -> Result<Deployment> {
    if config.files.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one deployment file is required".into(),
        ));
    }

    let mut deployment = Deployment::new(&config.version);
    for file in &config.files {
        deployment.push_artifact(artifact(file)?);
    }
    Ok(deployment)
}

/// Builds the deployment and writes it to `config.output`. Nothing is written
/// when any input is missing.
pub fn generate(config: &DeploymentMetaConfig) -> Result<Deployment> {
    let deployment = build(config)?;
    super::write_json(&config.output, &deployment)?;
    info!("Wrote {}", config.output.display());
    Ok(deployment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_is_first_token() {
        assert_eq!(
            parse_hash("d41d8cd98f00b204e9800998ecf8427e  dock.bin\n"),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(parse_hash("abc123\n"), Some("abc123"));
        assert_eq!(parse_hash("  \n"), None);
    }

    #[test]
    fn sidecar_names() {
        let sidecars = Sidecars::for_file(Path::new("build/dock.bin"));
        assert_eq!(sidecars.md5, PathBuf::from("build/dock.bin.MD5SUM"));
        assert_eq!(sidecars.sha1, PathBuf::from("build/dock.bin.sha1sum"));
        assert_eq!(sidecars.sha256, PathBuf::from("build/dock.bin.sha256sum"));
    }

    #[test]
    fn serializes_in_ddi_layout() {
        let mut deployment = Deployment::new("1.4.0");
        deployment.push_artifact(Artifact {
            filename: "dock.bin".into(),
            hashes: Hashes {
                sha1: "s1".into(),
                md5: "m5".into(),
                sha256: "s256".into(),
            },
            size: 42,
            links: Links {
                download: Link::artifact("dock.bin"),
                md5sum: Link::artifact("dock.bin.MD5SUM"),
            },
        });

        let actual = serde_json::to_value(&deployment).unwrap();
        let expected = json!({
            "download": "attempt",
            "update": "skip",
            "maintenanceWindow": "unavailable",
            "chunks": [{
                "part": "dock",
                "version": "1.4.0",
                "name": "Dock 3 firmware",
                "artifacts": [{
                    "filename": "dock.bin",
                    "hashes": {"sha1": "s1", "md5": "m5", "sha256": "s256"},
                    "size": 42,
                    "_links": {
                        "download": {"href": "${UC_DOWNLOAD_URL}${UC_OTA_TENANT}/${ARTIFACT_PATH}/dock.bin"},
                        "md5sum": {"href": "${UC_DOWNLOAD_URL}${UC_OTA_TENANT}/${ARTIFACT_PATH}/dock.bin.MD5SUM"}
                    }
                }]
            }]
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn empty_hash_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dock.bin");
        fs::write(&file, b"fw").unwrap();
        let sidecars = Sidecars::for_file(&file);
        fs::write(&sidecars.md5, "abc  dock.bin\n").unwrap();
        fs::write(&sidecars.sha1, "\n").unwrap();
        fs::write(&sidecars.sha256, "def  dock.bin\n").unwrap();

        match artifact(&file) {
            Err(Error::InvalidHashFile(path)) => assert_eq!(path, sidecars.sha1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_files_is_rejected() {
        let config = DeploymentMetaConfig::new("1.0.0", Vec::new());
        assert!(matches!(build(&config), Err(Error::InvalidArgument(_))));
    }
}
