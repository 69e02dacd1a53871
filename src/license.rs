//! License overview page for the firmware's third-party components.
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::{LicenseDocConfig, PRODUCT_NAME};
use crate::error::{Error, Result};
use crate::utils::{read_required, write_file};

const HEADER_TEMPLATE: &str = "licenses-header.md";
const FOOTER_TEMPLATE: &str = "licenses-footer.md";

/// One component in the license manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
    #[serde(rename = "License")]
    pub license: String,
    #[serde(rename = "Repository")]
    pub repository: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    /// Relative to the component's directory.
    #[serde(rename = "licenseFile", default)]
    pub license_file: Option<String>,
}

/// Component name to entry, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseManifest(pub IndexMap<String, LicenseEntry>);

impl LicenseManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = read_required(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LicenseEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Static parts of the report.
#[derive(Debug, Clone)]
pub struct Templates {
    pub header: String,
    pub footer: String,
    pub project_license: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseSummary {
    pub modules: usize,
    /// Modules with their license text embedded.
    pub embedded: usize,
    /// Modules whose license file was not found.
    pub missing: Vec<String>,
}

/// Composes the report; `license_text` yields a module's license file contents
/// or `None` when it is unavailable.
pub fn render<F>(
    manifest: &LicenseManifest,
    templates: &Templates,
    mut license_text: F,
) -> (String, LicenseSummary)
where
    F: FnMut(&str, &LicenseEntry) -> Option<String>,
{
    let mut summary = LicenseSummary {
        modules: manifest.len(),
        ..Default::default()
    };
    let mut out = templates.header.clone();

    for (module, entry) in manifest.iter() {
        let _ = writeln!(out, "- {} - {}", module, entry.license);
    }
    out.push('\n');

    let _ = write!(out, "### {} license\n\n", PRODUCT_NAME);
    push_fenced(&mut out, &templates.project_license);

    for (module, entry) in manifest.iter() {
        let _ = write!(out, "### {} @ {}\n\n", module, entry.version);
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "{}  ", description);
        }
        let _ = writeln!(out, "- {}", entry.license);
        let _ = writeln!(out, "- {}", entry.repository);

        match license_text(module, entry) {
            Some(text) => {
                out.push_str("\n#### License\n\n");
                push_fenced(&mut out, &text);
                summary.embedded += 1;
            }
            None => summary.missing.push(module.clone()),
        }
    }

    out.push_str(&templates.footer);
    (out, summary)
}

fn push_fenced(out: &mut String, text: &str) {
    out.push_str("```\n");
    out.push_str(text.trim());
    out.push_str("\n```\n\n");
}

/// Expected location of a module's license file.
pub fn license_path(modules_dir: &Path, module: &str, entry: &LicenseEntry) -> Option<PathBuf> {
    entry
        .license_file
        .as_deref()
        .map(|file| modules_dir.join(module).join(file))
}

/// Reads all inputs, renders the report and writes it to `config.output`.
///
/// Nothing is written if the manifest, a template or the project license is
/// missing. A missing module license file is logged and only that module's
/// license block is left out.
pub fn generate(config: &LicenseDocConfig) -> Result<LicenseSummary> {
    let manifest = LicenseManifest::load(&config.manifest)?;
    let templates = Templates {
        header: read_required(&config.templates_dir.join(HEADER_TEMPLATE))?,
        footer: read_required(&config.templates_dir.join(FOOTER_TEMPLATE))?,
        project_license: read_required(&config.project_license)?,
    };

    for (module, entry) in manifest.iter() {
        info!("{}: {}", module, entry.license);
    }

    let (document, summary) = render(&manifest, &templates, |module, entry| {
        let path = license_path(&config.modules_dir, module, entry);
        match path.as_deref().filter(|p| p.is_file()) {
            Some(path) => match fs::read_to_string(path) {
                Ok(text) => Some(text),
                Err(e) => {
                    error!(
                        "{} ({}) cannot read license file \"{}\": {}",
                        module,
                        entry.license,
                        path.display(),
                        e
                    );
                    None
                }
            },
            None => {
                let shown = path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| format!("{}/<unset>", module));
                error!(
                    "{} ({}) no license file found! \"{}\"",
                    module, entry.license, shown
                );
                None
            }
        }
    });

    write_file(&config.output, &document)?;
    info!(
        "Wrote {} ({} modules, {} license texts)",
        config.output.display(),
        summary.modules,
        summary.embedded
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(license: &str, version: &str, file: Option<&str>) -> LicenseEntry {
        LicenseEntry {
            license: license.into(),
            repository: format!("https://example.com/{license}"),
            version: version.into(),
            description: None,
            license_file: file.map(Into::into),
        }
    }

    fn templates() -> Templates {
        Templates {
            header: "# Licenses\n\n".into(),
            footer: "<!-- end -->\n".into(),
            project_license: "\nApache License\n".into(),
        }
    }

    #[test]
    fn manifest_keeps_key_order() {
        let manifest: LicenseManifest = serde_json::from_str(
            r#"{
                "zlib": {"License": "Zlib", "Repository": "r1", "Version": "1.3", "licenseFile": "LICENSE"},
                "cjson": {"License": "MIT", "Repository": "r2", "Version": "1.7", "Description": "JSON parser", "licenseFile": "LICENSE"}
            }"#,
        )
        .unwrap();
        let names: Vec<_> = manifest.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["zlib", "cjson"]);
        assert_eq!(
            manifest.0["cjson"].description.as_deref(),
            Some("JSON parser")
        );
    }

    #[test]
    fn render_counts_bullets_and_license_blocks() {
        let mut modules = IndexMap::new();
        modules.insert("a".to_string(), entry("MIT", "1", Some("LICENSE")));
        modules.insert("b".to_string(), entry("BSD-3-Clause", "2", Some("COPYING")));
        modules.insert("c".to_string(), entry("ISC", "3", None));
        let manifest = LicenseManifest(modules);

        let (doc, summary) = render(&manifest, &templates(), |module, _| {
            (module != "b").then(|| format!("text of {module}"))
        });

        assert_eq!(summary.modules, 3);
        assert_eq!(summary.embedded, 2);
        assert_eq!(summary.missing, ["b"]);
        assert_eq!(doc.matches("\n#### License\n").count(), 2);
        assert!(doc.contains("- a - MIT\n- b - BSD-3-Clause\n- c - ISC\n\n"));
        assert!(doc.starts_with("# Licenses\n\n"));
        assert!(doc.ends_with("<!-- end -->\n"));
    }

    #[test]
    fn render_module_section_layout() {
        let mut foo = entry("MIT", "1.0", Some("LICENSE"));
        foo.repository = "r".into();
        foo.description = Some("A tiny lib".into());
        let manifest = LicenseManifest(IndexMap::from([("foo".to_string(), foo)]));

        let (doc, _) = render(&manifest, &templates(), |_, _| {
            Some("\n  MIT License\n\nCopyright\n".into())
        });

        let expected = "# Licenses\n\n\
            - foo - MIT\n\n\
            ### Dock 3 firmware license\n\n```\nApache License\n```\n\n\
            ### foo @ 1.0\n\n\
            A tiny lib  \n\
            - MIT\n\
            - r\n\
            \n#### License\n\n```\nMIT License\n\nCopyright\n```\n\n\
            <!-- end -->\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn empty_description_is_omitted() {
        let mut foo = entry("MIT", "1.0", None);
        foo.description = Some(String::new());
        let manifest = LicenseManifest(IndexMap::from([("foo".to_string(), foo)]));
        let (doc, _) = render(&manifest, &templates(), |_, _| None);
        assert!(doc.contains("### foo @ 1.0\n\n- MIT\n"));
    }
}
