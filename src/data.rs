//! YAML data discovery and merge-with-defaults.
//!
//! The `Default` source set defines the schema: one context section per YAML
//! file under `<sources_dir>/Default/`. A named source set overrides
//! individual files by base name. Files present only in the named set are
//! deliberately ignored, since only the Default file set drives iteration.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merged template context for one build.
///
/// Section keys are derived from YAML file stems with `-` and spaces folded
/// to `_`. Besides the data sections, three keys are injected before
/// rendering: `title`, `template_dir_rel`, and (when configured)
/// `skills_layout`.
#[derive(Debug, Serialize)]
pub struct DataContext {
    #[serde(flatten)]
    entries: BTreeMap<String, serde_yaml::Value>,
}

/// Context section key for a data file: stem with separators underscored.
pub fn section_key(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().replace(['-', ' '], "_"))
        .unwrap_or_default()
}

/// Sorted `*.yaml` files directly under `dir`. Missing dir yields empty.
pub(crate) fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl DataContext {
    /// Merge the `Default` file set with the named source set.
    ///
    /// Fails with [`Error::SourceNotFound`] when the source directory holds
    /// no YAML files at all.
    pub fn merge(sources_dir: &Path, source: &str) -> Result<Self> {
        let source_dir = sources_dir.join(source);
        let source_files = yaml_files(&source_dir)?;
        if source_files.is_empty() {
            return Err(Error::SourceNotFound {
                name: source.to_string(),
                dir: source_dir,
            });
        }

        let default_files = yaml_files(&sources_dir.join("Default"))?;
        let mut entries = BTreeMap::new();
        for default_file in &default_files {
            let file = source_files
                .iter()
                .find(|f| f.file_name() == default_file.file_name())
                .unwrap_or(default_file);
            let text = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
            let value: serde_yaml::Value =
                serde_yaml::from_str(&text).map_err(|e| Error::Parse {
                    path: file.clone(),
                    message: e.to_string(),
                })?;
            entries.insert(section_key(default_file), value);
        }

        for extra in source_files
            .iter()
            .filter(|f| !default_files.iter().any(|d| d.file_name() == f.file_name()))
        {
            debug!(file = %extra.display(), "ignoring file absent from the Default set");
        }

        Ok(Self { entries })
    }

    /// Keys of the data sections currently in the context.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Inject the title-visibility flag.
    pub fn set_title(&mut self, title: bool) {
        self.entries
            .insert("title".to_string(), serde_yaml::Value::Bool(title));
    }

    /// Inject the relative path from the output directory to the template
    /// root, so generated HTML can reference template assets.
    pub fn set_template_dir_rel(&mut self, rel: String) {
        self.entries
            .insert("template_dir_rel".to_string(), serde_yaml::Value::from(rel));
    }

    /// Inject the planned skills column layout.
    pub fn set_skills_layout(&mut self, layout: Vec<Vec<String>>) {
        let value = serde_yaml::to_value(layout).unwrap_or(serde_yaml::Value::Null);
        self.entries.insert("skills_layout".to_string(), value);
    }

    /// The `name` field of the `Header` section, used for PDF header
    /// rendering.
    pub fn header_name(&self) -> Option<&str> {
        self.entries.get("Header")?.get("name")?.as_str()
    }
}
