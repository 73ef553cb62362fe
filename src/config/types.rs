//! Typed effective configuration.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fully resolved configuration for one build invocation.
///
/// Built once by [`crate::config::resolve`] and passed through the pipeline;
/// boolean coercion happens here, not at use sites. Margin and page-size
/// values stay strings since they are forwarded verbatim to the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Root of the template tree (`html/` and `text/` subdirectories).
    pub templates_dir: PathBuf,
    /// Root holding one subdirectory of YAML files per resume variant.
    pub sources_dir: PathBuf,
    /// Root under which dated output directories are created.
    pub publish_dir: PathBuf,
    /// HTML template name, without the `.html` extension.
    pub html_template: String,
    /// Text template name, without the `.txt` extension.
    pub text_template: String,
    /// Whether to render a PDF header fragment.
    pub header: bool,
    /// Subdirectory of the HTML template root holding header templates.
    pub header_dir: String,
    /// Header template name, without the `.html` extension.
    pub header_template: String,
    /// Whether templates should show the document title.
    pub title: bool,
    /// Optional `col,col|col`-style skills column specification.
    pub skills_layout: Option<String>,
    /// Converter options, already stripped of the `pdf_` prefix and with
    /// underscores folded to hyphens (`pdf_margin_top` -> `margin-top`).
    pub pdf_options: BTreeMap<String, String>,
}

/// Embedded default option table (lowest tier).
pub(super) const DEFAULTS: &[(&str, &str)] = &[
    ("templates_dir", "Templates"),
    ("sources_dir", "Resume Data"),
    ("publish_dir", "Publish"),
    ("html_template", "default"),
    ("header", ""),
    ("header_dir", "headers"),
    ("header_template", "header_default"),
    ("text_template", "default"),
    ("pdf_margin_top", "0.5in"),
    ("pdf_margin_right", "0.5in"),
    ("pdf_margin_bottom", "0.5in"),
    ("pdf_margin_left", "0.5in"),
    ("pdf_page_size", "Letter"),
    ("pdf_disable_external_links", ""),
    ("title", ""),
];

/// Interpret an option value as a flag. Empty and common negatives are
/// false; any other non-empty value enables the option.
pub(super) fn truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "no" | "off" | "false"
    )
}

impl BuildConfig {
    /// Convert a flat option map into the typed configuration.
    ///
    /// Every key in [`DEFAULTS`] is guaranteed present after layering, so a
    /// missing key here means the option table itself is inconsistent.
    pub(super) fn from_options(options: &BTreeMap<String, String>) -> Result<Self> {
        let get = |key: &str| -> Result<&str> {
            options
                .get(key)
                .map(String::as_str)
                .ok_or_else(|| Error::Config(format!("option \"{key}\" is unresolved")))
        };

        let disable_links = truthy(get("pdf_disable_external_links")?);
        let mut pdf_options = BTreeMap::new();
        for (key, value) in options {
            if let Some(stripped) = key.strip_prefix("pdf_") {
                // disable-external-links is a bare flag; forward it with an
                // empty value only when enabled
                if stripped == "disable_external_links" {
                    if disable_links {
                        pdf_options.insert("disable-external-links".to_string(), String::new());
                    }
                    continue;
                }
                pdf_options.insert(stripped.replace('_', "-"), value.clone());
            }
        }

        let skills_layout = options
            .get("skills_layout")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            templates_dir: PathBuf::from(get("templates_dir")?),
            sources_dir: PathBuf::from(get("sources_dir")?),
            publish_dir: PathBuf::from(get("publish_dir")?),
            html_template: get("html_template")?.to_string(),
            text_template: get("text_template")?.to_string(),
            header: truthy(get("header")?),
            header_dir: get("header_dir")?.to_string(),
            header_template: get("header_template")?.to_string(),
            title: truthy(get("title")?),
            skills_layout,
            pdf_options,
        })
    }

    /// Path to the selected HTML template file.
    pub fn html_template_path(&self) -> PathBuf {
        self.templates_dir
            .join("html")
            .join(format!("{}.html", self.html_template))
    }

    /// Path to the selected text template file.
    pub fn text_template_path(&self) -> PathBuf {
        self.templates_dir
            .join("text")
            .join(format!("{}.txt", self.text_template))
    }

    /// Directory of one source set.
    pub fn source_dir(&self, source: &str) -> PathBuf {
        self.sources_dir.join(source)
    }
}
