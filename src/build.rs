//! End-to-end build orchestration.
//!
//! Drives one build invocation: resolve config, validate inputs, plan the
//! output directory, merge data, render, write artifacts, convert to PDF.
//! Validation happens before any output is created; once writing has begun,
//! a later failure leaves the already-written artifacts in place rather than
//! rolling back.

use crate::config::{self, BuildConfig};
use crate::data::{self, DataContext};
use crate::error::{Error, Result};
use crate::output;
use crate::pdf::HtmlToPdf;
use crate::skills::parse_skills_layout;
use crate::templates::Renderer;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parameters of one build invocation.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Directory the tool runs from; config and default paths are relative
    /// to it.
    pub base_dir: PathBuf,
    /// Name of the source set under the sources root.
    pub source: String,
    /// Alternate base name for published files; defaults to the source name.
    pub name: Option<String>,
    /// Config section to use from `config.ini`.
    pub section: String,
    /// Clear and reuse an existing dated output directory.
    pub overwrite: bool,
    pub html: bool,
    pub text: bool,
    pub pdf: bool,
}

impl BuildRequest {
    /// A request with all artifacts enabled, rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            source: source.into(),
            name: None,
            section: "DEFAULT".to_string(),
            overwrite: false,
            html: true,
            text: true,
            pdf: true,
        }
    }
}

/// Outcome of one artifact within a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    NotRequested,
    Written(PathBuf),
}

impl Artifact {
    pub fn is_written(&self) -> bool {
        matches!(self, Artifact::Written(_))
    }
}

/// Result of a successful build: where output went and which artifacts were
/// produced.
#[derive(Debug)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub html: Artifact,
    pub pdf: Artifact,
    pub text: Artifact,
}

/// Run a build end to end.
///
/// Each step's failure aborts the remaining steps and surfaces the error; no
/// step is retried. A PDF conversion failure is fatal to the PDF artifact
/// (and anything after it) but leaves the already-written HTML on disk.
pub fn run_build(request: &BuildRequest, converter: &dyn HtmlToPdf) -> Result<BuildReport> {
    let config = config::resolve(&request.base_dir, &request.source, &request.section)?;
    validate(&config, request)?;

    let out_dir = output::plan_output_dir(&config.publish_dir, &request.source, request.overwrite)?;
    info!(dir = %out_dir.display(), "output directory");

    let mut data = DataContext::merge(&config.sources_dir, &request.source)?;
    data.set_title(config.title);
    data.set_template_dir_rel(
        output::relative_path(&config.templates_dir, &out_dir)
            .to_string_lossy()
            .into_owned(),
    );
    if let Some(ref layout) = config.skills_layout {
        data.set_skills_layout(parse_skills_layout(layout));
    }

    let renderer = Renderer::new(&config.templates_dir);
    let stem = request.name.as_deref().unwrap_or(&request.source);

    let mut report = BuildReport {
        out_dir: out_dir.clone(),
        html: Artifact::NotRequested,
        pdf: Artifact::NotRequested,
        text: Artifact::NotRequested,
    };

    // The HTML artifact doubles as the converter input, so a PDF-only build
    // still writes it.
    if request.html || request.pdf {
        let html = renderer.render_html(&config.html_template, &data)?;
        let html_path = out_dir.join(format!("{stem}.html"));
        write_artifact(&html_path, &html)?;
        report.html = Artifact::Written(html_path);
    }

    if request.pdf {
        let html_path = out_dir.join(format!("{stem}.html"));
        let pdf_path = out_dir.join(format!("{stem}.pdf"));
        let options = converter_options(&config, &renderer, &data, &out_dir)?;
        converter.convert(&html_path, &pdf_path, &options)?;
        info!(file = %pdf_path.display(), "saved PDF");
        report.pdf = Artifact::Written(pdf_path);
    }

    if request.text {
        let text = renderer.render_text(&config.text_template, &data)?;
        let text_path = out_dir.join(format!("{stem}.txt"));
        write_artifact(&text_path, &text)?;
        report.text = Artifact::Written(text_path);
    }

    Ok(report)
}

/// Eager validation of every input path, before any output is created.
fn validate(config: &BuildConfig, request: &BuildRequest) -> Result<()> {
    let source_dir = config.source_dir(&request.source);
    if !source_dir.is_dir() {
        return Err(Error::MissingPath(source_dir));
    }
    if data::yaml_files(&source_dir)?.is_empty() {
        return Err(Error::SourceNotFound {
            name: request.source.clone(),
            dir: source_dir,
        });
    }
    if !config.templates_dir.is_dir() {
        return Err(Error::MissingPath(config.templates_dir.clone()));
    }
    if (request.html || request.pdf) && !config.html_template_path().is_file() {
        return Err(Error::TemplateNotFound {
            name: format!("{}.html", config.html_template),
            dir: config.templates_dir.clone(),
        });
    }
    if request.text && !config.text_template_path().is_file() {
        return Err(Error::TemplateNotFound {
            name: format!("{}.txt", config.text_template),
            dir: config.templates_dir.clone(),
        });
    }
    Ok(())
}

/// Assemble converter options: `quiet`, the config's `pdf_`-prefixed
/// options, and the rendered header fragment when one is configured.
fn converter_options(
    config: &BuildConfig,
    renderer: &Renderer,
    data: &DataContext,
    out_dir: &Path,
) -> Result<BTreeMap<String, String>> {
    let mut options = BTreeMap::new();
    options.insert("quiet".to_string(), String::new());
    options.extend(config.pdf_options.clone());

    if config.header {
        let person = data.header_name().ok_or_else(|| {
            Error::Config(
                "PDF header is enabled but the Header section has no \"name\" field".to_string(),
            )
        })?;
        let header =
            renderer.render_header(&config.header_dir, &config.header_template, person)?;
        let header_path = out_dir.join(format!("{}.html", config.header_template));
        write_artifact(&header_path, &header)?;
        options.insert(
            "header-html".to_string(),
            header_path.to_string_lossy().into_owned(),
        );
        debug!(file = %header_path.display(), "rendered PDF header fragment");
    }

    Ok(options)
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    info!(file = %path.display(), "saved");
    Ok(())
}
