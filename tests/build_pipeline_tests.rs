//! End-to-end tests for the build pipeline.
//!
//! Each test scaffolds a project in a temp directory and runs the
//! orchestrator with a fake HTML-to-PDF converter, so the whole pipeline is
//! exercised without wkhtmltopdf installed.

use cvforge::build::{Artifact, BuildRequest, run_build};
use cvforge::error::{Error, Result};
use cvforge::pdf::HtmlToPdf;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Converter double that records every invocation and writes a stub PDF.
#[derive(Default)]
struct FakeConverter {
    calls: Mutex<Vec<(PathBuf, PathBuf, BTreeMap<String, String>)>>,
}

impl HtmlToPdf for FakeConverter {
    fn convert(&self, html: &Path, pdf: &Path, options: &BTreeMap<String, String>) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((html.to_path_buf(), pdf.to_path_buf(), options.clone()));
        std::fs::write(pdf, b"%PDF-1.4 stub").map_err(|e| Error::io(pdf, e))
    }
}

/// Converter double that always fails, as if wkhtmltopdf were missing.
struct FailingConverter;

impl HtmlToPdf for FailingConverter {
    fn convert(&self, _: &Path, _: &Path, _: &BTreeMap<String, String>) -> Result<()> {
        Err(Error::Conversion("converter not installed".to_string()))
    }
}

/// Lay down a minimal buildable project and return its root.
fn scaffold_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().to_path_buf();
    let html_dir = root.join("Templates").join("html");
    let text_dir = root.join("Templates").join("text");
    let default_dir = root.join("Resume Data").join("Default");
    std::fs::create_dir_all(html_dir.join("headers")).unwrap();
    std::fs::create_dir_all(&text_dir).unwrap();
    std::fs::create_dir_all(&default_dir).unwrap();

    std::fs::write(
        html_dir.join("default.html"),
        "<h1>{{ context.header.name }}</h1>",
    )
    .unwrap();
    std::fs::write(text_dir.join("default.txt"), "{{ context.header.name }}\n").unwrap();
    std::fs::write(
        html_dir.join("headers").join("header_default.html"),
        "<div>{{ name }}</div>",
    )
    .unwrap();
    std::fs::write(default_dir.join("header.yaml"), "name: Jane Doe\n").unwrap();
    root
}

#[test]
fn html_only_build_produces_exactly_one_file() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let mut request = BuildRequest::new(&root, "Default");
    request.text = false;
    request.pdf = false;

    let converter = FakeConverter::default();
    let report = run_build(&request, &converter).unwrap();

    assert!(report.html.is_written());
    assert_eq!(report.pdf, Artifact::NotRequested);
    assert_eq!(report.text, Artifact::NotRequested);

    let entries: Vec<_> = std::fs::read_dir(&report.out_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], report.out_dir.join("Default.html"));
    let html = std::fs::read_to_string(&entries[0]).unwrap();
    assert!(html.contains("Jane Doe"));
    assert!(converter.calls.lock().unwrap().is_empty());
}

#[test]
fn full_build_writes_html_pdf_and_text() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let converter = FakeConverter::default();
    let report = run_build(&BuildRequest::new(&root, "Default"), &converter).unwrap();

    assert!(report.html.is_written());
    assert!(report.pdf.is_written());
    assert!(report.text.is_written());
    assert!(report.out_dir.join("Default.html").is_file());
    assert!(report.out_dir.join("Default.pdf").is_file());
    assert!(report.out_dir.join("Default.txt").is_file());

    let calls = converter.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (html_in, pdf_out, options) = &calls[0];
    assert_eq!(*html_in, report.out_dir.join("Default.html"));
    assert_eq!(*pdf_out, report.out_dir.join("Default.pdf"));
    // default pdf_ options are forwarded stripped and hyphenated
    assert_eq!(options.get("margin-top").unwrap(), "0.5in");
    assert_eq!(options.get("page-size").unwrap(), "Letter");
    assert!(options.contains_key("quiet"));
}

#[test]
fn alternate_name_changes_the_file_stem() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let mut request = BuildRequest::new(&root, "Default");
    request.name = Some("resume".to_string());
    request.pdf = false;

    let report = run_build(&request, &FakeConverter::default()).unwrap();
    assert!(report.out_dir.join("resume.html").is_file());
    assert!(report.out_dir.join("resume.txt").is_file());
}

#[test]
fn missing_source_aborts_before_creating_output() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    std::fs::create_dir_all(root.join("Resume Data").join("Empty")).unwrap();

    let err = run_build(&BuildRequest::new(&root, "Empty"), &FakeConverter::default())
        .unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
    // publish root untouched by the failed call
    assert!(!root.join("Publish").exists());
}

#[test]
fn missing_template_aborts_before_creating_output() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    std::fs::remove_file(root.join("Templates").join("text").join("default.txt")).unwrap();

    let err = run_build(&BuildRequest::new(&root, "Default"), &FakeConverter::default())
        .unwrap_err();
    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert!(err.to_string().contains("default.txt"));
    assert!(!root.join("Publish").exists());
}

#[test]
fn conversion_failure_leaves_html_on_disk() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let err = run_build(&BuildRequest::new(&root, "Default"), &FailingConverter).unwrap_err();
    assert!(matches!(err, Error::Conversion(_)));

    // the HTML artifact written before the converter ran is kept
    let publish = root.join("Publish");
    let out_dir: Vec<_> = std::fs::read_dir(&publish)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(out_dir.len(), 1);
    assert!(out_dir[0].join("Default.html").is_file());
    assert!(!out_dir[0].join("Default.pdf").exists());
    assert!(!out_dir[0].join("Default.txt").exists());
}

#[test]
fn configured_header_is_rendered_and_forwarded() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    // header section lookup uses the capitalized Header file
    std::fs::write(
        root.join("Resume Data").join("Default").join("Header.yaml"),
        "name: Jane Doe\n",
    )
    .unwrap();
    std::fs::write(root.join("config.ini"), "HEADER = yes\n").unwrap();

    let converter = FakeConverter::default();
    let report = run_build(&BuildRequest::new(&root, "Default"), &converter).unwrap();

    let header_file = report.out_dir.join("header_default.html");
    assert!(header_file.is_file());
    assert_eq!(
        std::fs::read_to_string(&header_file).unwrap(),
        "<div>Jane Doe</div>"
    );

    let calls = converter.calls.lock().unwrap();
    assert_eq!(
        calls[0].2.get("header-html").unwrap(),
        &header_file.to_string_lossy().into_owned()
    );
}

#[test]
fn source_overrides_replace_default_sections() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    let acme = root.join("Resume Data").join("Acme");
    std::fs::create_dir_all(&acme).unwrap();
    std::fs::write(acme.join("header.yaml"), "name: J. Q. Public\n").unwrap();

    let mut request = BuildRequest::new(&root, "Acme");
    request.pdf = false;
    request.text = false;

    let report = run_build(&request, &FakeConverter::default()).unwrap();
    let html = std::fs::read_to_string(report.out_dir.join("Acme.html")).unwrap();
    assert!(html.contains("J. Q. Public"));
}

#[test]
fn repeated_builds_get_numbered_directories() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let mut request = BuildRequest::new(&root, "Default");
    request.pdf = false;
    request.text = false;

    let first = run_build(&request, &FakeConverter::default()).unwrap();
    let second = run_build(&request, &FakeConverter::default()).unwrap();

    assert_ne!(first.out_dir, second.out_dir);
    assert!(first.out_dir.is_dir() && second.out_dir.is_dir());
    assert!(second.out_dir.to_string_lossy().ends_with(" (1)"));
}

#[test]
fn overwrite_build_reuses_the_directory() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);

    let mut request = BuildRequest::new(&root, "Default");
    request.pdf = false;
    request.text = false;
    request.overwrite = true;

    let first = run_build(&request, &FakeConverter::default()).unwrap();
    let second = run_build(&request, &FakeConverter::default()).unwrap();
    assert_eq!(first.out_dir, second.out_dir);
}

#[test]
fn skills_layout_config_reaches_the_template() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    std::fs::write(
        root.join("config.ini"),
        "SKILLS_LAYOUT = Languages, Frameworks|Tools\n",
    )
    .unwrap();
    std::fs::write(
        root.join("Templates").join("html").join("default.html"),
        "{% for column in context.skills_layout %}[{{ column | join(\",\") }}]{% endfor %}",
    )
    .unwrap();

    let mut request = BuildRequest::new(&root, "Default");
    request.pdf = false;
    request.text = false;

    let report = run_build(&request, &FakeConverter::default()).unwrap();
    let html = std::fs::read_to_string(report.out_dir.join("Default.html")).unwrap();
    assert_eq!(html, "[Languages,Frameworks][Tools]");
}

#[test]
fn per_source_config_overrides_global() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    std::fs::write(root.join("config.ini"), "PDF_PAGE_SIZE = A4\n").unwrap();
    std::fs::write(
        root.join("Resume Data").join("Default").join("config.ini"),
        "PDF_PAGE_SIZE = Legal\n",
    )
    .unwrap();

    let converter = FakeConverter::default();
    run_build(&BuildRequest::new(&root, "Default"), &converter).unwrap();

    let calls = converter.calls.lock().unwrap();
    assert_eq!(calls[0].2.get("page-size").unwrap(), "Legal");
}

#[test]
fn template_dir_rel_points_back_to_templates() {
    let temp = TempDir::new().unwrap();
    let root = scaffold_project(&temp);
    std::fs::write(
        root.join("Templates").join("html").join("default.html"),
        "<link href=\"{{ context.template_dir_rel }}/html/style.css\">",
    )
    .unwrap();

    let mut request = BuildRequest::new(&root, "Default");
    request.pdf = false;
    request.text = false;

    let report = run_build(&request, &FakeConverter::default()).unwrap();
    let html = std::fs::read_to_string(report.out_dir.join("Default.html")).unwrap();
    // out dir is <root>/Publish/<dated>, so two levels up reaches the root
    assert!(html.contains("../../Templates/html/style.css"));
}
