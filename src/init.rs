//! Starter project scaffolding.
//!
//! Thin collaborator around the build pipeline: lays down the directory
//! structure and minimal starter files a new project needs, skipping
//! anything that already exists.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

const STARTER_CONFIG: &str = "\
[DEFAULT]
# TEMPLATES_DIR = Templates
# SOURCES_DIR = Resume Data
# PUBLISH_DIR = Publish
# HTML_TEMPLATE = default
# TEXT_TEMPLATE = default
# PDF_PAGE_SIZE = Letter
# TITLE = yes
# SKILLS_LAYOUT = Languages, Frameworks|Tools
";

const STARTER_HTML: &str = "\
<!DOCTYPE html>
<html>
<head><meta charset=\"utf-8\"><title>{{ context.Header.name }}</title></head>
<body>
<h1>{{ context.Header.name }}</h1>
{% if context.title %}
<h2>Resume</h2>
{% endif %}
</body>
</html>
";

const STARTER_TEXT: &str = "\
{{ context.Header.name }}
{% if context.title %}
Resume
{% endif %}
";

const STARTER_HEADER: &str = "<div class=\"header\">{{ name }}</div>\n";

const STARTER_DATA: &str = "name: Jane Doe\n";

/// Scaffold a starter project in `base_dir`.
pub fn run(base_dir: &Path) -> Result<()> {
    let dirs = [
        base_dir.join("Templates").join("html").join("headers"),
        base_dir.join("Templates").join("text"),
        base_dir.join("Resume Data").join("Default"),
        base_dir.join("Publish"),
    ];
    for dir in &dirs {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let files = [
        (base_dir.join("config.ini"), STARTER_CONFIG),
        (
            base_dir.join("Templates").join("html").join("default.html"),
            STARTER_HTML,
        ),
        (
            base_dir.join("Templates").join("text").join("default.txt"),
            STARTER_TEXT,
        ),
        (
            base_dir
                .join("Templates")
                .join("html")
                .join("headers")
                .join("header_default.html"),
            STARTER_HEADER,
        ),
        (
            base_dir.join("Resume Data").join("Default").join("Header.yaml"),
            STARTER_DATA,
        ),
    ];
    for (path, content) in &files {
        if path.exists() {
            info!(file = %path.display(), "already exists, skipping");
            continue;
        }
        std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
        info!(file = %path.display(), "created");
    }

    info!("to build, run: cvforge build Default");
    Ok(())
}
