//! HTML-to-PDF conversion capability.
//!
//! The converter is a foreign black-box process behind a trait so the build
//! pipeline can be exercised with a fake in tests.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// File-in/file-out HTML-to-PDF conversion.
///
/// `options` is a flat mapping of converter option names (already hyphenated,
/// e.g. `margin-top`, `header-html`) to values; an empty value denotes a bare
/// flag such as `quiet`.
pub trait HtmlToPdf {
    fn convert(
        &self,
        html: &Path,
        pdf: &Path,
        options: &BTreeMap<String, String>,
    ) -> Result<()>;
}

/// Production converter shelling out to `wkhtmltopdf`.
#[derive(Debug, Default)]
pub struct Wkhtmltopdf;

impl HtmlToPdf for Wkhtmltopdf {
    fn convert(
        &self,
        html: &Path,
        pdf: &Path,
        options: &BTreeMap<String, String>,
    ) -> Result<()> {
        let mut command = Command::new("wkhtmltopdf");
        for (key, value) in options {
            command.arg(format!("--{key}"));
            if !value.is_empty() {
                command.arg(value);
            }
        }
        command.arg(html).arg(pdf);
        debug!(?command, "invoking wkhtmltopdf");

        let output = command.output().map_err(|e| {
            Error::Conversion(format!(
                "cannot run wkhtmltopdf (is it installed and on PATH?): {e}"
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Conversion(format!(
                "wkhtmltopdf exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
