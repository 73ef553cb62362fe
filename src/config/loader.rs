//! Three-tier INI config resolution.

use super::types::{BuildConfig, DEFAULTS};
use crate::error::{Error, Result};
use ini::Ini;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Resolve the effective configuration for one build.
///
/// Layers, in increasing priority: embedded defaults, `<base>/config.ini`,
/// `<sources_dir>/<source>/config.ini`. `section` selects an INI section
/// whose keys override the file's `DEFAULT` entries; pass `"DEFAULT"` for
/// none. Absent files are not an error. Relative directory options are
/// anchored at `base`.
pub fn resolve(base: &Path, source: &str, section: &str) -> Result<BuildConfig> {
    let mut options: BTreeMap<String, String> = DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    apply_file(&mut options, &base.join("config.ini"), section)?;

    // The sources root may itself have been overridden by the global file,
    // so the per-source config path is computed from the layering so far.
    let sources_dir = options
        .get("sources_dir")
        .cloned()
        .unwrap_or_else(|| "Resume Data".to_string());
    let source_config = base.join(&sources_dir).join(source).join("config.ini");
    apply_file(&mut options, &source_config, section)?;

    let mut config = BuildConfig::from_options(&options)?;
    for dir in [
        &mut config.templates_dir,
        &mut config.sources_dir,
        &mut config.publish_dir,
    ] {
        if dir.is_relative() {
            *dir = base.join(&*dir);
        }
    }
    Ok(config)
}

/// Merge one config file into the option map, key-by-key.
///
/// The file's `DEFAULT` entries (INI general section or a section literally
/// named `DEFAULT`) apply first, then the selected section. Keys are folded
/// to lowercase, matching configparser-style files in the wild.
fn apply_file(options: &mut BTreeMap<String, String>, path: &Path, section: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let ini = Ini::load_from_file(path)
        .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;

    if let Some(props) = ini.section(None::<String>) {
        for (key, value) in props.iter() {
            options.insert(key.to_ascii_lowercase(), value.to_string());
        }
    }
    for (name, props) in ini.iter() {
        if name.is_some_and(|n| n.eq_ignore_ascii_case("DEFAULT")) {
            for (key, value) in props.iter() {
                options.insert(key.to_ascii_lowercase(), value.to_string());
            }
        }
    }

    if !section.eq_ignore_ascii_case("DEFAULT") {
        let named = ini
            .iter()
            .find(|(name, _)| name.is_some_and(|n| n.eq_ignore_ascii_case(section)));
        match named {
            Some((_, props)) => {
                for (key, value) in props.iter() {
                    options.insert(key.to_ascii_lowercase(), value.to_string());
                }
            }
            None => debug!(section, path = %path.display(), "config section not present"),
        }
    }

    debug!(path = %path.display(), "merged config file");
    Ok(())
}
