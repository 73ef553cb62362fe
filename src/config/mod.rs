//! Layered build configuration.
//!
//! One effective configuration is resolved per build from three tiers with
//! flat key-by-key overriding:
//! 1. **Defaults** - embedded option table
//! 2. **Global** - `./config.ini` in the working directory
//! 3. **Source** - `<sources_dir>/<source>/config.ini`
//!
//! Config files use an INI `[DEFAULT]`/section model; `--config SECTION`
//! selects a named section whose keys override `DEFAULT` within the same
//! file. Missing files are silently skipped.

mod loader;
mod types;

pub use loader::resolve;
pub use types::BuildConfig;
