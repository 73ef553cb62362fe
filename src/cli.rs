//! CLI definitions for cvforge.
//!
//! Built with clap's derive macros; the binary entry point in `main.rs`
//! dispatches on [`Command`].

use clap::{ArgAction, Args, Parser, Subcommand};

/// Resume publishing tool: merges YAML data with templates into HTML, PDF,
/// and text.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate HTML, PDF, and text versions of a resume into a dated
    /// directory
    Build(BuildArgs),

    /// Scaffold a starter project in the current directory
    Init,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Name of the source data directory to build from
    pub source: String,

    /// Alternate filename for published files (default: the source name)
    #[arg(long)]
    pub name: Option<String>,

    /// Config section to use from config.ini
    #[arg(long, default_value = "DEFAULT")]
    pub config: String,

    /// Clear and reuse an existing output directory instead of numbering
    #[arg(long)]
    pub overwrite: bool,

    /// Skip the HTML artifact
    #[arg(long = "no-html", action = ArgAction::SetFalse)]
    pub html: bool,

    /// Skip the text artifact
    #[arg(long = "no-text", action = ArgAction::SetFalse)]
    pub text: bool,

    /// Skip the PDF artifact
    #[arg(long = "no-pdf", action = ArgAction::SetFalse)]
    pub pdf: bool,
}
