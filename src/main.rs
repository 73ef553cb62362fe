//! cvforge binary entry point.

use anyhow::Result;
use clap::Parser;
use cvforge::build::{self, BuildRequest};
use cvforge::cli::{Cli, Command};
use cvforge::init;
use cvforge::pdf::Wkhtmltopdf;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base_dir = PathBuf::from(".");
    match cli.command {
        Command::Build(args) => {
            let request = BuildRequest {
                base_dir,
                source: args.source,
                name: args.name,
                section: args.config,
                overwrite: args.overwrite,
                html: args.html,
                text: args.text,
                pdf: args.pdf,
            };
            let report = build::run_build(&request, &Wkhtmltopdf)?;
            println!("Output written to \"{}\"", report.out_dir.display());
            for (label, artifact) in [
                ("html", &report.html),
                ("pdf", &report.pdf),
                ("text", &report.text),
            ] {
                match artifact {
                    build::Artifact::Written(path) => {
                        println!("  {label}: {}", path.display());
                    }
                    build::Artifact::NotRequested => println!("  {label}: not requested"),
                }
            }
        }
        Command::Init => init::run(&base_dir)?,
    }

    Ok(())
}
