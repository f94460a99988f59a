//! inputmask - format text with input masks from the command line

use anyhow::{Context, Result};
use clap::Parser;

use inputmask::cli::{self, CliArgs};
use inputmask::config::MaskConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    inputmask::tracing::init();

    let config = match &args.config {
        Some(path) => MaskConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MaskConfig::load(),
    };

    let output = cli::execute(args.command, &config)?;
    println!("{}", output.text);

    if !output.success {
        std::process::exit(1);
    }
    Ok(())
}
