//! CLI for the s2w converter.

mod commands;

use anyhow::Result;
use clap::Parser;
use s2w_core::config::{self, ExportConfig};
use std::path::PathBuf;

use commands::run_export;

/// Top-level CLI: convert one Substack export directory.
#[derive(Debug, Parser)]
#[command(name = "s2w")]
#[command(about = "Convert a Substack export to a WordPress WXR file", long_about = None)]
pub struct Cli {
    /// Substack export directory (contains posts.csv and posts/).
    #[arg(short = 'i', long, value_name = "DIR")]
    pub in_dir: PathBuf,

    /// Output directory for wordpress_export.xml and images/.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Point each <img src> in the exported content at the downloaded copy.
    #[arg(long)]
    pub relink_images: bool,

    /// Config file to use instead of ~/.config/s2w/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    /// Loads the config file, then applies flags that override it.
    pub fn resolve_config(&self) -> Result<ExportConfig> {
        let mut cfg = config::load(self.config.as_deref())?;
        if self.relink_images {
            cfg.relink_images = true;
        }
        Ok(cfg)
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.resolve_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        run_export(&self.in_dir, &self.out_dir, cfg)
    }
}
