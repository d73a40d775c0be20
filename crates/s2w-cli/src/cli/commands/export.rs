//! `s2w -i <in> -o <out>` – convert an export directory.

use anyhow::Result;
use s2w_core::config::ExportConfig;
use std::path::Path;

pub fn run_export(in_dir: &Path, out_dir: &Path, cfg: ExportConfig) -> Result<()> {
    let summary = s2w_core::export(in_dir, out_dir, cfg)?;
    println!(
        "Wrote {} item(s) to {} ({} skipped without a body, {} image(s) saved)",
        summary.items,
        summary.output.display(),
        summary.skipped,
        summary.images
    );
    Ok(())
}
