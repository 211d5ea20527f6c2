//! Command implementations

use anyhow::{bail, Result};
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::AnalyzeArgs;
use crate::config::AnalyzerConfig;
use crate::output::{render_reports, FileReport};
use crate::utils::collect_video_files;

/// Execute the analyze command
pub async fn analyze(args: AnalyzeArgs, config: &AnalyzerConfig) -> Result<()> {
    let files = collect_video_files(&args.paths);
    if files.is_empty() {
        bail!("No video files found in the given paths");
    }
    info!("Starting analysis of {} file(s)", files.len());

    let container = DefaultAppContainer::new(config);
    let analyzer = container.analyze_interactor();
    let results = analyzer.analyze_batch(files).await;

    let reports: Vec<FileReport<'_>> = results
        .iter()
        .map(|(path, result)| FileReport::new(path, result))
        .collect();
    print!("{}", render_reports(&reports, args.format)?);

    let failed = results.iter().filter(|(_, result)| result.is_err()).count();
    if failed > 0 {
        bail!("{} of {} file(s) could not be analyzed", failed, results.len());
    }
    info!("Analysis completed successfully");
    Ok(())
}

/// Execute the capabilities command
pub fn capabilities(config: &AnalyzerConfig) -> Result<()> {
    let container = DefaultAppContainer::new(config);
    let analyzer = container.analyze_interactor();

    let available = if analyzer.is_full_analysis_available() { "yes" } else { "no" };
    println!("Full analysis available: {}", available);

    let missing = analyzer.missing_capabilities();
    if !missing.is_empty() {
        println!("Missing capabilities:");
        for capability in missing {
            println!("  - {}: requires {}", capability, capability.requirement());
        }
    }
    Ok(())
}
