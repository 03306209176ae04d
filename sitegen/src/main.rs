use clap::Parser;
use generator::synthetic::{build_synthetic_collection, GeneratorConfig};
use log::{info, warn};
use metadata::scan::to_records;
use preview::PreviewServer;
use std::path::PathBuf;
use workflow::config::SiteConfig;
use workflow::runner::{ClusterReport, Runner};

mod generator;
mod metadata;
mod preview;
mod site;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Generate an interactive photo map site from geotagged photos")]
struct Args {
    /// Directory holding web-ready photos
    #[arg(short, long, default_value = "web_photos")]
    photos_dir: PathBuf,
    /// Directory for the generated site
    #[arg(short, long, default_value = "output/site")]
    output_dir: PathBuf,
    /// Directory for the metadata CSV and cluster report
    #[arg(long, default_value = "output")]
    metadata_dir: PathBuf,
    /// Only extract metadata, do not generate the site
    #[arg(short, long, default_value_t = false)]
    metadata_only: bool,
    /// Reuse the metadata CSV from an earlier run instead of scanning photos
    #[arg(long, default_value_t = false)]
    from_csv: bool,
    /// Load the site config from YAML instead of flags
    #[arg(long)]
    config: Option<PathBuf>,
    /// Build-time clustering threshold in degrees
    #[arg(long, default_value_t = 0.001)]
    threshold: f64,
    /// Print per-zoom cluster counts and append them to the report log
    #[arg(long, default_value_t = false, conflicts_with = "metadata_only")]
    report: bool,
    /// Report on a seeded synthetic collection of this size instead of scanning photos
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Serve the generated site locally until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

fn print_report(runner: &Runner, report: &ClusterReport) -> anyhow::Result<()> {
    print!("{}", report);
    runner.append_report(report)?;
    info!(
        "Cluster report appended to {}",
        runner.config().report_log().display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let site_config = if let Some(path) = args.config.as_ref() {
        SiteConfig::load(path)?
    } else {
        let config = SiteConfig::from_args(
            args.photos_dir.clone(),
            args.output_dir.clone(),
            args.metadata_dir.clone(),
            args.threshold,
        );
        config.to_stage_config().validate()?;
        config
    };
    let runner = Runner::new(site_config.clone());

    if let Some(count) = args.synthetic {
        let photos = build_synthetic_collection(&GeneratorConfig {
            count,
            seed: args.seed,
            ..Default::default()
        })?;
        let report = runner.report(&photos)?;
        print_report(&runner, &report)?;
        return Ok(());
    }

    let rows = if args.from_csv {
        runner.load_metadata()?
    } else {
        if !site_config.photos_dir.is_dir() {
            warn!(
                "Photos directory {} not found",
                site_config.photos_dir.display()
            );
            warn!("Place web-ready photos (JPEG, PNG or TIFF with GPS EXIF) there and rerun");
            return Ok(());
        }
        let rows = runner.collect_metadata()?;
        if !rows.is_empty() {
            println!(
                "Metadata for {} photos saved to {}",
                rows.len(),
                site_config.metadata_csv().display()
            );
        }
        rows
    };
    if rows.is_empty() {
        warn!("No photos with GPS coordinates found; nothing to render");
        return Ok(());
    }
    if args.metadata_only {
        return Ok(());
    }

    let summary = runner.build_site(&rows)?;
    println!(
        "Site generated -> {} ({} photos, {} clusters)",
        summary.index_path.display(),
        summary.photo_count,
        summary.cluster_count
    );

    if args.report {
        let report = runner.report(&to_records(&rows))?;
        print_report(&runner, &report)?;
    }

    if args.serve {
        PreviewServer::new(site_config.output_dir.clone(), args.port).serve_until_ctrl_c()?;
    }

    Ok(())
}
