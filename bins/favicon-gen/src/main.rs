//! favicon-gen: build the GlassTones favicon set from the background texture.

use clap::Parser;
use glasstones_cli::output::{format_dimensions, format_duration, format_size, Status};
use glasstones_cli::progress;
use glasstones_favicon::{FaviconConfig, FaviconDeriver, FaviconError, FaviconReport, Progress};
use glasstones_telemetry::{TelemetryConfig, Timer};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "favicon-gen")]
#[command(about = "Generate favicon PNGs and favicon.ico from assets/rust_bg.jpg")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the run report as JSON instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = glasstones_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<FaviconError>() {
                Some(FaviconError::MissingInput(path)) => {
                    Status::error(&format!("input not found: {}", path.display()))
                }
                _ => Status::error(&e.to_string()),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let deriver = FaviconDeriver::new(FaviconConfig::default())?;
    let timer = Timer::start("favicon_derive");

    if cli.json {
        let report = deriver.derive()?;
        timer.stop();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let pb = progress::file_progress(deriver.total_files() as u64);
    pb.set_message("favicons");

    let result = deriver.derive_with_progress(|event| match event {
        Progress::Loaded { source, crop } => {
            progress::println(
                &pb,
                format!(
                    "Source image: {} ({}, {})",
                    format_dimensions(source.width, source.height),
                    source.format.mime_type(),
                    format_size(source.size_bytes as u64)
                ),
            );
            if !crop.is_full(source.width, source.height) {
                progress::println(&pb, format!("Cropped to {:?}", crop.as_box()));
            }
        }
        Progress::Written(file) => {
            progress::println(
                &pb,
                format!("Created: {} ({})", file.file_name(), format_size(file.bytes)),
            );
            pb.inc(1);
        }
    });

    match result {
        Ok(report) => {
            progress::finish_success(&pb, "favicons");
            let elapsed = timer.stop();
            print_summary(&report, elapsed);
            Ok(())
        }
        Err(e) => {
            progress::finish_error(&pb, "favicons");
            tracing::debug!(error = %e, "Favicon generation failed");
            Err(e.into())
        }
    }
}

fn print_summary(report: &FaviconReport, elapsed: std::time::Duration) {
    println!();
    Status::success(&format!(
        "Favicon set created in {} ({} total)",
        format_duration(elapsed),
        format_size(report.total_bytes())
    ));
    Status::header("Created files");
    for file in &report.files {
        Status::item(&file.file_name());
    }
}
