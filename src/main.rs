extern crate log;
use clap::Parser;
use crc2vice::config::{GeometryErrorPolicy, OutputFormat, Settings, Traversal};
use crc2vice::pipeline;
use std::path::PathBuf;

/// Convert the video maps of a CRC ARTCC definition into vice video map files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ARTCC to convert, e.g. ZNY.
    facility: String,

    /// Path to a YAML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output files to write. Overrides the settings file.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// How GeoJSON files are located. Overrides the settings file.
    #[arg(short, long, value_enum)]
    traversal: Option<Traversal>,

    /// Abort on the first GeoJSON file that cannot be read or decoded.
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(traversal) = self.traversal {
            settings.traversal = traversal;
        }
        if self.strict {
            settings.on_geometry_error = GeometryErrorPolicy::Abort;
        }
        Ok(settings)
    }
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let settings = args.settings()?;
    log::debug!("{:?}", settings);

    let report = pipeline::convert(&args.facility, &settings)?;
    for path in &report.written {
        log::info!("Wrote {}", path.display());
    }
    if report.has_warnings() {
        log::warn!(
            "Finished with {} skipped GeoJSON files and {} duplicate map names",
            report.skipped.len(),
            report.duplicates.len()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = try_main(args) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
