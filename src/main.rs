use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};

use osm_wrangler::app::shape_use_case::ShapeUseCase;
use osm_wrangler::config::Config;
use osm_wrangler::infra::{default_output_path, JsonFileSink};
use osm_wrangler::logging;
use osm_wrangler::observability::init_metrics;
use osm_wrangler::pipeline::processing::normalize::PostcodeNormalizer;
use osm_wrangler::pipeline::{MetricsParser, OsmXmlParser, Shaper};

#[derive(Parser)]
#[command(name = "osm_wrangler")]
#[command(about = "Reshape OpenStreetMap XML exports into document-store records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to $OSM_WRANGLER_CONFIG or ./osm_wrangler.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shape every node and way of an OSM XML file into JSON records
    Shape {
        /// OSM XML export to read
        input: PathBuf,
        /// Output file (defaults to <INPUT>.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Pretty-print records instead of one object per line
        #[arg(long)]
        pretty: bool,
        /// Print the run's metrics in Prometheus text format
        #[arg(long)]
        metrics: bool,
    },
    /// Validate a UK postcode and print its area and unit codes
    Postcode { value: String },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = logging::init_logging(&config.logging.directory);
    let metrics_handle = init_metrics().context("Failed to initialize metrics")?;

    match cli.command {
        Commands::Shape {
            input,
            output,
            pretty,
            metrics,
        } => {
            let span = tracing::info_span!("shape", input = %input.display());
            let _enter = span.enter();

            let output = output.unwrap_or_else(|| default_output_path(&input));
            let pretty = pretty || config.output.pretty;

            let xml = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let sink = JsonFileSink::create(&output, pretty)
                .with_context(|| format!("Failed to create {}", output.display()))?;

            info!("Starting shaping run");
            let mut use_case =
                ShapeUseCase::new(Shaper::with_options(config.shaper_options()), sink);
            let parser = MetricsParser::new(OsmXmlParser::new());
            let report = match use_case.shape_bytes(&parser, xml.as_bytes()) {
                Ok(report) => report,
                Err(e) => {
                    error!("Shaping run failed: {:#}", e);
                    return Err(e);
                }
            };

            println!("📊 Shaping results for {}:", input.display());
            println!("   Elements read: {}", report.total_elements);
            println!(
                "   Records: {} ({} nodes, {} ways)",
                report.shaped_records, report.nodes, report.ways
            );
            println!("   Rejected: {}", report.rejected_elements);
            println!("   Distinct users: {}", report.distinct_users);
            println!("   Errors: {}", report.errors.len());
            println!("   Output file: {}", output.display());

            if !report.errors.is_empty() {
                warn!("{} errors encountered during shaping run", report.errors.len());
                println!("\n⚠️  Errors encountered:");
                for error in &report.errors {
                    println!("   - {}", error);
                }
            }

            let rendered = metrics_handle.render();
            debug!("Run metrics:\n{}", rendered);
            if metrics {
                println!("\n📈 Metrics:\n{}", rendered);
            }
        }
        Commands::Postcode { value } => {
            let (area, unit) = PostcodeNormalizer::new().normalize(&value);
            println!("{area} {unit}");
        }
    }
    Ok(())
}
