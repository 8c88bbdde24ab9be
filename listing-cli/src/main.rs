use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Import from listing-extract-core
use listing_core::{
    serialization::OUTPUT_FORMATS, Extraction, ExtractionConfig, ListingField, ListingProcessor,
};

use listing_extract::{default_output_path, load_config, save_stages};

#[derive(Parser)]
#[command(name = "listing-extract")]
#[command(about = "Extract canonical rental listing records with configurable strategy chains")]
struct Args {
    /// Path to the listing document (.txt, .json word dump, .xhtml/.html)
    #[arg(short, long)]
    input: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: xml or json
    #[arg(short = 'f', long, default_value = "xml")]
    output_format: String,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Show available options and the per-field strategy chains, then exit
    #[arg(long)]
    show_configs: bool,

    /// Print timings for each pipeline step
    #[arg(long)]
    profile: bool,

    /// Dump all intermediate pipeline stage outputs to a directory
    /// Captures: loader text, tokens, reconstructed lines, record and summary
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output
    #[arg(long, default_value = "test_outputs/stages")]
    stages_dir: String,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    println!("🦀 Listing Extract");

    let config = load_config(args.config.as_deref())?;
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    if args.show_configs {
        show_help(&config);
        return Ok(());
    }

    if !OUTPUT_FORMATS.contains(&args.output_format.as_str()) {
        anyhow::bail!(
            "unknown output format '{}', expected one of: {}",
            args.output_format,
            OUTPUT_FORMATS.join(", ")
        );
    }

    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("no input given, pass --input <path> (see --show-configs)");
    };

    // Check if input file exists
    if !Path::new(input).exists() {
        anyhow::bail!("input document not found at: {input}");
    }

    let processor = ListingProcessor::new(config).context("invalid extraction config")?;
    tracing::debug!(input, format = %args.output_format, "extractor ready");

    println!("📄 Processing: {}", input);

    // Stage dump mode: capture and save all intermediates
    if args.dump_stages {
        println!("\n🔬 Pipeline stage dump mode");
        let stages = processor
            .process_file_capture_stages(Path::new(input))
            .context("stage dump failed")?;
        save_stages(&stages, input, &args.stages_dir)?;
        println!("\n✅ All stages dumped to: {}", args.stages_dir);
        return Ok(());
    }

    let extraction = processor
        .process_file_with_profiling(Path::new(input), args.profile)
        .with_context(|| format!("processing {input} failed"))?;

    print_record_summary(&extraction);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, &args.output_format));

    extraction.save_with_format(&output_path, &args.output_format)?;
    println!("💾 {} results saved to: {}", args.output_format.to_uppercase(), output_path);

    Ok(())
}

fn print_record_summary(extraction: &Extraction) {
    let record = &extraction.record;
    println!("✅ Successfully extracted listing");
    println!(
        "📊 Fields filled: {}/{}",
        record.filled_field_count(),
        ListingField::ALL.len()
    );
    for provenance in &extraction.provenance {
        if record.is_field_empty(provenance.field) {
            continue;
        }
        let strategy = provenance
            .strategy
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("   - {:<20} via {}", provenance.field.to_string(), strategy);
    }
}

fn show_help(config: &ExtractionConfig) {
    println!("\n📋 Available Options:");
    println!("  --input <path>          Listing document to process");
    println!("  --config <path>         Load custom config file (YAML)");
    println!("  --output <path>         Output file path (auto-generated if not specified)");
    println!("  --output-format <fmt>   Output format: xml or json");
    println!("  --print-config          Print the effective config as YAML");
    println!("  --profile               Print timings for each pipeline step");
    println!("  --dump-stages           Dump intermediate stages to --stages-dir");

    println!("\n📄 Input Formats:");
    println!("  .txt            - Plain text, form feed separates pages");
    println!("  .json           - Word dump: {{\"pages\": [{{\"text\", \"words\": [{{\"text\", \"x0\", \"top\"}}]}}]}}");
    println!("  .xhtml / .html  - Page divs with positioned spans (data-bbox, data-line)");

    println!("\n📄 Output Formats:");
    println!("  xml   - <Listing> document, one element per field (default)");
    println!("  json  - Record plus the strategy that decided each field");

    println!("\n🔗 Strategy chains (first strategy that decides wins):");
    for field in ListingField::ALL {
        let chain: Vec<String> = config
            .pipeline
            .chain_for(field)
            .iter()
            .map(|entry| {
                if entry.enabled {
                    entry.strategy.to_string()
                } else {
                    format!("({} disabled)", entry.strategy)
                }
            })
            .collect();
        println!("  {:<20} {}", field.to_string(), chain.join(" → "));
    }

    println!("\n📝 Usage Examples:");
    println!("  cargo run -- -i listing.txt");
    println!("  cargo run -- -i listing.json -f json -o /path/to/output.json");
    println!("  cargo run -- -i listing.xhtml -c config.yaml --dump-stages");
}
