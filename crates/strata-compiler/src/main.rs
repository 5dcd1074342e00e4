//! Strata compiler CLI: compile OTel export-sink requests to plan operators

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use strata_compiler::{compile, logging, CompileRequest, Config, OutputFormat};
use tracing::info;

#[derive(Parser)]
#[command(name = "strata-compiler")]
#[command(
    about = "Compile OpenTelemetry export sinks to physical-plan operators",
    long_about = None
)]
struct Cli {
    /// Path to a strata.yaml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a request and emit the operator
    Compile {
        /// Path to the request file (.yaml, .yml or .json)
        #[arg(short, long)]
        request: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Show the columns a request needs from its input relation
    Columns {
        /// Path to the request file (.yaml, .yml or .json)
        #[arg(short, long)]
        request: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::from_env()?,
    };
    config.apply_logging_env();
    logging::init();

    match cli.command {
        Commands::Compile {
            request,
            out,
            format,
        } => {
            let format = format.unwrap_or(config.compiler.output_format);
            run_compile(&config, &request, out.as_deref(), format)
        }
        Commands::Columns { request } => show_columns(&config, &request),
    }
}

fn run_compile(
    config: &Config,
    request_path: &Path,
    out: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let request = CompileRequest::load(request_path)
        .with_context(|| format!("loading request {}", request_path.display()))?;
    let compiled = compile(&request, &config.compiler)?;

    let bytes = match format {
        OutputFormat::Binary => compiled.encode(),
        OutputFormat::Summary => {
            let mut json = serde_json::to_vec_pretty(&compiled.summary())?;
            json.push(b'\n');
            json
        }
    };

    match out {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "Wrote compiled operator");
        }
        None => std::io::stdout().write_all(&bytes)?,
    }

    for diagnostic in &compiled.diagnostics {
        eprintln!("{}", diagnostic);
    }
    Ok(())
}

fn show_columns(config: &Config, request_path: &Path) -> anyhow::Result<()> {
    let request = CompileRequest::load(request_path)
        .with_context(|| format!("loading request {}", request_path.display()))?;
    let compiled = compile(&request, &config.compiler)?;

    println!("Required input columns:");
    for name in &compiled.required_columns {
        println!("  {}", name);
    }
    println!("\nOutput relation:");
    for (index, field) in compiled.output_schema.fields().iter().enumerate() {
        println!(
            "  [{}] {}: {} ({:?})",
            index, field.name, field.data_type, field.semantic_type
        );
    }
    Ok(())
}
