// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typeshape-gen CLI
//!
//! Extracts record schemas from Go struct declarations or a JSON sample.
//!
//! # Usage
//!
//! ```bash
//! # Schema of SS and everything it reaches
//! typeshape-gen extract --input models.go --root SS
//!
//! # Every struct, compact, without the diagnostics list
//! typeshape-gen extract --input models.go --all --compact --no-diagnostics
//!
//! # Records inferred from a JSON sample
//! typeshape-gen extract --json sample.json --root Root
//!
//! # Describe one record
//! typeshape-gen lookup --input models.go Profile
//!
//! # Fail when any field cannot be described
//! typeshape-gen check --config typeshape.toml
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use typeshape::{extract_schema, extract_schemas, Extraction};
use typeshape_gen::{output, GenConfig, GoSource, JsonSample};

/// Record schema extraction for Go sources
#[derive(Parser, Debug)]
#[command(name = "typeshape-gen")]
#[command(about = "Extract self-describing record schemas from Go structs or JSON samples")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the record descriptions come from.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Go source file (can repeat)
    #[arg(short, long = "input")]
    inputs: Vec<PathBuf>,

    /// JSON sample document to infer records from
    #[arg(long, conflicts_with_all = ["inputs", "all"])]
    json: Option<PathBuf>,

    /// Root struct name (can repeat); with --json, names the top-level record
    #[arg(short, long = "root")]
    roots: Vec<String>,

    /// Use every struct found in the inputs as a root
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract schemas and write them as JSON
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,

        /// Write the bare schema set without the diagnostics list
        #[arg(long)]
        no_diagnostics: bool,

        /// Exit with status 1 when any diagnostic is raised
        #[arg(long)]
        fail_on_diagnostics: bool,
    },

    /// Describe one record type
    Lookup {
        #[command(flatten)]
        source: SourceArgs,

        /// Record type name
        type_name: String,
    },

    /// Extract and report problems without writing a schema
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "typeshape.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenConfig { output } => {
            init_logging(cli.log_level.as_deref().unwrap_or("info"));
            cmd_gen_config(output)
        }
        Commands::Extract {
            source,
            output,
            compact,
            no_diagnostics,
            fail_on_diagnostics,
        } => {
            let mut config = build_config(source, None)?;
            if output.is_some() {
                config.output = output;
            }
            config.pretty &= !compact;
            config.include_diagnostics &= !no_diagnostics;
            config.fail_on_diagnostics |= fail_on_diagnostics;

            init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
            cmd_extract(&config)
        }
        Commands::Lookup { source, type_name } => {
            let config = build_config(source, Some(&type_name))?;
            init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
            cmd_lookup(&config, &type_name)
        }
        Commands::Check { source } => {
            let config = build_config(source, None)?;
            init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
            cmd_check(&config)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file (if any), layer the command-line flags on top, then
/// validate the result.
fn build_config(args: SourceArgs, default_root: Option<&str>) -> Result<GenConfig> {
    let mut config = match &args.config {
        Some(path) => GenConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GenConfig::default(),
    };

    if !args.inputs.is_empty() {
        config.inputs = args.inputs;
        config.json = None;
    }
    if let Some(json) = args.json {
        config.json = Some(json);
        config.inputs.clear();
    }
    if !args.roots.is_empty() {
        config.roots = args.roots;
    }
    config.all_structs |= args.all;

    if config.json.is_none() && config.roots.is_empty() && !config.all_structs {
        if let Some(root) = default_root {
            config.roots.push(root.to_string());
        }
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &GenConfig) -> Result<Extraction> {
    if let Some(path) = &config.json {
        let root_name = config.roots.first().map(String::as_str).unwrap_or("Root");
        let sample = JsonSample::from_file(path, root_name)
            .with_context(|| format!("failed to infer records from {}", path.display()))?;
        tracing::info!("Extracting {} from {}", sample.root(), path.display());
        return Ok(extract_schema(&sample, sample.root()));
    }

    let source =
        GoSource::from_files(config.inputs.as_slice()).context("failed to scan Go sources")?;

    let mut roots: Vec<String> = Vec::new();
    if config.all_structs {
        roots.extend(source.struct_names().iter().cloned());
    }
    for root in &config.roots {
        if !roots.contains(root) {
            roots.push(root.clone());
        }
    }
    if roots.is_empty() {
        bail!("no struct declarations found in the inputs");
    }

    tracing::info!(
        "Extracting {} root(s) from {} file(s)",
        roots.len(),
        config.inputs.len()
    );
    Ok(extract_schemas(&source, &roots))
}

fn cmd_extract(config: &GenConfig) -> Result<ExitCode> {
    let extraction = run(config)?;

    let text = output::render(&extraction, config.pretty, config.include_diagnostics)
        .context("failed to encode schema")?;
    output::write_output(&text, config.output.as_deref()).context("failed to write output")?;

    if let Some(path) = &config.output {
        tracing::info!("Wrote {} record(s) to {}", extraction.schema.len(), path.display());
    }
    eprint!("{}", output::summarize(&extraction));

    if config.fail_on_diagnostics && !extraction.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_lookup(config: &GenConfig, type_name: &str) -> Result<ExitCode> {
    let extraction = run(config)?;

    match extraction.schema.lookup(type_name) {
        Ok(record) => {
            print!("{}", output::describe_record(record));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_check(config: &GenConfig) -> Result<ExitCode> {
    let extraction = run(config)?;
    print!("{}", output::summarize(&extraction));

    if let Err(reason) = extraction.schema.check_invariants() {
        eprintln!("Schema inconsistent: {}", reason);
        return Ok(ExitCode::FAILURE);
    }

    if extraction.is_clean() {
        println!("All records fully described.");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_gen_config(output: PathBuf) -> Result<ExitCode> {
    let text = GenConfig::example().to_toml()?;
    std::fs::write(&output, text)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Generated example configuration: {}", output.display());
    Ok(ExitCode::SUCCESS)
}
