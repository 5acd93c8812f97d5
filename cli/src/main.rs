use std::fs;
use std::path::{Path, PathBuf};

use chart_readme_core::ReadmeConfig;
use chart_readme_parser::Documentation;
use chart_readme_parser::output::{OutputFormat, format_metadata, format_report, format_values};
use chart_readme_parser::render::{build_schema, insert_parameters, render_sections};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "readme-generator")]
#[command(about = "Generate README parameter tables from annotated chart values files")]
#[command(version)]
struct Cli {
    /// Log debug events to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Update a README and/or write a JSON schema from a values file.
    Generate(GenerateArgs),
    /// Check that documented parameters and values agree.
    Check(CheckArgs),
    /// Print the documentation extracted from comment tags.
    Metadata(MetadataArgs),
    /// Print the flattened values of a values file.
    Values(ValuesArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Annotated values file.
    #[arg(long)]
    values: PathBuf,
    /// README whose parameters section is replaced in place.
    #[arg(long)]
    readme: Option<PathBuf>,
    /// Output path for the generated JSON schema.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Tag configuration file (JSON or YAML).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Annotated values file.
    #[arg(long)]
    values: PathBuf,
    /// Tag configuration file (JSON or YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct MetadataArgs {
    /// Annotated values file.
    #[arg(long)]
    values: PathBuf,
    /// Tag configuration file (JSON or YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ValuesArgs {
    /// Values file.
    #[arg(long)]
    values: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
        Command::Metadata(args) => run_metadata(args),
        Command::Values(args) => run_values(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<ReadmeConfig, String> {
    match path {
        Some(path) => ReadmeConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(ReadmeConfig::default()),
    }
}

fn load_documentation(values: &Path, config: &ReadmeConfig) -> Result<Documentation, String> {
    Documentation::from_file(values, config)
        .map_err(|err| format!("Failed to read '{}': {err}", values.display()))
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let docs = load_documentation(&args.values, &config)?;

    if !docs.report.success {
        for finding in &docs.report.findings {
            warn!(code = %finding.code, path = %finding.path, "Values check failed");
        }
        return Err(format!(
            "{} check error(s) in '{}'; run `readme-generator check` for details",
            docs.report.findings.len(),
            args.values.display()
        ));
    }

    let metadata = docs.prepare(&config).map_err(|err| err.to_string())?;
    let tables = render_sections(&metadata);

    if let Some(readme_path) = &args.readme {
        let readme = fs::read_to_string(readme_path)
            .map_err(|err| format!("Failed to read '{}': {err}", readme_path.display()))?;
        let updated = insert_parameters(&readme, &tables, &config.regexp.params_section_title)
            .map_err(|err| format!("{}: {err}", readme_path.display()))?;
        fs::write(readme_path, updated)
            .map_err(|err| format!("Failed to write '{}': {err}", readme_path.display()))?;
        info!(readme = %readme_path.display(), "Updated README");
    }

    if let Some(schema_path) = &args.schema {
        let schema = serde_json::to_string_pretty(&build_schema(&metadata))
            .map_err(|e| format!("Failed to serialize schema: {e}"))?;
        fs::write(schema_path, format!("{schema}\n"))
            .map_err(|err| format!("Failed to write '{}': {err}", schema_path.display()))?;
        info!(schema = %schema_path.display(), "Wrote JSON schema");
    }

    if args.readme.is_none() && args.schema.is_none() {
        print!("{tables}");
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let docs = load_documentation(&args.values, &config)?;

    println!("{}", format_report(&docs.report, args.format)?);
    if docs.report.success {
        Ok(())
    } else {
        Err(format!(
            "{} check error(s) in '{}'",
            docs.report.findings.len(),
            args.values.display()
        ))
    }
}

fn run_metadata(args: MetadataArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let metadata = chart_readme_parser::read_metadata(&args.values, &config)
        .map_err(|err| format!("Failed to read '{}': {err}", args.values.display()))?;
    println!("{}", format_metadata(&metadata, args.format)?);
    Ok(())
}

fn run_values(args: ValuesArgs) -> Result<(), String> {
    let values = chart_readme_parser::read_values(&args.values)
        .map_err(|err| format!("Failed to read '{}': {err}", args.values.display()))?;
    println!("{}", format_values(&values, args.format)?);
    Ok(())
}
