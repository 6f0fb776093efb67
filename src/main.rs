//! ontodiff: semantic diff between ontology versions
//!
//! Renders the class-level changes between consecutive OWL ontology versions
//! as quad datasets in the versioning vocabulary.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ontodiff::{
    cli,
    config::{self, AppConfig, ConfigOverrides, ConfigPreset, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
    serialize::GraphFormat,
    vocab::VocabularyVersion,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  RDF/XML (.owl, .rdf, .xml), Turtle (.ttl), N-Triples (.nt),",
        "\n  N-Quads (.nq), TriG (.trig)",
        "\n\nDiff Graph Formats:",
        "\n  trig, nquads",
        "\n\nReport Formats:",
        "\n  text, summary, json"
    )
}

#[derive(Parser)]
#[command(name = "ontodiff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Semantic diff between ontology versions", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or changes found without --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Diff every consecutive pair of versions in a directory
    ontodiff sequence ontologies/

    # Only files named top_*.owl, plus a text report per pair
    ontodiff sequence ontologies/ --prefix top_ --text-report

    # One pair, graph to a file, JSON report on stdout
    ontodiff diff v1.owl v2.owl -O v1-v2.trig -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset (see `config presets`)
    #[arg(long, global = true, value_name = "NAME")]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Options shared by `sequence` and `diff`
#[derive(clap::Args)]
struct ComparisonArgs {
    /// Annotation property to compare (repeatable; replaces the defaults)
    #[arg(long = "annotation-property", value_name = "IRI")]
    annotation_properties: Vec<String>,

    /// Quad format of the diff graph
    #[arg(long, value_enum)]
    format: Option<GraphFormat>,

    /// Vocabulary namespace for rendered terms
    #[arg(long, value_enum)]
    vocabulary: Option<VocabularyVersion>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `sequence` subcommand
#[derive(Parser)]
struct SequenceArgs {
    /// Directory holding the ontology versions
    base_dir: PathBuf,

    /// File name suffix of ontology versions
    #[arg(long)]
    extension: Option<String>,

    /// Only consider files whose name starts with this prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Also write a plain-text report next to each diff graph
    #[arg(long)]
    text_report: bool,

    /// Write artifacts here instead of the base directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    comparison: ComparisonArgs,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the older ontology version
    older: PathBuf,

    /// Path to the newer ontology version
    newer: PathBuf,

    /// Report format printed to stdout
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write the diff graph to this file
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    comparison: ComparisonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff every consecutive pair of ontology versions in a directory
    Sequence(SequenceArgs),

    /// Diff two ontology versions
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (preset or defaults, then file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .ontodiff.yaml in the current directory
    Init,
    /// List the named configuration presets
    Presets,
}

// ============================================================================
// CLI → configuration
// ============================================================================

impl ComparisonArgs {
    fn apply(&self, overrides: &mut ConfigOverrides) {
        overrides.fail_on_change = self.fail_on_change;
        overrides.graph_format = self.format;
        overrides.vocabulary = self.vocabulary;
        if !self.annotation_properties.is_empty() {
            overrides.annotation_properties = Some(self.annotation_properties.clone());
        }
    }
}

fn preset(cli: &Cli) -> Result<Option<ConfigPreset>> {
    cli.preset
        .as_deref()
        .map(|name| {
            ConfigPreset::from_name(name).with_context(|| {
                let known: Vec<&str> =
                    ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("unknown preset '{name}' (known: {})", known.join(", "))
            })
        })
        .transpose()
}

/// Layer preset, config file and CLI overrides, then validate the result.
fn effective_config(cli: &Cli, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let preset = preset(cli)?;
    if let Some(preset) = preset {
        tracing::debug!("Using preset {preset}");
    }
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(preset, cli.config.as_deref(), overrides)?;
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn global_overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        quiet: cli.quiet,
        no_color: cli.no_color,
        ..ConfigOverrides::default()
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Sequence(args) => {
            let mut overrides = ConfigOverrides {
                extension: args.extension.clone(),
                prefix: args.prefix.clone(),
                text_report: args.text_report,
                output_dir: args.output_dir.clone(),
                ..global_overrides(cli)
            };
            args.comparison.apply(&mut overrides);
            let config =
                effective_config(cli, &overrides)?.sequence_config(args.base_dir.clone())?;
            cli::run_sequence(config)
        }

        Commands::Diff(args) => {
            let mut overrides = ConfigOverrides {
                report_format: args.output,
                ..global_overrides(cli)
            };
            args.comparison.apply(&mut overrides);
            let config = effective_config(cli, &overrides)?.diff_config(
                args.older.clone(),
                args.newer.clone(),
                args.output_file.clone(),
            )?;
            cli::run_diff(config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "ontodiff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to build schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config(cli, action)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = AppConfig::from_file_with_overrides(
                preset(cli)?,
                cli.config.as_deref(),
                &global_overrides(cli),
            )?;
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths = [
                std::env::current_dir().ok(),
                dirs::config_dir().map(|p| p.join("ontodiff")),
                dirs::home_dir(),
            ];
            eprintln!("Config file search paths (in order, plus the git root):");
            for path in search_paths.iter().flatten() {
                eprintln!("  {}", path.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in [".ontodiff.yaml", ".ontodiff.yml", "ontodiff.yaml", "ontodiff.yml"] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".ontodiff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Presets => {
            for preset in ConfigPreset::all() {
                println!("{:<10} {}", preset.name(), preset.description());
            }
        }
    }
    Ok(())
}
