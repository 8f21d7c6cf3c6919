use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

use manager_scorecard::config::{self, Config};
use manager_scorecard::metrics::MetricsBundle;
use manager_scorecard::output;
use manager_scorecard::scoring::{compute, Variant, VariantConfig};
use manager_scorecard::store::{self, Scorecard, ScorecardRequest, ScorecardStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_STORE: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Format {
    #[default]
    Table,
    Json,
    Tsv,
}

/// Output for a single scorecard
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum DetailFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a metrics file without saving it
    Calculate {
        /// Metrics file (.json, otherwise YAML)
        file: PathBuf,
        /// Outlet variant (defaults to the configured variant)
        #[arg(long, value_enum)]
        variant: Option<Variant>,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Score a scorecard request file and save it to the store
    Save {
        /// Request file with manager, mall, month and metrics
        file: PathBuf,
    },
    /// List saved scorecards
    List {
        /// Month name, e.g. "January"
        #[arg(long)]
        month: Option<String>,
        /// Year, e.g. "2026"
        #[arg(long)]
        year: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Show one saved scorecard with its breakdown
    Show {
        id: u64,
        #[arg(long, value_enum, default_value_t)]
        format: DetailFormat,
    },
    /// Delete a saved scorecard
    Delete { id: u64 },
    /// Print the effective threshold ladders as YAML
    Ladders {
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },
    /// Write a starter config file with every ladder spelled out
    Init {
        #[arg(long, value_enum, default_value_t)]
        variant: Variant,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(about = "Monthly performance scorecards for outlet managers", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/manager-scorecard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    manager_scorecard::logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    // init writes the config, so it runs before one is loaded
    if let Commands::Init { variant, force } = cli.command {
        let path = match config_path {
            Some(p) => p,
            None => exit_on_err(config::get_config_path(), "Config error", EXIT_CONFIG),
        };
        exit_on_err(
            config::write_starter_config(&path, variant, force),
            "Config error",
            EXIT_CONFIG,
        );
        println!("Wrote {} config to {}", variant, path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config = exit_on_err(config::load_config(config_path), "Config error", EXIT_CONFIG);

    if let Err(errors) = config::validate_config(&config) {
        print_errors("Ladder config errors:", &errors);
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Calculate {
            file,
            variant,
            format,
        } => {
            let variant = resolve_variant(&config, variant);
            let metrics: MetricsBundle = exit_on_err(
                manager_scorecard::input::load_input(&file),
                "Input error",
                EXIT_VALIDATION,
            );

            let result = match compute(&metrics, &variant) {
                Ok(r) => r,
                Err(e) => {
                    print_errors("Scoring errors:", e.messages());
                    std::process::exit(EXIT_VALIDATION);
                }
            };

            match format {
                Format::Table => println!(
                    "{}",
                    output::format_breakdown(&result, output::should_use_colors())
                ),
                Format::Tsv => println!("{}", output::format_breakdown_tsv(&result)),
                Format::Json => print_json(&result),
            }
        }
        Commands::Save { file } => {
            let request: ScorecardRequest = exit_on_err(
                manager_scorecard::input::load_input(&file),
                "Input error",
                EXIT_VALIDATION,
            );
            let variant = resolve_variant(&config, request.variant);

            let scorecard = match Scorecard::from_request(request, &variant, Utc::now()) {
                Ok(s) => s,
                Err(e) => {
                    print_errors("Scoring errors:", e.messages());
                    std::process::exit(EXIT_VALIDATION);
                }
            };

            let (path, mut scorecards) = open_store(&config);
            let total = scorecard.total_score;
            let id = scorecards.insert(scorecard);
            exit_on_err(store::save_store(&path, &scorecards), "Store error", EXIT_STORE);

            info!(id, total, "saved scorecard");
            println!(
                "Saved scorecard #{} ({} points)",
                id,
                output::format_points(total)
            );
        }
        Commands::List {
            month,
            year,
            format,
        } => {
            let (_, scorecards) = open_store(&config);
            let matching = store::filter_by_period(&scorecards, month.as_deref(), year.as_deref());
            debug!(
                matching = matching.len(),
                stored = scorecards.len(),
                "filtered scorecards"
            );

            match format {
                Format::Table => println!(
                    "{}",
                    output::format_scorecard_table(&matching, output::should_use_colors())
                ),
                Format::Tsv => println!("{}", output::format_scorecard_tsv(&matching)),
                Format::Json => print_json(&matching),
            }
        }
        Commands::Show { id, format } => {
            let (_, scorecards) = open_store(&config);
            let Some(card) = scorecards.get(id) else {
                eprintln!("Scorecard {} not found", id);
                std::process::exit(EXIT_NOT_FOUND);
            };

            match format {
                DetailFormat::Json => print_json(card),
                DetailFormat::Table => println!(
                    "{}",
                    output::format_scorecard_detail(card, output::should_use_colors())
                ),
            }
        }
        Commands::Delete { id } => {
            let (path, mut scorecards) = open_store(&config);
            if scorecards.remove(id).is_none() {
                eprintln!("Scorecard {} not found", id);
                std::process::exit(EXIT_NOT_FOUND);
            }
            exit_on_err(store::save_store(&path, &scorecards), "Store error", EXIT_STORE);
            println!("Deleted scorecard #{}", id);
        }
        Commands::Ladders { variant } => {
            let variant = resolve_variant(&config, variant);
            let yaml = exit_on_err(
                serde_saphyr::to_string(&variant.to_overrides())
                    .map_err(|e| anyhow::anyhow!("Failed to serialize ladders: {}", e)),
                "Config error",
                EXIT_CONFIG,
            );
            print!("{}", yaml);
        }
        // handled above
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Built-in variant (explicit, or from config) with ladder overrides applied
fn resolve_variant(config: &Config, requested: Option<Variant>) -> VariantConfig {
    let variant = requested.unwrap_or_else(|| config.variant());
    match config::effective_variant(config, variant) {
        Ok(v) => v,
        Err(errors) => {
            print_errors("Ladder config errors:", &errors);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn open_store(config: &Config) -> (PathBuf, ScorecardStore) {
    let path = exit_on_err(config::store_path(config), "Config error", EXIT_CONFIG);
    let scorecards = exit_on_err(store::load_store(&path), "Store error", EXIT_STORE);
    debug!(path = %path.display(), count = scorecards.len(), "opened store");
    (path, scorecards)
}

fn exit_on_err<T>(result: anyhow::Result<T>, prefix: &str, code: i32) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}: {:#}", prefix, e);
            std::process::exit(code);
        }
    }
}

fn print_errors(header: &str, errors: &[String]) {
    eprintln!("{}", header);
    for error in errors {
        eprintln!("  - {}", error);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_STORE);
        }
    }
}
