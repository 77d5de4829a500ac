use analytics::StatisticsEngine;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use configuration::load_config;
use configuration::settings::Config;
use core_types::{Dataset, TieBreak};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod render;

/// The main entry point for the Palmares reporting tool.
fn main() -> ExitCode {
    // Optional .env file with PALMARES_* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = init_tracing(&config.logging.level);

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed.");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Academic performance reports (averages, rankings, best students) over a
/// directory of student, subject and grade records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to read instead of ./palmares.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding students.json, subjects.json and grades.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// How to order students with equal averages.
    #[arg(long, value_enum, global = true)]
    tie_break: Option<TieBreak>,

    /// Fail on corrupt files, non-positive coefficients or out-of-range notes.
    #[arg(long, global = true)]
    strict: bool,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every record against the validation rules.
    Validate,
    #[command(flatten)]
    Query(Query),
}

#[derive(Subcommand)]
enum Query {
    /// Weighted average and class rank of one student.
    Student { matricule: String },
    /// Full report card of one student.
    Bulletin { matricule: String },
    /// Class average, best student and ranking of one level.
    Class { niveau: String },
    /// Average and best student of one subject.
    Subject { code: String },
    /// Establishment-wide average and best student.
    Global,
    /// Dashboard figures: counts, global average, per-class averages.
    Overview,
}

/// Resolved options after layering command-line flags over the configuration.
struct Options {
    data_dir: PathBuf,
    tie_break: TieBreak,
    strict: bool,
    precision: u32,
    json: bool,
}

impl Options {
    fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            data_dir: cli.data_dir.clone().unwrap_or(config.data.dir),
            tie_break: cli.tie_break.unwrap_or(config.statistics.tie_break),
            strict: cli.strict || config.statistics.strict,
            precision: config.display.precision,
            json: cli.json,
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    let options = Options::resolve(&cli, config);
    tracing::debug!(
        data_dir = %options.data_dir.display(),
        tie_break = options.tie_break.as_str(),
        strict = options.strict,
        "Options resolved."
    );

    let dataset = repository::open(&options.data_dir)?
        .strict(options.strict)
        .load()
        .context("loading the data directory")?;

    match cli.command {
        Commands::Validate => Ok(handle_validate(&dataset, &options)),
        Commands::Query(query) => {
            let engine = if options.strict {
                StatisticsEngine::strict(&dataset.students, &dataset.subjects, &dataset.grades)?
            } else {
                StatisticsEngine::from_dataset(&dataset)
            }
            .with_tie_break(options.tie_break);

            handle_query(query, &engine, &options)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn handle_query(query: Query, engine: &StatisticsEngine<'_>, options: &Options) -> anyhow::Result<()> {
    let p = options.precision;
    match query {
        Query::Student { matricule } => {
            let Some(report) = engine.student_report(&matricule) else {
                bail!("no student with matricule '{matricule}'");
            };
            if options.json {
                print_json(&json!({
                    "student": report.student,
                    "average": report.average,
                    "rank": report.rank,
                    "ranked_count": report.ranked_count,
                }))?;
            } else {
                println!("{}", render::student_summary(&report, p));
            }
        }
        Query::Bulletin { matricule } => {
            let Some(report) = engine.student_report(&matricule) else {
                bail!("no student with matricule '{matricule}'");
            };
            if options.json {
                print_json(&report)?;
            } else {
                println!("{}", render::report_card(&report, p));
            }
        }
        Query::Class { niveau } => {
            let report = engine.class_report(&niveau);
            if report.enrolled == 0 {
                tracing::warn!(niveau = %niveau, "No student is enrolled in this level.");
            }
            if options.json {
                print_json(&report)?;
            } else {
                println!("{}", render::class(&report, p));
            }
        }
        Query::Subject { code } => {
            let Some(report) = engine.subject_report(&code) else {
                bail!("no subject or grade with code '{code}'");
            };
            if options.json {
                print_json(&report)?;
            } else {
                println!("{}", render::subject(&report, p));
            }
        }
        Query::Global => {
            let average = engine.global_average();
            let best = engine.best_student_global();
            if options.json {
                print_json(&json!({ "average": average, "best": best }))?;
            } else {
                let top = best.as_ref().map(|b| (b.student, b.average));
                println!("{}", render::global(average, top, p));
            }
        }
        Query::Overview => {
            let overview = engine.overview();
            if options.json {
                print_json(&overview)?;
            } else {
                println!("{}", render::overview(&overview, p));
            }
        }
    }
    Ok(())
}

fn handle_validate(dataset: &Dataset, options: &Options) -> ExitCode {
    let errors = dataset.validate();
    if options.json {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        println!("{}", json!({ "valid": errors.is_empty(), "errors": messages }));
    } else {
        println!("{}", render::validation(&errors));
    }
    if errors.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Sets up stderr logging. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .init();
    guard
}
