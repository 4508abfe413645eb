use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use swimzones::{
    aggregate, aggregate_by_period, classify_effort, classify_text, parse_sessions_file,
    resolve_sessions, resolve_sessions_with_remote, DateRange, DetectionRecord, HeuristicsConfig,
    HumanReport, JsonSessionStore, Language, MachineReport, Period, RemoteClassificationRequest,
    RemoteClassificationResponse, RemoteClassifier, RemoteConfig, ResolveConfig, SessionStore,
    TimeSlot,
};

#[derive(Parser)]
#[command(name = "swimzones")]
#[command(
    author,
    version,
    about = "Swim training zone classification and analytics",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ClassifierArgs {
    /// Language pack (en or es); defaults to SWIMZONES_LANGUAGE or en
    #[arg(long)]
    language: Option<Language>,

    /// Read 10x200m as 200m instead of 2000m
    #[arg(long)]
    no_expand_repeats: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a free-text workout description into zones
    Classify {
        /// Workout description
        text: String,

        /// Also ask the remote classifier
        #[arg(long)]
        smart: bool,

        /// Stated objective passed to the remote classifier
        #[arg(long)]
        objective: Option<String>,

        /// Time of day passed to the remote classifier (morning, afternoon, evening)
        #[arg(long)]
        time_slot: Option<TimeSlot>,

        /// Remote request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        #[command(flatten)]
        classifier: ClassifierArgs,
    },

    /// Map an effort rating (1-10) to a single zone
    Effort {
        /// Effort rating; omit to get the default zone
        #[arg(allow_hyphen_values = true)]
        rating: Option<f64>,
    },

    /// Resolve the effective zone volumes of every session in a file
    Resolve {
        /// Sessions file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for resolved sessions (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ask the remote classifier for sessions with text
        #[arg(long)]
        smart: bool,

        /// Remote confidence that must be exceeded to use a remote result
        #[arg(long, default_value = "60")]
        threshold: u8,

        /// With --smart, only ask the remote classifier when the heuristic
        /// confidence is below this
        #[arg(long)]
        remote_below: Option<u8>,

        /// Persist resolved volumes back into the sessions file
        #[arg(long)]
        write_back: bool,

        /// Remote request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        #[command(flatten)]
        classifier: ClassifierArgs,
    },

    /// Aggregate zone volumes over a date range
    Report {
        /// Sessions file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// Split the range into day, week or month buckets
        #[arg(long)]
        period: Option<Period>,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the human-readable report (text); stdout if omitted
        #[arg(long)]
        human_readable: Option<PathBuf>,

        #[command(flatten)]
        classifier: ClassifierArgs,
    },
}

#[derive(Serialize)]
struct ClassifyOutput {
    heuristic: DetectionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<RemoteClassificationResponse>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            text,
            smart,
            objective,
            time_slot,
            timeout_secs,
            classifier,
        } => {
            setup_logging(classifier.verbose);
            let mut remote_config = RemoteConfig::from_env()?;
            let heuristics = heuristics_config(&classifier, &remote_config);
            remote_config.language = heuristics.language;
            if let Some(secs) = timeout_secs {
                remote_config.timeout = Duration::from_secs(secs);
            }

            let mut request = RemoteClassificationRequest::new(text);
            request.objective = objective;
            request.time_slot = time_slot;

            classify(request, heuristics, smart.then_some(remote_config)).await
        }
        Commands::Effort { rating } => {
            setup_logging(false);
            print_json(&classify_effort(rating))
        }
        Commands::Resolve {
            input,
            output,
            smart,
            threshold,
            remote_below,
            write_back,
            timeout_secs,
            classifier,
        } => {
            setup_logging(classifier.verbose);
            let mut remote_config = RemoteConfig::from_env()?;
            let config = ResolveConfig {
                acceptance_threshold: threshold,
                remote_below_confidence: remote_below,
                heuristics: heuristics_config(&classifier, &remote_config),
            };
            remote_config.language = config.heuristics.language;
            if let Some(secs) = timeout_secs {
                remote_config.timeout = Duration::from_secs(secs);
            }
            resolve(input, output, smart.then_some(remote_config), write_back, &config).await
        }
        Commands::Report {
            input,
            from,
            to,
            period,
            output,
            human_readable,
            classifier,
        } => {
            setup_logging(classifier.verbose);
            let remote_config = RemoteConfig::from_env()?;
            let config = ResolveConfig {
                heuristics: heuristics_config(&classifier, &remote_config),
                ..Default::default()
            };
            report(input, DateRange::new(from, to), period, output, human_readable, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn heuristics_config(args: &ClassifierArgs, remote: &RemoteConfig) -> HeuristicsConfig {
    HeuristicsConfig {
        language: args.language.unwrap_or(remote.language),
        expand_repeats: !args.no_expand_repeats,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

async fn classify(
    request: RemoteClassificationRequest,
    heuristics: HeuristicsConfig,
    remote_config: Option<RemoteConfig>,
) -> Result<()> {
    let record = classify_text(&request.text, &heuristics);
    info!(
        "Heuristic: {} zones, {}m, confidence {}",
        record.zones.len(),
        record.distance_m,
        record.confidence
    );

    let remote = match remote_config {
        Some(config) => {
            let classifier = RemoteClassifier::new(config);
            Some(classifier.classify(&request).await)
        }
        None => None,
    };

    print_json(&ClassifyOutput {
        heuristic: record,
        remote,
    })
}

async fn resolve(
    input: PathBuf,
    output: Option<PathBuf>,
    remote_config: Option<RemoteConfig>,
    write_back: bool,
    config: &ResolveConfig,
) -> Result<()> {
    info!("Loading sessions from {:?}", input);
    let mut store = JsonSessionStore::open(&input).context("Failed to open sessions file")?;
    let sessions = store.sessions()?;

    let resolved = match remote_config {
        Some(remote_config) => {
            let classifier = RemoteClassifier::new(remote_config);
            resolve_sessions_with_remote(&classifier, &sessions, config).await
        }
        None => resolve_sessions(&sessions, config),
    };

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create file: {:?}", path))?;
            serde_json::to_writer_pretty(file, &resolved).context("Failed to write JSON")?;
            info!("Resolved sessions written to {:?}", path);
        }
        None => print_json(&resolved)?,
    }

    if write_back {
        let updated = store.save_volumes(&resolved)?;
        info!("Persisted zone volumes for {} sessions", updated);
    }

    Ok(())
}

fn report(
    input: PathBuf,
    range: DateRange,
    period: Option<Period>,
    output: Option<PathBuf>,
    human_readable: Option<PathBuf>,
    config: &ResolveConfig,
) -> Result<()> {
    info!("Loading sessions from {:?}", input);
    let sessions = parse_sessions_file(&input).context("Failed to parse sessions file")?;
    let resolved = resolve_sessions(&sessions, config);

    let totals = aggregate(&resolved, range);
    let periods = match period {
        Some(period) => aggregate_by_period(&resolved, range, period),
        None => vec![totals.clone()],
    };

    info!(
        "Range {}: {} sessions, {}m across {} periods",
        range,
        totals.session_count,
        totals.total_distance_m,
        periods.len()
    );

    if let Some(path) = output {
        MachineReport::new(range, period, &periods, &totals).write_json(&path)?;
        info!("Report written to {:?}", path);
    }

    let human = HumanReport::new(&periods, &totals);
    match human_readable {
        Some(path) => {
            human.write_file(&path)?;
            info!("Human-readable report written to {:?}", path);
        }
        None => print!("{}", human.format()),
    }

    Ok(())
}
