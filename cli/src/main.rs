use std::path::{Path, PathBuf};

use block_doctor_core::{ExtractionSnapshot, Symptom, picker_entries};
use block_doctor_diagnose::config::DoctorConfig;
use block_doctor_diagnose::editor_json::{EditorDump, load_advisory_message};
use block_doctor_diagnose::inbox::{AdvisoryInbox, SnapshotChannel};
use block_doctor_diagnose::output::{OutputFormat, format_snapshot};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Text => Self::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "block-doctor")]
#[command(about = "Block editor troubleshooting advice from workspace snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract block records from an editor dump.
    Extract(ExtractArgs),
    /// Print advice for a symptom from an editor dump or advisory message.
    Diagnose(DiagnoseArgs),
    /// List the selectable symptoms.
    Symptoms,
    /// Re-extract an editor dump on a fixed interval and print advice.
    Watch(WatchArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Editor dump JSON file.
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Optional configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DiagnoseArgs {
    /// Editor dump, or advisory message (`{records, rawText}` / `{rawText}`).
    #[arg(long)]
    input: PathBuf,
    /// Symptom to diagnose (motor, direction, not-starting, stop, sensor, other).
    #[arg(long)]
    symptom: Symptom,
    /// Optional configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct WatchArgs {
    /// Editor dump JSON file, re-read every cycle.
    #[arg(long)]
    input: PathBuf,
    /// Symptom to diagnose on every cycle.
    #[arg(long)]
    symptom: Option<Symptom>,
    /// Stop after this many cycles (default: run forever).
    #[arg(long)]
    cycles: Option<u64>,
    /// Optional configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Output YAML path.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Diagnose(args) => run_diagnose(args),
        Command::Symptoms => run_symptoms(),
        Command::Watch(args) => run_watch(args),
        Command::InitConfig(args) => run_init_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<DoctorConfig, String> {
    match path {
        Some(path) => DoctorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(DoctorConfig::default()),
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let dump = EditorDump::load(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let snapshot = dump.extract(&config.surface_selectors);
    let raw = format_snapshot(&snapshot, args.format.into())?;
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_diagnose(args: DiagnoseArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let message = load_advisory_message(&args.input, &config.surface_selectors)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;

    let mut inbox = AdvisoryInbox::new();
    inbox.accept(message);

    if args.symptom.routes_to_remote() {
        eprintln!(
            "The '{}' symptom is answered by remote advice; showing labels only.",
            args.symptom
        );
    }
    if let Some(advice) = inbox.advise(Some(args.symptom)) {
        println!("{advice}");
    }
    Ok(())
}

fn run_symptoms() -> Result<(), String> {
    for &(symptom, label) in picker_entries() {
        let name = symptom.map(Symptom::as_str).unwrap_or("-");
        println!("{name:<14}{label}");
    }
    Ok(())
}

fn run_watch(args: WatchArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let channel = SnapshotChannel::new();
    let mut inbox = AdvisoryInbox::new();
    let mut cycle = 0u64;

    loop {
        cycle += 1;
        channel.publish(extract_cycle(&args.input, &config));

        if channel.deliver(&mut inbox) {
            println!(
                "[{}] cycle {cycle}: {} block(s)",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
                inbox.records().len()
            );
            if let Some(advice) = inbox.advise(args.symptom) {
                println!("{advice}");
                println!();
            }
        }

        if args.cycles.is_some_and(|limit| cycle >= limit) {
            return Ok(());
        }
        std::thread::sleep(config.poll_interval());
    }
}

// An unreadable dump is treated like an editor that has not loaded yet.
fn extract_cycle(input: &Path, config: &DoctorConfig) -> ExtractionSnapshot {
    match EditorDump::load(input) {
        Ok(dump) => dump.extract(&config.surface_selectors),
        Err(err) => {
            tracing::warn!(input = %input.display(), error = %err, "editor dump unavailable");
            ExtractionSnapshot::empty()
        }
    }
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    DoctorConfig::default()
        .save(&args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;
    println!("Wrote default config to '{}'.", args.output.display());
    Ok(())
}
