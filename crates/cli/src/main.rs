//! # lagcast-cli
//!
//! Command-line interface for the lagcast forecasting engine.

use clap::{Args, Parser, Subcommand};
use lagcast_facade::precision::format_observation;
use lagcast_facade::prelude::*;
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "lagcast")]
#[command(about = "Recursive lag-regression forecasting CLI", long_about = None)]
struct Cli {
    /// Engine configuration file (JSON); falls back to LAGCAST_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: EngineOverrides,

    #[command(subcommand)]
    command: Commands,
}

/// Flags that take precedence over the configuration file
#[derive(Args, Debug, Default)]
struct EngineOverrides {
    /// Maximum number of retained observations
    #[arg(long, global = true)]
    capacity: Option<usize>,

    /// Number of lagged observations per feature row
    #[arg(long, global = true)]
    window: Option<usize>,

    /// Fraction of rows held out from the fit
    #[arg(long, global = true)]
    holdout_ratio: Option<f64>,

    /// Seed for the train/held-out shuffle
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Decimal digits in forecasts
    #[arg(long, global = true)]
    precision: Option<u32>,
}

impl EngineOverrides {
    fn apply(&self, mut builder: EngineBuilder) -> EngineBuilder {
        if let Some(capacity) = self.capacity {
            builder = builder.with_capacity(capacity);
        }
        if let Some(window) = self.window {
            builder = builder.with_window(window);
        }
        if let Some(ratio) = self.holdout_ratio {
            builder = builder.with_holdout_ratio(ratio);
        }
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }
        if let Some(precision) = self.precision {
            builder = builder.with_precision(precision);
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record observations and request forecasts interactively
    Session,

    /// Forecast from a file of observations
    Forecast {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of steps to forecast
        #[arg(short, long, allow_negative_numbers = true)]
        steps: i64,

        /// Column name or index for the observations (default: first numeric column)
        #[arg(short, long)]
        column: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ============================================================================
// Engine Setup
// ============================================================================

fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let file = File::open(path).map_err(|e| format!("Failed to open config: {}", e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse config: {}", e))
}

fn build_engine(config: Option<PathBuf>, overrides: &EngineOverrides) -> CliResult<ForecastEngine> {
    let path = config.or_else(|| env::var("LAGCAST_CONFIG").ok().map(PathBuf::from));
    let config = load_config(path.as_deref())?;
    let engine = overrides
        .apply(EngineBuilder::from_config(config))
        .build()
        .map_err(|e| e.to_string())?;

    let config = engine.config();
    tracing::debug!(
        capacity = config.capacity,
        window = config.window,
        holdout_ratio = config.holdout_ratio,
        seed = config.seed,
        precision = config.precision,
        "engine configured"
    );
    Ok(engine)
}

// ============================================================================
// Input Parsing
// ============================================================================

/// Parse operator text into an observation
fn parse_observation(text: &str) -> CliResult<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", text.trim()))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", text.trim()));
    }
    Ok(value)
}

/// One line of an interactive session
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Append(f64),
    Predict(i64),
    /// Position counts from 1, oldest first
    Edit { position: usize, value: f64 },
    History,
    Help,
    Quit,
    Blank,
}

fn parse_command(line: &str) -> CliResult<SessionCommand> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(SessionCommand::Blank);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (head.to_lowercase().as_str(), args.as_slice()) {
        ("predict" | "p", [count]) => SessionCommand::Predict(
            count
                .parse()
                .map_err(|_| format!("'{}' is not a whole number", count))?,
        ),
        ("edit" | "e", [position, value]) => {
            let position: usize = position
                .parse()
                .map_err(|_| format!("'{}' is not a position", position))?;
            if position == 0 {
                return Err("positions start at 1".to_string());
            }
            SessionCommand::Edit {
                position,
                value: parse_observation(value)?,
            }
        }
        ("history" | "h", []) => SessionCommand::History,
        ("help" | "?", []) => SessionCommand::Help,
        ("quit" | "exit" | "q", []) => SessionCommand::Quit,
        ("predict" | "p", _) => return Err("usage: predict N".to_string()),
        ("edit" | "e", _) => return Err("usage: edit POSITION VALUE".to_string()),
        (_, []) => SessionCommand::Append(parse_observation(head)?),
        _ => return Err(format!("unknown command '{}'", line.trim())),
    };
    Ok(command)
}

// ============================================================================
// Session
// ============================================================================

const SESSION_HELP: &str = "\
Commands:
  <number>              record an observation
  predict N             forecast the next N values
  edit POSITION VALUE   correct an observation (1 = oldest)
  history               show the recorded observations
  help                  show this message
  quit                  leave the session";

fn write_err(e: io::Error) -> String {
    format!("Failed to write output: {}", e)
}

fn run_session<R: BufRead, W: Write>(
    engine: &mut ForecastEngine,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    writeln!(
        out,
        "lagcast session: {} observations needed to forecast, 'help' for commands",
        engine.min_observations()
    )
    .map_err(write_err)?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        match parse_command(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => handle_command(engine, command, out)?,
            Err(message) => {
                tracing::warn!(input = %line.trim(), "rejected input");
                writeln!(out, "Error: {}", message).map_err(write_err)?;
            }
        }
    }
    Ok(())
}

fn handle_command<W: Write>(
    engine: &mut ForecastEngine,
    command: SessionCommand,
    out: &mut W,
) -> CliResult<()> {
    let precision = engine.config().precision;

    match command {
        SessionCommand::Append(value) => match engine.append_observation(value) {
            Ok(evicted) => {
                tracing::info!(value, len = engine.history().len(), "observation appended");
                if let Some(old) = evicted {
                    tracing::debug!(value = old, "observation evicted");
                    writeln!(out, "Dropped oldest {}", format_observation(old, precision))
                        .map_err(write_err)?;
                }
                writeln!(
                    out,
                    "Recorded {} ({} of {})",
                    format_observation(value, precision),
                    engine.history().len(),
                    engine.history().capacity()
                )
                .map_err(write_err)?;
            }
            Err(e) => writeln!(out, "Error: {}", e).map_err(write_err)?,
        },

        SessionCommand::Edit { position, value } => {
            match engine.update_observation(position - 1, value) {
                Ok(true) => {
                    tracing::info!(position, value, "observation edited");
                    writeln!(
                        out,
                        "Updated #{} to {}",
                        position,
                        format_observation(value, precision)
                    )
                    .map_err(write_err)?;
                }
                Ok(false) => writeln!(out, "#{} unchanged", position).map_err(write_err)?,
                Err(ForecastError::IndexOutOfBounds { len, .. }) => {
                    tracing::warn!(position, len, "edit out of range");
                    writeln!(out, "Error: no observation #{} (history holds {})", position, len)
                        .map_err(write_err)?;
                }
                Err(e) => writeln!(out, "Error: {}", e).map_err(write_err)?,
            }
        }

        SessionCommand::Predict(count) => match engine.forecast_with_report(count) {
            Ok(outcome) => {
                tracing::info!(
                    steps = outcome.forecast.len(),
                    fit = %outcome.report.summary(),
                    "forecast produced"
                );
                writeln!(out, "Forecast ({} steps):", outcome.forecast.len()).map_err(write_err)?;
                for (i, value) in outcome.forecast.iter().enumerate() {
                    writeln!(out, "  +{}: {}", i + 1, format_observation(*value, precision))
                        .map_err(write_err)?;
                }
                writeln!(out, "Fit: {}", outcome.report.summary()).map_err(write_err)?;
            }
            Err(e) => {
                tracing::warn!(count, error = %e, "forecast rejected");
                writeln!(out, "Error: {}", e).map_err(write_err)?;
            }
        },

        SessionCommand::History => {
            let history = engine.get_history();
            if history.is_empty() {
                writeln!(out, "No observations yet").map_err(write_err)?;
            }
            for (i, value) in history.iter().enumerate() {
                writeln!(out, "  {:>2}: {}", i + 1, format_observation(*value, precision))
                    .map_err(write_err)?;
            }
        }

        SessionCommand::Help => writeln!(out, "{}", SESSION_HELP).map_err(write_err)?,

        SessionCommand::Quit | SessionCommand::Blank => {}
    }
    Ok(())
}

// ============================================================================
// File Input
// ============================================================================

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Load observations from a CSV file, with or without a header row
fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("Failed to read record: {}", e))?;
    let Some(first) = records.first() else {
        return Err("Input file is empty".to_string());
    };

    // A first row with no numeric cell is a header
    let has_header = first.iter().all(|cell| parse_cell(cell).is_none());
    let body = &records[usize::from(has_header)..];

    let col_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) if has_header => first
                .iter()
                .position(|h| h.trim() == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
            Err(_) => return Err(format!("Column '{}' not found: file has no header", col)),
        },
        None => body
            .first()
            .and_then(|row| row.iter().position(|cell| parse_cell(cell).is_some()))
            .unwrap_or(0),
    };

    let data: Vec<f64> = body
        .iter()
        .filter_map(|record| record.get(col_idx))
        .filter_map(parse_cell)
        .collect();

    let skipped = body.len() - data.len();
    if skipped > 0 {
        tracing::warn!(skipped, column = col_idx, "skipped non-numeric rows");
    }

    if data.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }
    Ok(data)
}

fn json_numbers(arr: &[serde_json::Value]) -> Vec<f64> {
    arr.iter().filter_map(|v| v.as_f64()).collect()
}

/// Load observations from a JSON array of numbers or of objects
fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;

    match &json {
        serde_json::Value::Array(arr) if arr.iter().all(|v| v.is_number()) && !arr.is_empty() => {
            return Ok(json_numbers(arr));
        }
        serde_json::Value::Array(arr) => {
            let keys: Vec<&str> = match column {
                Some(col) => vec![col],
                None => vec!["value", "multiplier", "y"],
            };
            for key in keys {
                let data: Vec<f64> = arr
                    .iter()
                    .filter_map(|obj| obj.get(key).and_then(|v| v.as_f64()))
                    .collect();
                if !data.is_empty() {
                    return Ok(data);
                }
            }
        }
        serde_json::Value::Object(obj) => {
            for key in ["observations", "values", "data", "history"] {
                if let Some(arr) = obj.get(key).and_then(|v| v.as_array()) {
                    let data = json_numbers(arr);
                    if !data.is_empty() {
                        return Ok(data);
                    }
                }
            }
        }
        _ => {}
    }

    Err("Could not extract numeric data from JSON".to_string())
}

/// Load observations from file (auto-detect format)
fn load_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_json_data(path, column).or_else(|_| load_csv_data(path, column)),
    }
}

// ============================================================================
// Forecast Command
// ============================================================================

/// JSON document written by `lagcast forecast`
#[derive(Debug, Serialize)]
struct ForecastDocument {
    forecasts: Vec<f64>,
    steps: usize,
    history: Vec<f64>,
    fit: FitReport,
}

fn forecast_document(engine: &mut ForecastEngine, data: &[f64], steps: i64) -> CliResult<ForecastDocument> {
    for (i, &value) in data.iter().enumerate() {
        engine
            .append_observation(value)
            .map_err(|e| format!("Observation {} rejected: {}", i + 1, e))?;
    }

    let outcome = engine.forecast_with_report(steps).map_err(|e| e.to_string())?;
    Ok(ForecastDocument {
        steps: outcome.forecast.len(),
        forecasts: outcome.forecast,
        history: engine.get_history(),
        fit: outcome.report,
    })
}

fn write_forecast_results(document: &ForecastDocument, output: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| format!("Failed to write JSON: {}", e))?;

    if let Some(path) = output {
        let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
        writeln!(file, "{}", json).map_err(write_err)?;
        tracing::info!(path = %path.display(), "forecasts written");
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn run_forecast(
    engine: &mut ForecastEngine,
    input: PathBuf,
    steps: i64,
    column: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let data = load_data(&input, column.as_deref())?;
    tracing::info!(
        points = data.len(),
        file = %input.display(),
        "loaded observations"
    );

    let document = forecast_document(engine, &data, steps)?;
    tracing::info!(
        steps = document.steps,
        fit = %document.fit.summary(),
        "forecast produced"
    );

    write_forecast_results(&document, output.as_deref())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lagcast=info".into()),
        )
        .init();
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = build_engine(cli.config, &cli.overrides).and_then(|mut engine| match cli.command {
        Commands::Session => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_session(&mut engine, stdin.lock(), &mut stdout)
        }
        Commands::Forecast {
            input,
            steps,
            column,
            output,
        } => run_forecast(&mut engine, input, steps, column, output),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("lagcast-cli-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn session(script: &str) -> (ForecastEngine, String) {
        let mut engine = EngineBuilder::new().build().unwrap();
        let mut out = Vec::new();
        run_session(&mut engine, Cursor::new(script), &mut out).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    // ========================================================================
    // Parsing Tests
    // ========================================================================

    #[test]
    fn test_parse_observation() {
        assert_eq!(parse_observation(" 2.35 "), Ok(2.35));
        assert_eq!(parse_observation("1e2"), Ok(100.0));
        assert!(parse_observation("abc").is_err());
        assert!(parse_observation("").is_err());
        assert!(parse_observation("inf").is_err());
        assert!(parse_observation("NaN").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("1.5"), Ok(SessionCommand::Append(1.5)));
        assert_eq!(parse_command("predict 3"), Ok(SessionCommand::Predict(3)));
        assert_eq!(parse_command("P -2"), Ok(SessionCommand::Predict(-2)));
        assert_eq!(
            parse_command("edit 2 4.25"),
            Ok(SessionCommand::Edit {
                position: 2,
                value: 4.25
            })
        );
        assert_eq!(parse_command("history"), Ok(SessionCommand::History));
        assert_eq!(parse_command("quit"), Ok(SessionCommand::Quit));
        assert_eq!(parse_command("   "), Ok(SessionCommand::Blank));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("predict").is_err());
        assert!(parse_command("predict 2.5").is_err());
        assert!(parse_command("edit 0 1.0").is_err());
        assert!(parse_command("edit 1 nan").is_err());
        assert!(parse_command("jump 3").is_err());
        assert!(parse_command("many words here").is_err());
    }

    // ========================================================================
    // Session Tests
    // ========================================================================

    #[test]
    fn test_session_append_and_predict() {
        let (engine, out) = session("1\n2\n3\n4\n5\npredict 2\n");
        assert_eq!(engine.get_history(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(out.contains("Recorded 5.0000 (5 of 20)"));
        assert!(out.contains("Forecast (2 steps):"));
        assert!(out.contains("  +2: "));
        assert_eq!(engine.latest_forecast().len(), 2);
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let (engine, out) = session("1\nabc\npredict 3\nedit 4 2\n2\n");
        assert!(out.contains("Error: 'abc' is not a number"));
        assert!(out.contains("Error: Insufficient data: need at least 5 points, got 1"));
        assert!(out.contains("Error: no observation #4 (history holds 1)"));
        assert_eq!(engine.get_history(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_session_edit_and_history() {
        let (engine, out) = session("1\n2\nedit 1 7.5\nedit 1 7.5\nhistory\n");
        assert_eq!(engine.get_history(), vec![7.5, 2.0]);
        assert!(out.contains("Updated #1 to 7.5000"));
        assert!(out.contains("#1 unchanged"));
        assert!(out.contains("   1: 7.5000"));
    }

    #[test]
    fn test_session_quit_stops_reading() {
        let (engine, _) = session("1\nquit\n2\n");
        assert_eq!(engine.get_history(), vec![1.0]);
    }

    #[test]
    fn test_session_reports_eviction() {
        let script: String = (1..=21).map(|i| format!("{}\n", i)).collect();
        let (engine, out) = session(&script);
        assert_eq!(engine.get_history().len(), 20);
        assert!(out.contains("Dropped oldest 1.0000"));
    }

    // ========================================================================
    // File Input Tests
    // ========================================================================

    #[test]
    fn test_load_csv_with_header() {
        let path = temp_file("header.csv", "round,multiplier\n1,1.42\n2,2.10\n3,x\n4,1.05\n");
        let by_name = load_csv_data(&path, Some("multiplier")).unwrap();
        let by_index = load_csv_data(&path, Some("1")).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(by_name, vec![1.42, 2.10, 1.05]);
        assert_eq!(by_index, by_name);
    }

    #[test]
    fn test_load_csv_without_header() {
        let path = temp_file("plain.csv", "1.5\n2.5\n3.5\n");
        let data = load_csv_data(&path, None).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(data, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_load_json_shapes() {
        let plain = temp_file("plain.json", "[1.1, 2.2, 3.3]");
        let objects = temp_file("objects.json", r#"[{"multiplier": 1.5}, {"multiplier": 2.5}]"#);
        let wrapped = temp_file("wrapped.json", r#"{"observations": [4.0, 5.0]}"#);

        assert_eq!(load_data(&plain, None).unwrap(), vec![1.1, 2.2, 3.3]);
        assert_eq!(load_data(&objects, None).unwrap(), vec![1.5, 2.5]);
        assert_eq!(load_data(&wrapped, None).unwrap(), vec![4.0, 5.0]);

        for path in [plain, objects, wrapped] {
            std::fs::remove_file(path).ok();
        }
    }

    // ========================================================================
    // Forecast Command Tests
    // ========================================================================

    #[test]
    fn test_forecast_document() {
        let mut engine = EngineBuilder::new().build().unwrap();
        let data: Vec<f64> = (0..25).map(|i| 1.0 + (i % 6) as f64 * 0.4).collect();
        let document = forecast_document(&mut engine, &data, 3).unwrap();

        assert_eq!(document.steps, 3);
        assert_eq!(document.forecasts.len(), 3);
        assert_eq!(document.history, data[5..].to_vec());

        let json = serde_json::to_value(&document).unwrap();
        assert!(json["fit"]["train_rows"].is_u64());
    }

    #[test]
    fn test_forecast_document_errors() {
        let mut engine = EngineBuilder::new().build().unwrap();
        assert!(forecast_document(&mut engine, &[1.0, 2.0], 2)
            .unwrap_err()
            .starts_with("Insufficient data"));

        let mut engine = EngineBuilder::new().build().unwrap();
        assert!(forecast_document(&mut engine, &[1.0; 10], -1)
            .unwrap_err()
            .starts_with("Invalid input"));
    }

    #[test]
    fn test_overrides_apply_over_config() {
        let path = temp_file("config.json", r#"{"window": 4, "seed": 1}"#);
        let overrides = EngineOverrides {
            seed: Some(99),
            ..Default::default()
        };
        let engine = build_engine(Some(path.clone()), &overrides).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(engine.config().window, 4);
        assert_eq!(engine.config().seed, 99);
        assert_eq!(engine.config().capacity, 20);
    }
}
