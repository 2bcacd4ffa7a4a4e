//! # Tipsplit Terminal Front End
//!
//! Drives the calculation service from stdin and prints every result.
//!
//! ## Module Organization
//! ```text
//! tipsplit_cli/
//! ├── lib.rs          ◄─── You are here (startup & session loop)
//! ├── config.rs       ◄─── AppConfig: TOML + TIPSPLIT_* overrides
//! ├── command.rs      ◄─── stdin line → InputEvent
//! ├── render.rs       ◄─── CalculationResult → text or JSON line
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin ──► parse_line ──┬── Input(event) ──► handle.send ──┐            │
//! │                         ├── Help ──► notes                 │            │
//! │                         └── Quit ──► shutdown              ▼            │
//! │                                                  CalculationService     │
//! │                                                            │            │
//! │  stdout ◄── printer task ◄── ResultStream ◄────────────────┘            │
//! │                                                                         │
//! │  stderr ◄── logs, help, rejected input                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results go to stdout one per line, so `--json` output can be piped
//! straight into other tools.

pub mod command;
pub mod config;
pub mod error;
pub mod render;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tipsplit_service::{CalculationService, ResultStream, ServiceHandle};

use command::{parse_line, Command, HELP};
use config::{AppConfig, OutputFormat};
pub use error::{AppError, AppResult};
use render::Renderer;

/// Command line flags.
#[derive(Debug, Parser)]
#[command(name = "tipsplit", version, about = "Split a bill and tip between people")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "TIPSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON lines.
    #[arg(long)]
    pub json: bool,
}

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn,tipsplit=info";

/// Runs the terminal app on stdin, stdout and stderr.
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    let config = resolve_config(&cli)?;

    info!(
        output = %config.display.output,
        channel_capacity = config.service.channel_capacity,
        "Starting tipsplit"
    );

    run_session(
        &config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        tokio::io::stderr(),
    )
    .await?;

    Ok(())
}

/// Builds the app config from the command line flags.
///
/// A `--config` file must exist and parse. Without one, the platform
/// default file is optional and load failures fall back to defaults.
/// `--json` wins over any configured output format.
pub fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(Some(path.clone()))?,
        None => AppConfig::load_or_default(None),
    };
    if cli.json {
        config.display.output = OutputFormat::Json;
    }
    Ok(config)
}

/// Runs one session until `quit` or end of input.
///
/// Results are written to `out` by a background task, starting with the
/// initial all-zero result. Help and rejection notes go to `notes`. Both
/// writers are handed back once the service has stopped.
///
/// Input bytes that are not UTF-8 are replaced with U+FFFD, so a bad line is
/// handled like any other unparsable text. The service and printer are
/// stopped and joined on every exit, including read errors.
pub async fn run_session<R, W, N>(
    config: &AppConfig,
    input: R,
    out: W,
    mut notes: N,
) -> AppResult<(W, N)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    N: AsyncWrite + Unpin,
{
    let (handle, service_task) = CalculationService::spawn(&config.service_config())?;
    let renderer = Renderer::new(&config.display);

    let results = handle.subscribe().await?;
    let initial = handle.latest().await?;
    let printer = tokio::spawn(print_results(renderer.clone(), initial, results, out));

    let fed = feed_input(&handle, input, &mut notes).await;

    let stopped = handle.shutdown().await;
    let printed = printer.await;
    service_task.await?;

    fed?;
    stopped?;
    let out = printed??;

    Ok((out, notes))
}

/// Sends every stdin command to the service until `quit` or end of input.
async fn feed_input<R, N>(handle: &ServiceHandle, mut input: R, notes: &mut N) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    N: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Input(event))) => {
                debug!(?event, "Sending input");
                if !handle.send(event).await? {
                    write_note(notes, &format!("ignored: {}", line.trim())).await?;
                }
            }
            Ok(Some(Command::Help)) => write_note(notes, HELP).await?,
            Ok(Some(Command::Quit)) => return Ok(()),
            Err(e @ AppError::UnknownCommand(_)) => write_note(notes, &e.to_string()).await?,
            Err(e) => return Err(e),
        }
    }
}

async fn print_results<W>(
    renderer: Renderer,
    initial: tipsplit_core::CalculationResult,
    mut results: ResultStream,
    mut out: W,
) -> AppResult<W>
where
    W: AsyncWrite + Unpin,
{
    write_line(&mut out, &renderer.render(&initial)?).await?;
    while let Some(result) = results.next().await {
        write_line(&mut out, &renderer.render(&result)?).await?;
    }
    Ok(out)
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> AppResult<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

async fn write_note<N: AsyncWrite + Unpin>(notes: &mut N, note: &str) -> AppResult<()> {
    write_line(notes, note).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tipsplit=debug` - Show every recomputation
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Formats events to stderr so stdout carries only results.
///
/// The env filter is the only level filter on this subscriber.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn session(config: &AppConfig, script: &str) -> (String, String) {
        session_bytes(config, script.as_bytes()).await
    }

    async fn session_bytes(config: &AppConfig, script: &[u8]) -> (String, String) {
        let (out, notes) = run_session(config, script, Vec::new(), Vec::new())
            .await
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(notes).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_session_prints_every_result() {
        let script = "bill 100\ntip 20\nsplit +\nbogus\nquit\nbill 5\n";
        let (out, notes) = session(&AppConfig::default(), script).await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Total bill $0.00 | Total tip $0.00 | Per person $0.00",
                "Total bill $100.00 | Total tip $0.00 | Per person $100.00",
                "Total bill $100.00 | Total tip $20.00 | Per person $120.00",
                "Total bill $100.00 | Total tip $20.00 | Per person $60.00",
            ]
        );
        assert!(notes.contains("Unknown command: 'bogus'"));
    }

    #[tokio::test]
    async fn test_rejected_input_is_noted_and_not_printed() {
        let script = "bill 50\ntip custom 12.5\ntip 12\n";
        let (out, notes) = session(&AppConfig::default(), script).await;

        assert_eq!(out.lines().count(), 2);
        assert!(notes.contains("ignored: tip custom 12.5"));
        assert!(notes.contains("ignored: tip 12"));
    }

    #[tokio::test]
    async fn test_json_session() {
        let mut config = AppConfig::default();
        config.display.output = OutputFormat::Json;

        let (out, _) = session(&config, "bill 1000\ntip 10\nsplit +\n").await;
        let last: tipsplit_core::CalculationResult =
            serde_json::from_str(out.lines().last().unwrap()).unwrap();

        assert_eq!(last.total_bill, 1000.0);
        assert_eq!(last.total_tip, 100.0);
        assert_eq!(last.amount_per_person, 550.0);
    }

    #[tokio::test]
    async fn test_help_goes_to_notes() {
        let (out, notes) = session(&AppConfig::default(), "help\n").await;
        assert_eq!(out.lines().count(), 1);
        assert!(notes.contains("tip custom <n>"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let (out, _) = session_bytes(&AppConfig::default(), b"bill 10\nbill \xff\nbill 20\n").await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Total bill $0.00 | Total tip $0.00 | Per person $0.00",
                "Total bill $10.00 | Total tip $0.00 | Per person $10.00",
                "Total bill $0.00 | Total tip $0.00 | Per person $0.00",
                "Total bill $20.00 | Total tip $0.00 | Per person $20.00",
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_command_is_unknown() {
        let (out, notes) = session_bytes(&AppConfig::default(), b"\xfe\xff\nbill 3").await;

        assert!(notes.contains("Unknown command: '\u{FFFD}\u{FFFD}'"));
        assert_eq!(
            out.lines().last(),
            Some("Total bill $3.00 | Total tip $0.00 | Per person $3.00")
        );
    }

    #[test]
    fn test_default_log_filter() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "tipsplit_core::engine", tracing::Level::INFO));
            assert!(!tracing::enabled!(target: "tipsplit_core::engine", tracing::Level::DEBUG));
            assert!(!tracing::enabled!(target: "tokio::runtime", tracing::Level::INFO));
            assert!(tracing::enabled!(target: "tokio::runtime", tracing::Level::WARN));
        });
    }

    #[test]
    fn test_log_filter_override() {
        let subscriber = log_subscriber(EnvFilter::new("tipsplit_core=debug"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "tipsplit_core::adapter", tracing::Level::DEBUG));
            assert!(!tracing::enabled!(target: "tipsplit_service::service", tracing::Level::TRACE));
        });
    }

    #[test]
    fn test_resolve_config_from_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncurrency_symbol = \"€\"\noutput = \"text\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(["tipsplit", "--config", path.as_str(), "--json"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.display.output, OutputFormat::Json);

        let cli = Cli::parse_from(["tipsplit", "--config", path.as_str()]);
        assert_eq!(resolve_config(&cli).unwrap().display.output, OutputFormat::Text);
    }

    #[test]
    fn test_resolve_config_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            config: Some(dir.path().join("missing.toml")),
            json: false,
        };
        assert!(matches!(
            resolve_config(&cli),
            Err(AppError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["tipsplit", "--json", "--config", "/tmp/t.toml"]);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.toml")));
    }
}
