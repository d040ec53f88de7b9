//! Quill entrypoint: replays a key script against a text and prints the
//! resulting editor snapshot as JSON.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::Session;
use core_events::{KeyEventBus, Propagation};
use core_model::{EditorView, SentenceUnit};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod script;

const LOG_FILE_NAME: &str = "quill.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill prose editing engine")]
struct Args {
    /// Initial text (UTF-8). Empty document when omitted.
    #[arg(long = "text")]
    pub text: Option<PathBuf>,
    /// Key script: one chord per line, `#` comments.
    #[arg(long = "keys")]
    pub keys: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Also print the settled sentence units.
    #[arg(long = "settle")]
    pub settle: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    view: EditorView,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<Vec<SentenceUnit>>,
    keys: usize,
    unhandled: usize,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self, fallback_filter: &str) {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn read_optional(path: Option<&Path>, what: &str) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading {what} file {}", p.display())),
        None => Ok(String::new()),
    }
}

/// Publish every key to a bus with the session subscribed. Returns the number
/// of keys no subscriber handled.
fn replay(session: Rc<RefCell<Session>>, keys: &[core_events::KeyEvent]) -> usize {
    let mut bus = KeyEventBus::new();
    bus.subscribe(session);
    keys.iter()
        .filter(|key| bus.publish(key) == Propagation::Ignored)
        .count()
}

fn execute(args: &Args, config: &core_config::Config) -> Result<Report> {
    let text = read_optional(args.text.as_deref(), "text")?;
    let script_src = read_optional(args.keys.as_deref(), "key script")?;
    let keys = script::parse_script(&script_src).context("parsing key script")?;

    let session = Rc::new(RefCell::new(Session::from_config(&text, config)));
    let unhandled = replay(session.clone(), &keys);
    let session = session.borrow();
    info!(
        target: "runtime",
        chars = text.chars().count(),
        keys = keys.len(),
        unhandled,
        "replay_complete"
    );
    Ok(Report {
        view: session.view(),
        units: args.settle.then(|| session.settle()),
        keys: keys.len(),
        unhandled,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let mut startup = AppStartup::new();
    startup.configure_logging(config.log_filter());
    AppStartup::install_panic_hook();
    info!(
        target: "runtime",
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        "startup"
    );

    let report = execute(&args, &config).inspect_err(|e| {
        error!(target: "runtime", error = %format!("{e:#}"), "run_failed");
    })?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
