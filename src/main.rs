use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use httpaccess::config::{load_config, HttpAccessConfig};
use httpaccess::dispatch::{run, Invocation};
use httpaccess::params::Mode;
use httpaccess::preview::InquireUi;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Flags the host passes with a single dash (`-mode`, `-params`).
const HOST_FLAGS: [&str; 2] = ["mode", "params"];

/// Flags whose next argument is their value and is passed through as is.
const VALUE_FLAGS: [&str; 4] = ["--mode", "--params", "--config", "-c"];

/// Single-letter flags clap understands; bundles such as `-vh` are kept.
const SHORT_FLAGS: [char; 3] = ['v', 'h', 'V'];

#[derive(Parser, Debug)]
#[command(
    name = "httpaccess",
    version,
    about = "HTTP JSON to CSV data-source connector"
)]
struct Cli {
    /// Invocation mode requested by the host
    #[arg(long, value_enum, ignore_case = true)]
    mode: Mode,

    /// Stored request parameters (uri=...;type=...;header=...)
    #[arg(long, allow_hyphen_values = true)]
    params: Option<String>,

    /// Directory or file containing httpaccess.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the received parameters instead of fetching data
    #[arg(long)]
    debug_params: bool,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_host_args(std::env::args_os()));
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(target) => match load_config(target).context("loading configuration")? {
            Some(loaded) => {
                debug!(path = %loaded.path.display(), "loaded configuration");
                loaded.config
            }
            None => bail!("configuration not found at {}", target.display()),
        },
        None => load_config(&std::env::current_dir()?)
            .context("loading configuration")?
            .map(|loaded| loaded.config)
            .unwrap_or_default(),
    };
    if cli.debug_params {
        config.debug_params = true;
    }

    let invocation = Invocation {
        mode: cli.mode,
        params: cli.params,
        config,
    };
    debug!(mode = %invocation.mode, "starting");

    let stdout = std::io::stdout();
    run(&invocation, &mut InquireUi, stdout.lock()).await
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();
}

/// Rewrites the host's single-dash, any-case flags into clap long flags.
/// Other single-dash words the host may append (`-size 300`) are dropped
/// together with their value; clap's own flags pass through.
fn normalize_host_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args = args.into_iter().peekable();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        let takes_value = VALUE_FLAGS.contains(&text);
        if text.starts_with("--") || !text.starts_with('-') {
            normalized.push(arg);
            if takes_value {
                normalized.extend(args.next());
            }
            continue;
        }

        let (flag, inline_value) = match text.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (text, None),
        };
        let name = flag[1..].to_ascii_lowercase();

        if HOST_FLAGS.contains(&name.as_str()) {
            match inline_value {
                Some(value) => normalized.push(OsString::from(format!("--{name}={value}"))),
                None => {
                    normalized.push(OsString::from(format!("--{name}")));
                    normalized.extend(args.next());
                }
            }
        } else if name.chars().count() <= 1 || name.chars().all(|ch| SHORT_FLAGS.contains(&ch)) {
            normalized.push(arg);
            if takes_value {
                normalized.extend(args.next());
            }
        } else if inline_value.is_none() && args.peek().is_some_and(is_flag_value) {
            args.next();
        }
    }

    normalized
}

fn is_flag_value(arg: &OsString) -> bool {
    let Some(text) = arg.to_str() else {
        return true;
    };
    let mut chars = text.chars();
    match chars.next() {
        Some('-') => chars.next().is_some_and(|ch| ch.is_ascii_digit()),
        _ => true,
    }
}
