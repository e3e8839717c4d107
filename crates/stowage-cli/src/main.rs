//! `stowage`: converge one Azure storage account to the payload's spec.
//!
//! Reads a JSON payload from `--args` or stdin, prints one JSON result
//! record on stdout. Logs go to stderr, `--log-file`, or the payload's
//! `log_path`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use stowage_arm::{ArmClient, ArmConfig};
use stowage_reconciler::{PollPolicy, Reconciler};

mod logging;
mod output;
mod payload;

use logging::LogFormat;

const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

/// Storage account reconciler
#[derive(Parser, Debug)]
#[command(name = "stowage", version, about)]
struct Cli {
    /// Payload file; `-` or absent reads stdin
    #[arg(long, value_name = "FILE")]
    args: Option<PathBuf>,

    /// Report what would change without changing anything
    #[arg(long)]
    check: bool,

    #[arg(long, env = "STOWAGE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Write logs here instead of stderr; overrides the payload's `log_path`
    #[arg(long, env = "STOWAGE_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Give up on a create after this many polls
    #[arg(long, env = "STOWAGE_POLL_MAX_ATTEMPTS")]
    poll_max_attempts: Option<u32>,

    /// Initial delay between create polls, doubled each poll up to 30s
    #[arg(long, env = "STOWAGE_POLL_INTERVAL_SECS")]
    poll_interval_secs: Option<u64>,
}

impl Cli {
    fn poll_policy(&self) -> PollPolicy {
        let mut policy = PollPolicy::default();
        if let Some(attempts) = self.poll_max_attempts {
            policy.max_attempts = attempts;
        }
        if let Some(secs) = self.poll_interval_secs {
            policy.initial_delay = Duration::from_secs(secs);
        }
        policy
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let raw = match payload::read(cli.args.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("stowage: failed to read payload: {e}");
            return ExitCode::from(EXIT_SETUP);
        }
    };
    let invocation = payload::parse(&raw);

    let payload_log = invocation.as_ref().ok().and_then(|i| i.log_path.as_deref());
    let log_file = logging::log_file(cli.log_file.as_deref(), payload_log);
    if let Err(e) = logging::init(cli.log_format, log_file) {
        eprintln!("stowage: {e:#}");
        return ExitCode::from(EXIT_SETUP);
    }

    let invocation = match invocation {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::error!(error = %e, "invalid payload");
            return report_failure(false, &e.to_string());
        }
    };

    match run(&cli, invocation).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "setup failed");
            eprintln!("stowage: {e:#}");
            ExitCode::from(EXIT_SETUP)
        }
    }
}

/// Setup failures surface as `Err`; reconciliation failures are reported
/// on stdout and mapped to an exit code.
async fn run(cli: &Cli, invocation: payload::Invocation) -> eyre::Result<ExitCode> {
    let config = ArmConfig::from_env().wrap_err("failed to load Azure configuration")?;
    let client = ArmClient::new(config).wrap_err("failed to build HTTP client")?;

    let result = Reconciler::new(&client)
        .with_check_mode(cli.check || invocation.check_mode)
        .with_poll_policy(cli.poll_policy())
        .reconcile(invocation.desired)
        .await;

    match result {
        Ok(result) => {
            output::print_result(&result)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, changed = e.changed(), "reconciliation failed");
            Ok(report_failure(e.changed(), &e.to_string()))
        }
    }
}

fn report_failure(changed: bool, msg: &str) -> ExitCode {
    if let Err(e) = output::print_failure(changed, msg) {
        eprintln!("stowage: {e:#}");
    }
    ExitCode::from(EXIT_FAILED)
}
