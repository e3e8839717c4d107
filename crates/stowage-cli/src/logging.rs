use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::ValueEnum;
use eyre::WrapErr;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// The `--log-file` flag wins over a `log_path` carried in the payload.
pub fn log_file<'a>(flag: Option<&'a Path>, payload: Option<&'a Path>) -> Option<&'a Path> {
    flag.or(payload)
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
/// Stdout is never used; it carries the result record.
pub fn init(format: LogFormat, file: Option<&Path>) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(file.is_none());

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_payload_log_path() {
        let flag = Path::new("/var/log/stowage.log");
        let payload = Path::new("azure_rm_storageaccount.log");

        assert_eq!(log_file(Some(flag), Some(payload)), Some(flag));
        assert_eq!(log_file(None, Some(payload)), Some(payload));
        assert_eq!(log_file(None, None), None);
    }
}
