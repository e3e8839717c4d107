use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use stowage_core::models::DesiredSpec;
use stowage_core::ValidationError;

/// Host key that requests check mode.
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Module argument naming a log file; it configures logging, not the account.
const LOG_PATH_KEY: &str = "log_path";

/// A parsed payload: the desired account plus host-level flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub desired: DesiredSpec,
    pub check_mode: bool,
    pub log_path: Option<PathBuf>,
}

/// Read the raw payload from `path`, or stdin when absent or `-`.
pub fn read(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Host-internal keys start with `_` and are dropped before the payload is
/// parsed, so unknown-key rejection only applies to module arguments.
pub fn parse(raw: &str) -> Result<Invocation, ValidationError> {
    let Value::Object(mut map) = serde_json::from_str::<Value>(raw)? else {
        return Err(ValidationError::Payload(
            "payload must be a JSON object".to_string(),
        ));
    };

    let check_mode = match map.get(CHECK_MODE_KEY) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(ValidationError::Payload(format!(
                "{CHECK_MODE_KEY} must be a boolean, got {other}"
            )));
        }
    };
    let log_path = match map.remove(LOG_PATH_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(path)) if !path.is_empty() => Some(PathBuf::from(path)),
        Some(other) => {
            return Err(ValidationError::Payload(format!(
                "{LOG_PATH_KEY} must be a non-empty string, got {other}"
            )));
        }
    };
    map.retain(|key, _| !key.starts_with('_'));

    Ok(Invocation {
        desired: DesiredSpec::from_json(Value::Object(map))?,
        check_mode,
        log_path,
    })
}
