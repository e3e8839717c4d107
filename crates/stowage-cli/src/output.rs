use serde::Serialize;
use stowage_core::models::ReconciliationResult;

/// Record printed when a reconciliation fails.
#[derive(Debug, Serialize)]
pub struct FailureRecord<'a> {
    pub failed: bool,
    pub changed: bool,
    pub msg: &'a str,
}

pub fn print_result(result: &ReconciliationResult) -> eyre::Result<()> {
    println!("{}", serde_json::to_string(result)?);
    Ok(())
}

pub fn print_failure(changed: bool, msg: &str) -> eyre::Result<()> {
    let record = FailureRecord {
        failed: true,
        changed,
        msg,
    };
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
