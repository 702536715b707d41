use crate::{Error, printable_sql};
use std::time::Duration;

/// Receives the dumped statement text and timing around every execution.
///
/// For each execution the dispatcher emits the statement at call time, the
/// elapsed time at completion, and on failure the error together with the
/// time spent so far. Implementations must tolerate being called from
/// whatever thread drives the statement.
pub trait DiagnosticSink: Send + Sync {
    /// A statement is about to run.
    fn statement(&self, sql: &str, method: &str);
    /// A statement completed.
    fn timing(&self, elapsed: Duration, sql: &str, method: &str);
    /// A driver call failed after `elapsed`.
    fn failure(&self, error: &Error, elapsed: Duration, sql: &str, method: &str);
}

/// Default sink forwarding everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl DiagnosticSink for LogReporter {
    fn statement(&self, sql: &str, method: &str) {
        log::debug!("{} {}", method, printable_sql(sql));
    }

    fn timing(&self, elapsed: Duration, sql: &str, method: &str) {
        log::debug!(
            "{} took {} ms: {}",
            method,
            elapsed.as_millis(),
            printable_sql(sql),
        );
    }

    fn failure(&self, error: &Error, elapsed: Duration, sql: &str, method: &str) {
        log::error!(
            "{} failed after {} ms: {}\n{:#}",
            method,
            elapsed.as_millis(),
            printable_sql(sql),
            error,
        );
    }
}
