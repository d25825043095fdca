use super::{StatementContext, truncate_sql_bytes};
use std::time::Duration;
use tracing::Level;

/// A `tracing`-based hook that emits the SQL a handle is about to execute
/// and how it went.
///
/// The statement itself is logged at `level`; completion (row count and
/// elapsed time) at the same level, failures at `DEBUG` or above.
#[derive(Debug, Clone)]
pub struct TracingSqlHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingSqlHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl TracingSqlHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    /// Called before the statement is sent.
    pub fn before_statement(&self, ctx: &StatementContext<'_>) {
        let sql = self.truncate_sql(ctx.sql);
        emit_at_level!(
            self.level,
            target: "myorm.sql",
            table = ctx.table,
            query_type = ?ctx.query_type,
            param_count = ctx.param_count,
            sql = %sql,
        );
    }

    /// Called once the statement committed and its rows were fetched.
    pub fn after_statement(&self, ctx: &StatementContext<'_>, elapsed: Duration, rows: usize) {
        emit_at_level!(
            self.level,
            target: "myorm.sql",
            table = ctx.table,
            query_type = ?ctx.query_type,
            rows,
            elapsed_ms = elapsed.as_millis() as u64,
            "statement completed",
        );
    }

    /// Called when any lifecycle step fails.
    pub fn on_error(&self, ctx: &StatementContext<'_>, elapsed: Duration, error: &dyn std::error::Error) {
        let level = if self.level < Level::DEBUG {
            self.level
        } else {
            Level::DEBUG
        };
        emit_at_level!(
            level,
            target: "myorm.sql",
            table = ctx.table,
            query_type = ?ctx.query_type,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error,
            "statement failed",
        );
    }
}
