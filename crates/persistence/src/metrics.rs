//! Database metrics collection.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record database query duration.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Times a single query and records its duration and outcome.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("find_account_by_id");
/// timer.observe(sqlx::query_as::<_, AccountEntity>(...).fetch_optional(&pool).await)
/// ```
pub struct QueryTimer {
    query_name: String,
    start: Instant,
}

impl QueryTimer {
    /// Create a new timer for the given query name.
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    /// Records the elapsed time, counts failures, and passes the result through.
    pub fn observe<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        record_query_duration(&self.query_name, self.start.elapsed().as_secs_f64());
        if result.is_err() {
            counter!(
                "database_query_errors_total",
                "query" => self.query_name
            )
            .increment(1);
        }
        result
    }
}
