//! Query timing metrics.
//!
//! Every repository query records `database_query_duration_seconds`
//! labelled with the query name and its outcome; failed queries also bump
//! `database_query_errors_total`.

use metrics::{counter, histogram};
use std::time::Instant;

const OUTCOME_OK: &str = "ok";
const OUTCOME_ERROR: &str = "error";

/// Record database query duration.
pub fn record_query_duration(query_name: &'static str, outcome: &'static str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name,
        "outcome" => outcome
    )
    .record(duration_secs);

    if outcome == OUTCOME_ERROR {
        counter!("database_query_errors_total", "query" => query_name).increment(1);
    }
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_skill_by_id");
/// let result = sqlx::query_as::<_, SkillEntity>(...).fetch_optional(&pool).await;
/// timer.observe(&result);
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Records a query that is known to have succeeded, such as a committed
    /// transaction.
    pub fn record(self) {
        self.finish(OUTCOME_OK);
    }

    /// Records the query with an outcome label taken from `result`.
    pub fn observe<T, E>(self, result: &Result<T, E>) {
        let outcome = if result.is_ok() { OUTCOME_OK } else { OUTCOME_ERROR };
        self.finish(outcome);
    }

    fn finish(self, outcome: &'static str) {
        record_query_duration(self.query_name, outcome, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_creation() {
        let timer = QueryTimer::new("list_skills");
        assert_eq!(timer.query_name, "list_skills");
    }

    #[test]
    fn test_observe_without_recorder() {
        // No global recorder is installed in unit tests; recording is a no-op.
        QueryTimer::new("get_profile").observe(&Ok::<(), ()>(()));
        QueryTimer::new("get_profile").observe(&Err::<(), _>("down"));
        QueryTimer::new("update_skill").record();
    }
}
