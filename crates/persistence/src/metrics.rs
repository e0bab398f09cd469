//! Query latency and pool occupancy metrics for the workflow store.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

const QUERY_SECONDS: &str = "workflow_db_query_seconds";
const POOL_CONNECTIONS: &str = "workflow_db_pool_connections";

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub total: u32,
    pub idle: u32,
}

impl PoolStats {
    pub fn of(pool: &PgPool) -> Self {
        Self::new(pool.size(), pool.num_idle() as u32)
    }

    fn new(total: u32, idle: u32) -> Self {
        // num_idle can briefly exceed size while a connection is being reaped.
        Self {
            total,
            idle: idle.min(total),
        }
    }

    pub fn in_use(&self) -> u32 {
        self.total - self.idle
    }
}

/// Publishes pool occupancy as `workflow_db_pool_connections{state}`.
pub fn record_pool_metrics(pool: &PgPool) -> PoolStats {
    let stats = PoolStats::of(pool);
    gauge!(POOL_CONNECTIONS, "state" => "in_use").set(f64::from(stats.in_use()));
    gauge!(POOL_CONNECTIONS, "state" => "idle").set(f64::from(stats.idle));
    stats
}

/// Measures one repository statement. Call [`QueryTimer::record`] once the
/// statement has returned, whether it succeeded or not.
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

    pub fn record(self) {
        histogram!(QUERY_SECONDS, "query" => self.query_name)
            .record(self.start.elapsed().as_secs_f64());
    }
}
