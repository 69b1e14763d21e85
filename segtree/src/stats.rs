use std::{fmt, time::Duration};

/// Call counters and cumulative wall time, per call kind.
///
/// Only successful calls are recorded. Range and point updates share the
/// update counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub query_count: u64,
    pub update_count: u64,
    pub total_query_time: Duration,
    pub total_update_time: Duration,
}

impl Stats {
    pub(crate) fn record_query(&mut self, elapsed: Duration) {
        self.query_count += 1;
        self.total_query_time += elapsed;
    }

    pub(crate) fn record_update(&mut self, elapsed: Duration) {
        self.update_count += 1;
        self.total_update_time += elapsed;
    }

    pub fn avg_query_time(&self) -> Option<Duration> {
        average(self.total_query_time, self.query_count)
    }

    pub fn avg_update_time(&self) -> Option<Duration> {
        average(self.total_update_time, self.update_count)
    }
}

fn average(total: Duration, count: u64) -> Option<Duration> {
    if count == 0 {
        return None;
    }
    Some(Duration::from_nanos((total.as_nanos() / count as u128) as u64))
}

/// The statistics report.
impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Segment Tree Statistics ===")?;
        writeln!(f, "Total Queries: {}", self.query_count)?;
        writeln!(f, "Total Updates: {}", self.update_count)?;
        writeln!(f, "Total Query Time: {:?}", self.total_query_time)?;
        writeln!(f, "Total Update Time: {:?}", self.total_update_time)?;
        if let Some(avg) = self.avg_query_time() {
            writeln!(f, "Average Query Time: {avg:?}")?;
        }
        if let Some(avg) = self.avg_update_time() {
            writeln!(f, "Average Update Time: {avg:?}")?;
        }
        writeln!(f, "================================")
    }
}
