//! Memory and timing profiling utilities
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status
//! - Timing: Uses std::time::Instant for precise measurements
//!
//! Checkpoints are logged at debug level.

use std::fs;
use std::time::Instant;

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
///
/// Returns 0 where /proc is unavailable.
pub fn get_rss_bytes() -> u64 {
    if let Ok(status) = fs::read_to_string("/proc/self/status") {
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                // Format: "VmRSS:    123456 kB"
                if let Some(Ok(kb)) = rest.split_whitespace().next().map(str::parse::<u64>) {
                    return kb * 1024;
                }
            }
        }
    }
    0
}

/// Get current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Memory checkpoint that returns the value for comparison
pub fn checkpoint_return(label: &str) -> f64 {
    let rss = get_rss_mb();
    log::debug!("MEMPROF [{:.2} MB]: {}", rss, label);
    rss
}

/// Calculate delta from a previous checkpoint
pub fn delta(label: &str, previous: f64) -> f64 {
    let current = get_rss_mb();
    log::debug!(
        "MEMPROF [{:.2} MB] (delta: {:+.2} MB): {}",
        current,
        current - previous,
        label
    );
    current
}

/// Print elapsed time with delta from previous checkpoint
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    let total = start.elapsed();
    let section = section_start.elapsed();
    log::debug!(
        "TIMEPROF: {} [+{:.3}s, total: {:.3}s]",
        label,
        section.as_secs_f64(),
        total.as_secs_f64()
    );
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_rss_is_reported() {
        assert!(get_rss_bytes() > 0);
        assert!(checkpoint_return("test") > 0.0);
    }

    #[test]
    fn test_time_delta_returns_new_instant() {
        let start = Instant::now();
        let next = time_delta("step", start, start);
        assert!(next >= start);
    }
}
