//! Prover configuration types.

use std::time::Duration;

/// Configuration for the search loop
#[derive(Debug, Clone)]
pub struct ProverConfig {
    /// Maximum number of full passes over the store
    pub max_iterations: usize,
    /// Maximum number of store members
    pub max_nodes: usize,
    pub timeout: Duration,
    /// Memory limit for the whole process in MB
    pub memory_limit_mb: Option<usize>,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_iterations: 100, // 0 means no limit
            max_nodes: 10_000,   // 0 means no limit
            timeout: Duration::from_secs(10),
            memory_limit_mb: None,
        }
    }
}

/// Get current process RSS in MB. Returns None if unavailable.
pub fn process_memory_mb() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let rss_pages: usize = statm.split_whitespace().nth(1)?.parse().ok()?;
        let page_size = 4096usize; // standard on Linux
        Some(rss_pages * page_size / (1024 * 1024))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProverConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.max_nodes, 10_000);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.memory_limit_mb.is_none());
    }
}
