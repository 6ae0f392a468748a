//! Shared utility functions for air quality crates.

/// Pacing between API requests
pub mod rate_limit {
    use async_trait::async_trait;
    use std::time::Duration;

    /// Something the fetcher awaits before each per-station request.
    #[async_trait]
    pub trait RateLimiter: Send {
        async fn wait(&mut self);
    }

    /// Sleep for the same delay before every request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedDelay {
        delay: Duration,
    }

    impl FixedDelay {
        /// Pause between per-station requests.
        pub const DEFAULT_MILLIS: u64 = 100;

        pub fn new(delay: Duration) -> Self {
            FixedDelay { delay }
        }

        pub fn from_millis(millis: u64) -> Self {
            FixedDelay::new(Duration::from_millis(millis))
        }

        pub fn delay(&self) -> Duration {
            self.delay
        }
    }

    impl Default for FixedDelay {
        fn default() -> Self {
            FixedDelay::from_millis(Self::DEFAULT_MILLIS)
        }
    }

    #[async_trait]
    impl RateLimiter for FixedDelay {
        async fn wait(&mut self) {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
    }

    /// Never waits.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NoDelay;

    #[async_trait]
    impl RateLimiter for NoDelay {
        async fn wait(&mut self) {}
    }

}

/// Reading and writing the JSON output document
pub mod output {
    use anyhow::Context;
    use log::debug;
    use serde::{de::DeserializeOwned, Serialize};
    use std::fs;
    use std::path::Path;

    /// Where the static site picks up the fetched readings.
    pub const DEFAULT_OUTPUT_PATH: &str = "public/api/air-quality-data.json";

    /// Serialize `items` as a JSON array and overwrite `path`.
    ///
    /// Parent directories are created as needed. The file is written in
    /// place, not swapped in atomically.
    pub fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string(items)?;
        fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {} bytes to {}", json.len(), path.display());
        Ok(())
    }

    /// Read a JSON array previously written by [`write_json_array`].
    pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&body)
            .with_context(|| format!("{} is not a JSON array", path.display()))
    }

}
