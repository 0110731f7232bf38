//! Process configuration, read once from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::processor::DEFAULT_PREVIEW_MAX_LEN;
use crate::waiter::WaitPolicy;
use search_reindexer_repository::meilisearch::{DEFAULT_INDEX_NAME, DEFAULT_REQUEST_TIMEOUT};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "lekton";
const DEFAULT_MONGODB_COLLECTION: &str = "documents";
const DEFAULT_MEILISEARCH_URL: &str = "http://localhost:7700";
const DEFAULT_MEILISEARCH_API_KEY: &str = "dev-master-key-change-in-prod";
const DEFAULT_S3_ENDPOINT: &str = "http://localhost:3900";
const DEFAULT_S3_BUCKET: &str = "lekton-docs";

const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
const DEFAULT_MAX_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_MAX_WAIT_SECS: u64 = 300;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// How startup reacts to an unreachable collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    #[default]
    FailFast,
    /// Retry the connection at a fixed interval until it succeeds.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode label.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Some(Self::FailFast),
            "retry" => Some(Self::Retry),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionMode::FailFast => write!(f, "fail-fast"),
            ConnectionMode::Retry => write!(f, "retry"),
        }
    }
}

/// Everything the reindexer needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,
    pub meilisearch_url: String,
    /// `None` when `MEILISEARCH_API_KEY` is set to an empty value.
    pub meilisearch_api_key: Option<String>,
    pub index_name: String,
    /// Limit on each HTTP request to the search engine.
    pub meilisearch_timeout: Duration,
    /// Blob store location. Logged at startup, not read.
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub preview_max_len: usize,
    pub wait_policy: WaitPolicy,
    pub max_batch_size: Option<usize>,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
}

impl ReindexConfig {
    /// Read the configuration from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: Document store connection string (default: mongodb://localhost:27017)
    /// - `MONGODB_DATABASE`: Database name (default: lekton)
    /// - `MONGODB_COLLECTION`: Collection holding the records (default: documents)
    /// - `MEILISEARCH_URL`: Search engine URL (default: http://localhost:7700)
    /// - `MEILISEARCH_API_KEY`: Search engine key, empty for none (default: dev-master-key-change-in-prod)
    /// - `MEILISEARCH_INDEX`: Index uid (default: documents)
    /// - `MEILISEARCH_TIMEOUT_SECS`: Per-request timeout (default: 30)
    /// - `S3_ENDPOINT` / `S3_BUCKET`: Blob store location (default: http://localhost:3900 / lekton-docs)
    /// - `REINDEX_PREVIEW_MAX_LEN`: Content preview length in characters (default: 200)
    /// - `REINDEX_TASK_POLL_INTERVAL_MS`: First task poll delay (default: 50)
    /// - `REINDEX_TASK_MAX_POLL_INTERVAL_MS`: Backoff ceiling (default: 1000)
    /// - `REINDEX_TASK_MAX_WAIT_SECS`: Task wait deadline, 0 for none (default: 300)
    /// - `REINDEX_TASK_MAX_POLLS`: Task poll limit (default: unbounded)
    /// - `REINDEX_MAX_BATCH_SIZE`: Largest accepted batch (default: unbounded)
    /// - `REINDEX_CONNECTION_MODE`: "fail-fast" or "retry" (default: fail-fast)
    /// - `REINDEX_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unset or blank values take their default. Values that fail to parse
    /// log a warning and take their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let meilisearch_api_key = match lookup("MEILISEARCH_API_KEY") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value.trim().to_string()),
            None => Some(DEFAULT_MEILISEARCH_API_KEY.to_string()),
        };

        let max_wait_secs = parse_or(&get, "REINDEX_TASK_MAX_WAIT_SECS", DEFAULT_MAX_WAIT_SECS);
        let wait_policy = WaitPolicy {
            initial_interval: Duration::from_millis(parse_or(
                &get,
                "REINDEX_TASK_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )),
            max_interval: Duration::from_millis(parse_or(
                &get,
                "REINDEX_TASK_MAX_POLL_INTERVAL_MS",
                DEFAULT_MAX_POLL_INTERVAL_MS,
            )),
            max_wait: (max_wait_secs > 0).then(|| Duration::from_secs(max_wait_secs)),
            max_polls: parse_optional(&get, "REINDEX_TASK_MAX_POLLS"),
            ..WaitPolicy::default()
        };

        let connection_mode = match get("REINDEX_CONNECTION_MODE") {
            None => ConnectionMode::default(),
            Some(label) => ConnectionMode::from_label(&label).unwrap_or_else(|| {
                warn!(
                    value = %label,
                    "Invalid REINDEX_CONNECTION_MODE, defaulting to 'fail-fast'"
                );
                ConnectionMode::default()
            }),
        };

        Self {
            mongodb_uri: text("MONGODB_URI", DEFAULT_MONGODB_URI),
            mongodb_database: text("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE),
            mongodb_collection: text("MONGODB_COLLECTION", DEFAULT_MONGODB_COLLECTION),
            meilisearch_url: text("MEILISEARCH_URL", DEFAULT_MEILISEARCH_URL),
            meilisearch_api_key,
            index_name: text("MEILISEARCH_INDEX", DEFAULT_INDEX_NAME),
            meilisearch_timeout: Duration::from_secs(parse_or(
                &get,
                "MEILISEARCH_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT.as_secs(),
            )),
            s3_endpoint: text("S3_ENDPOINT", DEFAULT_S3_ENDPOINT),
            s3_bucket: text("S3_BUCKET", DEFAULT_S3_BUCKET),
            preview_max_len: parse_or(&get, "REINDEX_PREVIEW_MAX_LEN", DEFAULT_PREVIEW_MAX_LEN),
            wait_policy,
            max_batch_size: parse_optional(&get, "REINDEX_MAX_BATCH_SIZE"),
            connection_mode,
            retry_interval: Duration::from_secs(parse_or(
                &get,
                "REINDEX_RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )),
        }
    }
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    parse_optional(get, key).unwrap_or(default)
}

fn parse_optional<T, G>(get: &G, key: &str) -> Option<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    let value = get(key)?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %value, "Invalid numeric setting, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ReindexConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ReindexConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = ReindexConfig::default();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.mongodb_database, "lekton");
        assert_eq!(config.mongodb_collection, "documents");
        assert_eq!(config.meilisearch_url, "http://localhost:7700");
        assert_eq!(
            config.meilisearch_api_key.as_deref(),
            Some("dev-master-key-change-in-prod")
        );
        assert_eq!(config.index_name, "documents");
        assert_eq!(config.meilisearch_timeout, Duration::from_secs(30));
        assert_eq!(config.s3_endpoint, "http://localhost:3900");
        assert_eq!(config.s3_bucket, "lekton-docs");
        assert_eq!(config.preview_max_len, 200);
        assert_eq!(config.wait_policy, WaitPolicy::default());
        assert_eq!(config.max_batch_size, None);
        assert_eq!(config.connection_mode, ConnectionMode::FailFast);
        assert_eq!(config.retry_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MEILISEARCH_INDEX", "docs-v2"),
            ("MEILISEARCH_TIMEOUT_SECS", "5"),
            ("REINDEX_PREVIEW_MAX_LEN", "80"),
            ("REINDEX_TASK_POLL_INTERVAL_MS", "10"),
            ("REINDEX_TASK_MAX_POLLS", "25"),
            ("REINDEX_MAX_BATCH_SIZE", "5000"),
            ("REINDEX_CONNECTION_MODE", "RETRY"),
            ("REINDEX_RETRY_INTERVAL_SECS", "2"),
        ]);

        assert_eq!(config.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.index_name, "docs-v2");
        assert_eq!(config.meilisearch_timeout, Duration::from_secs(5));
        assert_eq!(config.preview_max_len, 80);
        assert_eq!(config.wait_policy.initial_interval, Duration::from_millis(10));
        assert_eq!(config.wait_policy.max_polls, Some(25));
        assert_eq!(config.max_batch_size, Some(5000));
        assert_eq!(config.connection_mode, ConnectionMode::Retry);
        assert_eq!(config.retry_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_max_wait_is_unbounded() {
        let config = config_from(&[("REINDEX_TASK_MAX_WAIT_SECS", "0")]);
        assert_eq!(config.wait_policy.max_wait, None);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("REINDEX_PREVIEW_MAX_LEN", "lots"),
            ("REINDEX_TASK_MAX_WAIT_SECS", "-1"),
            ("REINDEX_CONNECTION_MODE", "sometimes"),
            ("MONGODB_DATABASE", "   "),
        ]);

        assert_eq!(config.preview_max_len, 200);
        assert_eq!(config.wait_policy.max_wait, Some(Duration::from_secs(300)));
        assert_eq!(config.connection_mode, ConnectionMode::FailFast);
        assert_eq!(config.mongodb_database, "lekton");
    }

    #[test]
    fn test_empty_api_key_disables_auth() {
        let config = config_from(&[("MEILISEARCH_API_KEY", "")]);
        assert_eq!(config.meilisearch_api_key, None);
    }

    #[test]
    fn test_connection_mode_labels() {
        assert_eq!(
            ConnectionMode::from_label("fail_fast"),
            Some(ConnectionMode::FailFast)
        );
        assert_eq!(ConnectionMode::from_label(" Retry "), Some(ConnectionMode::Retry));
        assert_eq!(ConnectionMode::from_label("never"), None);
        assert_eq!(ConnectionMode::Retry.to_string(), "retry");
    }
}
