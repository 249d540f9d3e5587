//! Service configuration.
//!
//! [`S3Config`] carries every tunable the service reads at startup. Values
//! come from three places, in increasing priority: the [`Default`] impl,
//! a serialized config (JSON, camelCase keys), and environment variables
//! via [`S3Config::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default listen address for the gateway.
const DEFAULT_GATEWAY_LISTEN: &str = "0.0.0.0:4566";

/// Default region reported for buckets created without a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// Default maximum object size (bytes) kept in memory before spilling to disk.
const DEFAULT_MAX_MEMORY_OBJECT_SIZE: usize = 524_288;

/// Configuration for the Harbor S3 service.
///
/// # Examples
///
/// ```
/// use harbor_s3_core::S3Config;
///
/// let config = S3Config::builder()
///     .gateway_listen("127.0.0.1:9000".to_owned())
///     .build();
/// assert_eq!(config.default_region, "us-east-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// Address the HTTP gateway binds to (`host:port`).
    #[builder(default = DEFAULT_GATEWAY_LISTEN.to_owned())]
    pub gateway_listen: String,

    /// Region assigned to buckets created without an explicit location
    /// constraint.
    #[builder(default = DEFAULT_REGION.to_owned())]
    pub default_region: String,

    /// Whether virtual-host style addressing (`bucket.domain/key`) is
    /// recognized in addition to path style (`domain/bucket/key`).
    #[builder(default = true)]
    pub s3_virtual_hosting: bool,

    /// Domain suffix used to recognize virtual-host style requests.
    #[builder(default = "s3.localhost.harbor.cloud".to_owned())]
    pub s3_domain: String,

    /// Maximum object or part size (bytes) held in memory before the body is
    /// spilled to a temporary file.
    #[builder(default = DEFAULT_MAX_MEMORY_OBJECT_SIZE)]
    pub s3_max_memory_object_size: usize,

    /// Log level used when `RUST_LOG` is not set.
    #[builder(default = "info".to_owned())]
    pub log_level: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            gateway_listen: DEFAULT_GATEWAY_LISTEN.to_owned(),
            default_region: DEFAULT_REGION.to_owned(),
            s3_virtual_hosting: true,
            s3_domain: "s3.localhost.harbor.cloud".to_owned(),
            s3_max_memory_object_size: DEFAULT_MAX_MEMORY_OBJECT_SIZE,
            log_level: "info".to_owned(),
        }
    }
}

impl S3Config {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `GATEWAY_LISTEN`, `DEFAULT_REGION`,
    /// `S3_VIRTUAL_HOSTING`, `S3_DOMAIN`, `S3_MAX_MEMORY_OBJECT_SIZE`,
    /// `LOG_LEVEL`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = listen;
        }
        if let Ok(region) = std::env::var("DEFAULT_REGION") {
            config.default_region = region;
        }
        if let Ok(value) = std::env::var("S3_VIRTUAL_HOSTING") {
            config.s3_virtual_hosting = parse_bool(&value);
        }
        if let Ok(domain) = std::env::var("S3_DOMAIN") {
            config.s3_domain = domain;
        }
        if let Ok(value) = std::env::var("S3_MAX_MEMORY_OBJECT_SIZE") {
            if let Ok(size) = value.parse() {
                config.s3_max_memory_object_size = size;
            }
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

/// Parse a boolean environment value. Accepts `1` or `true` (any case).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_use_defaults() {
        let config = S3Config::default();
        assert_eq!(config.gateway_listen, "0.0.0.0:4566");
        assert_eq!(config.default_region, "us-east-1");
        assert!(config.s3_virtual_hosting);
        assert_eq!(config.s3_max_memory_object_size, 524_288);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = S3Config::builder()
            .gateway_listen("127.0.0.1:9000".to_owned())
            .default_region("eu-west-1".to_owned())
            .s3_max_memory_object_size(1024)
            .build();
        assert_eq!(config.gateway_listen, "127.0.0.1:9000");
        assert_eq!(config.default_region, "eu-west-1");
        assert_eq!(config.s3_max_memory_object_size, 1024);
        // Unset fields take defaults.
        assert!(config.s3_virtual_hosting);
    }

    #[test]
    fn test_should_serialize_camel_case() {
        let config = S3Config::default();
        let json = serde_json::to_string(&config).expect("config should serialize");
        assert!(json.contains("gatewayListen"));
        assert!(json.contains("s3MaxMemoryObjectSize"));
        assert!(json.contains("defaultRegion"));
    }

    #[test]
    fn test_should_deserialize_from_json() {
        let json = r#"{
            "gatewayListen": "0.0.0.0:4566",
            "defaultRegion": "ap-southeast-2",
            "s3VirtualHosting": false,
            "s3Domain": "s3.example.com",
            "s3MaxMemoryObjectSize": 2048,
            "logLevel": "debug"
        }"#;
        let config: S3Config = serde_json::from_str(json).expect("config should deserialize");
        assert_eq!(config.default_region, "ap-southeast-2");
        assert!(!config.s3_virtual_hosting);
        assert_eq!(config.s3_max_memory_object_size, 2048);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("yes"));
    }
}
