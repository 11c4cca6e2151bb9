//! Logging initialization

use std::fmt;
use std::str::FromStr;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::FleetError;

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable output, `aeromatrix=debug`
    #[default]
    Development,
    /// JSON lines, `aeromatrix=info`
    Production,
    /// Bare registry; tests install the capture layer themselves
    Test,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Test => "test",
        }
    }

    fn default_filter(self) -> &'static str {
        match self {
            Profile::Production => "aeromatrix=info",
            Profile::Development | Profile::Test => "aeromatrix=debug",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Profile::Development),
            "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(FleetError::Serialization {
                message: format!("unknown log profile '{other}'"),
            }),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter.
///
/// ```
/// use aeromatrix_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()))
        };
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}
