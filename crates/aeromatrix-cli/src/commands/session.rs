//! Per-invocation setup: configuration, logging, database and request context

use std::path::PathBuf;

use aeromatrix_core::logging_facility::{self, Profile};
use aeromatrix_core::{ExError, FleetConfig, FleetPolicy};
use aeromatrix_core_types::RequestContext;
use clap::{Args, ValueEnum};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database path [default: .aeromatrix/fleet.db]
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_profile: Option<LogProfile>,

    /// Name recorded as the acting principal
    #[arg(long, global = true)]
    pub actor: Option<String>,
}

pub struct Session {
    pub conn: Connection,
    pub ctx: RequestContext,
    pub policy: FleetPolicy,
}

impl Session {
    /// Merge flags over the config file, start logging and open the database
    pub fn open(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let config =
            FleetConfig::load_or_default(global.config.as_deref()).map_err(ExError::from)?;

        let profile = global
            .log_profile
            .map(Profile::from)
            .unwrap_or(config.logging.profile);
        logging_facility::init(profile);

        let db_path = global.db.clone().unwrap_or(config.storage.db_path);
        let conn = aeromatrix_store::db::open_fleet_db(&db_path)?;

        let mut ctx = RequestContext::new();
        if let Some(actor) = &global.actor {
            ctx = ctx.with_actor(actor.clone());
        }

        Ok(Self {
            conn,
            ctx,
            policy: config.policy,
        })
    }
}
