//! Data sources for the supplier sales table.
//!
//! - `mysql`: the live `supplier_sales` table
//! - `fixture`: built-in demo rows or a seeded synthetic table
//! - `cache`: the per-session memo in front of whichever source is active

use std::cell::Cell;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::DbConfig;
use crate::domain::{SalesRecord, SourceKind};
use crate::error::{AppError, LoadError};

pub mod cache;
pub mod fixture;
pub mod mysql;

pub use cache::SessionCache;
pub use fixture::FixtureSource;
pub use mysql::MySqlSource;

/// Anything that can produce the full sales table.
///
/// Every implementation yields normalized `SalesRecord`s, so the filter and
/// aggregation stages never know where the rows came from.
pub trait SalesSource {
    fn load(&self) -> Result<Vec<SalesRecord>, LoadError>;

    /// Short label for logs and the dashboard header. Must not contain credentials.
    fn describe(&self) -> String;
}

/// Try `primary`; when it is unavailable, log and serve `fallback` instead.
///
/// Validation failures (`MalformedDate`, `InvalidRecord`) are not masked: bad data
/// at the primary source is still an error.
pub struct FallbackSource {
    primary: Box<dyn SalesSource>,
    fallback: Box<dyn SalesSource>,
    used_fallback: Cell<bool>,
}

impl FallbackSource {
    pub fn new(primary: Box<dyn SalesSource>, fallback: Box<dyn SalesSource>) -> Self {
        Self {
            primary,
            fallback,
            used_fallback: Cell::new(false),
        }
    }
}

impl SalesSource for FallbackSource {
    fn load(&self) -> Result<Vec<SalesRecord>, LoadError> {
        match self.primary.load() {
            Ok(records) => {
                self.used_fallback.set(false);
                Ok(records)
            }
            Err(LoadError::SourceUnavailable(reason)) => {
                warn!(
                    primary = %self.primary.describe(),
                    fallback = %self.fallback.describe(),
                    "{reason}; falling back"
                );
                let records = self.fallback.load()?;
                self.used_fallback.set(true);
                Ok(records)
            }
            Err(err) => Err(err),
        }
    }

    fn describe(&self) -> String {
        if self.used_fallback.get() {
            format!("{} (fallback from {})", self.fallback.describe(), self.primary.describe())
        } else {
            self.primary.describe()
        }
    }
}

/// Source selection as given on the command line.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub kind: SourceKind,
    /// TOML secrets file with a `[mysql]` table; env vars are used when absent.
    pub secrets: Option<PathBuf>,
    /// Use a synthetic fixture of this many rows instead of the demo rows.
    pub synthetic: Option<usize>,
    pub seed: u64,
    /// Serve the fixture when the database is unavailable.
    pub fallback: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            kind: SourceKind::Auto,
            secrets: None,
            synthetic: None,
            seed: 42,
            fallback: false,
        }
    }
}

impl SourceOptions {
    fn fixture(&self) -> FixtureSource {
        match self.synthetic {
            Some(count) => FixtureSource::synthetic(count, self.seed),
            None => FixtureSource::demo(),
        }
    }

    fn db_config(&self) -> Result<DbConfig, AppError> {
        let config = match &self.secrets {
            Some(path) => DbConfig::from_secrets_file(path)?,
            None => DbConfig::from_env()?,
        };
        Ok(config)
    }
}

/// Build the source described by `options`.
///
/// `auto` picks MySQL when database configuration is available and the fixture
/// otherwise; an explicit `mysql` with missing configuration is an error.
pub fn open_source(options: &SourceOptions) -> Result<Box<dyn SalesSource>, AppError> {
    let db = match options.kind {
        SourceKind::Fixture => None,
        SourceKind::Mysql => Some(options.db_config()?),
        SourceKind::Auto => match options.db_config() {
            Ok(config) => Some(config),
            Err(err) => {
                info!("no database configuration ({err}); using fixture data");
                None
            }
        },
    };

    let source: Box<dyn SalesSource> = match db {
        None => Box::new(options.fixture()),
        Some(config) => {
            let live = Box::new(MySqlSource::new(config));
            if options.fallback {
                Box::new(FallbackSource::new(live, Box::new(options.fixture())))
            } else {
                live
            }
        }
    };

    info!(source = %source.describe(), "sales source selected");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Down;

    impl SalesSource for Down {
        fn load(&self) -> Result<Vec<SalesRecord>, LoadError> {
            Err(LoadError::SourceUnavailable("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "down".to_string()
        }
    }

    struct Corrupt;

    impl SalesSource for Corrupt {
        fn load(&self) -> Result<Vec<SalesRecord>, LoadError> {
            Err(LoadError::MalformedDate {
                row: 2,
                value: "??".to_string(),
            })
        }

        fn describe(&self) -> String {
            "corrupt".to_string()
        }
    }

    #[test]
    fn fallback_serves_fixture_when_primary_is_down() {
        let source = FallbackSource::new(Box::new(Down), Box::new(FixtureSource::demo()));
        assert_eq!(source.describe(), "down");

        let records = source.load().unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(source.describe(), "demo fixture (fallback from down)");
    }

    #[test]
    fn fallback_does_not_mask_bad_data() {
        let source = FallbackSource::new(Box::new(Corrupt), Box::new(FixtureSource::demo()));
        assert!(matches!(source.load(), Err(LoadError::MalformedDate { row: 2, .. })));
    }

    #[test]
    fn fixture_kind_ignores_database_settings() {
        let options = SourceOptions {
            kind: SourceKind::Fixture,
            secrets: Some(PathBuf::from("/nonexistent/secrets.toml")),
            synthetic: Some(25),
            ..SourceOptions::default()
        };
        let source = open_source(&options).unwrap();
        assert_eq!(source.load().unwrap().len(), 25);
    }

    #[test]
    fn explicit_mysql_with_unreadable_secrets_is_a_config_error() {
        let options = SourceOptions {
            kind: SourceKind::Mysql,
            secrets: Some(PathBuf::from("/nonexistent/secrets.toml")),
            ..SourceOptions::default()
        };
        let err = open_source(&options).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn auto_without_configuration_uses_fixture() {
        let options = SourceOptions {
            secrets: Some(PathBuf::from("/nonexistent/secrets.toml")),
            ..SourceOptions::default()
        };
        let source = open_source(&options).unwrap();
        assert_eq!(source.describe(), "demo fixture");
    }
}
