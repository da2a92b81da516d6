//! MySQL-backed sales source.
//!
//! Reads the `supplier_sales` table. Columns are addressed by their display names
//! and cast in SQL so the decoded row shape does not depend on how each column was
//! declared (DECIMAL vs DOUBLE, DATE vs DATETIME vs VARCHAR, ...). Date text is then
//! parsed by the normalizer like any other source.
//!
//! The driver is async; `load()` runs it to completion on a private current-thread
//! runtime so callers stay synchronous.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::data::SalesSource;
use crate::domain::{RawSalesRow, SalesRecord};
use crate::error::LoadError;
use crate::normalize::normalize_all;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const SALES_QUERY: &str = r#"
SELECT
    `Supplier` AS supplier,
    `Product` AS product,
    CAST(`Expected Margin (%)` AS DOUBLE) AS expected_margin_pct,
    CAST(`Actual Margin (%)` AS DOUBLE) AS actual_margin_pct,
    CAST(`Units Sold` AS SIGNED) AS units_sold,
    CAST(`Cost per Unit` AS DOUBLE) AS cost_per_unit,
    CAST(`Date Sold` AS CHAR) AS date_sold
FROM supplier_sales
"#;

pub struct MySqlSource {
    config: DbConfig,
    connect_timeout: Duration,
}

impl MySqlSource {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
    }

    async fn fetch_rows(&self) -> Result<Vec<RawSalesRow>, LoadError> {
        let target = self.config.display_target();

        let mut conn: MySqlConnection =
            tokio::time::timeout(self.connect_timeout, self.connect_options().connect())
                .await
                .map_err(|_| {
                    LoadError::SourceUnavailable(format!(
                        "timed out after {:?} connecting to {target}",
                        self.connect_timeout
                    ))
                })?
                .map_err(|e| LoadError::SourceUnavailable(format!("cannot connect to {target}: {e}")))?;

        // Missing table/columns surface here as query errors.
        let rows = sqlx::query_as::<_, RawSalesRow>(SALES_QUERY)
            .fetch_all(&mut conn)
            .await
            .map_err(|e| LoadError::SourceUnavailable(format!("query on {target} failed: {e}")))?;

        if let Err(e) = conn.close().await {
            debug!("closing connection to {target} failed: {e}");
        }

        Ok(rows)
    }
}

impl SalesSource for MySqlSource {
    fn load(&self) -> Result<Vec<SalesRecord>, LoadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LoadError::SourceUnavailable(format!("failed to start I/O runtime: {e}")))?;

        let rows = runtime.block_on(self.fetch_rows())?;
        info!(rows = rows.len(), db = %self.config.display_target(), "fetched supplier_sales");
        normalize_all(rows)
    }

    fn describe(&self) -> String {
        format!("mysql://{}", self.config.display_target())
    }
}
