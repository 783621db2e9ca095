use async_trait::async_trait;
use tokio_postgres::{Client, Config, NoTls, Row};
use tracing::{debug, warn};

use super::PlaceStore;
use crate::error::{PlacenamesError, Result};
use crate::models::{PageWindow, PlaceNameRow, RegisterItem, SearchFilter};

/// Column order read by [`row_to_place_name`]
const PLACENAME_COLUMNS: &str = r#""ID"::text, "NAME"::text, "AUTHORITY"::text, "AUTH_ID"::text,
    "SUPPLY_DATE"::text, "FEATURE"::text, "CATEGORY"::text, "GROUP"::text,
    "LATITUDE"::float8, "LONGITUDE"::float8"#;

/// `$1` is the LIKE pattern, NULL when there is no search
const SEARCH_CLAUSE: &str =
    r#"$1::text IS NULL OR UPPER("ID") LIKE $1 OR UPPER("NAME") LIKE $1"#;

const REGISTER_ORDER: &str = r#""AUTHORITY",
    CAST('0' || regexp_replace("AUTH_ID", '\D+', '', 'g') AS NUMERIC),
    "AUTH_ID""#;

/// PostgreSQL backend. Holds only the parsed connection descriptor.
#[derive(Clone)]
pub struct PostgresStore {
    config: Config,
}

impl PostgresStore {
    /// Parse a libpq-style or URL connection string.
    pub fn new(dsn: &str) -> Result<Self> {
        let config = dsn
            .parse::<Config>()
            .map_err(|e| PlacenamesError::Configuration(format!("invalid database descriptor: {}", e)))?;
        Ok(Self { config })
    }

    async fn connect(&self) -> Result<Client> {
        let (client, connection) = self.config.connect(NoTls).await?;
        // Drive the connection until the client is dropped
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("postgres connection error: {}", e);
            }
        });
        Ok(client)
    }
}

#[async_trait]
impl PlaceStore for PostgresStore {
    /// COUNT and page SELECT share one connection
    async fn register(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<(u64, Vec<RegisterItem>)> {
        let client = self.connect().await?;
        let pattern = filter.like_pattern();

        let count_sql = format!(r#"SELECT COUNT(*) FROM "PLACENAMES" WHERE {}"#, SEARCH_CLAUSE);
        let row = client.query_one(count_sql.as_str(), &[&pattern]).await?;
        let total: i64 = row.try_get(0)?;

        let page_sql = format!(
            r#"SELECT "ID"::text, "NAME"::text FROM "PLACENAMES" WHERE {} ORDER BY {} OFFSET $2 LIMIT $3"#,
            SEARCH_CLAUSE, REGISTER_ORDER
        );
        let offset = window.offset() as i64;
        let limit = window.limit() as i64;
        debug!(offset, limit, search = ?filter.needle(), "register page query");

        let rows = client
            .query(page_sql.as_str(), &[&pattern, &offset, &limit])
            .await?;
        let items = rows
            .iter()
            .map(|row| -> Result<RegisterItem> {
                Ok(RegisterItem {
                    id: row.try_get(0)?,
                    name: row.try_get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((total.max(0) as u64, items))
    }

    async fn fetch(&self, id: &str) -> Result<Option<PlaceNameRow>> {
        let client = self.connect().await?;
        let sql = format!(
            r#"SELECT {} FROM "PLACENAMES" WHERE "ID" = $1"#,
            PLACENAME_COLUMNS
        );
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        row.as_ref().map(row_to_place_name).transpose()
    }

    async fn ping(&self) -> Result<()> {
        let client = self.connect().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}

fn row_to_place_name(row: &Row) -> Result<PlaceNameRow> {
    let text = |i: usize| -> Result<String> {
        Ok(row.try_get::<_, Option<String>>(i)?.unwrap_or_default())
    };
    Ok(PlaceNameRow {
        id: text(0)?,
        name: text(1)?,
        authority: text(2)?,
        auth_id: text(3)?,
        supply_date: row.try_get(4)?,
        feature: text(5)?,
        category: text(6)?,
        group: text(7)?,
        latitude: row.try_get(8)?,
        longitude: row.try_get(9)?,
    })
}
