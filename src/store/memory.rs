use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::info;

use super::PlaceStore;
use crate::error::Result;
use crate::models::{natural_key, PageWindow, PlaceNameRow, RegisterItem, SearchFilter};

/// Read-only in-memory table, kept in register order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<PlaceNameRow>,
}

impl MemoryStore {
    pub fn from_rows(mut rows: Vec<PlaceNameRow>) -> Self {
        rows.sort_by_cached_key(|r| natural_key(&r.authority, &r.auth_id));
        Self { rows }
    }

    /// Load a CSV export of the PLACENAMES table (header row required)
    pub fn from_csv_path(path: &Path) -> AnyResult<Self> {
        info!("Loading place names from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open place names file {}", path.display()))?;
        let store = Self::from_csv_reader(file)?;
        info!("Loaded {} place names", store.len());
        Ok(store)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> AnyResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, result) in csv_reader.deserialize::<PlaceNameRow>().enumerate() {
            let row = result.with_context(|| format!("Malformed place name record {}", line + 1))?;
            rows.push(row);
        }
        Ok(Self::from_rows(rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn filtered<'a>(&'a self, filter: &'a SearchFilter) -> impl Iterator<Item = &'a PlaceNameRow> + 'a {
        self.rows.iter().filter(move |r| filter.matches(&r.id, &r.name))
    }
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn register(
        &self,
        filter: &SearchFilter,
        window: PageWindow,
    ) -> Result<(u64, Vec<RegisterItem>)> {
        let total = self.filtered(filter).count() as u64;
        let items = self
            .filtered(filter)
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .map(|r| RegisterItem {
                id: r.id.clone(),
                name: r.name.clone(),
            })
            .collect();
        Ok((total, items))
    }

    async fn fetch(&self, id: &str) -> Result<Option<PlaceNameRow>> {
        Ok(self.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageLimits;

    const CSV: &str = "\
ID,NAME,AUTHORITY,AUTH_ID,SUPPLY_DATE,FEATURE,CATEGORY,GROUP,LATITUDE,LONGITUDE
WA10,Ten Hill,WA,10,2018-03-14,hill,Landform,Physical,-31.9,115.8
WA9,Nine Creek,WA,9,,creek,Watercourse,Hydrographic,,
NSW2,Two Bay,NSW,2,2017-01-01,bay,Water Body,Hydrographic,-33.8,151.2
";

    fn window(page: u32, per_page: u32) -> PageWindow {
        PageWindow::from_params(Some(page), Some(per_page), PageLimits::default()).unwrap()
    }

    #[test]
    fn test_csv_loads_in_register_order() {
        let store = MemoryStore::from_csv_reader(CSV.as_bytes()).unwrap();
        let ids: Vec<_> = store.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["NSW2", "WA9", "WA10"]);
        let nine = &store.rows[1];
        assert_eq!(nine.latitude, None);
        assert_eq!(nine.supply_date, None);
    }

    #[test]
    fn test_csv_rejects_bad_coordinates() {
        let bad = "ID,NAME,AUTHORITY,AUTH_ID,SUPPLY_DATE,FEATURE,CATEGORY,GROUP,LATITUDE,LONGITUDE\n\
                   WA1,X,WA,1,,hill,Landform,Physical,north,115\n";
        assert!(MemoryStore::from_csv_reader(bad.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn test_filter_and_window() {
        let store = MemoryStore::from_csv_reader(CSV.as_bytes()).unwrap();
        let hill = SearchFilter::new(Some("hill"));
        let (total, items) = store.register(&hill, window(1, 10)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id, "WA10");

        let all = SearchFilter::none();
        let (total, second) = store.register(&all, window(2, 2)).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, "WA10");
    }

    #[tokio::test]
    async fn test_fetch() {
        let store = MemoryStore::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(store.fetch("WA9").await.unwrap().unwrap().name, "Nine Creek");
        assert!(store.fetch("ZZ00000").await.unwrap().is_none());
    }
}
