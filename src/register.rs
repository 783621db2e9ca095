//! Register listings: filtered total plus one page of `(id, name)` pairs.

use tracing::debug;

use crate::error::Result;
use crate::models::{Gazetteer, PageWindow, RegisterItem, RegisterPage, SearchFilter, GAZETTEERS};
use crate::store::PlaceStore;

/// List the PLACENAMES table through a store
pub async fn list_place_names(
    store: &dyn PlaceStore,
    filter: &SearchFilter,
    window: PageWindow,
) -> Result<RegisterPage> {
    let (total, items) = store.register(filter, window).await?;
    debug!(
        "Register page {} ({} per page): {} of {} items",
        window.page,
        window.per_page,
        items.len(),
        total
    );
    Ok(RegisterPage {
        items,
        total,
        page: window.page,
        per_page: window.per_page,
        search: filter.needle().map(str::to_string),
    })
}

/// List the static gazetteer table, ordered by code
pub fn list_gazetteers(filter: &SearchFilter, window: PageWindow) -> RegisterPage {
    let matching: Vec<&Gazetteer> = GAZETTEERS
        .iter()
        .filter(|g| filter.matches(g.code(), g.label))
        .collect();
    let items = matching
        .iter()
        .skip(window.offset() as usize)
        .take(window.limit() as usize)
        .map(|g| RegisterItem {
            id: g.code().to_string(),
            name: g.label.to_string(),
        })
        .collect();
    RegisterPage {
        items,
        total: matching.len() as u64,
        page: window.page,
        per_page: window.per_page,
        search: filter.needle().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageLimits, PlaceNameRow};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn row(id: &str, name: &str, authority: &str, auth_id: &str) -> PlaceNameRow {
        PlaceNameRow {
            id: id.to_string(),
            name: name.to_string(),
            authority: authority.to_string(),
            auth_id: auth_id.to_string(),
            supply_date: None,
            feature: "hill".to_string(),
            category: "Landform".to_string(),
            group: "Physical".to_string(),
            latitude: Some(-31.0),
            longitude: Some(116.0),
        }
    }

    fn fixture() -> MemoryStore {
        MemoryStore::from_rows(vec![
            row("WA12345", "Example Hill", "WA", "12345"),
            row("WA2", "Red Hill", "WA", "2"),
            row("NSW77", "Hillston", "NSW", "77"),
            row("NSW5", "Blue Lake", "NSW", "5"),
            row("VIC1", "Mount Macedon", "VIC", "1"),
            row("QLD3", "Cape York", "QLD", "3"),
        ])
    }

    fn window(page: u32, per_page: u32) -> PageWindow {
        PageWindow::from_params(Some(page), Some(per_page), PageLimits::default()).unwrap()
    }

    #[tokio::test]
    async fn test_search_counts_matches() {
        let store = fixture();
        let page = list_place_names(&store, &SearchFilter::new(Some("hill")), window(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.search.as_deref(), Some("HILL"));
    }

    #[tokio::test]
    async fn test_pages_partition_the_ordered_register() {
        let store = fixture();
        let all = list_place_names(&store, &SearchFilter::none(), window(1, 100))
            .await
            .unwrap();
        let ids: Vec<_> = all.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["NSW5", "NSW77", "QLD3", "VIC1", "WA2", "WA12345"]);

        let mut stitched = Vec::new();
        for p in 1..=3 {
            let page = list_place_names(&store, &SearchFilter::none(), window(p, 2))
                .await
                .unwrap();
            assert!(page.items.len() <= 2);
            assert_eq!(page.total, 6);
            stitched.extend(page.items);
        }
        assert_eq!(stitched, all.items);
    }

    #[tokio::test]
    async fn test_filtered_is_subset_of_unfiltered() {
        let store = fixture();
        let all = list_place_names(&store, &SearchFilter::none(), window(1, 100))
            .await
            .unwrap();
        for search in ["hill", "W", "7", "lake", "nothing-matches"] {
            let filter = SearchFilter::new(Some(search));
            let page = list_place_names(&store, &filter, window(1, 100)).await.unwrap();
            let needle = search.to_uppercase();
            for item in &page.items {
                assert!(all.items.contains(item));
                assert!(
                    item.id.to_uppercase().contains(&needle)
                        || item.name.to_uppercase().contains(&needle)
                );
            }
        }
    }

    /// Counts store calls; each call stands for one connection
    struct CountingStore {
        inner: MemoryStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlaceStore for CountingStore {
        async fn register(
            &self,
            filter: &SearchFilter,
            window: PageWindow,
        ) -> Result<(u64, Vec<RegisterItem>)> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.inner.register(filter, window).await
        }

        async fn fetch(&self, id: &str) -> Result<Option<PlaceNameRow>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.inner.fetch(id).await
        }

        async fn ping(&self) -> Result<()> {
            self.inner.ping().await
        }
    }

    #[tokio::test]
    async fn test_listing_is_one_store_round_trip() {
        let store = CountingStore {
            inner: fixture(),
            calls: AtomicUsize::new(0),
        };
        let page = list_place_names(&store, &SearchFilter::new(Some("hill")), window(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(store.calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let store = fixture();
        let page = list_place_names(&store, &SearchFilter::none(), window(9, 10))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 6);
    }

    #[test]
    fn test_gazetteer_register() {
        let all = list_gazetteers(&SearchFilter::none(), window(1, 50));
        assert_eq!(all.total, 10);
        assert_eq!(all.items[0].id, "AAD");

        let wales = list_gazetteers(&SearchFilter::new(Some("wales")), window(1, 50));
        assert_eq!(wales.total, 1);
        assert_eq!(wales.items[0].id, "NSW");
    }
}
