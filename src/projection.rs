//! Resource projection: one PLACENAMES row into a display/export record.

use geo_types::Point;
use tracing::debug;

use crate::dggs::RHealpixDggs;
use crate::error::{PlacenamesError, Result};
use crate::models::{
    Classification, Gazetteer, Jurisdiction, NamingAuthority, PlaceNameRecord, PlaceNameRow,
    SupplyDate,
};
use crate::store::PlaceStore;

/// Grid used to derive cells for records
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    dggs: RHealpixDggs,
    resolution: usize,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(RHealpixDggs::default(), 9)
    }
}

impl Projector {
    pub fn new(dggs: RHealpixDggs, resolution: usize) -> Self {
        Self { dggs, resolution }
    }

    /// Fetch and project the record for `id`
    pub async fn load(&self, store: &dyn PlaceStore, id: &str) -> Result<PlaceNameRecord> {
        let row = store
            .fetch(id)
            .await?
            .ok_or_else(|| PlacenamesError::NotFound(id.to_string()))?;
        self.project(row)
    }

    /// Derive classification, authority, gazetteer and cell for a row
    pub fn project(&self, row: PlaceNameRow) -> Result<PlaceNameRecord> {
        let jurisdiction: Jurisdiction = row.authority.parse().map_err(|e| match e {
            PlacenamesError::Configuration(cause) => {
                PlacenamesError::Configuration(format!("place name {}: {}", row.id, cause))
            }
            other => other,
        })?;
        let authority = NamingAuthority::for_jurisdiction(jurisdiction).ok_or_else(|| {
            PlacenamesError::Configuration(format!("no naming authority for {}", jurisdiction))
        })?;
        let gazetteer = Gazetteer::for_jurisdiction(jurisdiction).ok_or_else(|| {
            PlacenamesError::Configuration(format!("no gazetteer for {}", jurisdiction))
        })?;

        let location = match (row.longitude, row.latitude) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Some(Point::new(lon, lat)),
            _ => None,
        };
        let cell = location.and_then(|p| self.dggs.cell_from_point(self.resolution, p.x(), p.y()));
        debug!("Projected {} with cell {:?}", row.id, cell.as_ref().map(|c| c.to_string()));

        Ok(PlaceNameRecord {
            auth_id: if row.auth_id.is_empty() {
                within_authority_id(&row.id, jurisdiction)
            } else {
                row.auth_id
            },
            id: row.id,
            name: row.name,
            jurisdiction,
            feature: Classification::new(&row.feature),
            category: Classification::new(&row.category),
            group: Classification::new(&row.group),
            location,
            supply_date: row.supply_date.as_deref().and_then(SupplyDate::parse),
            authority,
            gazetteer,
            cell,
        })
    }
}

/// `WA12345` -> `12345` when the AUTH_ID column is empty
fn within_authority_id(id: &str, jurisdiction: Jurisdiction) -> String {
    id.strip_prefix(jurisdiction.code())
        .unwrap_or(id)
        .trim_start_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::PLACE_TYPE_BASE;
    use crate::store::MemoryStore;

    fn example_row() -> PlaceNameRow {
        PlaceNameRow {
            id: "WA12345".to_string(),
            name: "Example Hill".to_string(),
            authority: "WA".to_string(),
            auth_id: "12345".to_string(),
            supply_date: Some("2018-03-14".to_string()),
            feature: "hill".to_string(),
            category: "Landform".to_string(),
            group: "Physical".to_string(),
            latitude: Some(-31.95),
            longitude: Some(115.86),
        }
    }

    #[test]
    fn test_example_hill_projection() {
        let record = Projector::default().project(example_row()).unwrap();
        assert!(record.feature.concept.ends_with("/PlaceType/hill"));
        assert!(record.category.concept.ends_with("/PlaceType/Landform"));
        assert_eq!(record.group.concept, format!("{}Physical", PLACE_TYPE_BASE));
        assert_eq!(record.jurisdiction, Jurisdiction::Wa);
        assert_eq!(record.authority.label, "Western Australian Government");
        assert_eq!(record.gazetteer.label, "Western Australian Place Names Gazetteer");
        assert_eq!(record.display_name(), "Example Hill (Hill)");
        assert_eq!(record.wkt().unwrap(), "POINT(-31.95 115.86)");
        let cell = record.cell.unwrap();
        assert_eq!(cell.resolution(), 9);
        assert_eq!(cell.region(), 'R');
    }

    #[test]
    fn test_missing_coordinates_have_no_cell() {
        let mut row = example_row();
        row.latitude = None;
        let record = Projector::default().project(row).unwrap();
        assert!(record.location.is_none());
        assert!(record.cell.is_none());
        assert!(record.wkt().is_none());
    }

    #[test]
    fn test_unknown_authority_fails_the_record_only() {
        let mut row = example_row();
        row.authority = "ZZ".to_string();
        let err = Projector::default().project(row).unwrap_err();
        assert!(matches!(err, PlacenamesError::Configuration(ref cause) if cause.contains("WA12345")));
    }

    #[test]
    fn test_auth_id_falls_back_to_identifier_suffix() {
        let mut row = example_row();
        row.auth_id = String::new();
        let record = Projector::default().project(row).unwrap();
        assert_eq!(record.auth_id, "12345");
    }

    #[tokio::test]
    async fn test_load_not_found() {
        let store = MemoryStore::from_rows(vec![example_row()]);
        let err = Projector::default().load(&store, "ZZ00000").await.unwrap_err();
        assert!(matches!(err, PlacenamesError::NotFound(ref id) if id == "ZZ00000"));

        let found = Projector::default().load(&store, "WA12345").await.unwrap();
        assert_eq!(found.name, "Example Hill");
    }
}
