//! Place name rows and the records projected from them.

use chrono::{NaiveDate, NaiveDateTime};
use geo_types::Point;
use serde::Deserialize;

use super::{Gazetteer, Jurisdiction, NamingAuthority};
use crate::dggs::Cell;

/// Base of the GA place type vocabulary concepts
pub const PLACE_TYPE_BASE: &str = "http://pid.geoscience.gov.au/def/voc/ga/PlaceType/";

/// Vocabulary browser endpoint that resolves a concept URI to a page
pub const VOCAB_BROWSE_BASE: &str =
    "http://vocabs.ands.org.au/repository/api/lda/ga/place-type/v1-0/resource";

/// One row of the PLACENAMES table.
///
/// Fields follow the fixed column order `ID, NAME, AUTHORITY, AUTH_ID,
/// SUPPLY_DATE, FEATURE, CATEGORY, GROUP, LATITUDE, LONGITUDE`; the CSV
/// export uses the same column names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceNameRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "AUTHORITY")]
    pub authority: String,
    #[serde(rename = "AUTH_ID")]
    pub auth_id: String,
    #[serde(rename = "SUPPLY_DATE", default)]
    pub supply_date: Option<String>,
    #[serde(rename = "FEATURE", default)]
    pub feature: String,
    #[serde(rename = "CATEGORY", default)]
    pub category: String,
    #[serde(rename = "GROUP", default)]
    pub group: String,
    #[serde(rename = "LATITUDE", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUDE", default)]
    pub longitude: Option<f64>,
}

/// A feature type, category or group, linked to the place type vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whitespace runs collapsed to underscores, e.g. "Sand_Dune"
    pub label: String,
    /// Concept IRI in the place type vocabulary
    pub concept: String,
    /// Human readable vocabulary page for the concept
    pub browse: String,
}

impl Classification {
    pub fn new(raw: &str) -> Self {
        let label = raw.split_whitespace().collect::<Vec<_>>().join("_");
        let concept = format!("{}{}", PLACE_TYPE_BASE, encode_segment(&label));
        let browse = url::Url::parse_with_params(VOCAB_BROWSE_BASE, [("uri", concept.as_str())])
            .map(String::from)
            .unwrap_or_else(|_| {
                format!("{}?uri={}", VOCAB_BROWSE_BASE, urlencoding::encode(&concept))
            });
        Self {
            label,
            concept,
            browse,
        }
    }
}

/// Percent-encode a label as one path segment; dot segments are encoded too
fn encode_segment(label: &str) -> String {
    match label {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => urlencoding::encode(label).into_owned(),
    }
}

/// The date a row was supplied by its authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyDate {
    Date(NaiveDate),
    /// Anything the known layouts do not match, passed through as text
    Text(String),
}

impl SupplyDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(SupplyDate::Date(d));
        }
        for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
                return Some(SupplyDate::Date(dt.date()));
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
            return Some(SupplyDate::Date(d));
        }
        Some(SupplyDate::Text(raw.to_string()))
    }
}

impl std::fmt::Display for SupplyDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplyDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SupplyDate::Text(s) => f.write_str(s),
        }
    }
}

/// Display/export view of a single place name
#[derive(Debug, Clone)]
pub struct PlaceNameRecord {
    pub id: String,
    pub auth_id: String,
    pub name: String,
    pub jurisdiction: Jurisdiction,
    pub feature: Classification,
    pub category: Classification,
    pub group: Classification,
    /// x = longitude, y = latitude
    pub location: Option<Point<f64>>,
    pub supply_date: Option<SupplyDate>,
    pub authority: &'static NamingAuthority,
    pub gazetteer: &'static Gazetteer,
    pub cell: Option<Cell>,
}

impl PlaceNameRecord {
    /// Name followed by the capitalised feature type, e.g. "Example Hill (Hill)"
    pub fn display_name(&self) -> String {
        let feature = self.feature.label.replace('_', " ");
        if feature.is_empty() {
            return self.name.clone();
        }
        let mut chars = feature.chars();
        let capitalised: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        };
        format!("{} ({})", self.name, capitalised)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|p| p.y())
    }

    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|p| p.x())
    }

    /// WKT literal with latitude first, as published by the gazetteer
    pub fn wkt(&self) -> Option<String> {
        self.location
            .map(|p| format!("POINT({} {})", p.y(), p.x()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_underscores() {
        let c = Classification::new("Sand  Dune");
        assert_eq!(c.label, "Sand_Dune");
        assert_eq!(c.concept, format!("{}Sand_Dune", PLACE_TYPE_BASE));
        assert!(c.browse.starts_with(VOCAB_BROWSE_BASE));
        assert!(c.browse.contains("PlaceType%2FSand_Dune"));
    }

    #[test]
    fn test_classification_percent_encodes_illegal_chars() {
        let c = Classification::new("Bay\"s");
        assert!(c.concept.ends_with("/PlaceType/Bay%22s"));
    }

    #[test]
    fn test_classification_stays_under_place_type_base() {
        for (raw, encoded) in [
            ("../Gazetteer", "..%2FGazetteer"),
            ("Rock Hole #2", "Rock_Hole_%232"),
            ("What?", "What%3F"),
            ("100%", "100%25"),
        ] {
            let c = Classification::new(raw);
            assert_eq!(c.concept, format!("{}{}", PLACE_TYPE_BASE, encoded), "{}", raw);
            let parsed = url::Url::parse(&c.concept).unwrap();
            assert!(parsed.as_str().starts_with(PLACE_TYPE_BASE), "{}", raw);
            assert!(parsed.fragment().is_none() && parsed.query().is_none(), "{}", raw);
        }
        assert_eq!(
            Classification::new("..").concept,
            format!("{}%2E%2E", PLACE_TYPE_BASE)
        );
    }

    #[test]
    fn test_supply_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2018, 3, 14).unwrap();
        assert_eq!(SupplyDate::parse("2018-03-14"), Some(SupplyDate::Date(expected)));
        assert_eq!(
            SupplyDate::parse("2018-03-14 09:30:00.5"),
            Some(SupplyDate::Date(expected))
        );
        assert_eq!(SupplyDate::parse("14/03/2018"), Some(SupplyDate::Date(expected)));
        assert_eq!(
            SupplyDate::parse("March 2018"),
            Some(SupplyDate::Text("March 2018".into()))
        );
        assert_eq!(SupplyDate::parse("  "), None);
    }
}
