//! RDF graphs for places, place names, gazetteers and registers.

use sophia_api::graph::{Graph, MutableGraph};
use sophia_api::prefix::Prefix;
use sophia_api::serializer::{QuadSerializer, Stringifier, TripleSerializer};
use sophia_api::term::{BnodeId, SimpleTerm};
use sophia_inmem::graph::LightGraph;
use sophia_iri::{Iri, IriRef};
use sophia_jsonld::serializer::JsonLdSerializer;
use sophia_turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};
use sophia_xml::serializer::RdfXmlSerializer;

use super::RdfFormat;
use crate::config::UriSettings;
use crate::models::{Gazetteer, PlaceNameRecord, RegisterPage, SupplyDate};
use crate::models::gazetteer::GAZETTEER_MODIFIED;
use crate::models::place::PLACE_TYPE_BASE;
use crate::error::{PlacenamesError, Result};

pub mod ns {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub const GEO: &str = "http://www.opengis.net/ont/geosparql#";
    pub const GEOX: &str = "http://linked.data.gov.au/def/geox#";
    pub const SF: &str = "http://www.opengis.net/ont/sf#";
    pub const PNO: &str = "http://linked.data.gov.au/def/placenames/";
    pub const REG: &str = "http://purl.org/linked-data/registry#";
    pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
}

const PREFIXES: [(&str, &str); 11] = [
    ("rdf", ns::RDF),
    ("rdfs", ns::RDFS),
    ("xsd", ns::XSD),
    ("dcterms", ns::DCTERMS),
    ("geo", ns::GEO),
    ("geox", ns::GEOX),
    ("sf", ns::SF),
    ("pno", ns::PNO),
    ("reg", ns::REG),
    ("dcat", ns::DCAT),
    ("ptype", PLACE_TYPE_BASE),
];

fn iri(value: impl Into<String>) -> SimpleTerm<'static> {
    SimpleTerm::Iri(IriRef::new_unchecked(value.into().into()))
}

fn term(namespace: &str, local: &str) -> SimpleTerm<'static> {
    iri(format!("{}{}", namespace, local))
}

fn typed(lexical: impl Into<String>, namespace: &str, local: &str) -> SimpleTerm<'static> {
    let datatype = IriRef::new_unchecked(format!("{}{}", namespace, local).into());
    SimpleTerm::LiteralDatatype(lexical.into().into(), datatype)
}

fn plain(lexical: impl Into<String>) -> SimpleTerm<'static> {
    typed(lexical, ns::XSD, "string")
}

fn bnode(label: &str) -> SimpleTerm<'static> {
    SimpleTerm::BlankNode(BnodeId::new_unchecked(label.to_string().into()))
}

/// An in-memory graph ready to serialize
pub struct RdfDocument {
    graph: LightGraph,
}

impl RdfDocument {
    fn new() -> Self {
        Self {
            graph: LightGraph::new(),
        }
    }

    fn add(&mut self, s: &SimpleTerm<'static>, p: SimpleTerm<'static>, o: SimpleTerm<'static>) -> Result<()> {
        self.graph
            .insert(s, p, o)
            .map_err(|e| PlacenamesError::serialization("graph", e))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.graph.triples().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn graph(&self) -> &LightGraph {
        &self.graph
    }

    pub fn serialize(&self, format: RdfFormat) -> Result<String> {
        match format {
            RdfFormat::Turtle => {
                let prefixes = PREFIXES
                    .iter()
                    .map(|(p, ns)| {
                        (
                            Prefix::new_unchecked(Box::<str>::from(*p)),
                            Iri::new_unchecked(Box::<str>::from(*ns)),
                        )
                    })
                    .collect();
                let config = TurtleConfig::new()
                    .with_pretty(true)
                    .with_own_prefix_map(prefixes);
                let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
                serializer
                    .serialize_graph(&self.graph)
                    .map_err(|e| PlacenamesError::serialization("Turtle", e))?;
                Ok(serializer.as_str().to_string())
            }
            RdfFormat::JsonLd => {
                let mut serializer = JsonLdSerializer::new_stringifier();
                serializer
                    .serialize_dataset(&self.graph.as_dataset())
                    .map_err(|e| PlacenamesError::serialization("JSON-LD", e))?;
                Ok(serializer.as_str().to_string())
            }
            RdfFormat::RdfXml => {
                let mut serializer = RdfXmlSerializer::new_stringifier();
                serializer
                    .serialize_graph(&self.graph)
                    .map_err(|e| PlacenamesError::serialization("RDF/XML", e))?;
                Ok(serializer.as_str().to_string())
            }
        }
    }
}

/// Place view: identifiers, geometries, classifications and the place name
pub fn place_graph(record: &PlaceNameRecord, uris: &UriSettings) -> Result<RdfDocument> {
    let mut doc = RdfDocument::new();
    let me = iri(uris.place(&record.id));
    let place_name = iri(uris.place_name(&record.id));

    doc.add(&me, term(ns::RDF, "type"), term(ns::PNO, "Place"))?;
    doc.add(
        &me,
        term(ns::DCTERMS, "identifier"),
        typed(record.id.clone(), ns::PNO, "ID_GAZ"),
    )?;
    doc.add(
        &me,
        term(ns::DCTERMS, "identifier"),
        typed(record.auth_id.clone(), ns::PNO, "ID_AUTH"),
    )?;

    if let Some(wkt) = record.wkt() {
        let point = bnode("point");
        doc.add(&point, term(ns::RDF, "type"), term(ns::SF, "Point"))?;
        doc.add(&point, term(ns::GEO, "asWKT"), typed(wkt, ns::GEO, "wktLiteral"))?;
        doc.add(&me, term(ns::GEO, "hasGeometry"), point)?;
    }

    if let Some(cell) = &record.cell {
        let dggs = bnode("dggs");
        doc.add(&dggs, term(ns::RDF, "type"), term(ns::GEO, "Geometry"))?;
        doc.add(
            &dggs,
            term(ns::GEOX, "asDGGS"),
            typed(cell.to_string(), ns::GEOX, "dggsLiteral"),
        )?;
        doc.add(&me, term(ns::GEO, "hasGeometry"), dggs)?;
    }

    for classification in [&record.feature, &record.group, &record.category] {
        if classification.label.is_empty() {
            continue;
        }
        doc.add(
            &me,
            term(ns::PNO, "hasPlaceClassification"),
            iri(classification.concept.clone()),
        )?;
    }

    doc.add(&me, term(ns::PNO, "hasPlaceName"), place_name.clone())?;
    doc.add(
        &place_name,
        term(ns::PNO, "wasNamedBy"),
        iri(uris.gazetteer(record.gazetteer.code())),
    )?;
    Ok(doc)
}

/// Place name view: the name itself and who gave it
pub fn place_name_graph(record: &PlaceNameRecord, uris: &UriSettings) -> Result<RdfDocument> {
    let mut doc = RdfDocument::new();
    let me = iri(uris.place_name(&record.id));

    doc.add(&me, term(ns::RDF, "type"), term(ns::PNO, "PlaceName"))?;
    doc.add(&me, term(ns::PNO, "hasName"), plain(record.name.clone()))?;
    doc.add(
        &me,
        term(ns::PNO, "hasNameFormality"),
        term(ns::PNO, "nameFormality/Official"),
    )?;
    doc.add(
        &me,
        term(ns::PNO, "wasNamedBy"),
        iri(uris.gazetteer(record.gazetteer.code())),
    )?;
    doc.add(&me, term(ns::PNO, "isNameOf"), iri(uris.place(&record.id)))?;
    match &record.supply_date {
        Some(SupplyDate::Date(d)) => doc.add(
            &me,
            term(ns::DCTERMS, "modified"),
            typed(d.format("%Y-%m-%d").to_string(), ns::XSD, "date"),
        )?,
        Some(SupplyDate::Text(t)) => doc.add(&me, term(ns::DCTERMS, "modified"), plain(t.clone()))?,
        None => {}
    }
    Ok(doc)
}

pub fn gazetteer_graph(gazetteer: &Gazetteer, uris: &UriSettings) -> Result<RdfDocument> {
    let mut doc = RdfDocument::new();
    let me = iri(uris.gazetteer(gazetteer.code()));

    doc.add(&me, term(ns::RDF, "type"), term(ns::PNO, "Gazetteer"))?;
    doc.add(&me, term(ns::RDFS, "label"), plain(gazetteer.label))?;
    doc.add(&me, term(ns::RDFS, "seeAlso"), iri(gazetteer.catalogue))?;
    doc.add(
        &me,
        term(ns::DCTERMS, "modified"),
        typed(GAZETTEER_MODIFIED, ns::XSD, "dateTime"),
    )?;
    Ok(doc)
}

/// Description of the whole dataset and its three registers
pub fn dataset_graph(uris: &UriSettings) -> Result<RdfDocument> {
    let mut doc = RdfDocument::new();
    let me = iri(uris.dataset.clone());

    doc.add(&me, term(ns::RDF, "type"), term(ns::DCAT, "Dataset"))?;
    doc.add(&me, term(ns::DCTERMS, "title"), plain("Place Names"))?;
    doc.add(
        &me,
        term(ns::DCTERMS, "description"),
        plain("Places, place names and gazetteers from the Australian composite gazetteer"),
    )?;
    for register in [&uris.place, &uris.place_name, &uris.gazetteer] {
        let part = iri(register.clone());
        doc.add(&part, term(ns::RDF, "type"), term(ns::REG, "Register"))?;
        doc.add(&me, term(ns::DCTERMS, "hasPart"), part)?;
    }
    Ok(doc)
}

/// Register description for a listing page
pub struct RegisterMeta<'a> {
    pub uri: &'a str,
    pub label: &'a str,
    pub comment: &'a str,
    pub item_class: &'a str,
}

/// `item_uri` maps an item id to its resource URI
pub fn register_graph(
    meta: &RegisterMeta<'_>,
    page: &RegisterPage,
    item_uri: impl Fn(&str) -> String,
) -> Result<RdfDocument> {
    let mut doc = RdfDocument::new();
    let me = iri(meta.uri);

    doc.add(&me, term(ns::RDF, "type"), term(ns::REG, "Register"))?;
    doc.add(&me, term(ns::RDFS, "label"), plain(meta.label))?;
    doc.add(&me, term(ns::RDFS, "comment"), plain(meta.comment))?;
    doc.add(&me, term(ns::REG, "containedItemClass"), iri(meta.item_class))?;
    for item in &page.items {
        let member = iri(item_uri(&item.id));
        doc.add(&me, term(ns::RDFS, "member"), member.clone())?;
        doc.add(&member, term(ns::RDFS, "label"), plain(item.name.clone()))?;
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlaceNameRow, RegisterItem};
    use crate::projection::Projector;
    use sophia_api::dataset::Dataset;
    use sophia_api::parser::QuadParser;
    use sophia_api::source::{QuadSource, TripleSource};
    use sophia_inmem::dataset::LightDataset;
    use sophia_jsonld::parser::JsonLdParser;
    use sophia_turtle::parser::turtle;

    fn record() -> PlaceNameRecord {
        Projector::default()
            .project(PlaceNameRow {
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
            })
            .unwrap()
    }

    #[test]
    fn test_place_graph_triples() {
        let uris = UriSettings::default();
        let doc = place_graph(&record(), &uris).unwrap();
        let me = iri(uris.place("WA12345"));
        let g = doc.graph();

        assert!(g.contains(&me, term(ns::RDF, "type"), term(ns::PNO, "Place")).unwrap());
        assert!(g
            .contains(
                &me,
                term(ns::DCTERMS, "identifier"),
                typed("WA12345", ns::PNO, "ID_GAZ")
            )
            .unwrap());
        assert!(g
            .contains(
                &me,
                term(ns::PNO, "hasPlaceClassification"),
                term(PLACE_TYPE_BASE, "Landform")
            )
            .unwrap());
        assert!(g
            .contains(
                bnode("point"),
                term(ns::GEO, "asWKT"),
                typed("POINT(-31.95 115.86)", ns::GEO, "wktLiteral")
            )
            .unwrap());
        // type, 2 ids, 2 point, 2 dggs, 2 geometry links, 3 classes, name, named-by
        assert_eq!(doc.len(), 14);
    }

    #[test]
    fn test_turtle_round_trip() {
        let uris = UriSettings::default();
        let doc = place_graph(&record(), &uris).unwrap();
        let ttl = doc.serialize(RdfFormat::Turtle).unwrap();
        assert!(ttl.contains("@prefix pno:"));

        let parsed: LightGraph = turtle::parse_str(&ttl).collect_triples().unwrap();
        assert_eq!(parsed.triples().count(), doc.len());
        assert!(parsed
            .contains(
                iri(uris.place("WA12345")),
                term(ns::PNO, "hasPlaceClassification"),
                term(PLACE_TYPE_BASE, "hill")
            )
            .unwrap());
    }

    #[test]
    fn test_json_ld_round_trip() {
        let uris = UriSettings::default();
        let doc = place_graph(&record(), &uris).unwrap();
        let body = doc.serialize(RdfFormat::JsonLd).unwrap();

        let parsed: LightDataset = JsonLdParser::new()
            .parse_str(&body)
            .collect_quads()
            .unwrap();
        assert_eq!(parsed.quads().count(), doc.len());

        let me = iri(uris.place("WA12345"));
        let default_graph = None::<&SimpleTerm<'static>>;
        let expected = [
            (term(ns::DCTERMS, "identifier"), typed("WA12345", ns::PNO, "ID_GAZ")),
            (term(ns::DCTERMS, "identifier"), typed("12345", ns::PNO, "ID_AUTH")),
            (term(ns::PNO, "hasPlaceClassification"), term(PLACE_TYPE_BASE, "hill")),
            (term(ns::PNO, "hasPlaceClassification"), term(PLACE_TYPE_BASE, "Landform")),
            (term(ns::PNO, "hasPlaceClassification"), term(PLACE_TYPE_BASE, "Physical")),
        ];
        for (p, o) in expected {
            assert!(
                parsed.contains(&me, &p, &o, default_graph).unwrap(),
                "missing {:?} {:?}",
                p,
                o
            );
        }
        // The authority id alone is not an ID_GAZ identifier
        assert!(!parsed
            .contains(
                &me,
                term(ns::DCTERMS, "identifier"),
                typed("12345", ns::PNO, "ID_GAZ"),
                default_graph
            )
            .unwrap());
    }

    #[test]
    fn test_rdf_xml_has_root() {
        let doc = place_name_graph(&record(), &UriSettings::default()).unwrap();
        let xml = doc.serialize(RdfFormat::RdfXml).unwrap();
        assert!(xml.contains("rdf:RDF"));
        assert!(xml.contains("Example Hill"));
    }

    #[test]
    fn test_place_name_graph_links_back_to_place() {
        let uris = UriSettings::default();
        let doc = place_name_graph(&record(), &uris).unwrap();
        let me = iri(uris.place_name("WA12345"));
        assert!(doc
            .graph()
            .contains(&me, term(ns::PNO, "isNameOf"), iri(uris.place("WA12345")))
            .unwrap());
        assert!(doc
            .graph()
            .contains(&me, term(ns::PNO, "wasNamedBy"), iri(uris.gazetteer("WA")))
            .unwrap());
    }

    #[test]
    fn test_dataset_graph_lists_registers() {
        let uris = UriSettings::default();
        let doc = dataset_graph(&uris).unwrap();
        let me = iri(uris.dataset.clone());
        assert!(doc
            .graph()
            .contains(&me, term(ns::RDF, "type"), term(ns::DCAT, "Dataset"))
            .unwrap());
        for register in [&uris.place, &uris.place_name, &uris.gazetteer] {
            assert!(doc
                .graph()
                .contains(&me, term(ns::DCTERMS, "hasPart"), iri(register.clone()))
                .unwrap());
        }
        assert_eq!(doc.len(), 9);
    }

    #[test]
    fn test_register_graph_members() {
        let uris = UriSettings::default();
        let page = RegisterPage {
            items: vec![RegisterItem {
                id: "WA1".into(),
                name: "One".into(),
            }],
            total: 1,
            page: 1,
            per_page: 50,
            search: None,
        };
        let meta = RegisterMeta {
            uri: "http://example.org/placename/",
            label: "Place Names Register",
            comment: "A register of Place Names",
            item_class: "http://linked.data.gov.au/def/placenames/PlaceName",
        };
        let doc = register_graph(&meta, &page, |id| uris.place_name(id)).unwrap();
        assert!(doc
            .graph()
            .contains(
                iri(meta.uri),
                term(ns::RDFS, "member"),
                iri(uris.place_name("WA1"))
            )
            .unwrap());
        assert_eq!(doc.len(), 6);
    }
}
