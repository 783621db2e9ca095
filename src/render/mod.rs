//! Output formats: HTML pages, RDF serializations and the map page.

pub mod html;
pub mod map;
pub mod rdf;

/// The response representations the service can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Html,
    Turtle,
    JsonLd,
    RdfXml,
}

/// The RDF subset of [`Representation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    JsonLd,
    RdfXml,
}

impl Representation {
    pub const ALL: [Representation; 4] = [
        Representation::Html,
        Representation::Turtle,
        Representation::JsonLd,
        Representation::RdfXml,
    ];

    pub fn content_type(&self) -> &'static str {
        match self {
            Representation::Html => "text/html; charset=utf-8",
            Representation::Turtle => "text/turtle; charset=utf-8",
            Representation::JsonLd => "application/ld+json",
            Representation::RdfXml => "application/rdf+xml",
        }
    }

    /// Bare media type, as accepted in `_format`
    pub fn media_type(&self) -> &'static str {
        match self {
            Representation::Html => "text/html",
            Representation::Turtle => "text/turtle",
            Representation::JsonLd => "application/ld+json",
            Representation::RdfXml => "application/rdf+xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Representation::Html => "HTML",
            Representation::Turtle => "Turtle",
            Representation::JsonLd => "JSON-LD",
            Representation::RdfXml => "RDF/XML",
        }
    }

    pub fn rdf_format(&self) -> Option<RdfFormat> {
        match self {
            Representation::Html => None,
            Representation::Turtle => Some(RdfFormat::Turtle),
            Representation::JsonLd => Some(RdfFormat::JsonLd),
            Representation::RdfXml => Some(RdfFormat::RdfXml),
        }
    }

    /// Match a media type or short name
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "text/html" | "application/xhtml+xml" | "html" | "text/*" | "*/*" => {
                Some(Representation::Html)
            }
            "text/turtle" | "application/x-turtle" | "turtle" | "ttl" => Some(Representation::Turtle),
            "application/ld+json" | "application/json" | "json-ld" | "jsonld" | "json" => {
                Some(Representation::JsonLd)
            }
            "application/rdf+xml" | "application/xml" | "text/xml" | "rdf" | "xml" | "rdfxml" => {
                Some(Representation::RdfXml)
            }
            _ => None,
        }
    }

    /// `_format` wins over `Accept`; anything unrecognised falls back to HTML
    pub fn negotiate(accept: Option<&str>, format: Option<&str>) -> Self {
        if let Some(format) = format.filter(|f| !f.trim().is_empty()) {
            return Self::from_token(format).unwrap_or(Representation::Html);
        }
        accept
            .and_then(best_accepted)
            .unwrap_or(Representation::Html)
    }
}

/// Highest q-value wins, earlier entries win ties
fn best_accepted(accept: &str) -> Option<Representation> {
    let mut candidates: Vec<(f32, Representation)> = accept
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let representation = Representation::from_token(parts.next()?)?;
            let q = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (q > 0.0).then_some((q, representation))
        })
        .collect();
    // sort_by is stable, so ties keep header order
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    candidates.first().map(|(_, r)| *r)
}

/// Which view of a resource was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Default,
    Alternates,
}

impl View {
    pub fn from_params(view: Option<&str>, profile: Option<&str>) -> Self {
        if view == Some("alternates") || profile == Some("alt") {
            View::Alternates
        } else {
            View::Default
        }
    }
}
