use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Json, Response},
};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ApiError, AppState};
use crate::error::PlacenamesError;
use crate::models::{Gazetteer, PageWindow, RegisterPage, SearchFilter};
use crate::register::{list_gazetteers, list_place_names};
use crate::render::rdf::{self, RegisterMeta};
use crate::render::{html, map::map_page, Representation, View};

/// Format and view selection shared by every resource route
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    #[serde(rename = "_format")]
    format: Option<String>,
    #[serde(rename = "_view")]
    view: Option<String>,
    #[serde(rename = "_profile")]
    profile: Option<String>,
}

impl ViewParams {
    fn representation(&self, headers: &HeaderMap) -> Representation {
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());
        Representation::negotiate(accept, self.format.as_deref())
    }

    fn view(&self) -> View {
        View::from_params(self.view.as_deref(), self.profile.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterParams {
    search: Option<String>,
    // Kept as text so malformed numbers become a 400 with our own message
    page: Option<String>,
    per_page: Option<String>,
    #[serde(flatten)]
    view: ViewParams,
}

#[derive(Debug, Deserialize)]
pub struct MapParams {
    name: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: bool,
}

#[derive(Debug, Clone, Copy)]
enum RegisterKind {
    Place,
    PlaceName,
    Gazetteer,
}

impl RegisterKind {
    fn path(&self) -> &'static str {
        match self {
            RegisterKind::Place => "/place/",
            RegisterKind::PlaceName => "/placename/",
            RegisterKind::Gazetteer => "/gazetteer/",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RegisterKind::Place => "Places Register",
            RegisterKind::PlaceName => "Place Names Register",
            RegisterKind::Gazetteer => "Gazetteers Register",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            RegisterKind::Place => "Register of all places in the Australian gazetteers",
            RegisterKind::PlaceName => "Register of all official names of Australian places",
            RegisterKind::Gazetteer => "Register of the gazetteers contributing place names",
        }
    }

    fn item_class(&self) -> &'static str {
        match self {
            RegisterKind::Place => "http://linked.data.gov.au/def/placenames/Place",
            RegisterKind::PlaceName => "http://linked.data.gov.au/def/placenames/PlaceName",
            RegisterKind::Gazetteer => "http://linked.data.gov.au/def/placenames/Gazetteer",
        }
    }

    fn base_uri<'a>(&self, state: &'a AppState) -> &'a str {
        match self {
            RegisterKind::Place => &state.uris.place,
            RegisterKind::PlaceName => &state.uris.place_name,
            RegisterKind::Gazetteer => &state.uris.gazetteer,
        }
    }
}

fn respond(representation: Representation, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, representation.content_type()),
            (header::VARY, "Accept"),
        ],
        body,
    )
        .into_response()
}

/// Render an RDF document, or hand back the HTML page
fn render(
    representation: Representation,
    html_page: impl FnOnce() -> String,
    graph: impl FnOnce() -> crate::error::Result<rdf::RdfDocument>,
) -> Result<Response, ApiError> {
    let body = match representation.rdf_format() {
        None => html_page(),
        Some(format) => graph()
            .and_then(|doc| doc.serialize(format))
            .map_err(|e| ApiError::new(e, representation))?,
    };
    Ok(respond(representation, body))
}

fn parse_count(name: &str, value: Option<&str>) -> Result<Option<u32>, PlacenamesError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            PlacenamesError::BadRequest(format!("{} must be a positive integer", name))
        }),
    }
}

/// RFC 8288 paging links for a register page
fn link_header(path: &str, page: &RegisterPage, last_page: u64) -> Option<HeaderValue> {
    let search = page.search.as_deref();
    let target = |n: u64, rel: &str| {
        format!(
            "<{}{}>; rel=\"{}\"",
            path,
            html::register_query(n, page.per_page, search),
            rel
        )
    };
    let current = page.page as u64;
    let mut links = vec![target(1, "first")];
    if current > 1 {
        links.push(target(current - 1, "prev"));
    }
    if page.has_next() {
        links.push(target(current + 1, "next"));
    }
    links.push(target(last_page, "last"));
    HeaderValue::from_str(&links.join(", ")).ok()
}

pub async fn home() -> Html<String> {
    Html(html::home_page())
}

/// Dataset description, always Turtle
pub async fn dataset(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    render(Representation::Turtle, String::new, || {
        rdf::dataset_graph(&state.uris)
    })
}

/// Liveness plus data store reachability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check could not reach the data store: {}", e);
            false
        }
    };
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}

pub async fn place_register(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegisterParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    register(&state, RegisterKind::Place, params, &headers).await
}

pub async fn place_name_register(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegisterParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    register(&state, RegisterKind::PlaceName, params, &headers).await
}

pub async fn gazetteer_register(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegisterParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    register(&state, RegisterKind::Gazetteer, params, &headers).await
}

async fn register(
    state: &AppState,
    kind: RegisterKind,
    params: RegisterParams,
    headers: &HeaderMap,
) -> Result<Response, ApiError> {
    let representation = params.view.representation(headers);
    if params.view.view() == View::Alternates {
        return Ok(respond(
            Representation::Html,
            html::alternates_page(kind.label(), kind.path()),
        ));
    }
    let fail = |e| ApiError::new(e, representation);

    let window = PageWindow::from_params(
        parse_count("page", params.page.as_deref()).map_err(fail)?,
        parse_count("per_page", params.per_page.as_deref()).map_err(fail)?,
        state.limits,
    )
    .map_err(fail)?;
    let filter = SearchFilter::new(params.search.as_deref());
    debug!(?kind, page = window.page, per_page = window.per_page, "register request");

    let page = match kind {
        RegisterKind::Gazetteer => list_gazetteers(&filter, window),
        _ => list_place_names(state.store.as_ref(), &filter, window)
            .await
            .map_err(fail)?,
    };
    let last_page = window.last_page(page.total);

    let meta = RegisterMeta {
        uri: kind.base_uri(state),
        label: kind.label(),
        comment: kind.comment(),
        item_class: kind.item_class(),
    };
    let mut response = render(
        representation,
        || html::register_page(kind.label(), kind.comment(), kind.path(), &page, last_page),
        || {
            rdf::register_graph(&meta, &page, |id| match kind {
                RegisterKind::Place => state.uris.place(id),
                RegisterKind::PlaceName => state.uris.place_name(id),
                RegisterKind::Gazetteer => state.uris.gazetteer(id),
            })
        },
    )?;
    if let Some(links) = link_header(kind.path(), &page, last_page) {
        response.headers_mut().insert(header::LINK, links);
    }
    Ok(response)
}

pub async fn place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let representation = params.representation(&headers);
    if params.view() == View::Alternates {
        return Ok(respond(
            Representation::Html,
            html::alternates_page(&id, &format!("/place/{}", id)),
        ));
    }
    let record = state
        .projector
        .load(state.store.as_ref(), &id)
        .await
        .map_err(|e| ApiError::new(e, representation))?;
    render(
        representation,
        || html::place_page(&record, &state.uris),
        || rdf::place_graph(&record, &state.uris),
    )
}

pub async fn place_name(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let representation = params.representation(&headers);
    if params.view() == View::Alternates {
        return Ok(respond(
            Representation::Html,
            html::alternates_page(&id, &format!("/placename/{}", id)),
        ));
    }
    let record = state
        .projector
        .load(state.store.as_ref(), &id)
        .await
        .map_err(|e| ApiError::new(e, representation))?;
    render(
        representation,
        || html::place_name_page(&record, &state.uris),
        || rdf::place_name_graph(&record, &state.uris),
    )
}

pub async fn gazetteer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let representation = params.representation(&headers);
    if params.view() == View::Alternates {
        return Ok(respond(
            Representation::Html,
            html::alternates_page(&id, &format!("/gazetteer/{}", id)),
        ));
    }
    let gazetteer = Gazetteer::lookup(&id)
        .ok_or_else(|| ApiError::new(PlacenamesError::NotFound(id.clone()), representation))?;
    render(
        representation,
        || html::gazetteer_page(gazetteer, &state.uris),
        || rdf::gazetteer_graph(gazetteer, &state.uris),
    )
}

fn parse_coordinate(name: &str, value: Option<&str>) -> Result<f64, PlacenamesError> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| PlacenamesError::BadRequest(format!("{} must be a number", name)))
}

pub async fn map(Query(params): Query<MapParams>) -> Result<Html<String>, ApiError> {
    let x = parse_coordinate("x", params.x.as_deref())?;
    let y = parse_coordinate("y", params.y.as_deref())?;
    let name = params.name.unwrap_or_default();
    Ok(Html(map_page(&name, Point::new(x, y))))
}
