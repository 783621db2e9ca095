//! Server-rendered HTML pages.

use std::fmt::Write;

use super::Representation;
use crate::config::UriSettings;
use crate::models::{Gazetteer, NamingAuthority, PlaceNameRecord, RegisterPage};

/// Escape text for element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2em auto; max-width: 60em; }}
th {{ text-align: left; padding-right: 1em; vertical-align: top; }}
nav a {{ margin-right: 1em; }}
</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/place/">Places</a><a href="/placename/">Place Names</a><a href="/gazetteer/">Gazetteers</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

pub fn home_page() -> String {
    let body = format!(
        "<p>Linked data for the Australian place names gazetteers.</p>\n<ul>\n<li>{}</li>\n<li>{}</li>\n<li>{}</li>\n</ul>\n<p>{}</p>\n",
        link("/place/", "Places register"),
        link("/placename/", "Place Names register"),
        link("/gazetteer/", "Gazetteers register"),
        link("/index.ttl", "Dataset description (Turtle)"),
    );
    layout("Place Names", &body)
}

/// Query string for a register page, keeping the active search
pub fn register_query(page: u64, per_page: u32, search: Option<&str>) -> String {
    let mut query = format!("?page={}&per_page={}", page, per_page);
    if let Some(search) = search {
        let _ = write!(query, "&search={}", urlencoding::encode(search));
    }
    query
}

/// A register listing; `path` is the register route, e.g. `/placename/`
pub fn register_page(
    title: &str,
    description: &str,
    path: &str,
    page: &RegisterPage,
    last_page: u64,
) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<p>{}</p>", escape(description));
    let _ = writeln!(
        body,
        "<form method=\"get\" action=\"{}\"><input type=\"text\" name=\"search\" value=\"{}\"> <input type=\"submit\" value=\"Search\"></form>",
        escape(path),
        escape(page.search.as_deref().unwrap_or(""))
    );
    let _ = writeln!(
        body,
        "<p>{} items, page {} of {}</p>",
        page.total, page.page, last_page
    );

    body.push_str("<ul>\n");
    for item in &page.items {
        let href = format!("{}{}", path, urlencoding::encode(&item.id));
        let _ = writeln!(
            body,
            "<li>{} {}</li>",
            link(&href, &item.id),
            escape(&item.name)
        );
    }
    body.push_str("</ul>\n");

    let search = page.search.as_deref();
    let current = page.page as u64;
    let mut paging = Vec::new();
    paging.push(link(&format!("{}{}", path, register_query(1, page.per_page, search)), "First"));
    if current > 1 {
        paging.push(link(
            &format!("{}{}", path, register_query(current - 1, page.per_page, search)),
            "Previous",
        ));
    }
    if page.has_next() {
        paging.push(link(
            &format!("{}{}", path, register_query(current + 1, page.per_page, search)),
            "Next",
        ));
    }
    paging.push(link(
        &format!("{}{}", path, register_query(last_page, page.per_page, search)),
        "Last",
    ));
    let _ = writeln!(body, "<p class=\"paging\">{}</p>", paging.join(" | "));
    let _ = writeln!(
        body,
        "<p>{}</p>",
        link(&format!("{}?_view=alternates", path), "Other formats")
    );

    layout(title, &body)
}

fn row(label: &str, value: &str) -> String {
    format!("<tr><th>{}</th><td>{}</td></tr>\n", escape(label), value)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn place_page(record: &PlaceNameRecord, uris: &UriSettings) -> String {
    let mut table = String::from("<table>\n");
    table.push_str(&row("URI", &escape(&uris.place(&record.id))));
    table.push_str(&row("Name", &escape(&record.display_name())));
    table.push_str(&row("Identifier", &escape(&record.id)));
    table.push_str(&row("Authority identifier", &escape(&record.auth_id)));
    table.push_str(&row(
        "Place name",
        &link(&format!("/placename/{}", record.id), &record.name),
    ));
    for (label, classification) in [
        ("Feature type", &record.feature),
        ("Category", &record.category),
        ("Group", &record.group),
    ] {
        table.push_str(&row(label, &link(&classification.browse, &classification.label)));
    }
    table.push_str(&row("Latitude", &optional_number(record.latitude())));
    table.push_str(&row("Longitude", &optional_number(record.longitude())));
    if let Some(wkt) = record.wkt() {
        table.push_str(&row("WKT", &escape(&wkt)));
    }
    if let Some(cell) = &record.cell {
        table.push_str(&row("DGGS cell", &link(&cell.uri(), &cell.to_string())));
    }
    table.push_str(&row(
        "Naming authority",
        &link(record.authority.web, record.authority.label),
    ));
    table.push_str(&row(
        "Gazetteer",
        &link(&format!("/gazetteer/{}", record.gazetteer.code()), record.gazetteer.label),
    ));
    if let Some(date) = &record.supply_date {
        table.push_str(&row("Supply date", &escape(&date.to_string())));
    }
    table.push_str("</table>\n");

    if let (Some(lat), Some(lon)) = (record.latitude(), record.longitude()) {
        let href = format!(
            "/map?name={}&x={}&y={}",
            urlencoding::encode(&record.name),
            lon,
            lat
        );
        let _ = writeln!(table, "<p>{}</p>", link(&href, "Show on map"));
    }
    let _ = writeln!(
        table,
        "<p>{}</p>",
        link(&format!("/place/{}?_view=alternates", record.id), "Other formats")
    );
    layout(&record.display_name(), &table)
}

pub fn place_name_page(record: &PlaceNameRecord, uris: &UriSettings) -> String {
    let mut table = String::from("<table>\n");
    table.push_str(&row("URI", &escape(&uris.place_name(&record.id))));
    table.push_str(&row("Name", &escape(&record.name)));
    table.push_str(&row("Name formality", "Official"));
    table.push_str(&row(
        "Named place",
        &link(&format!("/place/{}", record.id), &record.display_name()),
    ));
    table.push_str(&row(
        "Named by",
        &link(&format!("/gazetteer/{}", record.gazetteer.code()), record.gazetteer.label),
    ));
    if let Some(date) = &record.supply_date {
        table.push_str(&row("Supply date", &escape(&date.to_string())));
    }
    table.push_str("</table>\n");
    let _ = writeln!(
        table,
        "<p>{}</p>",
        link(&format!("/placename/{}?_view=alternates", record.id), "Other formats")
    );
    layout(&record.name, &table)
}

pub fn gazetteer_page(gazetteer: &Gazetteer, uris: &UriSettings) -> String {
    let mut table = String::from("<table>\n");
    table.push_str(&row("URI", &escape(&uris.gazetteer(gazetteer.code()))));
    table.push_str(&row("Code", gazetteer.code()));
    table.push_str(&row("Catalogue", &link(gazetteer.catalogue, gazetteer.catalogue)));
    if let Some(authority) = NamingAuthority::for_jurisdiction(gazetteer.jurisdiction) {
        table.push_str(&row("Naming authority", &link(authority.web, authority.label)));
    }
    table.push_str("</table>\n");
    layout(gazetteer.label, &table)
}

/// Lists every representation of the resource at `path`
pub fn alternates_page(title: &str, path: &str) -> String {
    let mut body = String::from("<table>\n<tr><th>Format</th><th>Media type</th></tr>\n");
    let separator = if path.contains('?') { '&' } else { '?' };
    for representation in Representation::ALL {
        let href = format!(
            "{}{}_format={}",
            path,
            separator,
            urlencoding::encode(representation.media_type())
        );
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            link(&href, representation.label()),
            representation.media_type()
        );
    }
    body.push_str("</table>\n");
    layout(&format!("Alternate views of {}", title), &body)
}

pub fn not_found_page(id: &str) -> String {
    layout(
        "Not found",
        &format!("<p>No resource with identifier <code>{}</code> exists.</p>\n", escape(id)),
    )
}
