//! Single-marker Leaflet map page.

use geo_types::Point;

use super::html::escape;

const ZOOM: u8 = 10;

/// Map centred on `location` (x = longitude, y = latitude)
pub fn map_page(name: &str, location: Point<f64>) -> String {
    let name_html = escape(name);
    // The popup is set from a JS string, so JSON-encode the escaped HTML
    let popup = serde_json::to_string(&name_html).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name_html}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
    attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
L.marker([{lat}, {lon}])
    .bindPopup({popup})
    .bindTooltip('Click for more information')
    .addTo(map);
</script>
</body>
</html>
"#,
        name_html = name_html,
        lat = location.y(),
        lon = location.x(),
        zoom = ZOOM,
        popup = popup,
    )
}
