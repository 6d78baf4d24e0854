use crate::core::TiledServiceRecord;
use serde::Serialize;

pub const BANNER_WIDTH: usize = 40;
pub const REPORT_TITLE: &str = "ArcGIS Online Tile Servers";
pub const EMPTY_REPORT_MESSAGE: &str =
    "No tile servers (MapServer with singleFusedMapCache=true) were found.";

/// Stable sort by name; equal names keep discovery order.
pub fn sort_records(records: &mut [TiledServiceRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

fn zoom_literal(zoom: Option<i64>) -> String {
    zoom.map(|z| z.to_string())
        .unwrap_or_else(|| "null".to_string())
}

pub fn format_record_line(record: &TiledServiceRecord) -> String {
    format!(
        "new TileServerInfo(\"{}\", {}, {}), // Esri - {}",
        record.tile_url_template(),
        zoom_literal(record.min_zoom),
        zoom_literal(record.max_zoom),
        record.display_name()
    )
}

pub fn render_text_report(records: &[TiledServiceRecord]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        String::new(),
        banner.clone(),
        format!("       {}", REPORT_TITLE),
        banner.clone(),
    ];

    if records.is_empty() {
        lines.push(EMPTY_REPORT_MESSAGE.to_string());
    } else {
        let mut sorted = records.to_vec();
        sort_records(&mut sorted);
        lines.extend(sorted.iter().map(format_record_line));
    }

    lines.push(banner);
    lines.join("\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportEntry<'a> {
    #[serde(flatten)]
    record: &'a TiledServiceRecord,
    tile_url: String,
}

pub fn render_json_report(records: &[TiledServiceRecord]) -> serde_json::Result<String> {
    let mut sorted = records.to_vec();
    sort_records(&mut sorted);

    let entries: Vec<JsonReportEntry> = sorted
        .iter()
        .map(|record| JsonReportEntry {
            record,
            tile_url: record.tile_url_template(),
        })
        .collect();

    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, min: Option<i64>, max: Option<i64>, url: &str) -> TiledServiceRecord {
        TiledServiceRecord {
            name: name.to_string(),
            min_zoom: min,
            max_zoom: max,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_sort_is_stable_by_name() {
        let mut records = vec![
            record("World_Topo_Map", Some(0), Some(23), "https://a/1"),
            record("Ocean_Base", Some(0), Some(16), "https://a/2"),
            record("World_Topo_Map", Some(0), Some(19), "https://a/3"),
            record("NatGeo_World_Map", Some(0), Some(16), "https://a/4"),
        ];

        sort_records(&mut records);

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a/4", "https://a/2", "https://a/1", "https://a/3"]);
    }

    #[test]
    fn test_format_record_line() {
        let line = format_record_line(&record(
            "World_Imagery",
            Some(0),
            Some(23),
            "https://server.arcgisonline.com/arcgis/rest/services/World_Imagery/MapServer",
        ));
        assert_eq!(
            line,
            "new TileServerInfo(\"https://server.arcgisonline.com/arcgis/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}\", 0, 23), // Esri - World Imagery"
        );
    }

    #[test]
    fn test_format_record_line_without_zoom() {
        let line = format_record_line(&record("Hillshade", None, None, "https://a/Hillshade/MapServer"));
        assert_eq!(
            line,
            "new TileServerInfo(\"https://a/Hillshade/MapServer/tile/{z}/{y}/{x}\", null, null), // Esri - Hillshade"
        );
    }

    #[test]
    fn test_render_text_report() {
        let report = render_text_report(&[
            record("T", Some(4), Some(9), "https://a/A/T/MapServer"),
            record("S", Some(1), Some(3), "https://a/S/MapServer"),
        ]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[1], "=".repeat(BANNER_WIDTH));
        assert_eq!(lines[2], "       ArcGIS Online Tile Servers");
        assert!(lines[4].contains("https://a/S/MapServer/tile/{z}/{y}/{x}\", 1, 3"));
        assert!(lines[5].contains("https://a/A/T/MapServer/tile/{z}/{y}/{x}\", 4, 9"));
        assert_eq!(*lines.last().unwrap(), "=".repeat(BANNER_WIDTH));
    }

    #[test]
    fn test_render_empty_report() {
        let report = render_text_report(&[]);
        assert!(report.contains(EMPTY_REPORT_MESSAGE));
        assert_eq!(report.lines().filter(|l| l.starts_with("====")).count(), 3);
    }

    #[test]
    fn test_render_json_report() {
        let json = render_json_report(&[
            record("B_Map", None, None, "https://a/B_Map/MapServer"),
            record("A_Map", Some(2), Some(8), "https://a/A_Map/MapServer"),
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["name"], "A_Map");
        assert_eq!(value[0]["minZoom"], 2);
        assert_eq!(value[0]["maxZoom"], 8);
        assert_eq!(value[0]["tileUrl"], "https://a/A_Map/MapServer/tile/{z}/{y}/{x}");
        assert!(value[1]["minZoom"].is_null());
    }
}
