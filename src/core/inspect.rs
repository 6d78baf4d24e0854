use crate::core::{Fetcher, Result, ServiceDescriptor, TiledServiceRecord};
use crate::utils::error::ScanError;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use url::Url;

pub const UNKNOWN_SERVICE_NAME: &str = "Unknown";

/// Name of a service from its address: the segment just before the trailing
/// service-type segment, e.g. `.../Elevation/World_Hillshade/MapServer` ->
/// `World_Hillshade`. Percent-escapes added by URL resolution are decoded.
pub fn derive_service_name(service_url: &str) -> String {
    let parts: Vec<&str> = service_url.trim_end_matches('/').split('/').collect();
    if parts.len() >= 2 {
        percent_decode_str(parts[parts.len() - 2])
            .decode_utf8_lossy()
            .into_owned()
    } else {
        UNKNOWN_SERVICE_NAME.to_string()
    }
}

/// Interprets an already fetched service document.
///
/// `Ok(None)` means the service is simply not tiled, which is the usual case.
/// `Err` is reserved for tiled services whose `tileInfo` cannot be read.
pub fn extract_record(service_url: &str, data: &Value) -> Result<Option<TiledServiceRecord>> {
    let descriptor = ServiceDescriptor::from_value(data);
    if !descriptor.is_tiled() {
        return Ok(None);
    }

    let tile_info = match descriptor.tile_info() {
        Some(parsed) => parsed.map_err(|e| {
            ScanError::shape(service_url, format!("cannot read tileInfo: {}", e))
        })?,
        None => return Ok(None),
    };

    let name = derive_service_name(service_url);

    let (min_zoom, max_zoom) = if tile_info.lods().is_empty() {
        tracing::info!("Tiled service {} has no LODs defined.", service_url);
        (None, None)
    } else {
        match tile_info.zoom_range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => {
                tracing::info!("LODs found but no 'level' key for: {}", service_url);
                (None, None)
            }
        }
    };

    Ok(Some(TiledServiceRecord {
        name,
        min_zoom,
        max_zoom,
        url: service_url.to_string(),
    }))
}

/// Fetches one service and returns its record if it is tiled.
pub async fn inspect_service<F: Fetcher + ?Sized>(
    fetcher: &F,
    service_url: &Url,
) -> Result<Option<TiledServiceRecord>> {
    let data = fetcher.fetch(service_url).await?;

    extract_record(service_url.as_str(), &data).inspect_err(|e| {
        tracing::warn!(kind = ?e.kind(), "Error parsing details for {}: {}", service_url, e);
    })
}
