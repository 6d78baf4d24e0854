use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Listing returned for a directory (root or folder) of the services tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryListing {
    #[serde(default)]
    services: Option<Vec<ServiceRef>>,
    #[serde(default)]
    folders: Option<Vec<String>>,
}

impl DirectoryListing {
    pub fn from_value(value: Value) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn services(&self) -> &[ServiceRef] {
        self.services.as_deref().unwrap_or_default()
    }

    pub fn folders(&self) -> &[String] {
        self.folders.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRef {
    /// May be folder-qualified, e.g. `Elevation/World_Hillshade`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
}

impl ServiceRef {
    pub fn is_type(&self, service_type: &str) -> bool {
        self.service_type.as_deref() == Some(service_type)
    }
}

/// The two fields of a service document that decide whether it is tiled.
#[derive(Debug, Clone, Default)]
pub struct ServiceDescriptor {
    pub single_fused_map_cache: bool,
    tile_info: Option<Value>,
}

impl ServiceDescriptor {
    pub fn from_value(value: &Value) -> Self {
        Self {
            single_fused_map_cache: value
                .get("singleFusedMapCache")
                .map(is_truthy)
                .unwrap_or(false),
            tile_info: value.get("tileInfo").cloned(),
        }
    }

    pub fn has_tile_info(&self) -> bool {
        self.tile_info.is_some()
    }

    pub fn is_tiled(&self) -> bool {
        self.single_fused_map_cache && self.has_tile_info()
    }

    /// `None` when the key is missing. A present but malformed `tileInfo`
    /// (anything but an object, wrong field types) is an error.
    pub fn tile_info(&self) -> Option<std::result::Result<TileInfo, serde_json::Error>> {
        self.tile_info.as_ref().map(|raw| match raw {
            Value::Object(_) => serde_json::from_value(raw.clone()),
            other => Err(serde_json::Error::custom(format!(
                "tileInfo must be an object, got {}",
                other
            ))),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileInfo {
    #[serde(default)]
    lods: Option<Vec<LevelOfDetail>>,
}

impl TileInfo {
    pub fn lods(&self) -> &[LevelOfDetail] {
        self.lods.as_deref().unwrap_or_default()
    }

    pub fn levels(&self) -> impl Iterator<Item = i64> + '_ {
        self.lods().iter().filter_map(|lod| lod.level)
    }

    /// True min/max over every defined level; the list is not assumed sorted.
    pub fn zoom_range(&self) -> Option<(i64, i64)> {
        self.levels().fold(None, |range, level| match range {
            None => Some((level, level)),
            Some((min, max)) => Some((min.min(level), max.max(level))),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelOfDetail {
    #[serde(default, deserialize_with = "integral_level")]
    pub level: Option<i64>,
}

/// Accepts `3` as well as `3.0`; fractional levels are rejected.
fn integral_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(level) = number.as_i64() {
        return Ok(Some(level));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(D::Error::custom(format!("level {} is not an integer", number))),
    }
}

/// One discovered tiled service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TiledServiceRecord {
    pub name: String,
    pub min_zoom: Option<i64>,
    pub max_zoom: Option<i64>,
    pub url: String,
}

impl TiledServiceRecord {
    pub const TILE_PATH: &'static str = "/tile/{z}/{y}/{x}";

    pub fn tile_url_template(&self) -> String {
        format!("{}{}", self.url, Self::TILE_PATH)
    }

    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
