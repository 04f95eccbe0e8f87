use serde_json::{Map, Value};
use tracing::debug;

/// A GeoJSON position. The optional third ordinate is kept as-is; the
/// earthquake feed stores depth in kilometres there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub z: Option<f64>,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            z: None,
        }
    }

    pub fn with_z(lon_deg: f64, lat_deg: f64, z: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            z: Some(z),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(GeoPoint),
    MultiPoint(Vec<GeoPoint>),
    LineString(Vec<GeoPoint>),
    MultiLineString(Vec<Vec<GeoPoint>>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Position in the source `features` array.
    pub index: usize,
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for features whose geometry is `null` or absent.
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(|v| v.as_f64())
    }

    pub fn property_i64(&self, key: &str) -> Option<i64> {
        self.properties.get(key).and_then(|v| v.as_i64())
    }
}

/// A feature left out of a collection or feed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFeature {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// Entries of `features` that are not readable GeoJSON features.
    pub skipped: Vec<SkippedFeature>,
    /// Top-level `metadata` object, when present (USGS feeds carry one).
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoJsonError {
    Json(String),
    NotAFeatureCollection,
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeoJsonError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, GeoJsonError> {
        let obj = value
            .as_object()
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        let mut skipped = Vec::new();
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_feature(index, feat_val) {
                Ok(feature) => features.push(feature),
                Err(reason) => {
                    debug!(index, %reason, "skipping malformed feature");
                    skipped.push(SkippedFeature { index, reason });
                }
            }
        }

        let metadata = obj.get("metadata").and_then(|v| v.as_object()).cloned();

        Ok(Self {
            features,
            skipped,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn parse_feature(index: usize, value: &Value) -> Result<Feature, String> {
    let feat_obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;

    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("feature missing type".to_string())?;
    if feat_type != "Feature" {
        return Err(format!("unexpected feature type: {feat_type}"));
    }

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => None,
        Some(g) => Some(parse_geometry(g)?),
    };

    Ok(Feature {
        index,
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(parse_point(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(parse_points(coords)?)),
        "LineString" => Ok(Geometry::LineString(parse_points(coords)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(parse_rings(coords)?)),
        "Polygon" => Ok(Geometry::Polygon(parse_rings(coords)?)),
        "MultiPolygon" => Ok(Geometry::MultiPolygon(parse_multi_polygon(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    let z = match arr.get(2) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64().ok_or("third ordinate must be a number".to_string())?),
    };
    Ok(GeoPoint {
        lon_deg: lon,
        lat_deg: lat,
        z,
    })
}

fn parse_points(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of arrays".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for ring in arr {
        out.push(parse_points(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<GeoPoint>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_rings(poly)?);
    }
    Ok(out)
}
