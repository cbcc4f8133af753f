//! GeoJSON decoding for isochrone polygons.
//!
//! The backend returns a GeoJSON document as text. Only polygonal content is
//! drawable; for each polygon the exterior ring is kept and interior rings
//! are dropped.

use serde::{de, Deserialize, Serialize};
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON object has no `type`")]
    MissingType,
    #[error("GeoJSON `{0}` is missing `{1}`")]
    MissingMember(String, &'static str),
    #[error("Unsupported geometry type `{0}`")]
    Unsupported(String),
    #[error("Position needs at least two coordinates, got {0}")]
    InvalidPosition(usize),
    #[error("Polygon ring needs at least 4 positions, got {0}")]
    RingTooShort(usize),
    #[error("Geometry contains no polygons")]
    Empty,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }
}

/// Exterior rings of every polygon found in a GeoJSON document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IsochroneShape {
    pub rings: Vec<Vec<LatLng>>,
}

impl IsochroneShape {
    pub fn num_points(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.rings.iter().flatten();
        let first = points.next()?;
        let init = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(points.fold(init, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lng),
            north: b.north.max(p.lat),
            east: b.east.max(p.lng),
        }))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Fixed look of every isochrone polygon: translucent blue fill with a
/// solid blue outline.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct IsochroneStyle {
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f64,
}

impl Default for IsochroneStyle {
    fn default() -> Self {
        Self {
            fill: Rgba { r: 0, g: 0, b: 255, a: 0.3 },
            outline: Rgba { r: 0, g: 0, b: 255, a: 1.0 },
            outline_width: 2.0,
        }
    }
}

pub fn parse_geometry(text: &str) -> Result<IsochroneShape, GeometryError> {
    let value: Value = serde_json::from_str(text)?;
    let mut rings = vec![];
    collect_rings(&value, &mut rings)?;

    if rings.is_empty() {
        return Err(GeometryError::Empty);
    }

    Ok(IsochroneShape { rings })
}

fn member<'a>(value: &'a Value, kind: &str, name: &'static str) -> Result<&'a Value, GeometryError> {
    value
        .get(name)
        .ok_or_else(|| GeometryError::MissingMember(kind.to_string(), name))
}

fn array_member<'a>(
    value: &'a Value,
    kind: &str,
    name: &'static str,
) -> Result<&'a [Value], GeometryError> {
    match member(value, kind, name)? {
        Value::Array(items) => Ok(items),
        _ => Err(GeometryError::Json(de::Error::invalid_type(
            de::Unexpected::Other("non-array value"),
            &"an array",
        ))),
    }
}

fn collect_rings(value: &Value, rings: &mut Vec<Vec<LatLng>>) -> Result<(), GeometryError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(GeometryError::MissingType)?;

    match kind {
        "FeatureCollection" => {
            for feature in array_member(value, kind, "features")? {
                collect_rings(feature, rings)?;
            }
        }
        "Feature" => match value.get("geometry") {
            // Features without geometry are allowed by GeoJSON
            None | Some(Value::Null) => (),
            Some(geometry) => collect_rings(geometry, rings)?,
        },
        "GeometryCollection" => {
            for geometry in array_member(value, kind, "geometries")? {
                collect_rings(geometry, rings)?;
            }
        }
        "Polygon" => {
            let polygon = Vec::<Vec<Vec<f64>>>::deserialize(member(value, kind, "coordinates")?)?;
            if let Some(ring) = exterior_ring(&polygon)? {
                rings.push(ring);
            }
        }
        "MultiPolygon" => {
            let polygons =
                Vec::<Vec<Vec<Vec<f64>>>>::deserialize(member(value, kind, "coordinates")?)?;
            for polygon in &polygons {
                if let Some(ring) = exterior_ring(polygon)? {
                    rings.push(ring);
                }
            }
        }
        other => return Err(GeometryError::Unsupported(other.to_string())),
    }

    Ok(())
}

fn exterior_ring(polygon: &[Vec<Vec<f64>>]) -> Result<Option<Vec<LatLng>>, GeometryError> {
    let Some(exterior) = polygon.first() else {
        return Ok(None);
    };

    if exterior.len() < 4 {
        return Err(GeometryError::RingTooShort(exterior.len()));
    }

    exterior
        .iter()
        .map(|position| match position.as_slice() {
            // GeoJSON positions are [longitude, latitude, (altitude)]
            [lng, lat, ..] => Ok(LatLng { lat: *lat, lng: *lng }),
            other => Err(GeometryError::InvalidPosition(other.len())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
