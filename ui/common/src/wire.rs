use macros::Json;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Runtime configuration served to the browser at `/config.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Json)]
pub struct AppConfig {
    pub backend_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

/// Body of `GET /isochrone/`. The backend answers with either field.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq, Json)]
pub struct IsochroneResponse {
    pub isochrone: Option<String>,
    pub error: Option<String>,
}

/// Body of `POST /isochrone/save`
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq, Json)]
pub struct SaveResponse {
    pub message: Option<String>,
    pub id: Option<i64>,
    pub error: Option<String>,
}

/// One stored row. The backend sends rows as positional arrays
/// `[id, latitude, longitude, walk_time, geojson]`, which serde maps onto
/// the fields in declaration order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredIsochrone {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub walk_time: i32,
    pub geojson: String,
}

/// Body of `GET /isochrones/`
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Json)]
pub struct StoredIsochrones {
    #[serde(default)]
    pub isochrones: Vec<StoredIsochrone>,
}

#[test]
fn test_isochrone_response() {
    let resp = IsochroneResponse::from_json(r#"{"isochrone": "{}"}"#).unwrap();
    assert_eq!(resp.isochrone.as_deref(), Some("{}"));
    assert_eq!(resp.error, None);

    let resp = IsochroneResponse::from_json(r#"{"error": "Invalid address"}"#).unwrap();
    assert_eq!(resp.isochrone, None);
    assert_eq!(resp.error.as_deref(), Some("Invalid address"));
}

#[test]
fn test_stored_rows_from_arrays() {
    let text = r#"{"isochrones": [[1, 43.65, -79.38, 10, "{}"], [2, 43.7, -79.4, 5, "{}"]]}"#;
    let list = StoredIsochrones::from_json(text).unwrap();
    assert_eq!(list.isochrones.len(), 2);
    assert_eq!(list.isochrones[0].id, 1);
    assert_eq!(list.isochrones[0].walk_time, 10);
    assert_eq!(list.isochrones[1].latitude, 43.7);
}

#[test]
fn test_app_config() {
    let config = AppConfig::default();
    assert_eq!(
        config.to_json().unwrap(),
        r#"{"backend_url":"http://localhost:8000"}"#
    );
    let value = serde_json::json!({"backend_url": "http://example.com/api"});
    assert_eq!(
        AppConfig::from_value(value).unwrap().backend_url,
        "http://example.com/api"
    );
}
