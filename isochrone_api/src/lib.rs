use reqwest::StatusCode;
use ui_common::{
    AddressQuery, IsochroneResponse, PanelError, SaveResponse, StoredIsochrone, StoredIsochrones,
};
use url::Url;

const ISOCHRONE_PATH: &str = "isochrone/";
const SAVE_PATH: &str = "isochrone/save";
const LIST_PATH: &str = "isochrones/";

#[derive(thiserror::Error, Debug)]
pub enum IsochroneError {
    #[error("Connection Error: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("{0}")]
    Request(StatusCode),
    #[error("No isochrone data found")]
    MissingData(Option<String>),
    #[error("Backend rejected the request: {0}")]
    Rejected(String),
    #[error("Error decoding json, {0}")]
    JsonDecodeError(#[from] serde_json::Error),
    #[error("Url parse error `{0}`")]
    ParseError(#[from] url::ParseError),
}

impl From<IsochroneError> for PanelError {
    fn from(e: IsochroneError) -> PanelError {
        match e {
            IsochroneError::Request(status) => PanelError::Fetch(status.to_string()),
            IsochroneError::MissingData(detail) => PanelError::MissingData(detail),
            other => PanelError::Network(other.to_string()),
        }
    }
}

/// Read the body of a successful response and decode it into `$generic`.
/// Any non-2xx status turns into `IsochroneError::Request`.
macro_rules! read_response_json {
    ($response:expr, $generic:ty) => {{
        let status = $response.status();
        if !status.is_success() {
            log::warn!("Unexpected response code: {status}");
            return Err(IsochroneError::Request(status));
        }
        let text = $response.text().await?;
        <$generic>::from_json(&text)?
    }};
}

/// Parse a backend base URL. Values without a usable base, such as
/// `localhost:8000` (scheme `localhost`), are rejected. The returned path
/// always ends with `/`.
pub fn parse_base_url(base_url: &str) -> Result<Url, IsochroneError> {
    let mut url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Clone, Debug)]
pub struct IsochroneClient {
    client: reqwest::Client,
    base_url: Url,
}

impl IsochroneClient {
    /// `base_url` may carry a path prefix (`http://host/api`); endpoints are
    /// resolved below it.
    pub fn new(base_url: &str) -> Result<Self, IsochroneError> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: Option<&AddressQuery>) -> Result<Url, IsochroneError> {
        let mut url = self.base_url.join(path)?;
        if let Some(query) = query {
            url.query_pairs_mut().extend_pairs(query.query_pairs());
        }
        Ok(url)
    }
}

/// URL of the isochrone request for `query`, with the address form-urlencoded.
pub fn isochrone_url(client: &IsochroneClient, query: &AddressQuery) -> Result<Url, IsochroneError> {
    client.endpoint(ISOCHRONE_PATH, Some(query))
}

/// Fetch the isochrone for `query`. Returns the GeoJSON text as sent by the
/// backend; it is not parsed here.
pub async fn get_isochrone(
    client: &IsochroneClient,
    query: &AddressQuery,
) -> Result<String, IsochroneError> {
    let url = isochrone_url(client, query)?;
    log::debug!("Requesting isochrone {url}");
    let res = client.client.get(url).send().await?;
    log::debug!("Received response: {res:?}");

    let body = read_response_json!(res, IsochroneResponse);
    match body.isochrone {
        Some(geojson) if !geojson.is_empty() => Ok(geojson),
        _ => Err(IsochroneError::MissingData(body.error)),
    }
}

/// Ask the backend to compute and store the isochrone for `query`.
/// Returns the id of the stored row.
pub async fn save_isochrone(
    client: &IsochroneClient,
    query: &AddressQuery,
) -> Result<i64, IsochroneError> {
    let url = client.endpoint(SAVE_PATH, Some(query))?;
    log::debug!("Saving isochrone {url}");
    let res = client.client.post(url).send().await?;

    let body = read_response_json!(res, SaveResponse);
    if let Some(error) = body.error {
        return Err(IsochroneError::Rejected(error));
    }
    match body.id {
        Some(id) => {
            log::info!("{} (id {id})", body.message.as_deref().unwrap_or("Isochrone saved"));
            Ok(id)
        }
        None => Err(IsochroneError::Rejected("response has no id".into())),
    }
}

pub async fn list_isochrones(client: &IsochroneClient) -> Result<Vec<StoredIsochrone>, IsochroneError> {
    let url = client.endpoint(LIST_PATH, None)?;
    log::debug!("Listing stored isochrones {url}");
    let res = client.client.get(url).send().await?;

    let body = read_response_json!(res, StoredIsochrones);
    Ok(body.isochrones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ui_common::WalkTime;

    #[test]
    fn test_address_is_encoded() {
        let client = IsochroneClient::new("http://localhost:8000").unwrap();
        let query = AddressQuery::new("Café & Bar #1", WalkTime::Fifteen);
        let url = isochrone_url(&client, &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/isochrone/?address=Caf%C3%A9+%26+Bar+%231&walk_time=15"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = IsochroneClient::new("http://example.com/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://example.com/api/");

        let url = isochrone_url(&client, &AddressQuery::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/api/isochrone/?address=Toronto%2C+Canada&walk_time=10"
        );
        assert_eq!(
            client.endpoint(LIST_PATH, None).unwrap().as_str(),
            "http://example.com/api/isochrones/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            IsochroneClient::new("mailto:someone@example.com"),
            Err(IsochroneError::ParseError(_))
        ));
        assert!(matches!(
            IsochroneClient::new("not a url"),
            Err(IsochroneError::ParseError(_))
        ));
        assert!(matches!(
            parse_base_url("localhost:8000"),
            Err(IsochroneError::ParseError(_))
        ));
        assert_eq!(
            parse_base_url(" http://localhost:8000 ").unwrap().as_str(),
            "http://localhost:8000/"
        );
    }

    #[test]
    fn test_panel_error_mapping() {
        let e: PanelError = IsochroneError::Request(StatusCode::NOT_FOUND).into();
        assert_eq!(e, PanelError::Fetch("404 Not Found".into()));

        let e: PanelError = IsochroneError::MissingData(Some("Invalid address".into())).into();
        assert_eq!(e, PanelError::MissingData(Some("Invalid address".into())));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: PanelError = IsochroneError::from(json_err).into();
        assert!(matches!(e, PanelError::Network(m) if m.starts_with("Error decoding json")));
    }
}
