use isochrone_api::{get_isochrone, list_isochrones, save_isochrone, IsochroneClient, IsochroneError};
use mockito::Matcher;
use ui_common::{AddressQuery, MapPanelState, PanelError, WalkTime};

const GEOJSON: &str = r#"{"type": "FeatureCollection", "features": [{"id": "0", "type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[-79.39, 43.64], [-79.37, 43.64], [-79.37, 43.66], [-79.39, 43.64]]]}}]}"#;

fn isochrone_body() -> String {
    serde_json::json!({ "isochrone": GEOJSON }).to_string()
}

fn query_matcher(address: &str, walk_time: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("address".into(), address.into()),
        Matcher::UrlEncoded("walk_time".into(), walk_time.into()),
    ])
}

#[tokio::test]
async fn test_get_isochrone() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/isochrone/")
        .match_query(query_matcher("100 Queen St W, Toronto", "15"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(isochrone_body())
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let query = AddressQuery::new("100 Queen St W, Toronto", WalkTime::Fifteen);
    let geojson = get_isochrone(&client, &query).await.unwrap();

    assert_eq!(geojson, GEOJSON);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/isochrone/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let err = get_isochrone(&client, &AddressQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IsochroneError::Request(s) if s.as_u16() == 500));

    let mut panel = MapPanelState::default();
    let ticket = panel.begin().unwrap();
    panel.complete(ticket, Err(PanelError::from(err)));
    assert!(panel.records().is_empty());
    assert!(panel.banner().unwrap().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_missing_isochrone_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/isochrone/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Invalid address"}"#)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let err = get_isochrone(&client, &AddressQuery::new("", WalkTime::Five))
        .await
        .unwrap_err();
    assert!(matches!(&err, IsochroneError::MissingData(Some(d)) if d == "Invalid address"));
    assert!(PanelError::from(err)
        .to_string()
        .contains("No isochrone data found"));
}

#[tokio::test]
async fn test_empty_isochrone_is_missing_data() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/isochrone/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"isochrone": ""}"#)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let mut panel = MapPanelState::default();
    let ticket = panel.begin().unwrap();
    let outcome = get_isochrone(&client, &AddressQuery::default())
        .await
        .map_err(PanelError::from);
    assert!(matches!(outcome, Err(PanelError::MissingData(None))));

    panel.complete(ticket, outcome);
    assert!(panel.records().is_empty());
    assert_eq!(
        panel.banner().unwrap(),
        "Error: Error fetching isochrones: No isochrone data found"
    );
}

#[tokio::test]
async fn test_undecodable_body_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/isochrone/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let err = get_isochrone(&client, &AddressQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IsochroneError::JsonDecodeError(_)));
    assert!(matches!(PanelError::from(err), PanelError::Network(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 1
    let client = IsochroneClient::new("http://127.0.0.1:1").unwrap();
    let err = get_isochrone(&client, &AddressQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IsochroneError::Connection(_)));
}

#[tokio::test]
async fn test_same_query_twice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/isochrone/")
        .match_query(query_matcher("Toronto, Canada", "10"))
        .with_status(200)
        .with_body(isochrone_body())
        .expect(2)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let query = AddressQuery::default();
    let mut panel = MapPanelState::default();
    for _ in 0..2 {
        let ticket = panel.begin().unwrap();
        let outcome = get_isochrone(&client, &query).await.map_err(PanelError::from);
        panel.complete(ticket, outcome);
    }

    let ids: Vec<u32> = panel.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(panel.overlay().len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_isochrone() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/isochrone/save")
        .match_query(query_matcher("Union Station", "5"))
        .with_status(200)
        .with_body(r#"{"message": "Isochrone saved", "id": 7}"#)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let id = save_isochrone(&client, &AddressQuery::new("Union Station", WalkTime::Five))
        .await
        .unwrap();
    assert_eq!(id, 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/isochrone/save")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Invalid address"}"#)
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let err = save_isochrone(&client, &AddressQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IsochroneError::Rejected(e) if e == "Invalid address"));
}

#[tokio::test]
async fn test_list_isochrones() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::json!({
        "isochrones": [
            [1, 43.6453, -79.3806, 10, GEOJSON],
            [2, 43.6532, -79.3832, 15, GEOJSON],
        ]
    });
    let _mock = server
        .mock("GET", "/isochrones/")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = IsochroneClient::new(&server.url()).unwrap();
    let rows = list_isochrones(&client).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].id, 2);
    assert_eq!(rows[1].walk_time, 15);
    assert_eq!(rows[0].geojson, GEOJSON);
}
