use soil_dashboard::{
    web::{self, BackendConfig},
    ClientConfig, Command, Dashboard, HttpRemote, RemoteService, StateDelta, UpdatePolicy,
};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;

/// Start the reference backend on an ephemeral port.
async fn spawn_backend(log_path: &Path) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local address");
    let config = BackendConfig::new("127.0.0.1", addr.port()).with_log_path(log_path);

    tokio::spawn(async move {
        let _ = web::serve(listener, config).await;
    });
    addr
}

fn client_for(addr: SocketAddr) -> HttpRemote {
    let config = ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(5));
    HttpRemote::new(config).expect("Should build HTTP client")
}

#[tokio::test]
async fn test_command_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_backend(&dir.path().join("soil_data.json")).await;
    let remote = client_for(addr);

    let initial = remote.get_command().await.expect("Should fetch command");
    assert_eq!(initial, Command::Other("None".to_string()));

    remote
        .set_command(&Command::StartWater)
        .await
        .expect("Should set command");
    let updated = remote.get_command().await.expect("Should fetch command");
    assert_eq!(updated, Command::StartWater);
}

#[tokio::test]
async fn test_submitted_readings_appear_after_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_backend(&dir.path().join("soil_data.json")).await;
    let dashboard = Dashboard::new(client_for(addr), UpdatePolicy::default());

    dashboard.refresh_log().await.expect("Should fetch empty log");
    assert!(dashboard.state().series.is_empty());

    for value in ["30", "45.5", "dry"] {
        let delta = timeout(Duration::from_secs(5), dashboard.submit_reading(value))
            .await
            .expect("Submit should not hang")
            .expect("Should submit reading");
        assert_eq!(
            delta,
            StateDelta::Message("Data received and logged successfully!".to_string())
        );
    }
    assert!(dashboard.state().series.is_empty());

    dashboard.refresh_log().await.expect("Should fetch log");
    let series = dashboard.state().series;
    assert_eq!(series.len(), 3);
    assert_eq!(series.values[0], 30.0);
    assert_eq!(series.values[1], 45.5);
    assert!(series.values[2].is_nan());

    // Backend timestamps are "date time", so ticks are the time of day.
    let tick = series.axis_label(0);
    assert_eq!(tick.len(), 8);
    assert_eq!(tick.matches(':').count(), 2);
}

#[tokio::test]
async fn test_null_entries_in_stored_log_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("soil_data.json");
    std::fs::write(
        &log_path,
        r#"[
            {"timestamp": "2024-06-01 10:00:00", "soil_moisture": "12"},
            {"timestamp": "2024-06-01 10:01:00", "soil_moisture": null},
            {"timestamp": "2024-06-01 10:02:00", "soil_moisture": 14}
        ]"#,
    )
    .unwrap();
    let addr = spawn_backend(&log_path).await;

    let entries = Dashboard::new(client_for(addr), UpdatePolicy::default())
        .logs()
        .ingest()
        .await
        .expect("Should ingest log");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].timestamp, "2024-06-01 10:00:00");
    assert_eq!(entries[1].soil_moisture, 14.0);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let dashboard = Dashboard::new(client_for(addr), UpdatePolicy::default());

    let err = dashboard.refresh_command().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(dashboard.state().command, None);

    let err = dashboard.submit_reading("10").await.unwrap_err();
    assert!(err.is_submission());
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    // A backend that accepts the request and never answers.
    let app = axum::Router::new().route(
        "/command",
        axum::routing::get(|| std::future::pending::<&'static str>()),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let config =
        ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_millis(200));
    let dashboard = Dashboard::new(
        HttpRemote::new(config).expect("Should build HTTP client"),
        UpdatePolicy::default(),
    );

    let err = timeout(Duration::from_secs(5), dashboard.refresh_command())
        .await
        .expect("Client timeout should fire first")
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(dashboard.state().command, None);
}

#[tokio::test]
async fn test_unexpected_shape_is_protocol_error() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("soil_data.json");
    let addr = spawn_backend(&log_path).await;
    let remote = client_for(addr);

    // A null command does not parse as a command string.
    let raw = reqwest::Client::new()
        .post(format!("http://{}/update-command", addr))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert!(raw.status().is_success());
    assert!(remote.get_command().await.unwrap_err().is_protocol());

    // An unknown path answers 404, which is not the expected shape either.
    let missing = client_for(addr);
    let config = missing.config().clone().with_base_url(format!("http://{}/nope", addr));
    let err = HttpRemote::new(config).unwrap().get_log().await.unwrap_err();
    assert!(err.is_protocol());
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_backend(&dir.path().join("soil_data.json")).await;

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}
