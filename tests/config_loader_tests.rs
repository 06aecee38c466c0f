use std::io::Write;
use std::path::PathBuf;

use atera_calc::config::{
    HttpConfigLoader, LoaderConfig, SLIDERS_CACHE_CONTROL, SliderConfigSource, SliderEndpoint,
    StaticConfigSource,
};
use atera_calc::core::{SliderConfig, SliderFormat};
use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;

const SLIDERS_JSON: &str = r#"{
  "sliders": [
    { "min": 1, "max": 50, "step": 1, "default": 5, "ticks": ["1", "25", "50"] },
    { "min": 0, "max": 5000, "step": 50, "default": 500 },
    { "min": 0, "max": 10, "step": 0.5, "default": 3, "format": "currency" }
  ]
}"#;

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn endpoint_router(path: PathBuf) -> Router {
    let endpoint = SliderEndpoint::new(path);
    Router::new().route(
        "/wp-json/atera/v1/calc-sliders",
        get(move || {
            let response = endpoint.respond();
            async move {
                let status =
                    StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let cache = response.cache_control.unwrap_or("no-store");
                (
                    status,
                    [(header::CACHE_CONTROL, cache)],
                    axum::Json(response.body),
                )
                    .into_response()
            }
        }),
    )
}

fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client")
}

fn loader_for(base_url: &str) -> HttpConfigLoader {
    HttpConfigLoader::with_client(local_client(), LoaderConfig::new(base_url))
}

fn assert_all_fallback(configs: &[SliderConfig; 3]) {
    for config in configs {
        assert_eq!(config, &SliderConfig::default());
        assert_eq!(
            (config.min, config.max, config.step, config.default),
            (0.0, 100.0, 1.0, 0.0)
        );
        assert!(config.ticks.is_empty());
    }
}

#[tokio::test]
async fn loads_sliders_served_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SLIDERS_JSON.as_bytes()).expect("write sliders");
    let base_url = spawn_server(endpoint_router(file.path().to_path_buf())).await;

    let response = local_client()
        .get(format!("{base_url}/wp-json/atera/v1/calc-sliders"))
        .send()
        .await
        .expect("raw request");
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL.as_str())
            .and_then(|v| v.to_str().ok()),
        Some(SLIDERS_CACHE_CONTROL)
    );

    let configs = loader_for(&base_url).load().await;
    assert_eq!(configs[0].default, 5.0);
    assert_eq!(configs[0].ticks.to_vec(), vec!["1", "25", "50"]);
    assert_eq!(configs[1].step, 50.0);
    assert_eq!(configs[1].default, 500.0);
    assert_eq!(configs[2].format, SliderFormat::Currency);
    assert_eq!(configs[2].default, 3.0);
}

#[tokio::test]
async fn missing_file_404_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let base_url = spawn_server(endpoint_router(dir.path().join("calc-sliders.json"))).await;

    let document = loader_for(&base_url).fetch_document().await;
    assert!(document.is_err());
    assert_all_fallback(&loader_for(&base_url).load().await);
}

#[tokio::test]
async fn malformed_file_500_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"{ \"sliders\": [").expect("write garbage");
    let base_url = spawn_server(endpoint_router(file.path().to_path_buf())).await;

    assert_all_fallback(&loader_for(&base_url).load().await);
}

#[tokio::test]
async fn non_json_success_body_falls_back_to_defaults() {
    let app = Router::new().route(
        "/wp-json/atera/v1/calc-sliders",
        get(|| async { "<html>maintenance</html>" }),
    );
    let base_url = spawn_server(app).await;

    assert_all_fallback(&loader_for(&base_url).load().await);
}

#[tokio::test]
async fn transport_failure_falls_back_to_defaults() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    assert_all_fallback(&loader_for(&format!("http://{addr}")).load().await);
}

#[tokio::test]
async fn short_document_pads_with_fallback() {
    let source = StaticConfigSource::from_json(r#"{"sliders":[{"max":10,"default":4}]}"#)
        .expect("valid document");
    let configs = source.load().await;
    assert_eq!(configs[0].max, 10.0);
    assert_eq!(configs[0].default, 4.0);
    assert_eq!(configs[1], SliderConfig::default());
    assert_eq!(configs[2], SliderConfig::default());
}

#[tokio::test]
async fn unreadable_record_only_affects_its_slot() {
    let source =
        StaticConfigSource::from_json(r#"{"sliders":[{"min":"lots"},{"min":2,"max":8},{}]}"#)
            .expect("valid document");
    let configs = source.load().await;
    assert_eq!(configs[0], SliderConfig::default());
    assert_eq!((configs[1].min, configs[1].max, configs[1].default), (2.0, 8.0, 2.0));
    assert_eq!(configs[2], SliderConfig::default());
}

#[tokio::test]
async fn unavailable_source_falls_back_to_defaults() {
    assert_all_fallback(&StaticConfigSource::unavailable().load().await);
}
