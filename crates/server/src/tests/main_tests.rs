use super::*;
use axum::{body, body::Body, http::Request};
use shared::{domain::ControlValue, protocol::ChartBody};
use tower::ServiceExt;

const SAMPLE_CSV: &str = "\
personName,finalWorth,category,industries,country,birthYear,cpi_change_country,tax_revenue_country_country
Ada,\"$1,200\",Technology,Technology,United States,1960,7.5,9.6
Bo,$300,Technology,Technology,China,1990,2.9,9.4
Cy,$50,Finance,Finance & Investments,United States,1970,7.5,9.6
";

fn test_state(csv: &str) -> Arc<AppState> {
    let dataset = Dataset::from_reader(csv.as_bytes()).expect("dataset");
    let dashboard = Arc::new(Dashboard::new(Arc::new(dataset)));
    Arc::new(AppState {
        page: layout::render_page(&dashboard).into(),
        dashboard,
        assets: Arc::new(StaticAssets {
            favicon: StaticAsset::new(b"icon".to_vec(), "image/x-icon"),
            sidebar_image: StaticAsset::new(b"png".to_vec(), "image/png"),
        }),
    })
}

fn test_app() -> Router {
    build_router(test_state(SAMPLE_CSV))
}

async fn body_bytes(response: axum::response::Response) -> body::Bytes {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
}

fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), b"ok");
}

#[tokio::test]
async fn index_serves_assembled_page() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let page = String::from_utf8(body_bytes(response).await.to_vec()).expect("utf8");
    assert!(page.contains(layout::TITLE));
    assert!(page.contains("chart-economic_indicators"));
}

#[tokio::test]
async fn static_assets_carry_their_content_type() {
    let request = Request::get("/assets/sidebar-image")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).expect("type"),
        "image/png"
    );
    assert_eq!(body_bytes(response).await.as_ref(), b"png");
}

#[tokio::test]
async fn summary_describes_worth_and_reports_empty_dataset() {
    let request = Request::get("/api/summary")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let summary: WorthSummary =
        serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(summary.count, 3);
    assert_eq!(summary.max, 1200.0);

    let header_only = SAMPLE_CSV.lines().next().expect("header");
    let app = build_router(test_state(header_only));
    let request = Request::get("/api/summary")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn controls_route_lists_every_declared_control() {
    let request = Request::get("/api/controls")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    let specs: Vec<ControlSpec> = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(specs.len(), shared::domain::ControlId::ALL.len());
}

#[tokio::test]
async fn default_render_covers_all_views() {
    let request = Request::get("/api/views")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<ServerEvent> = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(events.len(), ViewId::ALL.len());
    assert!(events
        .iter()
        .all(|event| matches!(event, ServerEvent::ViewRendered { .. })));
}

#[tokio::test]
async fn render_route_applies_control_overrides() {
    let response = test_app()
        .oneshot(post_json(
            "/api/views/country_distribution",
            serde_json::json!({
                "country_show_all": { "kind": "checkbox", "value": true }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let chart: Chart = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(chart.title, "Number of Billionaires by Country (All Industries)");
    let ChartBody::HorizontalBar { bars, log_scale } = chart.body else {
        panic!("expected horizontal bars");
    };
    assert!(log_scale);
    let counts: Vec<(&str, f64)> = bars.iter().map(|bar| (bar.label.as_str(), bar.value)).collect();
    assert_eq!(counts, vec![("United States", 2.0), ("China", 1.0)]);
}

#[tokio::test]
async fn render_route_maps_errors_to_status_codes() {
    let unknown_view = test_app()
        .oneshot(post_json("/api/views/pie_chart", serde_json::json!({})))
        .await
        .expect("response");
    assert_eq!(unknown_view.status(), StatusCode::NOT_FOUND);

    let invalid_control = test_app()
        .oneshot(post_json(
            "/api/views/age_vs_worth",
            serde_json::json!({
                "scatter_age_range": { "kind": "range", "value": [60, 10] }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(invalid_control.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = serde_json::from_slice(&body_bytes(invalid_control).await).expect("json");
    assert_eq!(error.code, ErrorCode::Validation);
}

#[tokio::test]
async fn empty_histogram_selection_is_unprocessable() {
    let header_only = SAMPLE_CSV.lines().next().expect("header");
    let response = build_router(test_state(header_only))
        .oneshot(post_json(
            "/api/views/wealth_distribution",
            serde_json::json!({}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ApiError = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(error.code, ErrorCode::RenderFailed);

    let response = test_app()
        .oneshot(post_json(
            "/api/views/wealth_distribution",
            serde_json::json!({
                "wealth_category": { "kind": "select", "value": "Finance" }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn websocket_messages_drive_session_renders() {
    let state = test_state(SAMPLE_CSV);
    let mut session = Session::new(state.dashboard.clone());

    let request = serde_json::json!({
        "type": "set_control",
        "payload": {
            "control": "scatter_age_range",
            "value": { "kind": "range", "value": [50, 70] }
        }
    });
    let events = handle_client_message(&mut session, &request.to_string());
    assert_eq!(events.len(), 1);
    let ServerEvent::ViewRendered { view, chart } = &events[0] else {
        panic!("expected render, got {:?}", events[0]);
    };
    assert_eq!(*view, ViewId::AgeVsWorth);
    let ChartBody::Scatter { points, .. } = &chart.body else {
        panic!("expected scatter");
    };
    assert_eq!(points.len(), 2);
    assert_eq!(
        session.state().get(shared::domain::ControlId::ScatterAgeRange),
        Some(&ControlValue::Range(50, 70))
    );

    let events = handle_client_message(&mut session, &request.to_string());
    assert!(events.is_empty());

    let events = handle_client_message(&mut session, "{\"type\":\"render_all\"}");
    assert_eq!(events.len(), ViewId::ALL.len());
}

#[tokio::test]
async fn websocket_rejections_become_error_events() {
    let state = test_state(SAMPLE_CSV);
    let mut session = Session::new(state.dashboard.clone());

    let events = handle_client_message(&mut session, "not json");
    assert!(matches!(
        &events[..],
        [ServerEvent::Error(ApiError { code: ErrorCode::Validation, .. })]
    ));

    let request = serde_json::json!({
        "type": "set_control",
        "payload": {
            "control": "indicator",
            "value": { "kind": "select", "value": "GDP" }
        }
    });
    let events = handle_client_message(&mut session, &request.to_string());
    assert!(matches!(
        &events[..],
        [ServerEvent::Error(ApiError { code: ErrorCode::Validation, .. })]
    ));
}

#[test]
fn events_encode_to_frames_in_order() {
    let state = test_state(SAMPLE_CSV);
    let session = Session::new(state.dashboard.clone());
    let events: Vec<ServerEvent> = session
        .render_all()
        .into_iter()
        .map(Rendered::into_event)
        .collect();

    let frames = encode_events(events);
    assert_eq!(frames.len(), ViewId::ALL.len());
    for (frame, view) in frames.iter().zip(ViewId::ALL) {
        let event: ServerEvent = serde_json::from_str(frame).expect("json");
        let ServerEvent::ViewRendered { view: rendered, .. } = event else {
            panic!("expected render, got {frame}");
        };
        assert_eq!(rendered, *view);
    }
}
