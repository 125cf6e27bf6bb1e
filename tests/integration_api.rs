//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use pv_plant_sizer::api::{AppState, router};
use pv_plant_sizer::config::ScenarioConfig;
use pv_plant_sizer::run_scenario;

/// Runs a preset end to end and returns the API state.
fn build_api_state(preset: &str) -> Arc<AppState> {
    let cfg = ScenarioConfig::from_preset(preset).unwrap();
    Arc::new(AppState::from(run_scenario(&cfg).unwrap()))
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn summary_matches_monthly_sum() {
    let state = build_api_state("baseline");
    let (_, monthly) = get(state.clone(), "/monthly").await;
    let (_, summary) = get(state, "/summary").await;

    let sum: f64 = monthly
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["overall"]["total_energy_mwh"].as_f64().unwrap())
        .sum();
    let total = summary["total_energy_mwh"].as_f64().unwrap();
    assert!((sum - total).abs() < 1e-6, "sum={sum} total={total}");
}

#[tokio::test]
async fn each_month_is_addressable() {
    let state = build_api_state("baseline");
    for month in 1..=12 {
        let (status, json) = get(state.clone(), &format!("/monthly?month={month}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["month_index"], month - 1);
    }
}

#[tokio::test]
async fn sizing_reflects_preset() {
    let (_, small) = get(build_api_state("small_site"), "/sizing").await;
    let (_, large) = get(build_api_state("hyperscale"), "/sizing").await;
    assert_eq!(small["dc_center_load_mw"], 1.0);
    assert_eq!(large["dc_center_load_mw"], 10.0);
    assert!(
        large["module_count"].as_u64().unwrap() > small["module_count"].as_u64().unwrap()
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let req = Request::builder().uri("/state").body(Body::empty()).unwrap();
    let resp = router(build_api_state("baseline"))
        .oneshot(req)
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
