//! Donor profiling and donor list pages over the in-memory backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use common::*;
use donor_dashboard::backend::memory::MemoryBackend;
use donor_dashboard::config::{AdminCreatePolicy, AppConfig};
use donor_dashboard::models::DonorSummary;
use donor_dashboard::state::AppState;

fn profiles_backend() -> Arc<MemoryBackend> {
    Arc::new(
        MemoryBackend::new()
            .with_accounts(accounts())
            .with_profiles(vec![
                profile("p1", "Ada", "Lovelace", "High", 1234.5, 0.8, 250.0),
                profile("p2", "Grace", "Hopper", "Medium", 400.0, 0.5, 75.0),
                profile("p3", "Alan", "Turing", "Low", 10.0, 0.3, 0.0),
            ]),
    )
}

#[actix_rt::test]
async fn test_profiles_render_with_badges_and_churn_bands() {
    let app = init_app(test_state(profiles_backend(), AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let res = get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;

    assert!(body.contains("Donor Profiling Analysis"));
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains(r#"<span class="badge badge-green">High</span>"#));
    assert!(body.contains(r#"<span class="badge badge-yellow">Medium</span>"#));
    assert!(body.contains(r#"<span class="badge badge-red">Low</span>"#));
    assert!(body.contains("$1,234.50"));
    assert!(body.contains(r#"<span class="text-red">80.0%</span>"#));
    assert!(body.contains(r#"<span class="text-yellow">50.0%</span>"#));
    // exactly 0.3 is not above the elevated threshold
    assert!(body.contains(r#"<span class="text-green">30.0%</span>"#));
}

#[actix_rt::test]
async fn test_rows_keep_backend_order() {
    let app = init_app(test_state(profiles_backend(), AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let body = body_string(get_with(&app, "/admin/donor-profiling", Some(cookie)).await).await;
    let ada = body.find("Ada Lovelace").unwrap();
    let grace = body.find("Grace Hopper").unwrap();
    let alan = body.find("Alan Turing").unwrap();
    assert!(ada < grace && grace < alan);
}

#[actix_rt::test]
async fn test_empty_profiles_show_placeholder_row() {
    let backend = Arc::new(MemoryBackend::new().with_accounts(accounts()));
    let app = init_app(test_state(backend, AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let res = get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(res.status(), 200);
    assert!(body_string(res).await.contains("No donor profiles yet."));
}

#[actix_rt::test]
async fn test_backend_failure_renders_error_panel() {
    let backend = profiles_backend();
    backend.set_failure(Some("connection refused"));
    let app = init_app(test_state(backend.clone(), AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;

    let res = get_with(&app, "/admin/donor-profiling", Some(cookie.clone())).await;
    assert_eq!(res.status(), 502);
    let body = body_string(res).await;
    assert!(body.contains("Could not load donor profiles"));
    assert!(body.contains("query on donor_profiles failed"));
    // driver messages stay in the log
    assert!(!body.contains("connection refused"));
    assert!(!body.contains("Ada Lovelace"));

    // failures are not cached: the next request retries and succeeds
    backend.set_failure(None);
    let res = get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(res.status(), 200);
    assert_eq!(backend.fetch_count("donor_profiles"), 2);
}

#[actix_rt::test]
async fn test_concurrent_visits_share_one_failed_fetch() {
    let backend = Arc::new(
        MemoryBackend::new()
            .with_accounts(accounts())
            .with_delay(Duration::from_millis(50)),
    );
    backend.set_failure(Some("down"));
    let app = init_app(test_state(backend.clone(), AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;

    let (a, b, c) = tokio::join!(
        get_with(&app, "/admin/donor-profiling", Some(cookie.clone())),
        get_with(&app, "/admin/donor-profiling", Some(cookie.clone())),
        get_with(&app, "/admin/donor-profiling", Some(cookie.clone())),
    );
    assert_eq!(a.status(), 502);
    assert_eq!(b.status(), 502);
    assert_eq!(c.status(), 502);
    assert_eq!(backend.fetch_count("donor_profiles"), 1);

    // a later visit retries
    backend.set_failure(None);
    let res = get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(res.status(), 200);
    assert_eq!(backend.fetch_count("donor_profiles"), 2);
}

#[actix_rt::test]
async fn test_malformed_row_fails_whole_query() {
    let bad = profile("p9", "Bad", "Row", "High", 10.0, 1.5, 0.0);
    let backend = Arc::new(
        MemoryBackend::new()
            .with_accounts(accounts())
            .with_profiles(vec![profile("p1", "Ada", "Lovelace", "High", 1.0, 0.1, 0.0), bad]),
    );
    let app = init_app(test_state(backend, AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let res = get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(res.status(), 502);
    assert!(body_string(res).await.contains("p9"));
}

#[actix_rt::test]
async fn test_repeat_visits_share_one_fetch() {
    let backend = profiles_backend();
    let state = test_state(backend.clone(), AdminCreatePolicy::Open);
    let app = init_app(state.clone()).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;

    for _ in 0..3 {
        let res = get_with(&app, "/admin/donor-profiling", Some(cookie.clone())).await;
        assert_eq!(res.status(), 200);
    }
    assert_eq!(backend.fetch_count("donor_profiles"), 1);

    state.caches.invalidate_all().await;
    get_with(&app, "/admin/donor-profiling", Some(cookie)).await;
    assert_eq!(backend.fetch_count("donor_profiles"), 2);
}

#[actix_rt::test]
async fn test_slow_backend_shows_loading_then_data() {
    let backend = Arc::new(
        MemoryBackend::new()
            .with_accounts(accounts())
            .with_profiles(vec![profile("p1", "Ada", "Lovelace", "High", 1.0, 0.1, 0.0)])
            .with_delay(Duration::from_millis(200)),
    );
    let config = AppConfig { query_wait: Duration::from_millis(10), ..AppConfig::default() };
    let state = web::Data::new(AppState::new(&config, backend.clone(), backend.clone()));
    let app = init_app(state).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;

    let res = get_with(&app, "/admin/donor-profiling", Some(cookie.clone())).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(body.contains("Loading donor profiles..."));
    assert!(body.contains(r#"http-equiv="refresh""#));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let body = body_string(get_with(&app, "/admin/donor-profiling", Some(cookie)).await).await;
    assert!(body.contains("Ada Lovelace"));
    assert!(!body.contains("Loading donor profiles..."));
    assert_eq!(backend.fetch_count("donor_profiles"), 1);
}

#[actix_rt::test]
async fn test_donor_list_shows_names_and_missing_email() {
    let backend = Arc::new(MemoryBackend::new().with_accounts(accounts()).with_donors(vec![
        DonorSummary {
            id: "1".to_string(),
            first_name: Some("Ada".to_string()),
            last_org_name: Some("Lovelace".to_string()),
            email: Some("ada@example.org".to_string()),
        },
        DonorSummary {
            id: "2".to_string(),
            first_name: None,
            last_org_name: Some("Acme Foundation".to_string()),
            email: None,
        },
    ]));
    let app = init_app(test_state(backend, AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let res = get_with(&app, "/admin/donors", Some(cookie)).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("ada@example.org"));
    assert!(body.contains("Acme Foundation"));
}
