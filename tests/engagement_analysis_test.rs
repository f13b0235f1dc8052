//! Engagement analysis page: summary cards, monthly chart, top donors.

mod common;

use std::sync::Arc;

use common::*;
use donor_dashboard::backend::memory::MemoryBackend;
use donor_dashboard::config::AdminCreatePolicy;
use donor_dashboard::models::DonorAnalytics;

fn backend_with(rows: Vec<DonorAnalytics>) -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new().with_accounts(accounts()).with_analytics_rows(rows))
}

async fn fetch_page(backend: Arc<MemoryBackend>) -> (u16, String) {
    let app = init_app(test_state(backend, AdminCreatePolicy::Open)).await;
    let cookie = login(&app, ADMIN_USER, ADMIN_PASS).await;
    let res = get_with(&app, "/admin/engagement-analysis", Some(cookie)).await;
    let status = res.status().as_u16();
    (status, body_string(res).await)
}

#[actix_rt::test]
async fn test_summary_cards_in_order() {
    let (status, body) = fetch_page(backend_with(vec![analytics()])).await;
    assert_eq!(status, 200);

    let titles = ["Total Donors", "Average Donation", "Retention Rate", "New Donors (Month)"];
    let positions: Vec<usize> = titles.iter().map(|t| body.find(t).expect(t)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(body.contains(r#"<p class="summary-value">1250</p>"#));
    assert!(body.contains(r#"<p class="summary-value">$87.50</p>"#));
    assert!(body.contains(r#"<p class="summary-value">64.2%</p>"#));
    assert!(body.contains(r#"<p class="summary-value">18</p>"#));
}

#[actix_rt::test]
async fn test_missing_scalars_display_as_zero() {
    let row = DonorAnalytics { total_donors: None, average_donation: None, ..analytics() };
    let (status, body) = fetch_page(backend_with(vec![row])).await;
    assert_eq!(status, 200);
    assert!(body.contains(r#"<p class="summary-value">0</p>"#));
    assert!(body.contains(r#"<p class="summary-value">$0.00</p>"#));
}

#[actix_rt::test]
async fn test_chart_has_one_bar_per_month_in_order() {
    let (_, body) = fetch_page(backend_with(vec![analytics()])).await;
    let jan = body.find(r#"data-month="Jan""#).expect("Jan bar");
    let feb = body.find(r#"data-month="Feb""#).expect("Feb bar");
    assert!(jan < feb);
    assert_eq!(body.matches(r#"class="bar""#).count(), 2);
    // 150 is the maximum and fills the 252px plot; 100 is two thirds of it
    assert!(body.contains(r#"height="252""#));
    assert!(body.contains(r#"height="168""#));
}

#[actix_rt::test]
async fn test_top_donors_ranked_as_given() {
    let (_, body) = fetch_page(backend_with(vec![analytics()])).await;
    assert!(body.contains(r##"title="#1 Alice $500.00""##));
    assert!(body.contains(r##"title="#2 Bob $300.00""##));
    assert!(body.find("Alice").unwrap() < body.find("Bob").unwrap());
}

#[actix_rt::test]
async fn test_empty_arrays_render_placeholders() {
    let row = DonorAnalytics { monthly_trends: vec![], top_donors: vec![], ..analytics() };
    let (status, body) = fetch_page(backend_with(vec![row])).await;
    assert_eq!(status, 200);
    assert!(body.contains("No monthly trends yet."));
    assert!(body.contains("No donors ranked yet."));
    assert!(!body.contains("<svg"));
}

#[actix_rt::test]
async fn test_no_analytics_row_is_an_error() {
    let (status, body) = fetch_page(backend_with(vec![])).await;
    assert_eq!(status, 502);
    assert!(body.contains("Could not load analytics"));
    assert!(!body.contains("Total Donors"));
}

#[actix_rt::test]
async fn test_two_analytics_rows_is_an_error() {
    let (status, body) = fetch_page(backend_with(vec![analytics(), analytics()])).await;
    assert_eq!(status, 502);
    assert!(body.contains("Could not load analytics"));
}
