use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::chart::BarChart;
use crate::errors::{AppError, render_with_status};
use crate::queries;
use crate::state::AppState;
use crate::templates_structs::{
    EngagementAnalysisTemplate, PageContext, SummaryCard, TopDonorRow, ViewState,
};

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/admin/engagement-analysis")?;
    let query = queries::donor_analytics(&state).await;
    let view = ViewState::of(&query);

    let (cards, chart, top_donors) = match query.data() {
        Some(analytics) => (
            SummaryCard::from_analytics(analytics),
            BarChart::from_trends(&analytics.monthly_trends),
            TopDonorRow::ranked(&analytics.top_donors),
        ),
        None => (vec![], BarChart::from_trends(&[]), vec![]),
    };

    let status = view.status();
    let tmpl = EngagementAnalysisTemplate { ctx, state: view, cards, chart, top_donors };
    render_with_status(tmpl, status)
}
