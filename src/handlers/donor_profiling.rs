use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::{AppError, render_with_status};
use crate::queries;
use crate::state::AppState;
use crate::templates_structs::{DonorProfilingTemplate, PageContext, ProfileRow, ViewState};

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/admin/donor-profiling")?;
    let query = queries::donor_profiles(&state).await;
    let view = ViewState::of(&query);
    let rows = query
        .data()
        .map(|profiles| profiles.iter().map(ProfileRow::from).collect())
        .unwrap_or_default();

    let status = view.status();
    render_with_status(DonorProfilingTemplate { ctx, state: view, rows }, status)
}
