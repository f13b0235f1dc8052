use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::{AppError, render_with_status};
use crate::queries;
use crate::state::AppState;
use crate::templates_structs::{DonorListTemplate, DonorRow, PageContext, ViewState};

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/admin/donors")?;
    let query = queries::donors(&state).await;
    let view = ViewState::of(&query);
    let donors = query
        .data()
        .map(|donors| donors.iter().map(DonorRow::from).collect())
        .unwrap_or_default();

    let status = view.status();
    render_with_status(DonorListTemplate { ctx, state: view, donors }, status)
}
