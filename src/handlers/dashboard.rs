use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike};

use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::{DashboardTemplate, PageContext, navigation};

const PATH: &str = "/admin";

fn greeting_for_hour(hour: u32, username: &str) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {username}")
}

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, PATH)?;
    let greeting = greeting_for_hour(Local::now().hour(), &ctx.username);
    let pages = navigation(PATH).into_iter().filter(|link| link.url != PATH).collect();

    render(DashboardTemplate { ctx, greeting, pages })
}
