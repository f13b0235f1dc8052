use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::set_flash;
use crate::auth::{csrf, password};
use crate::backend::BackendError;
use crate::config::AdminCreatePolicy;
use crate::errors::{AppError, render};
use crate::models::account::CreateAdminForm;
use crate::models::{ADMIN_ROLE, NewAdminAccount};
use crate::state::AppState;
use crate::templates_structs::CreateAdminTemplate;

fn create_form(
    state: &AppState,
    session: &Session,
    errors: Vec<String>,
    form: Option<&CreateAdminForm>,
) -> Result<HttpResponse, AppError> {
    let tmpl = CreateAdminTemplate {
        app_name: state.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        errors,
        username: form.map(|f| f.username.trim().to_string()).unwrap_or_default(),
        email: form.map(|f| f.email.trim().to_string()).unwrap_or_default(),
    };
    render(tmpl)
}

pub async fn form(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    create_form(&state, &session, vec![], None)
}

pub async fn submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CreateAdminForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = form.validate();
    if !errors.is_empty() {
        return create_form(&state, &session, errors, Some(&*form));
    }

    let new = NewAdminAccount {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password_hash: password::hash_password(&form.password)?,
        role: ADMIN_ROLE.to_string(),
    };

    match state.accounts.create(&new).await {
        Ok(id) => {
            if state.admin_create_policy == AdminCreatePolicy::Open {
                log::warn!("Admin account '{}' (id {id}) created through the unguarded create page", new.username);
            } else {
                log::info!("Admin account '{}' (id {id}) created", new.username);
            }
            set_flash(&session, "Admin account created. Please sign in.");
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/login"))
                .finish())
        }
        Err(BackendError::Conflict(_)) => create_form(
            &state,
            &session,
            vec!["Username already exists".to_string()],
            Some(&*form),
        ),
        Err(e) => Err(e.into()),
    }
}
