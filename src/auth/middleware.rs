use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse, ResponseError,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::auth::session::current_user;
use crate::errors::AppError;

/// Admin guard for the route table.
///
/// Anonymous sessions and sessions that cannot be decoded are redirected to
/// /login; signed-in users without the admin role get 403.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let denial = match current_user(&session) {
        Ok(Some(user)) if user.is_admin() => None,
        Ok(Some(user)) => Some(
            AppError::PermissionDenied(format!(
                "{} for '{}' (role '{}')",
                req.path(),
                user.username,
                user.role
            ))
            .error_response(),
        ),
        Ok(None) => Some(redirect_to_login()),
        Err(e) => {
            log::warn!("Session lookup failed on {}: {e}", req.path());
            Some(redirect_to_login())
        }
    };

    if let Some(response) = denial {
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

fn redirect_to_login() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish()
}
