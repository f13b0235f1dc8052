use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub error: Option<String>,
    pub flash: Option<String>,
    pub username: String,
}

/// Standalone page: rendered outside the admin layout because the caller may
/// not be signed in.
#[derive(Template)]
#[template(path = "admin/create.html")]
pub struct CreateAdminTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub errors: Vec<String>,
    pub username: String,
    pub email: String,
}
