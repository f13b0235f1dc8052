use std::sync::Arc;

use actix_web::{App, HttpServer, cookie::Key, middleware, web};
use sqlx::postgres::PgPoolOptions;

use donor_dashboard::auth::session::session_middleware;
use donor_dashboard::backend::PgBackend;
use donor_dashboard::config::{AdminCreatePolicy, AppConfig};
use donor_dashboard::errors;
use donor_dashboard::routes;
use donor_dashboard::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("Database migrations complete");

    // Session encryption key; a stable SESSION_KEY keeps sessions across restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    if config.admin_create_policy == AdminCreatePolicy::Open {
        log::warn!("/admin/create is reachable without signing in (ADMIN_CREATE_POLICY=open)");
    }

    let backend = Arc::new(PgBackend::new(pool));
    let state = web::Data::new(AppState::new(&config, backend.clone(), backend));
    let policy = config.admin_create_policy;
    let cookie_secure = config.cookie_secure;

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone(), cookie_secure))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(|cfg| routes::configure(cfg, policy))
            // Default 404 handler (must be registered last)
            .default_service(web::to(errors::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
