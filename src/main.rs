use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use quiz_server::{
    app_state::AppState, config::Config, handlers, middleware::SessionMiddleware,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    config.warn_for_production();

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let cookie_name = config.session_cookie_name.clone();
    let cookie_secure = config.session_cookie_secure;

    let state = AppState::new(config).await.map_err(io::Error::other)?;
    let state = web::Data::new(state);

    log::info!("starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(&cookie_name, cookie_secure))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
