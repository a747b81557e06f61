use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use todolist_api::{config::Config, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // 100 requests per 15 minutes per client IP: one token replenished
    // every 9 seconds, bursts of up to 100.
    let governor_conf = GovernorConfigBuilder::default()
        .seconds_per_request(9)
        .burst_size(100)
        .finish()
        .expect("valid rate limit configuration");

    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("starting server at {}", config.server_url());

    HttpServer::new(move || {
        // Cors is not Clone, so it is rebuilt per worker from the config.
        let cors = if config.allowed_origins.is_empty() {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            config.allowed_origins.iter().fold(
                Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(Governor::new(&governor_conf))
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
