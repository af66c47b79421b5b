use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::io;

use pagatron::constants::config;
use pagatron::ledger::Ledger;
use pagatron::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let database_url = config::get_database_url().map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "DATABASE_URL environment variable is required")
    })?;

    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(config::get_db_max_connections())
        .min_connections(config::get_db_min_connections())
        .acquire_timeout(config::get_db_acquire_timeout())
        .sqlx_logging(false);

    let db: DatabaseConnection = Database::connect(options).await.map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        io::Error::other(e)
    })?;
    log::info!("Database connected");

    if config::run_migrations() {
        Migrator::up(&db, None).await.map_err(|e| {
            log::error!("Failed to apply migrations: {}", e);
            io::Error::other(e)
        })?;
        log::info!("Migrations applied");
    }

    let ledger = Ledger::new(db.clone());
    let allowed_origins = config::get_allowed_origins();
    let server_address = config::get_server_address();
    log::info!("Starting Pagatron API server on http://{}", server_address);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(ledger.clone()))
            .service(routes::api::configure_routes())
    })
    .bind(&server_address)?
    .run()
    .await
}
