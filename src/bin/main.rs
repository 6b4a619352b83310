use std::process;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::{Config, ConfigError, Environment, File};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use affiliates_flipkart::models::config::ServerConfig;
use affiliates_flipkart::repository::DieselRepository;
use affiliates_flipkart::routes::import::start_import;
use affiliates_flipkart::routes::main::{index, not_assigned};

/// Layered configuration: `config/default.yaml`, then `config/{APP_ENV}.yaml`,
/// then `APP__*` environment variables.
///
/// The shared settings (auth service link, session secret) are read from the
/// same sources as the importer's own.
fn load_config() -> Result<(ServerConfig, CommonServerConfig), ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

    let settings = Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let common_config = settings.clone().try_deserialize()?;
    let server_config = settings.try_deserialize()?;
    Ok((server_config, common_config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let (server_config, common_config) = match load_config() {
        Ok(configs) => configs,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    let secret_key = match Key::try_from(server_config.secret.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Secret must be at least 64 bytes long: {e}");
            process::exit(1);
        }
    };

    let tera = match Tera::new(&format!("{}/**/*", server_config.templates_dir)) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            process::exit(1);
        }
    };

    if !server_config.flipkart.native_api {
        log::warn!("Flipkart native api is disabled; imports will be rejected");
    }

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    let repo = web::Data::new(DieselRepository::new(pool));
    let tera = web::Data::new(tera);
    let server_config = web::Data::new(server_config);
    let common_config = web::Data::new(common_config);

    log::info!("Starting server at {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(tera.clone())
            .app_data(server_config.clone())
            .app_data(common_config.clone())
            .service(index)
            .service(not_assigned)
            .service(start_import)
    })
    .bind(bind_address)?
    .run()
    .await
}
