use config::{Config, Environment, File};
use dotenvy::dotenv;

use academy_admin::models::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let server_config = Config::builder()
        .add_source(File::with_name(&config_path).required(false))
        .add_source(Environment::default())
        .build()
        .and_then(Config::try_deserialize::<ServerConfig>)
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    academy_admin::run(server_config).await
}
