mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
mod test_env;

pub use loader::{ENV_FILE_CANDIDATES, default_config_path, load_dotenv};
pub use schema::{Config, GatewayConfig, SessionConfig};
