pub mod app_state;
pub mod builder;
pub mod security_config;

pub use app_state::AppState;
pub use builder::StateBuilder;
pub use security_config::SecurityConfig;
