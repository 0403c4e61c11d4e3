use crate::api_config::{ApiCommand, ApiConfig, StoreBackend};
use crate::api_services::build_memory_state;
use crate::state::AppState;

pub const TEST_FRONTEND_URL: &str = "http://localhost:3000";
pub const TEST_BOOTSTRAP_TOKEN: &str = "test-bootstrap-token";

pub fn memory_config() -> ApiConfig {
    ApiConfig {
        command: ApiCommand::Serve,
        store: StoreBackend::Memory,
        frontend_url: TEST_FRONTEND_URL.to_owned(),
        bootstrap_token: TEST_BOOTSTRAP_TOKEN.to_owned(),
        api_host: "127.0.0.1".to_owned(),
        api_port: 3001,
        cookie_secure: false,
    }
}

pub fn memory_state() -> AppState {
    build_memory_state(&memory_config())
}
