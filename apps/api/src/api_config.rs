use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use warden_core::AppError;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_API_HOST: &str = "127.0.0.1";
const DEFAULT_API_PORT: u16 = 3001;

/// Sub-command selected by the first CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    Seed,
}

impl ApiCommand {
    fn parse(argument: Option<&str>) -> Result<Self, AppError> {
        match argument {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("seed") => Ok(Self::Seed),
            Some(other) => Err(AppError::Validation(format!(
                "unknown command '{other}', expected 'serve', 'migrate' or 'seed'"
            ))),
        }
    }
}

/// Persistence backend behind the repository ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub store: StoreBackend,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = env::args().nth(1);
        Self::from_source(command.as_deref(), |name| env::var(name).ok())
    }

    fn from_source(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let command = ApiCommand::parse(command)?;

        let store = match lookup("WARDEN_STORE")
            .unwrap_or_else(|| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StoreBackend::Postgres {
                database_url: required_non_empty(&lookup, "DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "WARDEN_STORE must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if store == StoreBackend::Memory && command == ApiCommand::Migrate {
            return Err(AppError::Validation(
                "the migrate command requires WARDEN_STORE=postgres".to_owned(),
            ));
        }

        let frontend_url = lookup("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());
        let bootstrap_token = required_non_empty(&lookup, "AUTH_BOOTSTRAP_TOKEN")?;
        let api_host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|error| {
                AppError::Validation(format!("invalid API_PORT '{value}': {error}"))
            })?,
            None => DEFAULT_API_PORT,
        };
        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            command,
            store,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
