use {
    std::{fs, path::PathBuf},
    serde::Deserialize,
    crate::error::ServerError,
};

const DEFAULT_PORT: u16 = 8080;

#[derive(Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub http: Option<HttpConfig>,
    pub database: Option<DatabaseConfig>,
}

#[derive(Deserialize, Clone)]
pub struct HttpConfig {
    pub port: Option<u16>,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: Option<String>,
    pub in_memory: Option<bool>,
}

impl ServerConfig {
    pub fn load(file_path: PathBuf) -> Result<Self, ServerError> {
        let raw = fs::read(&file_path)
            .map_err(|err| ServerError::ConfigRead { reason: err.to_string() })?;
        serde_yml::from_slice(&raw)
            .map_err(|err| ServerError::ConfigParse { reason: err.to_string() })
    }

    pub fn port(&self) -> u16 {
        self.http.as_ref().and_then(|v| v.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn database_path(&self) -> Option<&str> {
        let database = self.database.as_ref()?;
        if database.in_memory.unwrap_or(false) {
            return None;
        }
        database.path.as_deref()
    }
}
