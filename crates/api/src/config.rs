use std::path::PathBuf;

use folio_db::ReadPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Location of the JSON record document.
    pub data_file: PathBuf,
    /// Directory holding uploaded images, served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Maximum request body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Behaviour of record reads when the document is unreadable.
    pub read_policy: ReadPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_FILE`            | `database/project.json`    |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `STORE_READ_POLICY`    | `fail-open`                |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_file = std::env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("database/project.json"));

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let read_policy = match std::env::var("STORE_READ_POLICY") {
            Ok(value) => ReadPolicy::from_name(&value).unwrap_or_else(|| {
                panic!("STORE_READ_POLICY must be 'fail-open' or 'fail-closed', got '{value}'")
            }),
            Err(_) => ReadPolicy::default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_file,
            upload_dir,
            max_upload_bytes,
            read_policy,
        }
    }

    /// Whether CORS is configured to allow any origin.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
