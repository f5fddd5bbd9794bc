use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the extraction backend
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Scratch directory for transient uploaded files (default: "temp_files")
    pub scratch_dir: PathBuf,

    /// Address the HTTP server binds to (default: 127.0.0.1:8000)
    pub listen_addr: SocketAddr,

    /// Maximum request body size in bytes (default: 256 MB)
    pub max_body_size: usize,

    /// Extractor type: "pdf" or "noop" (default: "pdf")
    pub extractor_type: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("temp_files"),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_body_size: 256 * 1024 * 1024, // 256 MB
            extractor_type: "pdf".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.scratch_dir),

            listen_addr: env::var("LISTEN_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.listen_addr),

            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_body_size),

            extractor_type: env::var("EXTRACTOR_TYPE").unwrap_or(default.extractor_type),
        }
    }

    /// Create config for development (stub extraction, local defaults)
    pub fn development() -> Self {
        Self {
            extractor_type: "noop".to_string(),
            ..Self::default()
        }
    }
}
