use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("ENROLLMENT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let upload_dir = std::env::var("ENROLLMENT_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let max_upload_bytes = match std::env::var("ENROLLMENT_MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .with_context(|| format!("ENROLLMENT_MAX_UPLOAD_BYTES must be a byte count, got {v:?}"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        if max_upload_bytes == 0 {
            bail!("ENROLLMENT_MAX_UPLOAD_BYTES must be greater than 0");
        }
        if upload_dir.as_os_str().is_empty() {
            bail!("ENROLLMENT_UPLOAD_DIR must not be empty");
        }

        Ok(Self {
            bind_addr,
            upload_dir,
            max_upload_bytes,
        })
    }
}
