use anyhow::{bail, Context, Result};

/// Where theme records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// `<THEMES_DIR>/<id>.json` on the local filesystem.
    Fs { dir: String },
    /// `<THEMES_PREFIX><id>.json` in an S3 (or MinIO) bucket.
    S3 {
        bucket: String,
        prefix: String,
        endpoint: Option<String>,
        region: String,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    },
}

/// Printable page sizes supported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Letter,
    A4,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub store: StoreBackend,
    pub store_timeout_secs: u64,
    pub page_size: PageSize,
    pub font_max_pt: u8,
    pub font_min_pt: u8,
    /// Fixed seed for board draws; unset means OS-seeded randomness.
    pub board_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store = match optional_env("THEME_STORE").as_deref() {
            None | Some("fs") => StoreBackend::Fs {
                dir: optional_env("THEMES_DIR").unwrap_or_else(|| "bingo_items".to_string()),
            },
            Some("s3") => StoreBackend::S3 {
                bucket: require_env("THEMES_BUCKET")?,
                prefix: optional_env("THEMES_PREFIX").unwrap_or_else(|| "themes/".to_string()),
                endpoint: optional_env("S3_ENDPOINT"),
                region: optional_env("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
                secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            },
            Some(other) => bail!("THEME_STORE must be 'fs' or 's3', got '{other}'"),
        };

        let page_size = match optional_env("PAGE_SIZE").as_deref() {
            None | Some("letter") => PageSize::Letter,
            Some("a4") => PageSize::A4,
            Some(other) => bail!("PAGE_SIZE must be 'letter' or 'a4', got '{other}'"),
        };

        let font_max_pt = parse_env("FONT_MAX_PT", 14u8)?;
        let font_min_pt = parse_env("FONT_MIN_PT", 6u8)?;
        validate_font_range(font_max_pt, font_min_pt)?;

        Ok(Config {
            port: parse_env("PORT", 5005u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store,
            store_timeout_secs: parse_env("STORE_TIMEOUT_SECS", 5u64)?,
            page_size,
            font_max_pt,
            font_min_pt,
            board_seed: optional_env("BOARD_SEED")
                .map(|raw| raw.trim().parse::<u64>())
                .transpose()
                .context("BOARD_SEED must be an unsigned integer")?,
        })
    }
}

fn validate_font_range(max: u8, min: u8) -> Result<()> {
    if min == 0 {
        bail!("FONT_MIN_PT must be at least 1");
    }
    if min > max {
        bail!("FONT_MIN_PT ({min}) must not exceed FONT_MAX_PT ({max})");
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
