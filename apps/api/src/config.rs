use anyhow::{bail, Context, Result};

use crate::layout::PageSize;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    /// Largest accepted request body, picture included.
    pub max_upload_bytes: usize,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            page_size: parse_page_size(
                &std::env::var("PAGE_SIZE").unwrap_or_else(|_| "a4".to_string()),
            )?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

/// `a4`, `letter`, or a custom `<width>x<height>` in millimetres.
pub fn parse_page_size(value: &str) -> Result<PageSize> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "a4" => return Ok(PageSize::A4),
        "letter" => return Ok(PageSize::Letter),
        _ => {}
    }

    let Some((w, h)) = value.split_once('x') else {
        bail!("PAGE_SIZE must be 'a4', 'letter' or '<width>x<height>' in mm, got '{value}'");
    };
    let width_mm: f32 = w.trim().parse().context("PAGE_SIZE width must be a number")?;
    let height_mm: f32 = h.trim().parse().context("PAGE_SIZE height must be a number")?;
    // Anything smaller cannot fit the picture, header and one body line.
    if width_mm < 100.0 || height_mm < 150.0 {
        bail!("PAGE_SIZE {width_mm}x{height_mm}mm is too small (minimum 100x150)");
    }
    Ok(PageSize::Custom {
        width_mm,
        height_mm,
    })
}
