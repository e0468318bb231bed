use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const API_URL_ENV: &str = "MEME_FORGE_API_URL";
const TIMEOUT_ENV: &str = "MEME_FORGE_TIMEOUT_SECS";

/// On-disk shape of `config.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: Url,
    pub timeout: Duration,
    pub download_dir: PathBuf,
}

impl Config {
    /// Reads `<config dir>/meme-forge/config.json` and applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = dirs::config_dir().map(|dir| dir.join("meme-forge").join("config.json"));
        let overrides = Overrides {
            api_url: std::env::var(API_URL_ENV).ok(),
            timeout_secs: std::env::var(TIMEOUT_ENV).ok(),
        };
        Self::from_sources(path.as_deref(), overrides)
    }

    fn from_sources(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match path {
            Some(path) if path.exists() => {
                log::debug!("reading config from {}", path.display());
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str::<ConfigFile>(&raw)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            _ => ConfigFile::default(),
        };

        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&api_url)?;

        let timeout_secs = match overrides.timeout_secs {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of seconds", TIMEOUT_ENV))?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            bail!("request timeout must be at least one second");
        }

        let download_dir = file
            .download_dir
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            download_dir,
        })
    }

    /// Scheme, host and port plus any path prefix in front of the trailing `api` segment.
    pub fn origin(&self) -> String {
        let url = self.api_url.as_str().trim_end_matches('/');
        url.strip_suffix("/api").unwrap_or(url).to_string()
    }
}

#[derive(Debug, Default)]
struct Overrides {
    api_url: Option<String>,
    timeout_secs: Option<String>,
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API url '{}'", raw))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        bail!("API url '{}' must be an absolute http(s) url", raw);
    }
    Ok(url)
}
