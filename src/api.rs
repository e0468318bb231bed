use crate::config::Config;
use crate::models::{asset_url, BatchOutcome, GalleryItem, GenerationRequest, GenerationResult};
use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const USER_AGENT: &str = concat!("meme-forge-gui/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    /// Text shown in a view: validation and server messages verbatim, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RequestError::Validation(message) => (*message).to_string(),
            RequestError::Server { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for the meme backend. Calls run on gpui's background executor.
pub struct MemeForgeService {
    client: Client,
    api_url: Url,
    origin: String,
}

impl MemeForgeService {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            origin: config.origin(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // Config only accepts base urls, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn asset_url(&self, path: &str) -> String {
        asset_url(&self.origin, path)
    }

    pub fn health_check(&self) -> Result<(), RequestError> {
        let url = self.endpoint(&["health"]);
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        check_status(resp)?;
        Ok(())
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, RequestError> {
        let url = self.endpoint(&["generate"]);
        log::debug!(
            "POST {} style={:?} mood={:?}",
            url,
            request.style(),
            request.mood()
        );
        let resp = self.client.post(url).json(request).send()?;
        let result: GenerationResult = check_status(resp)?.json()?;
        log::info!("generated meme at {}", result.image_path);
        Ok(result)
    }

    // No view issues batches; kept for parity with the backend contract.
    #[allow(dead_code)]
    pub fn batch_generate(&self, situations: &[String]) -> Result<BatchOutcome, RequestError> {
        let url = self.endpoint(&["batch"]);
        log::debug!("POST {} ({} situations)", url, situations.len());
        let resp = self
            .client
            .post(url)
            .json(&json!({ "situations": situations }))
            .send()?;
        let outcome: BatchOutcome = check_status(resp)?.json()?;
        log::info!(
            "batch generated {} of {} memes",
            outcome.generated,
            outcome.total
        );
        Ok(outcome)
    }

    pub fn list_memes(&self) -> Result<Vec<GalleryItem>, RequestError> {
        let url = self.endpoint(&["memes"]);
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        let data: Value = check_status(resp)?.json()?;
        Ok(parse_gallery(&data))
    }

    pub fn delete_meme(&self, filename: &str) -> Result<(), RequestError> {
        let url = self.endpoint(&["memes", filename]);
        log::debug!("DELETE {}", url);
        let resp = self.client.delete(url).send()?;
        check_status(resp)?;
        log::info!("deleted meme {}", filename);
        Ok(())
    }

    /// Fetches an asset and writes it into `dest_dir` under its own file name.
    ///
    /// An existing file is never replaced; the copy gets a ` (n)` suffix.
    pub fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, RequestError> {
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        let bytes = check_status(resp)?.bytes()?;

        let name = url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("meme.png");
        fs::create_dir_all(dest_dir)?;
        let (path, mut file) = create_unique(dest_dir, name)?;
        file.write_all(&bytes)?;
        log::info!("saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

fn create_unique(dir: &Path, name: &str) -> std::io::Result<(PathBuf, File)> {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    for n in 0u32.. {
        let candidate = match (n, ext) {
            (0, _) => name.to_string(),
            (n, Some(ext)) => format!("{} ({}).{}", stem, n, ext),
            (n, None) => format!("{} ({})", stem, n),
        };
        let path = dir.join(candidate);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free file name for {}", name),
    ))
}

fn check_status(resp: Response) -> Result<Response, RequestError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<ErrorBody>()
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty());
    log::warn!("request failed with {}: {:?}", status, message);

    Err(match message {
        Some(message) => RequestError::Server {
            status: status.as_u16(),
            message,
        },
        None => RequestError::Status {
            status: status.as_u16(),
        },
    })
}

/// Reads `{memes: [...]}`; anything else is an empty gallery.
fn parse_gallery(data: &Value) -> Vec<GalleryItem> {
    let Some(entries) = data.get("memes").and_then(Value::as_array) else {
        log::warn!("gallery payload has no 'memes' list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("skipping malformed gallery entry {}: {}", entry, e);
                None
            }
        })
        .collect()
}
