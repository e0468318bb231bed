use crate::api::RequestError;
use crate::models::GalleryItem;
use std::path::PathBuf;

pub const LOAD_FAILED: &str = "Failed to load memes";
pub const DELETE_FAILED: &str = "Failed to delete meme";
pub const DOWNLOAD_FAILED: &str = "Failed to download meme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GalleryPhase {
    #[default]
    Loading,
    Loaded,
    LoadFailed,
}

/// What the gallery body shows once the phase is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryContent {
    Loading,
    Empty,
    Items,
    /// Load failed with nothing earlier to show; only the error is rendered.
    Failed,
}

#[derive(Debug)]
pub enum GalleryEvent {
    Refresh,
    Loaded {
        load_id: u64,
        outcome: Result<Vec<GalleryItem>, RequestError>,
    },
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Deleted {
        filename: String,
        outcome: Result<(), RequestError>,
    },
    Download(String),
    Downloaded(Result<PathBuf, RequestError>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryCommand {
    FetchList { load_id: u64 },
    Delete { filename: String },
    Download { url: String },
}

#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    pub phase: GalleryPhase,
    pub items: Vec<GalleryItem>,
    pub error: Option<String>,
    /// Card currently asking "delete?".
    pub confirming: Option<String>,
    pub deleting: Option<String>,
    pub notice: Option<String>,
    load_id: u64,
}

impl GalleryState {
    pub fn content(&self) -> GalleryContent {
        match self.phase {
            GalleryPhase::Loading => GalleryContent::Loading,
            GalleryPhase::LoadFailed if self.items.is_empty() => GalleryContent::Failed,
            _ if self.items.is_empty() => GalleryContent::Empty,
            _ => GalleryContent::Items,
        }
    }

    pub fn update(&mut self, event: GalleryEvent) -> Option<GalleryCommand> {
        match event {
            GalleryEvent::Refresh => {
                self.load_id += 1;
                self.phase = GalleryPhase::Loading;
                self.error = None;
                Some(GalleryCommand::FetchList {
                    load_id: self.load_id,
                })
            }
            GalleryEvent::Loaded { load_id, outcome } => {
                if load_id != self.load_id || self.phase != GalleryPhase::Loading {
                    return None;
                }
                match outcome {
                    Ok(items) => {
                        self.items = items;
                        self.phase = GalleryPhase::Loaded;
                    }
                    Err(e) => {
                        self.error = Some(e.user_message(LOAD_FAILED));
                        self.phase = GalleryPhase::LoadFailed;
                    }
                }
                None
            }
            GalleryEvent::RequestDelete(filename) => {
                if self.deleting.is_none() {
                    self.confirming = Some(filename);
                }
                None
            }
            GalleryEvent::CancelDelete => {
                self.confirming = None;
                None
            }
            GalleryEvent::ConfirmDelete => {
                let filename = self.confirming.take()?;
                self.deleting = Some(filename.clone());
                self.error = None;
                Some(GalleryCommand::Delete { filename })
            }
            GalleryEvent::Deleted { filename, outcome } => {
                if self.deleting.as_deref() != Some(filename.as_str()) {
                    return None;
                }
                self.deleting = None;
                match outcome {
                    Ok(()) => self.items.retain(|item| item.filename != filename),
                    Err(e) => self.error = Some(e.user_message(DELETE_FAILED)),
                }
                None
            }
            GalleryEvent::Download(url) => {
                self.notice = None;
                Some(GalleryCommand::Download { url })
            }
            GalleryEvent::Downloaded(outcome) => {
                self.notice = Some(match outcome {
                    Ok(path) => format!("Saved to {}", path.display()),
                    Err(e) => e.user_message(DOWNLOAD_FAILED),
                });
                None
            }
        }
    }
}
