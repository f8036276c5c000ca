use std::fs::Metadata;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::paths;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "m4a", "ogg", "wma"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Classifies a lowercase extension (without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if VIDEO_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Audio)
        } else {
            None
        }
    }

    /// Lenient query parsing: anything but `video`/`audio` means "no filter".
    pub fn parse_filter(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("video") => Some(MediaKind::Video),
            Some("audio") => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// One discovered media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: String,
    pub path: String,
    pub name: String,
    pub directory: String,
    pub folder_name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub size: u64,
    pub modified_time: Option<DateTime<Utc>>,
    pub extension: String,
}

impl MediaRecord {
    /// Builds a record from a raw (possibly backslash-separated) path.
    /// Returns `None` when the extension is not a known media type.
    pub fn new(raw_path: &str, size: u64, modified_time: Option<DateTime<Utc>>) -> Option<Self> {
        let path = paths::normalize(raw_path);
        let name = paths::file_name(&path).to_string();
        let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        let kind = MediaKind::from_extension(&extension)?;
        let directory = paths::parent_dir(&path);
        let folder_name = paths::last_segment(&directory).to_string();
        Some(Self {
            id: paths::encode_id(&path),
            path,
            name,
            directory,
            folder_name,
            kind,
            size,
            modified_time,
            extension,
        })
    }

    pub fn from_metadata(raw_path: &str, md: &Metadata) -> Option<Self> {
        let modified = md.modified().ok().map(DateTime::<Utc>::from);
        Self::new(raw_path, md.len(), modified)
    }
}

/// Synthetic aggregate for one directory level; computed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "folder", rename_all = "camelCase")]
pub struct FolderNode {
    pub path: String,
    pub name: String,
    pub video_count: u64,
    pub audio_count: u64,
    pub subfolder_count: u64,
}

/// A browse entry: folders carry `"type": "folder"`, files carry their media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BrowseItem {
    Folder(FolderNode),
    File(MediaRecord),
}

impl BrowseItem {
    pub fn name(&self) -> &str {
        match self {
            BrowseItem::Folder(f) => &f.name,
            BrowseItem::File(r) => &r.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, BrowseItem::Folder(_))
    }
}

// DTOs for the HTTP surface

#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub count: usize,
    pub files: Vec<MediaRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseResponse {
    pub path: String,
    pub items: Vec<BrowseItem>,
    pub breadcrumbs: Vec<paths::Breadcrumb>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaListResponse {
    pub count: usize,
    pub files: Vec<MediaRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub folder: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
