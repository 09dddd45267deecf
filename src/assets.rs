//! Asset catalog: the project's folders and imported files.
//!
//! A flat list of entries, each pointing at its parent folder by id
//! (`None` = root). Imports never fail on an unknown file type; they fall
//! back to the image category.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Audio,
    Video,
    Image,
    Pdf,
    Script,
    Folder,
}

impl AssetKind {
    /// Classify an imported file. The mime type wins when it names audio or
    /// video; otherwise the extension decides, defaulting to image.
    pub fn classify(name: &str, mime: Option<&str>) -> AssetKind {
        let mime = mime.map(str::to_owned).or_else(|| guess_mime(name));
        if let Some(mime) = mime.as_deref() {
            if mime.starts_with("audio/") {
                return AssetKind::Audio;
            }
            if mime.starts_with("video/") {
                return AssetKind::Video;
            }
        }
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            AssetKind::Pdf
        } else if lower.ends_with(".js") {
            AssetKind::Script
        } else {
            AssetKind::Image
        }
    }

    /// Single-character icon used by the asset browser.
    pub fn icon(self) -> char {
        match self {
            AssetKind::Audio => '♪',
            AssetKind::Video => '▶',
            AssetKind::Image => '▣',
            AssetKind::Pdf => '¶',
            AssetKind::Script => 'ƒ',
            AssetKind::Folder => '▸',
        }
    }
}

fn guess_mime(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "wav" | "mp3" | "ogg" | "flac" | "aac" | "m4a" => "audio",
        "mp4" | "webm" | "mov" | "mkv" | "avi" => "video",
        _ => return None,
    };
    Some(format!("{mime}/{ext}"))
}

/// Size label for an imported file: megabytes with two decimals.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub size: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
    /// Folder currently shown by the browser. Not saved.
    #[serde(skip)]
    current: Option<String>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        AssetCatalog {
            assets: Vec::new(),
            current: None,
            next_id: 1,
        }
    }

    /// The starter catalog every new project gets.
    pub fn seeded() -> Self {
        let entry = |id: &str, name: &str, kind, size: &str, parent: Option<&str>| Asset {
            id: id.into(),
            name: name.into(),
            kind,
            size: size.into(),
            parent_id: parent.map(str::to_owned),
        };
        Self::from_assets(vec![
            entry("1", "SFX", AssetKind::Folder, "--", None),
            entry("2", "Textures", AssetKind::Folder, "--", None),
            entry("3", "Background.png", AssetKind::Image, "4.5 MB", None),
            entry("4", "PlayerJump.wav", AssetKind::Audio, "1.2 MB", Some("1")),
            entry("5", "PlayerController.js", AssetKind::Script, "12 KB", None),
        ])
    }

    pub fn from_assets(assets: Vec<Asset>) -> Self {
        let mut catalog = AssetCatalog {
            assets,
            current: None,
            next_id: 1,
        };
        catalog.resync_ids();
        catalog
    }

    /// Continue numbering after the highest numeric id present. Called after
    /// deserializing, since the counter is not saved.
    pub fn resync_ids(&mut self) {
        let max = self
            .assets
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_id = max + 1;
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn all(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Entries whose parent is `parent`, in insertion order.
    pub fn children(&self, parent: Option<&str>) -> Vec<&Asset> {
        self.assets
            .iter()
            .filter(|a| a.parent_id.as_deref() == parent)
            .collect()
    }

    /// Create a folder under `parent`. Blank names are ignored.
    pub fn create_folder(&mut self, name: &str, parent: Option<&str>) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.fresh_id();
        self.assets.push(Asset {
            id: id.clone(),
            name: name.to_string(),
            kind: AssetKind::Folder,
            size: "--".into(),
            parent_id: parent.map(str::to_owned),
        });
        info!("created asset folder {name}");
        Some(id)
    }

    /// Register an imported file.
    pub fn import_file(
        &mut self,
        name: &str,
        mime: Option<&str>,
        bytes: u64,
        parent: Option<&str>,
    ) -> String {
        let id = self.fresh_id();
        let kind = AssetKind::classify(name, mime);
        self.assets.push(Asset {
            id: id.clone(),
            name: name.to_string(),
            kind,
            size: format_size(bytes),
            parent_id: parent.map(str::to_owned),
        });
        info!("imported {name} as {kind:?}");
        id
    }

    /// Import a file from disk by reading its name and size.
    pub fn import_path(&mut self, path: &Path, parent: Option<&str>) -> Result<String> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        Ok(self.import_file(&name, None, meta.len(), parent))
    }

    // -----------------------------------------------------------------------
    // Browser navigation
    // -----------------------------------------------------------------------

    pub fn current_folder(&self) -> Option<&Asset> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_children(&self) -> Vec<&Asset> {
        self.children(self.current.as_deref())
    }

    /// Open a folder. Non-folders are ignored.
    pub fn enter(&mut self, id: &str) -> bool {
        match self.get(id) {
            Some(a) if a.kind == AssetKind::Folder => {
                self.current = Some(id.to_string());
                true
            }
            _ => false,
        }
    }

    /// Go to the parent of the current folder.
    pub fn up(&mut self) {
        self.current = self.current_folder().and_then(|f| f.parent_id.clone());
    }

    pub fn go_root(&mut self) {
        self.current = None;
    }

    /// Folder names from the root down to the current folder.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut cursor = self.current_folder();
        while let Some(folder) = cursor {
            trail.push(folder.name.as_str());
            // Guard against parent cycles in hand-edited project files.
            if trail.len() > self.assets.len() {
                break;
            }
            cursor = folder.parent_id.as_deref().and_then(|id| self.get(id));
        }
        trail.reverse();
        trail
    }
}
