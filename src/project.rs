//! Projects: what the editor opens, saves, and lists on the welcome screen.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::engine::Scene;

/// File name of the project document inside a project directory.
pub const PROJECT_FILE: &str = "project.json";

pub const DEFAULT_PROJECT_NAME: &str = "MyHyperGame";
pub const DEFAULT_PROJECT_DIR: &str = "~/Documents/ForgeProjects/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub scene: Scene,
    #[serde(default)]
    pub assets: AssetCatalog,
    /// Where the project was read from / will be written to.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Project {
    /// A fresh project: empty scene, starter asset catalog.
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Project {
            name: name.to_string(),
            scene: Scene::default(),
            assets: AssetCatalog::seeded(),
            path: path.into(),
        }
    }

    /// Project file for a new project called `name` created under `dir`.
    pub fn file_in(dir: &str, name: &str) -> PathBuf {
        expand_home(dir).join(name).join(PROJECT_FILE)
    }

    /// Open `path`. A missing file yields a new, unsaved project named after
    /// its directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let name = guess_name(path);
            info!("{} does not exist, starting new project {name}", path.display());
            return Ok(Project::new(&name, path));
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut project: Project = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        project.path = path.to_path_buf();
        project.assets.resync_ids();
        project.scene.clear_runtime();
        info!(
            "opened {} ({} objects, {} assets)",
            project.name,
            project.scene.len(),
            project.assets.all().len()
        );
        Ok(project)
    }

    /// Write the project to `self.path`, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!("saved {} to {}", self.name, self.path.display());
        Ok(())
    }
}

fn guess_name(path: &Path) -> String {
    let stem = if path.file_name().and_then(|n| n.to_str()) == Some(PROJECT_FILE) {
        path.parent().and_then(|p| p.file_name())
    } else {
        path.file_stem()
    };
    stem.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}

/// Expand a leading `~/` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(rest)
        }
        None => PathBuf::from(path),
    }
}

// ---------------------------------------------------------------------------
// Recent projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProject {
    pub name: String,
    pub path: String,
    pub last_opened: String,
}

/// Most-recently-opened list shown on the welcome screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentProjects {
    pub entries: Vec<RecentProject>,
    file: Option<PathBuf>,
}

const MAX_RECENT: usize = 8;

impl RecentProjects {
    /// The sample list shown before anything has been opened.
    pub fn samples() -> Vec<RecentProject> {
        [
            ("Neon Runner", "NeonRunner", "2 hours ago"),
            ("Stack Master", "StackMaster", "Yesterday"),
            ("Puzzle Rush", "PuzzleRush", "3 days ago"),
        ]
        .into_iter()
        .map(|(name, dir, when)| RecentProject {
            name: name.into(),
            path: format!("{DEFAULT_PROJECT_DIR}{dir}/{PROJECT_FILE}"),
            last_opened: when.into(),
        })
        .collect()
    }

    /// In-memory list that is never written anywhere.
    pub fn in_memory(entries: Vec<RecentProject>) -> Self {
        RecentProjects {
            entries,
            file: None,
        }
    }

    /// Load from `file`; a missing or unreadable file yields the samples.
    pub fn load(file: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&file) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("invalid recent project list ({e}), using samples");
                    Self::samples()
                }
            },
            Err(_) => Self::samples(),
        };
        RecentProjects {
            entries,
            file: Some(file),
        }
    }

    /// Move `project` to the top of the list.
    pub fn touch(&mut self, project: &Project) {
        let path = project.path.display().to_string();
        self.entries.retain(|e| expand_home(&e.path) != project.path && e.path != path);
        self.entries.insert(
            0,
            RecentProject {
                name: project.name.clone(),
                path,
                last_opened: "Just now".into(),
            },
        );
        self.entries.truncate(MAX_RECENT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Persist the list if it is file-backed.
    pub fn save(&self) -> Result<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };
        if let Some(dir) = file.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ObjectKind, ObjectRepository};

    #[test]
    fn test_save_then_open() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Game").join(PROJECT_FILE);

        let mut project = Project::new("Game", &path);
        let mut repo = ObjectRepository::new(std::mem::take(&mut project.scene));
        repo.add(&ObjectKind::Box);
        repo.add(&ObjectKind::Text);
        project.scene = repo.into_scene();
        project.assets.create_folder("Levels", None);
        project.save()?;

        let loaded = Project::open(&path)?;
        assert_eq!(loaded, project);
        Ok(())
    }

    #[test]
    fn test_runtime_state_is_not_loaded() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(
            &path,
            r#"{"name":"Demo","scene":{"objects":[{"id":"a","name":"Box_1","type":"Box",
               "position":{"x":50,"y":50},"runtime":{"vx":1,"vy":2,"vr":3}}]}}"#,
        )?;
        let project = Project::open(&path)?;
        assert!(project.scene.objects[0].runtime.is_none());
        assert_eq!(project.assets, AssetCatalog::seeded());
        Ok(())
    }

    #[test]
    fn test_missing_file_starts_new_project() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("NeonRunner").join(PROJECT_FILE);
        let project = Project::open(&path)?;
        assert_eq!(project.name, "NeonRunner");
        assert!(project.scene.is_empty());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "{ not json")?;
        let err = Project::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
        Ok(())
    }

    #[test]
    fn test_recent_touch_and_persist() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("recent.json");

        let mut recent = RecentProjects::load(file.clone());
        assert_eq!(recent.entries, RecentProjects::samples());

        let project = Project::new("Fresh", dir.path().join(PROJECT_FILE));
        recent.touch(&project);
        recent.touch(&project);
        assert_eq!(recent.entries.len(), 4);
        assert_eq!(recent.entries[0].name, "Fresh");
        recent.save()?;

        let reloaded = RecentProjects::load(file.clone());
        assert_eq!(reloaded.entries, recent.entries);

        recent.clear();
        recent.save()?;
        assert!(RecentProjects::load(file).entries.is_empty());
        Ok(())
    }

    #[test]
    fn test_project_file_layout() {
        let path = Project::file_in("/tmp/forge", "Game");
        assert_eq!(path, PathBuf::from("/tmp/forge/Game/project.json"));
    }
}
