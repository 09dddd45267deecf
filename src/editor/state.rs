use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use log::{info, warn};

use crate::assets::{Asset, AssetCatalog, AssetKind};
use crate::build::{BuildEvent, BuildJob};
use crate::engine::{ObjectId, ObjectRepository, Scene, SessionState, SimulationSession, Tick};
use crate::project::{expand_home, Project, RecentProjects, DEFAULT_PROJECT_DIR, DEFAULT_PROJECT_NAME};

use super::config::{config_dir, EditorConfig};

pub const BUILD_BADGE: &str = "Build v1.0.4 - stable";
pub const HOT_RELOAD_MESSAGE: &str = "Logic Synced with Engine Core";

/// Top menu bar: (title, items).
pub const MENUS: &[(&str, &[&str])] = &[
    ("File", &["New Project", "Open Project", "Save", "Build Settings", "Exit to Menu"]),
    ("Edit", &["Undo", "Redo", "Cut", "Copy", "Paste"]),
    ("Help", &["Documentation", "About Forge IDE"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Workspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Scene,
    Scripting,
    Assets,
    Architecture,
    Build,
}

impl EditorTab {
    pub const ALL: [EditorTab; 5] = [
        EditorTab::Scene,
        EditorTab::Scripting,
        EditorTab::Assets,
        EditorTab::Architecture,
        EditorTab::Build,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorTab::Scene => "Scene",
            EditorTab::Scripting => "Scripting",
            EditorTab::Assets => "Assets",
            EditorTab::Architecture => "Architecture",
            EditorTab::Build => "Build",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Select,
    Move,
    Rotate,
    Scale,
}

impl TransformMode {
    pub fn label(self) -> &'static str {
        match self {
            TransformMode::Select => "select",
            TransformMode::Move => "move",
            TransformMode::Rotate => "rotate",
            TransformMode::Scale => "scale",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteObject { id: ObjectId },
    ClearRecent,
    /// Leave without saving, either to the welcome screen or out of the app.
    DiscardChanges { quit: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFolder,
    ImportAsset,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::NewFolder => "Folder name",
            PromptKind::ImportAsset => "Import file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AddObject {
        selected: usize,
    },
    /// A dropdown from the top menu bar is open.
    Menu {
        menu: usize,
        item: usize,
    },
    Confirm {
        message: String,
        /// 0 = Yes, 1 = No
        selected: usize,
        action: ConfirmAction,
        /// Mode to restore when the user picks No or presses Esc.
        return_mode: Box<Mode>,
    },
    /// Single-line text entry shown in the status bar.
    Prompt {
        kind: PromptKind,
        buf: String,
        cursor: usize,
    },
    /// Welcome screen "New Project" form.
    NewProject {
        /// 0 = name, 1 = location
        field: usize,
        name: String,
        location: String,
    },
}

impl Mode {
    pub fn new_project_form() -> Self {
        Mode::NewProject {
            field: 0,
            name: DEFAULT_PROJECT_NAME.into(),
            location: DEFAULT_PROJECT_DIR.into(),
        }
    }
}

pub struct EditorState {
    pub screen: Screen,
    pub mode: Mode,
    pub config: EditorConfig,
    pub tab: EditorTab,
    pub transform: TransformMode,
    pub show_grid: bool,
    pub project_name: String,
    pub project_path: PathBuf,
    pub repo: ObjectRepository,
    pub assets: AssetCatalog,
    pub session: SimulationSession,
    pub build: BuildJob,
    pub recent: RecentProjects,
    pub recent_selected: usize,
    /// Highlighted row in the asset browser's current folder.
    pub asset_cursor: usize,
    pub docs_scroll: usize,
    pub dirty: bool,
    pub status_message: Option<String>,
    clock: Instant,
}

impl EditorState {
    /// Editor on the welcome screen with no project loaded.
    pub fn welcome(config: EditorConfig, recent: RecentProjects) -> Self {
        let show_grid = config.show_grid;
        EditorState {
            screen: Screen::Welcome,
            mode: Mode::Normal,
            config,
            tab: EditorTab::Scene,
            transform: TransformMode::Select,
            show_grid,
            project_name: String::new(),
            project_path: PathBuf::new(),
            repo: ObjectRepository::new(Scene::default()),
            assets: AssetCatalog::empty(),
            session: SimulationSession::new(),
            build: BuildJob::new(),
            recent,
            recent_selected: 0,
            asset_cursor: 0,
            docs_scroll: 0,
            dirty: false,
            status_message: None,
            clock: Instant::now(),
        }
    }

    /// Start the editor from the user's config, optionally opening `path`.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let recent = RecentProjects::load(config_dir().join("recent.json"));
        let mut state = EditorState::welcome(EditorConfig::load(), recent);
        if let Some(path) = path {
            state.load_project(Project::open(path)?);
        }
        Ok(state)
    }

    /// Milliseconds since the editor started. Monotonic.
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn has_project(&self) -> bool {
        !self.project_name.is_empty()
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Replace the open project and switch to the workspace.
    pub fn load_project(&mut self, project: Project) {
        self.session.ensure_stopped(self.repo.scene_mut());
        let Project { name, scene, assets, path } = project;
        self.repo = ObjectRepository::new(scene);
        self.assets = assets;
        self.project_name = name;
        self.project_path = path;
        self.screen = Screen::Workspace;
        self.mode = Mode::Normal;
        self.tab = EditorTab::Scene;
        self.asset_cursor = 0;
        self.docs_scroll = 0;
        self.dirty = false;
        self.remember_project();
        self.status_message = Some(format!("Opened {}", self.project_name));
    }

    /// Snapshot of the open project as it would be saved.
    pub fn to_project(&self) -> Project {
        Project {
            name: self.project_name.clone(),
            scene: self.repo.scene().clone(),
            assets: self.assets.clone(),
            path: self.project_path.clone(),
        }
    }

    /// Stops any running simulation first so kinematic state never reaches
    /// the file.
    pub fn save(&mut self) -> Result<()> {
        self.stop_simulation();
        self.to_project().save()?;
        self.dirty = false;
        self.remember_project();
        self.status_message = Some("Saved".into());
        Ok(())
    }

    fn remember_project(&mut self) {
        let project = self.to_project();
        self.recent.touch(&project);
        if let Err(e) = self.recent.save() {
            warn!("could not save recent projects: {e:#}");
        }
    }

    /// Create (but do not write) a new project `name` under `location`.
    pub fn create_project(&mut self, name: &str, location: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.status_message = Some("Project name is required".into());
            return false;
        }
        let location = if location.trim().is_empty() { DEFAULT_PROJECT_DIR } else { location.trim() };
        let path = Project::file_in(location, name);
        info!("creating project {name} at {}", path.display());
        self.load_project(Project::new(name, path));
        self.dirty = true;
        self.status_message = Some(format!("Created {name} (unsaved)"));
        true
    }

    pub fn open_recent(&mut self, index: usize) -> Result<()> {
        let Some(entry) = self.recent.entries.get(index) else {
            return Ok(());
        };
        let path = expand_home(&entry.path);
        let project = Project::open(&path)?;
        self.load_project(project);
        Ok(())
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        self.recent_selected = 0;
        if let Err(e) = self.recent.save() {
            warn!("could not save recent projects: {e:#}");
        }
    }

    pub fn exit_to_menu(&mut self) {
        self.stop_simulation();
        self.screen = Screen::Welcome;
        self.mode = Mode::Normal;
        self.recent_selected = 0;
        self.dirty = false;
        self.status_message = None;
    }

    // -----------------------------------------------------------------------
    // Simulation and build
    // -----------------------------------------------------------------------

    pub fn is_simulating(&self) -> bool {
        self.session.is_active()
    }

    pub fn toggle_simulation(&mut self, now_ms: f64) {
        let state = self.session.toggle(self.repo.scene_mut(), now_ms);
        self.status_message = Some(match state {
            SessionState::Running => "Simulating...".into(),
            SessionState::Stopped => "Simulation stopped, scene restored".into(),
        });
    }

    pub fn stop_simulation(&mut self) {
        self.session.ensure_stopped(self.repo.scene_mut());
    }

    /// Scene edits are refused while a preview runs, since stopping would
    /// discard them anyway.
    pub fn guard_edit(&mut self) -> bool {
        if self.is_simulating() {
            self.status_message = Some("Stop the simulation to edit the scene".into());
            return false;
        }
        true
    }

    pub fn start_build(&mut self, now_ms: f64) {
        if self.build.start(now_ms) {
            self.status_message = Some("Compiling Engine Core...".into());
        }
    }

    /// Whether the loop should keep redrawing without input.
    pub fn is_animating(&self) -> bool {
        self.is_simulating() || self.build.is_running()
    }

    /// Advance time-driven state. Returns true when a redraw is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let stepped = self.session.tick(self.repo.scene_mut(), now_ms) == Tick::Stepped;
        let built = match self.build.poll(now_ms) {
            BuildEvent::None => false,
            BuildEvent::Progress(_) => true,
            BuildEvent::Succeeded(message) => {
                self.status_message = Some(message.to_string());
                true
            }
        };
        stepped || built
    }

    // -----------------------------------------------------------------------
    // Asset browser
    // -----------------------------------------------------------------------

    pub fn asset_rows(&self) -> Vec<&Asset> {
        self.assets.current_children()
    }

    pub fn highlighted_asset(&self) -> Option<&Asset> {
        self.asset_rows().get(self.asset_cursor).copied()
    }

    pub fn move_asset_cursor(&mut self, delta: isize) {
        let len = self.asset_rows().len();
        if len == 0 {
            self.asset_cursor = 0;
            return;
        }
        self.asset_cursor = (self.asset_cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Open the highlighted folder.
    pub fn enter_asset(&mut self) -> bool {
        let Some(id) = self
            .highlighted_asset()
            .filter(|a| a.kind == AssetKind::Folder)
            .map(|a| a.id.clone())
        else {
            return false;
        };
        self.assets.enter(&id);
        self.asset_cursor = 0;
        true
    }

    pub fn asset_folder_up(&mut self) {
        self.assets.up();
        self.asset_cursor = 0;
    }

    pub fn new_asset_folder(&mut self, name: &str) -> bool {
        let parent = self.assets.current_id().map(str::to_owned);
        match self.assets.create_folder(name, parent.as_deref()) {
            Some(_) => {
                self.dirty = true;
                self.status_message = Some(format!("Created folder {}", name.trim()));
                true
            }
            None => false,
        }
    }

    pub fn import_asset(&mut self, path: &str) -> Result<()> {
        let parent = self.assets.current_id().map(str::to_owned);
        let path = expand_home(path.trim());
        self.assets.import_path(Path::new(&path), parent.as_deref())?;
        self.dirty = true;
        self.status_message = Some(format!("Imported {}", path.display()));
        Ok(())
    }
}
