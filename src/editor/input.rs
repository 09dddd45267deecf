use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::ObjectKind;

use super::config::matches_binding;
use super::state::{
    ConfirmAction, EditorState, EditorTab, Mode, PromptKind, Screen, TransformMode, BUILD_BADGE,
    HOT_RELOAD_MESSAGE, MENUS,
};

/// Degrees per rotate keypress.
const ROTATE_STEP: f64 = 15.0;
/// Scale change per keypress.
const SCALE_STEP: f64 = 0.1;
/// Viewport percent per move keypress.
const MOVE_STEP: f64 = 1.0;
const DOCS_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Quit,
}

pub fn handle_event(state: &mut EditorState, event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_key(state: &mut EditorState, key: KeyEvent) -> Action {
    match &state.mode {
        Mode::Confirm { .. } => handle_confirm(state, key),
        Mode::Prompt { .. } => handle_prompt(state, key),
        Mode::NewProject { .. } => handle_new_project(state, key),
        Mode::Menu { .. } => handle_menu(state, key),
        Mode::AddObject { .. } => handle_add_object(state, key),
        Mode::Normal => match state.screen {
            Screen::Welcome => handle_welcome(state, key),
            Screen::Workspace => handle_workspace(state, key),
        },
    }
}

// ---------------------------------------------------------------------------
// Welcome screen
// ---------------------------------------------------------------------------

fn handle_welcome(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();
    let count = state.recent.entries.len();

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.new_project, &key) {
        state.mode = Mode::new_project_form();
        state.status_message = None;
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_up, &key) && count > 0 {
        state.recent_selected = if state.recent_selected == 0 { count - 1 } else { state.recent_selected - 1 };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) && count > 0 {
        state.recent_selected = (state.recent_selected + 1) % count;
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) && count > 0 {
        if let Err(e) = state.open_recent(state.recent_selected) {
            state.status_message = Some(format!("Open failed: {e:#}"));
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.clear_recent, &key) && count > 0 {
        state.mode = Mode::Confirm {
            message: "Clear recent projects?".into(),
            selected: 0,
            action: ConfirmAction::ClearRecent,
            return_mode: Box::new(Mode::Normal),
        };
        return Action::Redraw;
    }

    Action::Continue
}

fn handle_new_project(state: &mut EditorState, key: KeyEvent) -> Action {
    let (field, mut name, mut location) = match &state.mode {
        Mode::NewProject { field, name, location } => (*field, name.clone(), location.clone()),
        _ => return Action::Continue,
    };

    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.mode = Mode::NewProject { field: 1 - field.min(1), name, location };
        }
        KeyCode::Enter => {
            // On success the workspace takes over and resets the mode.
            state.create_project(&name, &location);
        }
        KeyCode::Backspace => {
            let buf = if field == 0 { &mut name } else { &mut location };
            buf.pop();
            state.mode = Mode::NewProject { field, name, location };
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            let buf = if field == 0 { &mut name } else { &mut location };
            buf.push(c);
            state.mode = Mode::NewProject { field, name, location };
        }
        _ => return Action::Continue,
    }
    Action::Redraw
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

fn handle_workspace(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.quit, &key) {
        if state.dirty {
            state.mode = Mode::Confirm {
                message: "Discard unsaved changes and quit?".into(),
                selected: 1,
                action: ConfirmAction::DiscardChanges { quit: true },
                return_mode: Box::new(Mode::Normal),
            };
            return Action::Redraw;
        }
        return Action::Quit;
    }
    if matches_binding(&bindings.save, &key) {
        save(state);
        return Action::Redraw;
    }
    if matches_binding(&bindings.open_menu, &key) {
        state.mode = Mode::Menu { menu: 0, item: 0 };
        return Action::Redraw;
    }
    if matches_binding(&bindings.next_tab, &key) {
        state.tab = state.tab.next();
        return Action::Redraw;
    }
    if matches_binding(&bindings.prev_tab, &key) {
        state.tab = state.tab.prev();
        return Action::Redraw;
    }
    if matches_binding(&bindings.simulate, &key) {
        let now = state.now_ms();
        state.toggle_simulation(now);
        return Action::Redraw;
    }

    match state.tab {
        EditorTab::Scene => handle_scene(state, key),
        EditorTab::Scripting => {
            if matches_binding(&bindings.hot_reload, &key) {
                state.status_message = Some(HOT_RELOAD_MESSAGE.into());
                return Action::Redraw;
            }
            Action::Continue
        }
        EditorTab::Assets => handle_assets(state, key),
        EditorTab::Architecture => handle_docs(state, key),
        EditorTab::Build => {
            if matches_binding(&bindings.start_build, &key) || matches_binding(&bindings.confirm, &key) {
                let now = state.now_ms();
                state.start_build(now);
                return Action::Redraw;
            }
            Action::Continue
        }
    }
}

fn save(state: &mut EditorState) {
    if let Err(e) = state.save() {
        state.status_message = Some(format!("Save failed: {e:#}"));
    }
}

fn handle_scene(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.move_up, &key) {
        state.repo.select_relative(-1);
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.repo.select_relative(1);
        return Action::Redraw;
    }
    if matches_binding(&bindings.cancel, &key) {
        state.repo.select(None);
        return Action::Redraw;
    }
    if matches_binding(&bindings.toggle_grid, &key) {
        state.show_grid = !state.show_grid;
        return Action::Redraw;
    }

    let tools = [
        (&bindings.tool_select, TransformMode::Select),
        (&bindings.tool_move, TransformMode::Move),
        (&bindings.tool_rotate, TransformMode::Rotate),
        (&bindings.tool_scale, TransformMode::Scale),
    ];
    for (binding, mode) in tools {
        if matches_binding(binding, &key) {
            state.transform = mode;
            state.status_message = Some(format!("Tool: {}", mode.label()));
            return Action::Redraw;
        }
    }

    let directions = [
        (&bindings.transform_up, (0.0, -1.0)),
        (&bindings.transform_down, (0.0, 1.0)),
        (&bindings.transform_left, (-1.0, 0.0)),
        (&bindings.transform_right, (1.0, 0.0)),
    ];
    for (binding, (dx, dy)) in directions {
        if matches_binding(binding, &key) {
            if state.guard_edit() {
                apply_transform(state, dx, dy);
            }
            return Action::Redraw;
        }
    }

    if matches_binding(&bindings.add_object, &key) {
        if state.guard_edit() {
            state.mode = Mode::AddObject { selected: 0 };
            state.status_message = None;
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.duplicate_object, &key) {
        if state.guard_edit() {
            match state.repo.duplicate_selected() {
                Some(_) => {
                    state.dirty = true;
                    let name = state.repo.selected().map(|o| o.name.clone()).unwrap_or_default();
                    state.status_message = Some(format!("Duplicated as {name}"));
                }
                None => state.status_message = Some("Nothing selected".into()),
            }
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.delete_object, &key) {
        if state.guard_edit() {
            if let Some(obj) = state.repo.selected() {
                state.mode = Mode::Confirm {
                    message: format!("Delete {}?", obj.name),
                    selected: 0,
                    action: ConfirmAction::DeleteObject { id: obj.id.clone() },
                    return_mode: Box::new(Mode::Normal),
                };
            }
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.toggle_physics, &key) {
        if state.guard_edit() {
            if let Some(id) = state.repo.selected_id().cloned() {
                state.status_message = Some(match state.repo.toggle_dynamic(&id) {
                    Some(on) => {
                        state.dirty = true;
                        format!("Simulated Physics {}", if on { "on" } else { "off" })
                    }
                    None => "No rigidbody on this object".into(),
                });
            }
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.add_component, &key) {
        if state.guard_edit() {
            if let Some(id) = state.repo.selected_id().cloned() {
                state.status_message = Some(if state.repo.attach_script(&id) {
                    state.dirty = true;
                    "Attached Script component".into()
                } else {
                    "Script already attached".into()
                });
            }
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.toggle_lock, &key) {
        if state.guard_edit() {
            if let Some(id) = state.repo.selected_id().cloned() {
                if let Some(locked) = state.repo.toggle_lock(&id) {
                    state.dirty = true;
                    state.status_message = Some(if locked { "Locked".into() } else { "Unlocked".into() });
                }
            }
        }
        return Action::Redraw;
    }

    Action::Continue
}

/// Apply the active transform tool to the selection. `(dx, dy)` is the
/// arrow direction; up and right grow rotation and scale.
fn apply_transform(state: &mut EditorState, dx: f64, dy: f64) {
    let Some(id) = state.repo.selected_id().cloned() else {
        state.status_message = Some("Nothing selected".into());
        return;
    };
    let amount = if dx != 0.0 { dx } else { -dy };
    let changed = match state.transform {
        TransformMode::Select => {
            state.status_message = Some("Pick a tool: [2] move [3] rotate [4] scale".into());
            return;
        }
        TransformMode::Move => state.repo.translate(&id, dx * MOVE_STEP, dy * MOVE_STEP),
        TransformMode::Rotate => state.repo.rotate(&id, amount * ROTATE_STEP),
        TransformMode::Scale => state.repo.scale_by(&id, amount * SCALE_STEP),
    };
    if changed {
        state.dirty = true;
    } else {
        state.status_message = Some("Object is locked".into());
    }
}

fn handle_assets(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.move_up, &key) {
        state.move_asset_cursor(-1);
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.move_asset_cursor(1);
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        if !state.enter_asset() {
            if let Some(asset) = state.highlighted_asset() {
                state.status_message = Some(format!("{} ({})", asset.name, asset.size));
            }
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.folder_up, &key) {
        state.asset_folder_up();
        return Action::Redraw;
    }
    if key.code == KeyCode::Home {
        state.assets.go_root();
        state.asset_cursor = 0;
        return Action::Redraw;
    }
    if matches_binding(&bindings.new_folder, &key) {
        state.mode = Mode::Prompt { kind: PromptKind::NewFolder, buf: String::new(), cursor: 0 };
        return Action::Redraw;
    }
    if matches_binding(&bindings.import_asset, &key) {
        state.mode = Mode::Prompt { kind: PromptKind::ImportAsset, buf: String::new(), cursor: 0 };
        return Action::Redraw;
    }

    Action::Continue
}

fn handle_docs(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = &state.config.key_bindings;
    if matches_binding(&bindings.move_up, &key) {
        state.docs_scroll = state.docs_scroll.saturating_sub(1);
    } else if matches_binding(&bindings.move_down, &key) {
        state.docs_scroll += 1;
    } else if key.code == KeyCode::PageUp {
        state.docs_scroll = state.docs_scroll.saturating_sub(DOCS_PAGE);
    } else if key.code == KeyCode::PageDown {
        state.docs_scroll += DOCS_PAGE;
    } else if key.code == KeyCode::Home {
        state.docs_scroll = 0;
    } else {
        return Action::Continue;
    }
    // The renderer clamps against the wrapped document length.
    Action::Redraw
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_add_object(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.cancel, &key) {
        state.mode = Mode::Normal;
        return Action::Redraw;
    }

    let selected = match &state.mode {
        Mode::AddObject { selected } => *selected,
        _ => return Action::Continue,
    };

    let kinds = ObjectKind::menu_items();
    let type_count = kinds.len();

    if matches_binding(&bindings.move_up, &key) {
        let new_sel = if selected == 0 { type_count - 1 } else { selected - 1 };
        state.mode = Mode::AddObject { selected: new_sel };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.mode = Mode::AddObject { selected: (selected + 1) % type_count };
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        let kind = &kinds[selected.min(type_count - 1)];
        state.repo.add(kind);
        state.dirty = true;
        state.mode = Mode::Normal;
        state.status_message = Some(format!("Added {}", kind.name()));
        return Action::Redraw;
    }

    Action::Continue
}

fn handle_menu(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();
    let (menu, item) = match &state.mode {
        Mode::Menu { menu, item } => (*menu, *item),
        _ => return Action::Continue,
    };
    let item_count = MENUS[menu].1.len();

    if matches_binding(&bindings.cancel, &key) || matches_binding(&bindings.open_menu, &key) {
        state.mode = Mode::Normal;
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_left, &key) {
        state.mode = Mode::Menu { menu: (menu + MENUS.len() - 1) % MENUS.len(), item: 0 };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_right, &key) {
        state.mode = Mode::Menu { menu: (menu + 1) % MENUS.len(), item: 0 };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_up, &key) {
        let new_item = if item == 0 { item_count - 1 } else { item - 1 };
        state.mode = Mode::Menu { menu, item: new_item };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.mode = Mode::Menu { menu, item: (item + 1) % item_count };
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        state.mode = Mode::Normal;
        return run_menu_command(state, MENUS[menu].0, MENUS[menu].1[item]);
    }

    Action::Continue
}

fn run_menu_command(state: &mut EditorState, menu: &str, item: &str) -> Action {
    match (menu, item) {
        ("File", "New Project") => {
            if leave_workspace(state) {
                state.mode = Mode::new_project_form();
            }
        }
        ("File", "Open Project") | ("File", "Exit to Menu") => {
            leave_workspace(state);
        }
        ("File", "Save") => save(state),
        ("File", "Build Settings") => state.tab = EditorTab::Build,
        ("Help", "Documentation") => state.tab = EditorTab::Architecture,
        ("Help", "About Forge IDE") => {
            state.status_message = Some(format!("Forge IDE {BUILD_BADGE}"));
        }
        (_, item) => {
            state.status_message = Some(format!("{item} is not available yet"));
        }
    }
    Action::Redraw
}

/// Go back to the welcome screen, asking first when there are unsaved
/// changes. Returns true if the workspace was left immediately.
fn leave_workspace(state: &mut EditorState) -> bool {
    if state.dirty {
        state.mode = Mode::Confirm {
            message: "Discard unsaved changes?".into(),
            selected: 1,
            action: ConfirmAction::DiscardChanges { quit: false },
            return_mode: Box::new(Mode::Normal),
        };
        return false;
    }
    state.exit_to_menu();
    true
}

fn handle_confirm(state: &mut EditorState, key: KeyEvent) -> Action {
    let (selected, action, return_mode) = match &state.mode {
        Mode::Confirm { selected, action, return_mode, .. } => {
            (*selected, action.clone(), (**return_mode).clone())
        }
        _ => return Action::Continue,
    };

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            if let Mode::Confirm { selected: sel, .. } = &mut state.mode {
                *sel = 1 - selected.min(1);
            }
            Action::Redraw
        }
        KeyCode::Enter if selected == 0 => {
            state.mode = Mode::Normal;
            match action {
                ConfirmAction::DeleteObject { id } => {
                    if let Some(removed) = state.repo.remove(&id) {
                        state.dirty = true;
                        state.status_message = Some(format!("Deleted {}", removed.name));
                    }
                }
                ConfirmAction::ClearRecent => state.clear_recent(),
                ConfirmAction::DiscardChanges { quit: true } => return Action::Quit,
                ConfirmAction::DiscardChanges { quit: false } => state.exit_to_menu(),
            }
            Action::Redraw
        }
        KeyCode::Enter | KeyCode::Esc => {
            state.mode = return_mode;
            Action::Redraw
        }
        _ => Action::Continue,
    }
}

fn handle_prompt(state: &mut EditorState, key: KeyEvent) -> Action {
    let (kind, mut buf, mut cursor) = match &state.mode {
        Mode::Prompt { kind, buf, cursor } => (*kind, buf.clone(), *cursor),
        _ => return Action::Continue,
    };

    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            return Action::Redraw;
        }
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            match kind {
                PromptKind::NewFolder => {
                    if !state.new_asset_folder(&buf) {
                        state.status_message = Some("Folder name is required".into());
                    }
                }
                PromptKind::ImportAsset => {
                    if let Err(e) = state.import_asset(&buf) {
                        state.status_message = Some(format!("Import failed: {e:#}"));
                    }
                }
            }
            return Action::Redraw;
        }
        KeyCode::Left => cursor = cursor.saturating_sub(1),
        KeyCode::Right => cursor = (cursor + 1).min(buf.chars().count()),
        KeyCode::Home => cursor = 0,
        KeyCode::End => cursor = buf.chars().count(),
        KeyCode::Backspace => {
            if cursor > 0 {
                let start = char_to_byte_idx(&buf, cursor - 1);
                let end = char_to_byte_idx(&buf, cursor);
                buf.drain(start..end);
                cursor -= 1;
            }
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            let byte_idx = char_to_byte_idx(&buf, cursor);
            buf.insert(byte_idx, c);
            cursor += 1;
        }
        _ => return Action::Continue,
    }

    state.mode = Mode::Prompt { kind, buf, cursor };
    Action::Redraw
}

/// Convert a char index into a byte index for string operations.
fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}
