use std::io;

use crossterm::{cursor, queue, style};

use crate::engine::stepper::FLOOR_Y;
use crate::renderer::{Projection, Renderer};
use crate::types::{Color, DrawOp, NamedColor, Style, Vec2};

use super::state::EditorState;
use super::ui::{print_dim, Rect};

/// Grid spacing in cells.
const GRID_X: u16 = 4;
const GRID_Y: u16 = 2;
/// Grid and floor sit below every object.
const BACKDROP_Z: i32 = i32::MIN;

fn backdrop_style() -> Style {
    Style { dim: true, ..Default::default() }
}

/// Everything the Scene tab draws, in viewport-local cells.
pub fn scene_ops(state: &EditorState, projection: &Projection) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    if state.show_grid {
        for y in (0..projection.height).step_by(GRID_Y as usize) {
            for x in (0..projection.width).step_by(GRID_X as usize) {
                ops.push(DrawOp { x, y, ch: '·', style: backdrop_style(), z_order: BACKDROP_Z });
            }
        }
    }

    // Floor the stepper clamps falling bodies to.
    if let Some((_, floor)) = projection.to_cell(Vec2::new(0.0, FLOOR_Y)) {
        for x in 0..projection.width {
            ops.push(DrawOp { x, y: floor, ch: '─', style: backdrop_style(), z_order: BACKDROP_Z });
        }
    }

    // The selection outline is hidden while a preview runs.
    let selected = if state.is_simulating() { None } else { state.repo.selected_id() };
    for obj in &state.repo.scene().objects {
        let mut style = Style::fg(Color::from_hex(&obj.color).unwrap_or(Color::Named(NamedColor::Blue)));
        if Some(&obj.id) == selected {
            style.reverse = true;
            style.bold = true;
        }
        ops.extend(Renderer::object_ops(obj, projection, style));
    }
    ops
}

pub fn render_scene(stdout: &mut io::Stdout, rect: Rect, state: &EditorState) -> anyhow::Result<()> {
    if rect.width < 2 || rect.height < 2 {
        return Ok(());
    }
    // One row for the viewport caption.
    let projection = Projection { width: rect.width - 1, height: rect.height - 1 };
    let grid = Renderer::rasterize(&scene_ops(state, &projection), projection.width, projection.height);
    Renderer::paint(stdout, &grid, rect.x + 1, rect.y + 1)?;

    let caption = format!(
        " {} objects | tool: {}",
        state.repo.scene().len(),
        state.transform.label()
    );
    print_dim(stdout, rect.x + 1, rect.y, &caption, rect.width as usize - 1)?;

    if state.is_simulating() {
        let (steps, skipped) = state.session.counters();
        let live = format!(" \u{25cf} LIVE {steps}f/{skipped}s ");
        let w = live.chars().count() as u16;
        if w < rect.width {
            queue!(
                stdout,
                cursor::MoveTo(rect.x + rect.width - w, rect.y),
                style::SetAttribute(style::Attribute::Reverse),
                style::Print(live),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::config::EditorConfig;
    use crate::engine::ObjectKind;
    use crate::project::{Project, RecentProjects};

    fn state_with_box() -> EditorState {
        let mut state = EditorState::welcome(EditorConfig::default(), RecentProjects::in_memory(Vec::new()));
        state.load_project(Project::new("Game", "/nonexistent/project.json"));
        state.repo.add(&ObjectKind::Box);
        state
    }

    fn object_ops(ops: &[DrawOp]) -> Vec<&DrawOp> {
        ops.iter().filter(|op| op.z_order != BACKDROP_Z).collect()
    }

    #[test]
    fn test_selected_object_is_highlighted() {
        let state = state_with_box();
        let ops = scene_ops(&state, &Projection { width: 40, height: 20 });
        let objects = object_ops(&ops);
        assert_eq!(objects.len(), 3);
        assert!(objects.iter().all(|op| op.style.reverse));
    }

    #[test]
    fn test_no_highlight_while_simulating() {
        let mut state = state_with_box();
        state.toggle_simulation(0.0);
        let ops = scene_ops(&state, &Projection { width: 40, height: 20 });
        assert!(object_ops(&ops).iter().all(|op| !op.style.reverse));
    }

    #[test]
    fn test_grid_toggle() {
        let mut state = state_with_box();
        let p = Projection { width: 40, height: 20 };
        let with_grid = scene_ops(&state, &p).iter().filter(|op| op.ch == '·').count();
        state.show_grid = false;
        let without = scene_ops(&state, &p).iter().filter(|op| op.ch == '·').count();
        assert_eq!(with_grid, 10 * 10);
        assert_eq!(without, 0);
    }
}
