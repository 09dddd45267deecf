use std::io;

use crate::engine::ObjectKind;

use super::state::{EditorState, Mode};
use super::ui::{draw_panel_frame, print_dim, print_row, Layout};

pub fn render_hierarchy(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let rect = layout.hierarchy;
    if rect.width == 0 {
        return Ok(());
    }
    let area = rect.content();
    let width = area.width as usize;

    if let Mode::AddObject { selected } = &state.mode {
        draw_panel_frame(stdout, rect, "Add Object")?;
        let mut y = area.y;
        let mut index = 0;
        for (group, kinds) in ObjectKind::menu() {
            if y >= area.bottom() {
                break;
            }
            print_dim(stdout, area.x, y, group, width)?;
            y += 1;
            for kind in kinds {
                if y >= area.bottom() {
                    break;
                }
                print_row(stdout, area.x, y, &format!("  {}", kind.name()), width, index == *selected)?;
                y += 1;
                index += 1;
            }
        }
        return Ok(());
    }

    draw_panel_frame(stdout, rect, "Root Scene")?;
    let objects = state.repo.hierarchy();
    if objects.is_empty() {
        print_dim(stdout, area.x, area.y, "Empty scene. [a]dd", width)?;
        return Ok(());
    }

    let selected = state.repo.selected_id();
    let rows = area.height as usize;
    // Keep the selection on screen.
    let sel_index = objects.iter().position(|o| Some(&o.id) == selected).unwrap_or(0);
    let skip = (sel_index + 1).saturating_sub(rows);

    for (row, obj) in objects.iter().skip(skip).take(rows).enumerate() {
        let lock = if obj.locked { " (locked)" } else { "" };
        let label = format!("{} {}{lock}", obj.glyph(), obj.name);
        print_row(stdout, area.x, area.y + row as u16, &label, width, Some(&obj.id) == selected)?;
    }
    Ok(())
}
