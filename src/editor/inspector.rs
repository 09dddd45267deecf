use std::io;

use crossterm::{cursor, queue, style};

use crate::engine::SceneObject;

use super::state::{EditorState, Mode};
use super::ui::{clip, draw_panel_frame, print_dim, print_menu_item, print_row, Layout, Rect};

pub const EMPTY_INSPECTOR: &str = "Forge Engine Core Active.";

/// Property rows for the inspector. Positions are shown rounded.
pub fn object_rows(obj: &SceneObject) -> Vec<String> {
    let mut rows = vec![
        format!("0x{}", obj.id),
        format!("Type: {}", obj.kind.name()),
        format!("Pos X: {}", obj.position.x.round()),
        format!("Pos Y: {}", obj.position.y.round()),
        format!("Rotation: {}\u{b0}", obj.rotation.round()),
        format!("Scale: {:.1} x {:.1}", obj.scale.x, obj.scale.y),
        format!("Z-Index: {}", obj.z_index),
    ];
    if obj.locked {
        rows.push("Locked".into());
    }
    rows
}

enum Row {
    Title(String),
    Plain(String),
    Dim(&'static str),
    /// Key hint with a bracketed binding.
    Hint(String),
    Blank,
}

pub fn render_inspector(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let rect = layout.inspector;
    if rect.width == 0 {
        return Ok(());
    }

    if let Mode::Confirm { message, selected, .. } = &state.mode {
        return render_confirm(stdout, rect, message, *selected);
    }

    draw_panel_frame(stdout, rect, "Inspector")?;
    let area = rect.content();
    let width = area.width as usize;

    let Some(obj) = state.repo.selected() else {
        print_dim(stdout, area.x, area.y, EMPTY_INSPECTOR, width)?;
        return Ok(());
    };

    let components = &obj.components;
    let mut rows = vec![Row::Title(obj.name.clone())];
    rows.extend(object_rows(obj).into_iter().map(Row::Plain));
    rows.push(Row::Blank);
    rows.push(Row::Dim("Components"));
    rows.extend(components.labels().into_iter().map(|label| Row::Plain(format!("\u{25aa} {label}"))));
    if let Some(rb) = &components.rigidbody {
        let switch = if rb.is_dynamic { "on" } else { "off" };
        rows.push(Row::Hint(format!("[p] Simulated Physics: {switch}")));
    }
    if !components.is_scripted() {
        rows.push(Row::Blank);
        rows.push(Row::Hint("[c] Add Native Component".into()));
    }

    for (i, row) in rows.iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        match row {
            Row::Title(text) => queue!(
                stdout,
                cursor::MoveTo(area.x, y),
                style::SetAttribute(style::Attribute::Bold),
                style::Print(clip(text, width)),
                style::SetAttribute(style::Attribute::Reset),
            )?,
            Row::Plain(text) => print_row(stdout, area.x, y, text, width, false)?,
            Row::Dim(text) => print_dim(stdout, area.x, y, text, width)?,
            Row::Hint(text) => {
                queue!(stdout, cursor::MoveTo(area.x, y))?;
                print_menu_item(stdout, &clip(text, width))?;
            }
            Row::Blank => {}
        }
    }
    Ok(())
}

fn render_confirm(stdout: &mut io::Stdout, rect: Rect, message: &str, selected: usize) -> anyhow::Result<()> {
    draw_panel_frame(stdout, rect, "Confirm")?;
    let area = rect.content();
    let width = area.width as usize;
    if area.height == 0 {
        return Ok(());
    }
    print_dim(stdout, area.x, area.y, message, width)?;
    for (i, label) in ["Yes", "No"].iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        print_row(stdout, area.x, y, label, width, i == selected)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::defaults::create_default;
    use crate::engine::{ObjectId, ObjectKind};
    use crate::types::Vec2;

    #[test]
    fn test_rows_round_position() {
        let mut obj = create_default(&ObjectKind::Circle, ObjectId::from("abc123xyz"), 0);
        obj.position = Vec2::new(12.6, 89.4);
        let rows = object_rows(&obj);
        assert_eq!(rows[0], "0xabc123xyz");
        assert_eq!(rows[2], "Pos X: 13");
        assert_eq!(rows[3], "Pos Y: 89");
    }
}
