use std::io;

use crossterm::{cursor, queue, style};

use super::state::{EditorState, Mode, BUILD_BADGE};
use super::ui::{clip, print_dim, print_row, Layout};

const PANEL_WIDTH: u16 = 60;

pub fn render_welcome(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let width = PANEL_WIDTH.min(layout.term_width.saturating_sub(2));
    let x = (layout.term_width.saturating_sub(width)) / 2;
    let w = width as usize;
    let mut y: u16 = 2;

    queue!(
        stdout,
        cursor::MoveTo(x, y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(clip("HYPERCASUAL FORGE", w)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    print_dim(stdout, x, y + 1, &format!("Mobile game engine editor | {BUILD_BADGE}"), w)?;
    y += 3;

    if let Mode::NewProject { field, name, location } = &state.mode {
        queue!(
            stdout,
            cursor::MoveTo(x, y),
            style::SetAttribute(style::Attribute::Bold),
            style::Print("New Project"),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        let fields = [("Project Name", name), ("Location", location)];
        for (i, (label, value)) in fields.iter().enumerate() {
            let row = y + 2 + (i as u16) * 2;
            if row + 1 >= layout.status_y {
                break;
            }
            print_dim(stdout, x, row, label, w)?;
            let shown = if i == *field { format!("{value}_") } else { value.to_string() };
            print_row(stdout, x, row + 1, &format!(" {shown}"), w, i == *field)?;
        }
        return Ok(());
    }

    if let Mode::Confirm { message, selected, .. } = &state.mode {
        print_dim(stdout, x, y, message, w)?;
        print_row(stdout, x, y + 1, " Yes", 8, *selected == 0)?;
        print_row(stdout, x + 9, y + 1, " No", 8, *selected == 1)?;
        return Ok(());
    }

    queue!(
        stdout,
        cursor::MoveTo(x, y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print("Recent Projects"),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    y += 1;

    if state.recent.entries.is_empty() {
        print_dim(stdout, x, y + 1, "No recent projects. [n] to create one.", w)?;
        return Ok(());
    }

    for (i, entry) in state.recent.entries.iter().enumerate() {
        let row = y + 1 + (i as u16) * 2;
        if row + 1 >= layout.status_y {
            break;
        }
        let when_w = entry.last_opened.chars().count();
        let name_w = w.saturating_sub(when_w + 2);
        let line = format!(" {:<name_w$}{}", clip(&entry.name, name_w), entry.last_opened);
        print_row(stdout, x, row, &line, w, i == state.recent_selected)?;
        print_dim(stdout, x + 1, row + 1, &entry.path, w.saturating_sub(1))?;
    }
    Ok(())
}
