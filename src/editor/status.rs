use std::io;

use crossterm::{cursor, queue, style, terminal};

use super::state::{EditorState, Mode, Screen};
use super::ui::{clip, Layout};

fn mode_name(state: &EditorState) -> &'static str {
    match &state.mode {
        Mode::Normal if state.screen == Screen::Welcome => "WELCOME",
        Mode::Normal if state.is_simulating() => "SIMULATING",
        Mode::Normal => "EDIT",
        Mode::AddObject { .. } => "ADD OBJECT",
        Mode::Menu { .. } => "MENU",
        Mode::Confirm { .. } => "CONFIRM",
        Mode::Prompt { .. } => "INPUT",
        Mode::NewProject { .. } => "NEW PROJECT",
    }
}

pub fn render_status(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let y = layout.status_y;
    let width = layout.term_width as usize;
    queue!(stdout, cursor::MoveTo(0, y), terminal::Clear(terminal::ClearType::CurrentLine))?;

    // A prompt takes over the whole line.
    if let Mode::Prompt { kind, buf, cursor: pos } = &state.mode {
        let label = format!(" {}: ", kind.label());
        let before: String = buf.chars().take(*pos).collect();
        let at = buf.chars().nth(*pos).unwrap_or(' ');
        let after: String = buf.chars().skip(*pos + 1).collect();
        queue!(
            stdout,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&label),
            style::SetAttribute(style::Attribute::Reset),
            style::Print(&before),
            style::SetAttribute(style::Attribute::Reverse),
            style::Print(at),
            style::SetAttribute(style::Attribute::Reset),
            style::Print(clip(&after, width.saturating_sub(label.len() + before.chars().count() + 1))),
        )?;
        return Ok(());
    }

    let mode_str = mode_name(state);
    let project = if state.screen == Screen::Workspace {
        let dirty_str = if state.dirty { " [modified]" } else { "" };
        format!(" | {}{dirty_str}", state.project_name)
    } else {
        String::new()
    };
    // Replace newlines so a multi-line error doesn't scroll the terminal.
    let status: String = state
        .status_message
        .as_deref()
        .unwrap_or("")
        .chars()
        .map(|c| if c == '\n' { '\u{21b5}' } else { c })
        .collect();

    queue!(
        stdout,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(clip(&format!(" {mode_str}{project} {status}"), width)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}
