use std::io;

use crossterm::{cursor, queue, style};

use crate::docs::{self, LineKind, SAMPLE_SCRIPT, SAMPLE_SCRIPT_PATH};

use super::state::EditorState;
use super::ui::{clip, print_dim, print_menu_item, Rect};

pub fn render_scripting(stdout: &mut io::Stdout, rect: Rect) -> anyhow::Result<()> {
    if rect.height < 3 || rect.width < 8 {
        return Ok(());
    }
    let x = rect.x + 2;
    let width = rect.width as usize - 3;
    queue!(
        stdout,
        cursor::MoveTo(x, rect.y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(clip(SAMPLE_SCRIPT_PATH, width)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    queue!(stdout, cursor::MoveTo(x, rect.y + 1))?;
    print_menu_item(stdout, "[h] Hot Reload")?;

    for (i, line) in SAMPLE_SCRIPT.lines().enumerate() {
        let y = rect.y + 3 + i as u16;
        if y >= rect.bottom() {
            break;
        }
        print_dim(stdout, x, y, &format!("{:>3} ", i + 1), 4)?;
        queue!(stdout, cursor::MoveTo(x + 4, y), style::Print(clip(line, width.saturating_sub(4))))?;
    }
    Ok(())
}

/// Scroll offset that keeps the last page of the document on screen.
pub fn clamp_scroll(scroll: usize, total: usize, visible: usize) -> usize {
    scroll.min(total.saturating_sub(visible))
}

pub fn render_architecture(stdout: &mut io::Stdout, rect: Rect, state: &EditorState) -> anyhow::Result<()> {
    if rect.height < 2 || rect.width < 8 {
        return Ok(());
    }
    let x = rect.x + 2;
    let width = rect.width as usize - 3;
    let lines = docs::lines(width);
    let visible = rect.height as usize;
    let scroll = clamp_scroll(state.docs_scroll, lines.len(), visible);

    for (i, (kind, text)) in lines.iter().skip(scroll).take(visible).enumerate() {
        let y = rect.y + i as u16;
        let text = clip(text, width);
        queue!(stdout, cursor::MoveTo(x, y))?;
        match kind {
            LineKind::Title | LineKind::Heading => queue!(
                stdout,
                style::SetAttribute(style::Attribute::Bold),
                style::Print(text),
                style::SetAttribute(style::Attribute::Reset),
            )?,
            LineKind::Code => queue!(
                stdout,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(text),
                style::SetAttribute(style::Attribute::Reset),
            )?,
            LineKind::Body => queue!(stdout, style::Print(text))?,
            LineKind::Blank => {}
        }
    }
    Ok(())
}

/// `[██████░░░░] 60%`
pub fn progress_bar(progress: u8, width: usize) -> String {
    let inner = width.saturating_sub(7).max(1);
    let filled = (inner * progress.min(100) as usize) / 100;
    format!(
        "[{}{}] {:>3}%",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(inner - filled),
        progress.min(100)
    )
}

pub fn render_build(stdout: &mut io::Stdout, rect: Rect, state: &EditorState) -> anyhow::Result<()> {
    if rect.height < 6 || rect.width < 12 {
        return Ok(());
    }
    let x = rect.x + 2;
    let width = rect.width as usize - 3;
    queue!(
        stdout,
        cursor::MoveTo(x, rect.y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print("Build Settings"),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    print_dim(stdout, x, rect.y + 1, "Target: Android (ForgeGame.apk)", width)?;
    print_dim(stdout, x, rect.y + 2, &format!("Project: {}", state.project_name), width)?;

    if state.build.is_running() {
        let progress = state.build.progress();
        queue!(
            stdout,
            cursor::MoveTo(x, rect.y + 4),
            style::Print(clip(&format!("Compiling Engine Core... {progress}%"), width)),
            cursor::MoveTo(x, rect.y + 5),
            style::Print(progress_bar(progress, width.min(50))),
        )?;
    } else {
        queue!(stdout, cursor::MoveTo(x, rect.y + 4))?;
        print_menu_item(stdout, "[b] Initiate Build")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 17), "[░░░░░░░░░░]   0%");
        assert_eq!(progress_bar(50, 17), "[█████░░░░░]  50%");
        assert_eq!(progress_bar(100, 17), "[██████████] 100%");
        assert_eq!(progress_bar(200, 17), "[██████████] 100%");
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(0, 100, 20), 0);
        assert_eq!(clamp_scroll(500, 100, 20), 80);
        assert_eq!(clamp_scroll(5, 10, 20), 0);
    }
}
