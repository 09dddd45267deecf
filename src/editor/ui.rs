use std::io;

use crossterm::{cursor, queue, style};

use super::state::EditorTab;

pub const HIERARCHY_WIDTH: u16 = 24;
pub const INSPECTOR_WIDTH: u16 = 28;
/// Height of the bottom asset strip, borders included.
pub const ASSET_STRIP_HEIGHT: u16 = 5;
/// Menu bar + key hints.
pub const MENU_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }

    /// Area left after a one-cell border on the left and a title row plus
    /// separator on top.
    pub fn content(&self) -> Rect {
        Rect {
            x: self.x + 2,
            y: self.y + 2,
            width: self.width.saturating_sub(3),
            height: self.height.saturating_sub(2),
        }
    }
}

pub struct Layout {
    pub term_width: u16,
    pub term_height: u16,
    pub hierarchy: Rect,
    pub viewport: Rect,
    pub inspector: Rect,
    /// Zero height when the Assets tab already shows the browser.
    pub assets: Rect,
    pub status_y: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16, tab: EditorTab) -> Self {
        let status_y = term_height.saturating_sub(1);
        let strip_h = if tab == EditorTab::Assets { 0 } else { ASSET_STRIP_HEIGHT };
        let body_y = MENU_HEIGHT;
        let body_h = status_y.saturating_sub(body_y + strip_h);

        // Side panels give way on narrow terminals.
        let (left, right) = if term_width >= HIERARCHY_WIDTH + INSPECTOR_WIDTH + 20 {
            (HIERARCHY_WIDTH, INSPECTOR_WIDTH)
        } else {
            (0, 0)
        };

        Layout {
            term_width,
            term_height,
            hierarchy: Rect { x: 0, y: body_y, width: left, height: body_h },
            viewport: Rect {
                x: left,
                y: body_y,
                width: term_width.saturating_sub(left + right),
                height: body_h,
            },
            inspector: Rect {
                x: term_width.saturating_sub(right),
                y: body_y,
                width: right,
                height: body_h,
            },
            assets: Rect { x: 0, y: body_y + body_h, width: term_width, height: strip_h },
            status_y,
        }
    }
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        if let Some(open) = rest.find('[') {
            if open > 0 {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Dim),
                    style::Print(&rest[..open]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
            }
            rest = &rest[open..];
            if let Some(close) = rest.find(']') {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            } else {
                queue!(stdout, style::Print(rest))?;
                break;
            }
        } else {
            queue!(
                stdout,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        }
    }
    Ok(())
}

/// Truncate to `width` display characters.
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Vertical border, bold title, and separator for a side panel.
pub fn draw_panel_frame(stdout: &mut io::Stdout, rect: Rect, title: &str) -> anyhow::Result<()> {
    if rect.width < 3 || rect.height < 2 {
        return Ok(());
    }
    for y in rect.y..rect.bottom() {
        queue!(stdout, cursor::MoveTo(rect.x, y), style::Print("\u{2502}"))?;
    }
    queue!(
        stdout,
        cursor::MoveTo(rect.x + 2, rect.y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(clip(title, rect.width as usize - 3)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    queue!(stdout, cursor::MoveTo(rect.x, rect.y + 1), style::Print("\u{253c}"))?;
    for _ in 1..rect.width {
        queue!(stdout, style::Print("\u{2500}"))?;
    }
    Ok(())
}

/// One list row padded to `width`, reverse-video when highlighted.
pub fn print_row(
    stdout: &mut io::Stdout,
    x: u16,
    y: u16,
    text: &str,
    width: usize,
    highlighted: bool,
) -> anyhow::Result<()> {
    let text = clip(text, width);
    queue!(stdout, cursor::MoveTo(x, y))?;
    if highlighted {
        queue!(
            stdout,
            style::SetAttribute(style::Attribute::Reverse),
            style::Print(format!("{text:<width$}")),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    } else {
        queue!(stdout, style::Print(format!("{text:<width$}")))?;
    }
    Ok(())
}

/// Dimmed text, clipped to `width`.
pub fn print_dim(stdout: &mut io::Stdout, x: u16, y: u16, text: &str, width: usize) -> anyhow::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(x, y),
        style::SetAttribute(style::Attribute::Dim),
        style::Print(clip(text, width)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_partitions_screen() {
        let layout = Layout::compute(120, 40, EditorTab::Scene);
        assert_eq!(layout.status_y, 39);
        assert_eq!(layout.hierarchy.width + layout.viewport.width + layout.inspector.width, 120);
        assert_eq!(layout.viewport.y, MENU_HEIGHT);
        assert_eq!(layout.assets.y, layout.viewport.bottom());
        assert_eq!(layout.assets.bottom(), layout.status_y);
    }

    #[test]
    fn test_assets_tab_hides_strip_and_narrow_hides_panels() {
        let layout = Layout::compute(60, 20, EditorTab::Assets);
        assert_eq!(layout.assets.height, 0);
        assert_eq!(layout.hierarchy.width, 0);
        assert_eq!(layout.viewport.width, 60);
        assert_eq!(layout.viewport.bottom(), layout.status_y);
    }
}
