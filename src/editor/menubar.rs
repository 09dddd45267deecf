use std::io;

use crossterm::{cursor, queue, style, terminal};

use super::state::{EditorState, EditorTab, Mode, Screen, TransformMode, BUILD_BADGE, MENUS};
use super::ui::{clip, print_menu_item, print_row, Layout};

/// Items are listed in a consistent order:
///   navigation → edit actions → mode switches → escape/global
fn mode_items(state: &EditorState) -> Vec<&'static str> {
    match &state.mode {
        Mode::AddObject { .. } => vec!["[↑][↓] type", "[Enter] add", "[Esc] cancel"],
        Mode::Menu { .. } => vec!["[←][→] menu", "[↑][↓] item", "[Enter] run", "[Esc] close"],
        Mode::Confirm { .. } => vec!["[↑][↓] select", "[Enter] confirm", "[Esc] cancel"],
        Mode::Prompt { .. } => vec!["[←][→] cursor", "[Enter] apply", "[Esc] cancel"],
        Mode::NewProject { .. } => vec!["[Tab] field", "[Enter] create", "[Esc] cancel"],
        Mode::Normal if state.screen == Screen::Welcome => {
            vec!["[↑][↓] recent", "[Enter] open", "[n]ew project", "[c]lear recent", "[q]uit"]
        }
        Mode::Normal => {
            let mut items = match state.tab {
                EditorTab::Scene => {
                    let mut items = vec!["[↑][↓] select", "[a]dd", "[d]up", "[Del]ete"];
                    items.push(match state.transform {
                        TransformMode::Select => "[1-4] tool",
                        _ => "[Shift+←→↑↓] apply",
                    });
                    items.extend(["[p]hysics", "[c]omponent", "[l]ock", "[g]rid"]);
                    items
                }
                EditorTab::Scripting => vec!["[h]ot reload"],
                EditorTab::Assets => vec![
                    "[↑][↓] browse",
                    "[Enter] open",
                    "[Bksp] up",
                    "[n]ew folder",
                    "[i]mport",
                ],
                EditorTab::Architecture => vec!["[↑][↓] scroll", "[PgUp][PgDn] page"],
                EditorTab::Build => vec!["[b]uild"],
            };
            items.extend(["[F5] simulate", "[Tab] tab", "[F10] menu", "[Ctrl-s]ave", "[q]uit"]);
            items
        }
    }
}

/// Menu titles, tabs, the simulate toggle, and the build badge.
fn render_title_row(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let open_menu = match &state.mode {
        Mode::Menu { menu, .. } => Some(*menu),
        _ => None,
    };

    queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::CurrentLine))?;
    let mut x: u16 = 1;
    let mut put = |stdout: &mut io::Stdout, text: &str, reverse: bool, bold: bool| -> anyhow::Result<()> {
        let w = text.chars().count() as u16;
        if x + w > layout.term_width {
            return Ok(());
        }
        queue!(stdout, cursor::MoveTo(x, 0))?;
        if reverse {
            queue!(stdout, style::SetAttribute(style::Attribute::Reverse))?;
        }
        if bold {
            queue!(stdout, style::SetAttribute(style::Attribute::Bold))?;
        }
        queue!(stdout, style::Print(text), style::SetAttribute(style::Attribute::Reset))?;
        x += w + 1;
        Ok(())
    };

    put(stdout, "FORGE", false, true)?;
    for (i, (title, _)) in MENUS.iter().enumerate() {
        put(stdout, &format!(" {title} "), open_menu == Some(i), false)?;
    }
    put(stdout, "\u{2502}", false, false)?;
    for tab in EditorTab::ALL {
        put(stdout, &format!(" {} ", tab.label()), tab == state.tab, tab == state.tab)?;
    }
    put(stdout, "\u{2502}", false, false)?;
    if state.is_simulating() {
        put(stdout, " \u{25a0} Stop ", true, true)?;
    } else {
        put(stdout, " \u{25b6} Simulate ", false, true)?;
    }

    let badge_w = BUILD_BADGE.chars().count() as u16;
    if x + badge_w + 1 < layout.term_width {
        queue!(
            stdout,
            cursor::MoveTo(layout.term_width - badge_w - 1, 0),
            style::SetAttribute(style::Attribute::Dim),
            style::Print(BUILD_BADGE),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}

fn render_hints(stdout: &mut io::Stdout, y: u16, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    let mut x: u16 = 1;
    for (i, item) in mode_items(state).iter().enumerate() {
        let item_w = item.chars().count() as u16;
        let sep = if i > 0 { 2 } else { 0 };
        if x + sep + item_w > layout.term_width {
            break;
        }
        if sep > 0 {
            queue!(stdout, style::Print("  "))?;
        }
        print_menu_item(stdout, item)?;
        x += sep + item_w;
    }
    Ok(())
}

pub fn render_menubar(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    if state.screen == Screen::Workspace {
        render_title_row(stdout, layout, state)?;
        render_hints(stdout, 1, layout, state)?;
    } else {
        queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::CurrentLine))?;
        render_hints(stdout, 0, layout, state)?;
    }
    Ok(())
}

/// The open dropdown, drawn over whatever is under the menu bar.
pub fn render_dropdown(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    let Mode::Menu { menu, item } = &state.mode else {
        return Ok(());
    };
    // Same offsets as render_title_row: "FORGE" then " Title " per menu.
    let x = 1 + 6 + MENUS[..*menu]
        .iter()
        .map(|(title, _)| title.chars().count() as u16 + 3)
        .sum::<u16>();
    let items = MENUS[*menu].1;
    let width = items.iter().map(|i| i.chars().count()).max().unwrap_or(0) + 4;

    let top = super::ui::MENU_HEIGHT;
    for (i, label) in items.iter().enumerate() {
        let y = top + i as u16;
        if y >= layout.status_y {
            break;
        }
        print_row(stdout, x, y, &format!(" {label} "), width, i == *item)?;
    }
    let y = top + items.len() as u16;
    if y < layout.status_y {
        queue!(
            stdout,
            cursor::MoveTo(x, y),
            style::Print(clip(&"\u{2500}".repeat(width), layout.term_width.saturating_sub(x) as usize)),
        )?;
    }
    Ok(())
}
