use std::io;

use crossterm::{cursor, queue, style};

use crate::assets::{Asset, AssetCatalog};

use super::state::EditorState;
use super::ui::{clip, print_dim, print_row, Rect};

/// "Assets / SFX / Jumps"
pub fn breadcrumb_line(assets: &AssetCatalog) -> String {
    std::iter::once("Assets")
        .chain(assets.breadcrumb())
        .collect::<Vec<_>>()
        .join(" / ")
}

fn entry_label(asset: &Asset) -> String {
    format!("{} {}", asset.kind.icon(), asset.name)
}

/// Bottom strip: breadcrumb and the current folder's entries on one line.
pub fn render_asset_strip(stdout: &mut io::Stdout, rect: Rect, state: &EditorState) -> anyhow::Result<()> {
    if rect.height < 2 || rect.width < 4 {
        return Ok(());
    }
    let width = rect.width as usize;
    let title = format!("\u{2500} {} ", breadcrumb_line(&state.assets));
    let fill = width.saturating_sub(title.chars().count());
    queue!(
        stdout,
        cursor::MoveTo(rect.x, rect.y),
        style::SetAttribute(style::Attribute::Dim),
        style::Print(clip(&format!("{title}{}", "\u{2500}".repeat(fill)), width)),
        style::SetAttribute(style::Attribute::Reset),
    )?;

    let rows = state.asset_rows();
    if rows.is_empty() {
        return print_dim(stdout, rect.x + 1, rect.y + 1, "Empty folder", width - 1);
    }

    // Entries flow left to right, wrapping onto the strip's rows.
    let mut x = rect.x + 1;
    let mut y = rect.y + 1;
    for asset in rows {
        let label = entry_label(asset);
        let w = label.chars().count() as u16 + 3;
        if x + w > rect.x + rect.width {
            x = rect.x + 1;
            y += 1;
        }
        if y >= rect.bottom() {
            break;
        }
        queue!(stdout, cursor::MoveTo(x, y), style::Print(clip(&label, width)))?;
        x += w;
    }
    Ok(())
}

/// Assets tab: full listing of the current folder with a cursor.
pub fn render_asset_browser(stdout: &mut io::Stdout, rect: Rect, state: &EditorState) -> anyhow::Result<()> {
    if rect.height < 3 || rect.width < 8 {
        return Ok(());
    }
    let x = rect.x + 2;
    let width = rect.width as usize - 3;

    queue!(
        stdout,
        cursor::MoveTo(x, rect.y),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(clip(&breadcrumb_line(&state.assets), width)),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    if state.assets.current_id().is_some() {
        print_dim(stdout, x, rect.y + 1, "[Bksp] .. back", width)?;
    }

    let rows = state.asset_rows();
    let top = rect.y + 2;
    if rows.is_empty() {
        return print_dim(stdout, x, top, "Empty folder. [n]ew folder or [i]mport", width);
    }

    let visible = (rect.bottom() - top) as usize;
    let skip = (state.asset_cursor + 1).saturating_sub(visible);
    let name_w = width.saturating_sub(22).max(8);
    for (i, asset) in rows.iter().enumerate().skip(skip).take(visible) {
        let line = format!(
            "{:<name_w$} {:<8} {:>12}",
            clip(&entry_label(asset), name_w),
            format!("{:?}", asset.kind),
            asset.size,
        );
        print_row(stdout, x, top + (i - skip) as u16, &line, width, i == state.asset_cursor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_line() {
        let mut assets = AssetCatalog::seeded();
        assert_eq!(breadcrumb_line(&assets), "Assets");
        assets.enter("1");
        let id = assets.create_folder("Jumps", Some("1")).unwrap();
        assets.enter(&id);
        assert_eq!(breadcrumb_line(&assets), "Assets / SFX / Jumps");
    }
}
