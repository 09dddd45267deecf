//! Renderer: turns draw ops into terminal cells.
//!
//! Rasterization is pure: given the same ops and size it always produces the
//! same grid. Painting the grid onto the terminal is a separate step.

use std::io;

use crossterm::{cursor, queue, style};

use crate::engine::SceneObject;
use crate::types::{Cell, Color, DrawOp, NamedColor, Style, Vec2};

/// Maps viewport-percent coordinates onto a `width` x `height` cell area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: u16,
    pub height: u16,
}

impl Projection {
    /// Cell for a scene point, or `None` when it falls outside the area.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if self.width == 0 || self.height == 0 || !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        let x = (p.x / 100.0 * self.width as f64).floor();
        let y = (p.y / 100.0 * self.height as f64).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        Some((x as u16, y as u16))
    }

    /// Footprint of an object in cells: a 64px sprite is drawn as 3x1 cells
    /// at scale 1, stretched by the object's scale.
    pub fn footprint(&self, scale: Vec2) -> (u16, u16) {
        let w = (3.0 * scale.x).round().clamp(1.0, self.width.max(1) as f64) as u16;
        let h = (1.0 * scale.y).round().clamp(1.0, self.height.max(1) as f64) as u16;
        (w, h)
    }
}

pub struct Renderer;

impl Renderer {
    /// Draw ops for one scene object, centered on its projected position.
    pub fn object_ops(obj: &SceneObject, projection: &Projection, style: Style) -> Vec<DrawOp> {
        let Some((cx, cy)) = projection.to_cell(obj.position) else {
            return Vec::new();
        };
        let (w, h) = projection.footprint(obj.scale);
        let left = cx.saturating_sub(w / 2);
        let top = cy.saturating_sub(h / 2);
        let glyph = obj.glyph();

        let mut ops = Vec::with_capacity((w * h) as usize);
        for dy in 0..h {
            for dx in 0..w {
                let (x, y) = (left + dx, top + dy);
                let ch = if x == cx && y == cy { glyph } else { fill_char(obj) };
                ops.push(DrawOp {
                    x,
                    y,
                    ch,
                    style: style.clone(),
                    z_order: obj.z_index,
                });
            }
        }
        ops
    }

    /// Rasterize draw ops onto a fixed-size cell grid.
    ///
    /// Ops are sorted by z-order so that higher z values paint over lower
    /// ones. Out-of-bounds ops are dropped.
    pub fn rasterize(ops: &[DrawOp], width: u16, height: u16) -> Vec<Vec<Cell>> {
        let w = width as usize;
        let h = height as usize;
        let mut grid = vec![vec![Cell::default(); w]; h];

        let mut sorted: Vec<_> = ops.iter().collect();
        sorted.sort_by_key(|op| op.z_order);

        for op in sorted {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h {
                grid[y][x] = Cell {
                    ch: op.ch,
                    style: op.style.clone(),
                };
            }
        }

        grid
    }

    /// Paint a grid with its top-left corner at `(origin_x, origin_y)`.
    /// Blank unstyled cells are skipped so the background shows through.
    pub fn paint(
        stdout: &mut io::Stdout,
        grid: &[Vec<Cell>],
        origin_x: u16,
        origin_y: u16,
    ) -> anyhow::Result<()> {
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.ch == ' ' && cell.style.is_default() {
                    continue;
                }
                queue!(
                    stdout,
                    cursor::MoveTo(origin_x + x as u16, origin_y + y as u16),
                    style::PrintStyledContent(style::StyledContent::new(
                        to_content_style(&cell.style),
                        cell.ch
                    )),
                )?;
            }
        }
        Ok(())
    }
}

fn fill_char(obj: &SceneObject) -> char {
    match obj.components.collider.as_ref().map(|c| c.shape) {
        Some(crate::engine::components::ColliderShape::Circle) => '●',
        Some(_) => '█',
        None => '·',
    }
}

pub fn to_crossterm_color(color: &Color) -> style::Color {
    match color {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb { r: *r, g: *g, b: *b },
    }
}

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::new();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_crossterm_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_crossterm_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    if s.reverse {
        cs.attributes.set(style::Attribute::Reverse);
    }
    cs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::defaults::create_default;
    use crate::engine::{ObjectId, ObjectKind};

    #[test]
    fn test_projection_bounds() {
        let p = Projection { width: 40, height: 20 };
        assert_eq!(p.to_cell(Vec2::new(50.0, 50.0)), Some((20, 10)));
        assert_eq!(p.to_cell(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(p.to_cell(Vec2::new(99.9, 90.0)), Some((39, 18)));
        assert_eq!(p.to_cell(Vec2::new(100.0, 50.0)), None);
        assert_eq!(p.to_cell(Vec2::new(-1.0, 50.0)), None);
        assert_eq!(p.to_cell(Vec2::new(f64::NAN, 50.0)), None);
    }

    #[test]
    fn test_object_ops_center_glyph() {
        let p = Projection { width: 40, height: 20 };
        let obj = create_default(&ObjectKind::Box, ObjectId::from("b"), 0);
        let ops = Renderer::object_ops(&obj, &p, Style::default());
        assert_eq!(ops.len(), 3);
        let center = ops.iter().find(|op| op.x == 20 && op.y == 10).unwrap();
        assert_eq!(center.ch, 'B');
        assert!(ops.iter().filter(|op| op.ch == '█').count() == 2);
    }

    #[test]
    fn test_rasterize_z_order() {
        let op = |ch, z| DrawOp { x: 1, y: 0, ch, style: Style::default(), z_order: z };
        let grid = Renderer::rasterize(&[op('a', 2), op('b', 1), op('c', 0)], 3, 1);
        assert_eq!(grid[0][1].ch, 'a');
        assert_eq!(grid[0][0].ch, ' ');

        let off = DrawOp { x: 9, y: 9, ch: 'x', style: Style::default(), z_order: 0 };
        let grid = Renderer::rasterize(&[off], 3, 1);
        assert!(grid[0].iter().all(|c| c.ch == ' '));
    }
}
