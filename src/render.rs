use rayon::prelude::*;

use crate::cell::Cell;
use crate::field::Field;
use crate::grid::Grid;

// Heat-map palette: sources, near, far, out of range
const SOURCE: [u8; 4] = [220, 60, 50, 255];
const NEAR: [u8; 4] = [250, 200, 80, 255];
const FAR: [u8; 4] = [70, 130, 180, 255];
const OUTSIDE: [u8; 4] = [30, 30, 36, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// Scatter annotated cells into a dense distance map (`None` = out of range).
pub fn distance_map(rows: usize, cols: usize, cells: &[Cell<u32>]) -> Field<Option<u32>> {
    let mut field = Field::filled(rows, cols, None);
    for cell in cells {
        let (r, c) = (cell.row as usize, cell.col as usize);
        if r < rows && c < cols {
            field.set(r, c, Some(cell.value));
        }
    }
    field
}

/// Render a distance map as RGBA, `scale` pixels per cell.
pub fn render_distance(dist: &Field<Option<u32>>, max_distance: u32, scale: usize) -> Vec<u8> {
    let scale = scale.max(1);
    let w = dist.cols * scale;
    let h = dist.rows * scale;
    let mut rgba = vec![0u8; w * h * 4];
    // Ring 1 is NEAR, the outermost ring is FAR.
    let span = max_distance.saturating_sub(1);

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let r = y / scale;
            for x in 0..w {
                let color = match dist.get(r, x / scale) {
                    None => OUTSIDE,
                    Some(0) => SOURCE,
                    Some(_) if span == 0 => FAR,
                    Some(d) => lerp_color(NEAR, FAR, (d - 1) as f32 / span as f32),
                };
                row[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}

/// Options for [`ascii_table`].
#[derive(Clone, Debug)]
pub struct AsciiOptions {
    /// Draw sources as `+` rather than `0`.
    pub plus_on_sources: bool,
    /// Marker for cells out of range.
    pub outside: char,
}

impl Default for AsciiOptions {
    fn default() -> Self {
        Self {
            plus_on_sources: true,
            outside: '.',
        }
    }
}

/// Boxed text table of a result: distance per cell, header with the query.
pub fn ascii_table(grid: &Grid, max_distance: u32, cells: &[Cell<u32>], opts: &AsciiOptions) -> String {
    let (rows, cols) = grid.shape();
    let dist = distance_map(rows, cols, cells);
    let config = grid.config();

    let row_w = (rows - 1).to_string().len().max(1);
    let cell_w = max_distance.to_string().len().max(1);
    let pad = |s: &str| format!(" {s:>cell_w$} ");
    let left = " ".repeat(row_w + 2);
    let rule = format!(
        "{left}+{}+",
        vec!["-".repeat(cell_w + 2); cols].join("+")
    );

    let mut lines = Vec::with_capacity(rows * 2 + 3);
    lines.push(format!(
        "{grid}, N={max_distance}, wrap_rows={}, wrap_cols={}, {} {} neighbors",
        config.wrap_rows,
        config.wrap_cols,
        config.distance_type,
        cells.len()
    ));
    let header: Vec<String> = (0..cols).map(|c| pad(&c.to_string())).collect();
    lines.push(format!("{}  {} ", " ".repeat(row_w + 1), header.join(" ")));
    lines.push(rule.clone());

    for r in 0..rows {
        let row_cells: Vec<String> = (0..cols)
            .map(|c| match dist.get(r, c) {
                None => pad(&opts.outside.to_string()),
                Some(0) if opts.plus_on_sources => pad("+"),
                Some(d) => pad(&d.to_string()),
            })
            .collect();
        lines.push(format!("{r:>row_w$}  |{}|", row_cells.join("|")));
        lines.push(rule.clone());
    }

    lines.join("\n")
}
