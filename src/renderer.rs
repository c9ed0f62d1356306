use crate::display_width::char_width;
use crate::fd_ast::*;
use crate::layout::*;
use crate::normal_form::{NormalForm, Step};

const BOX_TL: char = '┌';
const BOX_TR: char = '┐';
const BOX_BL: char = '└';
const BOX_BR: char = '┘';
const BOX_H: char = '─';
const BOX_V: char = '│';
const BOX_ML: char = '├';
const BOX_MR: char = '┤';
// placeholder for the trailing column of a wide character
const WIDE_TAIL: char = '\0';

struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            width,
            height,
        }
    }

    fn set(&mut self, row: usize, col: usize, ch: char) {
        if row < self.height && col < self.width {
            self.cells[row][col] = ch;
        }
    }

    fn write_str(&mut self, row: usize, col: usize, s: &str) {
        let mut offset = 0;
        for ch in s.chars() {
            self.set(row, col + offset, ch);
            let w = char_width(ch);
            for j in 1..w {
                self.set(row, col + offset + j, WIDE_TAIL);
            }
            offset += w;
        }
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&ch| ch != WIDE_TAIL).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Text report: classification, findings, then the suggested tables as boxes.
pub fn render(analysis: &Analysis, layout: &SchemaLayout, claim_bcnf: bool) -> String {
    let mut out = summary(analysis, claim_bcnf);
    out.push_str(&render_tables(layout));
    out
}

fn summary(analysis: &Analysis, claim_bcnf: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Table: {}", analysis.table_name));

    let bcnf = claim_bcnf && analysis.label == NormalForm::ThirdOrHigher;
    if bcnf {
        lines.push(format!("Normal form: {} (BCNF assumed)", analysis.label));
    } else {
        lines.push(format!("Normal form: {}", analysis.label));
    }
    lines.push(analysis.label.description().to_string());

    let reached = Step::reached(analysis.label);
    if !bcnf && reached.next() != reached {
        let next = reached.next();
        lines.push(format!("Next: {} ({})", next.title(), next.description()));
    }

    if analysis.violations.is_empty() {
        lines.push("Violations: none".to_string());
    } else {
        lines.push("Violations:".to_string());
        for v in &analysis.violations {
            lines.push(format!("  - {v}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("Suggested tables ({}):", analysis.tables.len()));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_tables(layout: &SchemaLayout) -> String {
    let mut grid = Grid::new(layout.width, layout.height);
    for b in &layout.boxes {
        draw_box(&mut grid, b);
    }
    grid.render()
}

fn draw_box(grid: &mut Grid, b: &TableBox) {
    let (x, y, w) = (b.x, b.y, b.width);
    let bottom = y + b.height - 1;

    horizontal(grid, y, x, w, BOX_TL, BOX_TR);
    side_walls(grid, y + 1, x, w);
    grid.write_str(y + 1, x + 2, &b.name);
    horizontal(grid, y + 2, x, w, BOX_ML, BOX_MR);

    for (i, row) in b.rows.iter().enumerate() {
        let r = y + 3 + i;
        side_walls(grid, r, x, w);
        grid.write_str(r, x + 2, &row.text());
    }

    horizontal(grid, bottom, x, w, BOX_BL, BOX_BR);
}

fn horizontal(grid: &mut Grid, row: usize, x: usize, w: usize, left: char, right: char) {
    grid.set(row, x, left);
    for col in (x + 1)..(x + w - 1) {
        grid.set(row, col, BOX_H);
    }
    grid.set(row, x + w - 1, right);
}

fn side_walls(grid: &mut Grid, row: usize, x: usize, w: usize) {
    grid.set(row, x, BOX_V);
    grid.set(row, x + w - 1, BOX_V);
}
