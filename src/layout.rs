use crate::display_width::display_width;
use crate::error::Error;
use crate::fd_ast::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaLayout {
    pub boxes: Vec<TableBox>,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBox {
    pub name: String,
    pub rows: Vec<AttributeRow>,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub name: String,
    pub key: bool,
}

impl AttributeRow {
    pub fn text(&self) -> String {
        let marker = if self.key { KEY_MARKER } else { "  " };
        format!("{marker} {}", self.name)
    }
}

const KEY_MARKER: &str = "PK";
const H_GAP: usize = 2;
const V_GAP: usize = 1;
// borders plus one column of padding on each side
const BOX_CHROME: usize = 4;
// top, header, separator, bottom
const BOX_FIXED_ROWS: usize = 4;

/// Lays every suggested table out on a single band, left to right.
pub fn compute(analysis: &Analysis) -> SchemaLayout {
    let boxes = sized_boxes(analysis);
    place(boxes, None)
}

/// Like [`compute`] but starts a new band whenever the next box would cross
/// `max_width`. Fails when a single table is wider than `max_width`.
pub fn compute_with_max_width(analysis: &Analysis, max_width: usize) -> Result<SchemaLayout, Error> {
    let boxes = sized_boxes(analysis);
    if boxes.iter().any(|b| b.width > max_width) {
        return Err(Error::TooWide(max_width));
    }
    Ok(place(boxes, Some(max_width)))
}

fn sized_boxes(analysis: &Analysis) -> Vec<TableBox> {
    analysis
        .tables
        .iter()
        .enumerate()
        .map(|(i, table)| {
            let key = if i == 0 {
                &analysis.primary_key
            } else {
                table
                    .dependencies
                    .first()
                    .map(|fd| &fd.determinant)
                    .unwrap_or(&analysis.primary_key)
            };
            table_box(table, key)
        })
        .collect()
}

fn table_box(table: &SuggestedTable, key: &AttributeSet) -> TableBox {
    let rows: Vec<AttributeRow> = table
        .attributes
        .iter()
        .map(|a| AttributeRow {
            name: a.to_string(),
            key: key.contains(a),
        })
        .collect();
    let content_width = rows
        .iter()
        .map(|r| display_width(&r.text()))
        .chain(std::iter::once(display_width(&table.name)))
        .max()
        .unwrap_or(0);

    TableBox {
        name: table.name.clone(),
        height: BOX_FIXED_ROWS + rows.len(),
        width: content_width + BOX_CHROME,
        rows,
        x: 0,
        y: 0,
    }
}

fn place(mut boxes: Vec<TableBox>, max_width: Option<usize>) -> SchemaLayout {
    let mut x = 0;
    let mut y = 0;
    let mut band_height = 0;

    for b in &mut boxes {
        let overflows = max_width.is_some_and(|w| x > 0 && x + b.width > w);
        if overflows {
            y += band_height + V_GAP;
            x = 0;
            band_height = 0;
        }
        b.x = x;
        b.y = y;
        x += b.width + H_GAP;
        band_height = band_height.max(b.height);
    }

    let width = boxes.iter().map(|b| b.x + b.width).max().unwrap_or(0);
    let height = boxes.iter().map(|b| b.y + b.height).max().unwrap_or(0);

    SchemaLayout {
        boxes,
        width,
        height,
    }
}
