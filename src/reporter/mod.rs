//! Daily delivery report.
//!
//! [`render`] lays the orders out into a [`Report`], an in-memory sheet
//! model holding every cell value, style, merged range and column width.
//! [`xlsx`] turns that model into the workbook written to disk. Keeping
//! the layout separate from the file format lets the layout rules be
//! asserted directly.
//!
//! ```text
//! row 1        | ID | Customer Name | ... | Status | Total Price |
//! rows 2..n+1  | one row per order, insertion order               |
//! rows n+2..   | blank, blank (bottom border on row n+3)          |
//! row n+4      | Summary (merged A:C)                             |
//! rows n+5..7  | Total Sell / Total Delivery Fee / Total Profit   |
//! ```

use std::collections::BTreeMap;

use delivery_order::{Order, OrderStatus};
use rust_decimal::Decimal;

mod summary;
pub mod xlsx;

pub use summary::Summary;

pub const SHEET_NAME: &str = "Deliveries";

pub const HEADERS: [&str; 10] = [
    "ID",
    "Customer Name",
    "Phone Number",
    "Address",
    "Product Name",
    "Buying Price",
    "Product Price",
    "Delivery Fee",
    "Status",
    "Total Price",
];

const STATUS_COLUMN: u16 = 8;
const ID_COLUMN_WIDTH: u16 = 21;
const WIDTH_PADDING: usize = 2;
/// Blank rows between the last order and the summary header.
const SUMMARY_GAP: u32 = 3;
const SUMMARY_MERGE_LAST_COLUMN: u16 = 2;
const SUMMARY_TITLE_SIZE: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontColor {
    Black,
    Yellow,
    Blue,
    Green,
    Red,
    Purple,
    DeepPink,
}

impl FontColor {
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Black => 0x00_0000,
            Self::Yellow => 0xFF_FF00,
            Self::Blue => 0x00_00FF,
            Self::Green => 0x00_FF00,
            Self::Red => 0xFF_0000,
            Self::Purple => 0x80_0080,
            Self::DeepPink => 0xFF_1493,
        }
    }
}

impl From<OrderStatus> for FontColor {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Yellow,
            OrderStatus::InProgress => Self::Blue,
            OrderStatus::Delivered => Self::Green,
            OrderStatus::Cancelled => Self::Red,
        }
    }
}

/// Font color of a Status cell given its rendered text. Text that is not a
/// known status renders black.
pub fn status_color(text: &str) -> FontColor {
    text.parse::<OrderStatus>()
        .map_or(FontColor::Black, FontColor::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Thin border on all four edges
    Thin,
    /// Thin border on the bottom edge only
    BottomThin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub centered: bool,
    pub font_color: Option<FontColor>,
    pub font_size: Option<u8>,
    pub border: Option<Border>,
}

impl CellStyle {
    const PLAIN: Self = Self {
        bold: false,
        centered: false,
        font_color: None,
        font_size: None,
        border: None,
    };

    const fn centered() -> Self {
        Self {
            centered: true,
            ..Self::PLAIN
        }
    }

    const fn header() -> Self {
        Self {
            bold: true,
            border: Some(Border::Thin),
            ..Self::centered()
        }
    }

    const fn separator() -> Self {
        Self {
            border: Some(Border::BottomThin),
            ..Self::PLAIN
        }
    }

    const fn label() -> Self {
        Self {
            bold: true,
            ..Self::PLAIN
        }
    }

    const fn colored(self, color: FontColor) -> Self {
        Self {
            font_color: Some(color),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Blank,
}

impl CellValue {
    /// Plain, locale-independent rendering used for width computation.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.normalize().to_string(),
            Self::Blank => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Horizontal merge within a single row, both column bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub row: u32,
    pub first_column: u16,
    pub last_column: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
}

/// Fully laid out report. Rows and columns are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub columns: Vec<Column>,
    pub cells: BTreeMap<(u32, u16), Cell>,
    pub merged: Vec<MergedRange>,
    pub summary: Summary,
    pub summary_start_row: u32,
}

impl Report {
    pub fn cell(&self, row: u32, column: u16) -> Option<&Cell> {
        self.cells.get(&(row, column))
    }

    fn put(&mut self, row: u32, column: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, column), Cell { value, style });
    }
}

fn order_values(order: &Order) -> [CellValue; 10] {
    [
        CellValue::Number(Decimal::from(order.id)),
        CellValue::Text(order.customer_name.clone()),
        CellValue::Text(order.phone_number.clone()),
        CellValue::Text(order.address.clone()),
        CellValue::Text(order.product_name.clone()),
        CellValue::Number(order.buying_price),
        CellValue::Number(order.product_price),
        CellValue::Number(order.delivery_fee),
        CellValue::Text(order.status.as_str().to_string()),
        CellValue::Number(order.total_price),
    ]
}

fn row_index(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn column_index(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

fn column_width(widest: usize) -> u16 {
    u16::try_from(widest + WIDTH_PADDING).unwrap_or(u16::MAX)
}

/// Lays the orders out in the given order. Never fails: an empty slice
/// gives a header-only report with a zero summary.
pub fn render(orders: &[Order]) -> Report {
    let summary = Summary::from_orders(orders);
    let summary_start_row = row_index(orders.len()) + SUMMARY_GAP;

    let mut report = Report {
        columns: Vec::with_capacity(HEADERS.len()),
        cells: BTreeMap::new(),
        merged: Vec::new(),
        summary,
        summary_start_row,
    };

    let mut widest: Vec<usize> = HEADERS.iter().map(|header| header.chars().count()).collect();

    for (column, header) in HEADERS.iter().enumerate() {
        report.put(
            0,
            column_index(column),
            CellValue::Text((*header).to_string()),
            CellStyle::header(),
        );
    }

    for (index, order) in orders.iter().enumerate() {
        let row = row_index(index) + 1;

        for (column, value) in order_values(order).into_iter().enumerate() {
            widest[column] = widest[column].max(value.render().chars().count());

            let column = column_index(column);
            let style = if column == STATUS_COLUMN {
                CellStyle::centered().colored(status_color(&value.render()))
            } else {
                CellStyle::centered()
            };
            report.put(row, column, value, style);
        }
    }

    report.columns = HEADERS
        .iter()
        .zip(&widest)
        .enumerate()
        .map(|(column, (&header, &widest))| Column {
            header,
            width: if column == 0 {
                ID_COLUMN_WIDTH
            } else {
                column_width(widest)
            },
        })
        .collect();

    add_summary_block(&mut report);

    report
}

fn add_summary_block(report: &mut Report) {
    let start = report.summary_start_row;

    for column in 0..HEADERS.len() {
        report.put(
            start - 1,
            column_index(column),
            CellValue::Blank,
            CellStyle::separator(),
        );
    }

    report.put(
        start,
        0,
        CellValue::Text("Summary".to_string()),
        CellStyle {
            bold: true,
            font_size: Some(SUMMARY_TITLE_SIZE),
            ..CellStyle::centered().colored(FontColor::Purple)
        },
    );
    report.merged.push(MergedRange {
        row: start,
        first_column: 0,
        last_column: SUMMARY_MERGE_LAST_COLUMN,
    });

    let value_styles = [
        CellStyle::centered().colored(FontColor::Blue),
        CellStyle::centered().colored(FontColor::DeepPink),
        CellStyle {
            bold: true,
            ..CellStyle::centered().colored(FontColor::Green)
        },
    ];

    for (offset, ((label, amount), style)) in
        (1..).zip(report.summary.rows().into_iter().zip(value_styles))
    {
        report.put(
            start + offset,
            0,
            CellValue::Text(label.to_string()),
            CellStyle::label(),
        );
        report.put(start + offset, 1, CellValue::Number(amount), style);
    }
}
