use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook};
use delivery_order::{Order, OrderStatus, is_amount_in_range};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::info;

use super::OrderGateway;
use crate::error::{PersistenceError, RowError};
use crate::reporter::{self, HEADERS, SHEET_NAME};

/// Reads and writes the styled daily workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxGateway;

impl XlsxGateway {
    pub const fn new() -> Self {
        Self
    }
}

impl OrderGateway for XlsxGateway {
    fn load(&self, path: &Path) -> Result<Vec<Order>, PersistenceError> {
        if !path.exists() {
            return Err(PersistenceError::NotFound(path.to_path_buf()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let range = workbook
            .worksheet_range(SHEET_NAME)
            .map_err(|err| match err {
                XlsxError::WorksheetNotFound(_) => PersistenceError::MissingSheet(SHEET_NAME),
                other => PersistenceError::Read(other),
            })?;

        let orders = parse_rows(range.rows())?;
        info!(count = orders.len(), path = %path.display(), "Loaded orders");
        Ok(orders)
    }

    fn save(&self, path: &Path, orders: &[Order]) -> Result<(), PersistenceError> {
        reporter::xlsx::save(&reporter::render(orders), path)?;
        info!(count = orders.len(), path = %path.display(), "Saved report");
        Ok(())
    }
}

/// Column positions keyed by header name, so hand-reordered columns still
/// load.
struct ColumnMap(HashMap<&'static str, usize>);

static EMPTY_CELL: Data = Data::Empty;

impl ColumnMap {
    fn from_header(row: &[Data]) -> Self {
        let positions = HEADERS
            .iter()
            .filter_map(|&header| {
                row.iter()
                    .position(|cell| matches!(cell, Data::String(text) if text.trim() == header))
                    .map(|index| (header, index))
            })
            .collect();
        Self(positions)
    }

    fn get<'row>(&self, row: &'row [Data], column: &'static str) -> Result<&'row Data, RowError> {
        let index = *self.0.get(column).ok_or(RowError::MissingColumn(column))?;
        Ok(row.get(index).unwrap_or(&EMPTY_CELL))
    }
}

/// Converts sheet rows into orders. Order rows end at the first row whose ID
/// cell is empty; everything below (the summary block) is ignored.
fn parse_rows<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
) -> Result<Vec<Order>, PersistenceError> {
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = ColumnMap::from_header(header);

    let mut orders = Vec::new();
    for (index, row) in rows.enumerate() {
        let id_cell = columns
            .get(row, "ID")
            .map_err(|source| PersistenceError::InvalidRow {
                row: index + 2,
                source,
            })?;
        if is_blank(id_cell) {
            break;
        }

        let order = parse_order(&columns, row).map_err(|source| PersistenceError::InvalidRow {
            row: index + 2,
            source,
        })?;
        orders.push(order);
    }

    Ok(orders)
}

fn parse_order(columns: &ColumnMap, row: &[Data]) -> Result<Order, RowError> {
    let text = |column: &'static str| columns.get(row, column).map(cell_text);
    let amount = |column: &'static str| {
        columns
            .get(row, column)
            .and_then(|cell| cell_amount(column, cell))
    };

    let status_text = text("Status")?;

    Ok(Order {
        id: parse_id(columns.get(row, "ID")?)?,
        customer_name: text("Customer Name")?,
        phone_number: text("Phone Number")?,
        address: text("Address")?,
        product_name: text("Product Name")?,
        buying_price: amount("Buying Price")?,
        product_price: amount("Product Price")?,
        delivery_fee: amount("Delivery Fee")?,
        status: status_text.parse::<OrderStatus>()?,
        // Stale or missing totals are healed by the store after loading.
        total_price: amount("Total Price").unwrap_or_default(),
    })
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Int(number) => number.to_string(),
        Data::Float(number) => Decimal::from_f64(*number)
            .map_or_else(|| number.to_string(), |decimal| decimal.normalize().to_string()),
        Data::Bool(flag) => flag.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_amount(column: &'static str, cell: &Data) -> Result<Decimal, RowError> {
    let not_a_number = || RowError::NotANumber {
        column,
        value: cell_text(cell),
    };

    let amount = match cell {
        Data::Int(number) => Decimal::from(*number),
        Data::Float(number) => Decimal::from_f64(*number).ok_or_else(not_a_number)?,
        Data::String(text) => text.trim().parse::<Decimal>().map_err(|_| not_a_number())?,
        _ => return Err(not_a_number()),
    };

    if !is_amount_in_range(amount) {
        return Err(RowError::AmountOutOfRange {
            column,
            value: amount.normalize().to_string(),
        });
    }
    Ok(amount.normalize())
}

fn parse_id(cell: &Data) -> Result<u32, RowError> {
    let invalid = || RowError::InvalidId(cell_text(cell));
    let amount = cell_amount("ID", cell).map_err(|_| invalid())?;

    if !amount.fract().is_zero() || amount <= Decimal::ZERO {
        return Err(invalid());
    }
    amount.to_u32().ok_or_else(invalid)
}
