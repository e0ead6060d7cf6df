use std::io::{BufRead, Write};
use std::str::FromStr;

use delivery_order::{DeliveryZone, NewOrder, OrderStatus, is_amount_in_range};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::LedgerError;
use crate::ledger::DeliveryLedger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Invalid input: '{value}' is not a valid {expected}")]
    InvalidInput {
        value: String,
        expected: &'static str,
    },
}

fn parse_input<T: FromStr>(raw: &str, expected: &'static str) -> Result<T, CliError> {
    raw.trim().parse().map_err(|_| CliError::InvalidInput {
        value: raw.trim().to_string(),
        expected,
    })
}

fn parse_price(raw: &str) -> Result<Decimal, CliError> {
    let price: Decimal = parse_input(raw, "price")?;
    if price.is_sign_negative() || !is_amount_in_range(price) {
        return Err(CliError::InvalidInput {
            value: raw.trim().to_string(),
            expected: "price",
        });
    }
    Ok(price)
}

fn parse_order_id(raw: &str) -> Result<u32, CliError> {
    parse_input(raw, "order ID")
}

fn parse_status_choice(raw: &str) -> Result<Option<OrderStatus>, CliError> {
    let choice: u8 = parse_input(raw, "status number")?;
    Ok(OrderStatus::from_menu_choice(choice))
}

/// Line-oriented prompt. `None` once input is exhausted.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    stdout: &mut W,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    stdout: &mut W,
    prompt: &str,
) -> anyhow::Result<String> {
    Ok(read_line(input, stdout, prompt)?.unwrap_or_default())
}

/// `None` after telling the user the price was rejected.
fn read_price<R: BufRead, W: Write>(
    input: &mut R,
    stdout: &mut W,
    label: &str,
) -> anyhow::Result<Option<Decimal>> {
    match parse_price(&prompt(input, stdout, label)?) {
        Ok(price) => Ok(Some(price)),
        Err(err) => {
            warn!("Order not added: {err}");
            writeln!(
                stdout,
                "Invalid input. Please enter numerical values for price."
            )?;
            Ok(None)
        }
    }
}

fn write_menu<W: Write>(stdout: &mut W) -> std::io::Result<()> {
    writeln!(stdout)?;
    writeln!(stdout, "Delivery Management System")?;
    writeln!(stdout, "1. Add Delivery Order")?;
    writeln!(stdout, "2. Update Delivery Status")?;
    writeln!(stdout, "3. View All Orders")?;
    writeln!(stdout, "4. Delete All Data")?;
    writeln!(stdout, "5. Save and Exit")
}

fn report_save_failure<W: Write>(stdout: &mut W, err: &LedgerError) -> std::io::Result<()> {
    writeln!(stdout, "Warning: {err}")?;
    writeln!(
        stdout,
        "   The change is kept in memory and will be written on the next successful save."
    )
}

pub fn run(ledger: &mut DeliveryLedger) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    run_with_io(ledger, &mut stdin.lock(), &mut std::io::stdout())
}

/// Menu loop over arbitrary input/output so sessions can be scripted.
pub fn run_with_io<R: BufRead, W: Write>(
    ledger: &mut DeliveryLedger,
    input: &mut R,
    stdout: &mut W,
) -> anyhow::Result<()> {
    loop {
        write_menu(stdout)?;
        let Some(choice) = read_line(input, stdout, "Enter your choice: ")? else {
            info!("Input closed, leaving the menu");
            save_and_exit(ledger, stdout)?;
            break;
        };

        match choice.trim() {
            "1" => add_order(ledger, input, stdout)?,
            "2" => update_status(ledger, input, stdout)?,
            "3" => view_orders(ledger, stdout)?,
            "4" => delete_all(ledger, input, stdout)?,
            "5" => {
                save_and_exit(ledger, stdout)?;
                break;
            }
            _ => writeln!(stdout, "Invalid choice. Please try again.")?,
        }
    }

    Ok(())
}

fn add_order<R: BufRead, W: Write>(
    ledger: &mut DeliveryLedger,
    input: &mut R,
    stdout: &mut W,
) -> anyhow::Result<()> {
    let customer_name = prompt(input, stdout, "Enter customer name: ")?;
    let phone_number = prompt(input, stdout, "Enter phone number: ")?;
    let product_name = prompt(input, stdout, "Enter product name: ")?;

    let Some(product_price) = read_price(input, stdout, "Enter product price: ")? else {
        return Ok(());
    };
    let Some(buying_price) = read_price(input, stdout, "Enter buying price: ")? else {
        return Ok(());
    };

    writeln!(stdout)?;
    writeln!(stdout, "Select Delivery Location:")?;
    writeln!(
        stdout,
        "1. Inside the city ({} delivery charge)",
        DeliveryZone::Local.fee()
    )?;
    writeln!(
        stdout,
        "2. Outside the city ({} delivery charge)",
        DeliveryZone::Remote.fee()
    )?;
    let zone_choice = prompt(input, stdout, "Enter your choice (1 or 2): ")?;
    if DeliveryZone::from_choice(&zone_choice).is_err() {
        writeln!(
            stdout,
            "Invalid choice. Defaulting to {} delivery charge (inside the city).",
            DeliveryZone::Local.fee()
        )?;
    }

    let address = prompt(input, stdout, "Enter delivery address: ")?;

    let fields = NewOrder {
        customer_name,
        phone_number,
        address,
        product_name,
        buying_price,
        product_price,
    };

    match ledger.add_order(fields, &zone_choice) {
        Ok(id) => writeln!(stdout, "Order added successfully (ID {id}).")?,
        Err(err) => report_save_failure(stdout, &err)?,
    }

    Ok(())
}

fn update_status<R: BufRead, W: Write>(
    ledger: &mut DeliveryLedger,
    input: &mut R,
    stdout: &mut W,
) -> anyhow::Result<()> {
    let id = match parse_order_id(&prompt(input, stdout, "Enter order ID to update: ")?) {
        Ok(id) => id,
        Err(err) => {
            warn!("{err}");
            writeln!(stdout, "Invalid order ID. Please enter a number.")?;
            return Ok(());
        }
    };

    if ledger.store().find_by_id(id).is_err() {
        writeln!(
            stdout,
            "Order ID {id} not found. Please check the order ID and try again."
        )?;
        return Ok(());
    }

    writeln!(stdout)?;
    writeln!(stdout, "Select a new status for the delivery:")?;
    for (number, status) in (1..).zip(OrderStatus::ALL) {
        writeln!(stdout, "{number}. {status}")?;
    }
    let raw = prompt(
        input,
        stdout,
        "Enter the number corresponding to the status: ",
    )?;

    let status = match parse_status_choice(&raw) {
        Ok(Some(status)) => status,
        Ok(None) => {
            writeln!(stdout, "Invalid choice. Status not updated.")?;
            return Ok(());
        }
        Err(err) => {
            warn!("{err}");
            writeln!(stdout, "Invalid input. Please enter a number.")?;
            return Ok(());
        }
    };

    match ledger.set_status(id, status) {
        Ok(()) => writeln!(stdout, "Order ID {id} status updated to {status}.")?,
        Err(LedgerError::Order(err)) => writeln!(stdout, "{err}")?,
        Err(err) => report_save_failure(stdout, &err)?,
    }

    Ok(())
}

fn view_orders<W: Write>(ledger: &DeliveryLedger, stdout: &mut W) -> anyhow::Result<()> {
    if ledger.orders().is_empty() {
        writeln!(stdout, "No orders available.")?;
        return Ok(());
    }

    writeln!(stdout)?;
    writeln!(stdout, "All Orders:")?;
    for order in ledger.orders() {
        writeln!(
            stdout,
            "ID: {}, Customer: {}, Product: {}, Status: {}, Total Price: {}",
            order.id,
            order.customer_name,
            order.product_name,
            order.status,
            order.total_price.normalize()
        )?;
    }

    Ok(())
}

fn delete_all<R: BufRead, W: Write>(
    ledger: &mut DeliveryLedger,
    input: &mut R,
    stdout: &mut W,
) -> anyhow::Result<()> {
    let confirm = prompt(
        input,
        stdout,
        "Are you sure you want to delete all data? This action cannot be undone. (y/n): ",
    )?;

    if !confirm.trim().eq_ignore_ascii_case("y") {
        writeln!(stdout, "Deletion cancelled.")?;
        return Ok(());
    }

    match ledger.clear_all() {
        Ok(()) => writeln!(stdout, "All data deleted.")?,
        Err(err) => report_save_failure(stdout, &err)?,
    }

    Ok(())
}

/// Every accepted change is already on disk; only retry when the last save
/// failed.
fn save_and_exit<W: Write>(ledger: &mut DeliveryLedger, stdout: &mut W) -> anyhow::Result<()> {
    if ledger.has_unsaved_changes() {
        match ledger.save() {
            Ok(()) => writeln!(stdout, "Data saved to {}.", ledger.path().display())?,
            Err(err) => writeln!(stdout, "Warning: failed to save before exit: {err}")?,
        }
    }

    writeln!(stdout, "Exiting the system. Goodbye!")?;
    Ok(())
}
