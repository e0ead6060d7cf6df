use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use delivery_ledger::cli::run_with_io;
use delivery_ledger::gateway::{DryRunGateway, OrderGateway, XlsxGateway, daily_report_path};
use delivery_ledger::ledger::DeliveryLedger;
use delivery_ledger::reporter::SHEET_NAME;
use delivery_ledger::{DeliveryZone, NewOrder, OrderStatus};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn report_path(dir: &TempDir) -> PathBuf {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    daily_report_path(dir.path(), date)
}

fn run_session(gateway: Box<dyn OrderGateway>, path: &Path, script: &str) -> String {
    let mut ledger = DeliveryLedger::open(gateway, path.to_path_buf());
    let mut stdout = Vec::new();
    run_with_io(&mut ledger, &mut Cursor::new(script), &mut stdout).unwrap();
    String::from_utf8(stdout).unwrap()
}

fn sheet_rows(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(<[Data]>::to_vec).collect()
}

fn text(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Empty => String::new(),
        other => format!("{other:?}"),
    }
}

#[test]
fn test_day_of_deliveries_is_written_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let path = report_path(&dir);
    assert!(path.ends_with("deliveries_2024-05-01.xlsx"));

    let script = concat!(
        "1\nRahim\n01700000000\nKettle\n500\n300\n1\nBanani 11\n",
        "1\nKarim\n01800000000\nFan\n1000\n700\n2\nSylhet\n",
        "2\n1\n3\n",
        "5\n",
    );
    let out = run_session(Box::new(XlsxGateway::new()), &path, script);
    assert!(out.contains("Order ID 1 status updated to Delivered."));
    assert!(path.exists());

    let rows = sheet_rows(&path);
    let header: Vec<_> = rows[0].iter().map(text).collect();
    assert_eq!(
        header,
        vec![
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
        ]
    );
    assert_eq!(text(&rows[1][8]), "Delivered");
    assert_eq!(text(&rows[2][8]), "Pending");
    assert_eq!(text(&rows[2][9]), "1100");

    // Header plus two orders fill sheet rows 1-3. Rows 4-5 are blank (row 5
    // carries the bottom border) and the summary starts on row 6, which is
    // index 5 here.
    assert_eq!(text(&rows[5][0]), "Summary");
    assert_eq!(text(&rows[6][0]), "Total Sell");
    assert_eq!(text(&rows[6][1]), "500");
    assert_eq!(text(&rows[7][0]), "Total Delivery Fee");
    assert_eq!(text(&rows[7][1]), "60");
    assert_eq!(text(&rows[8][0]), "Total Profit");
    assert_eq!(text(&rows[8][1]), "200");

    let reloaded = XlsxGateway::new().load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].status, OrderStatus::Delivered);
    assert_eq!(reloaded[1].delivery_fee, dec!(100));

    let out = run_session(Box::new(XlsxGateway::new()), &path, "3\n5\n");
    assert!(out.contains(
        "ID: 1, Customer: Rahim, Product: Kettle, Status: Delivered, Total Price: 560"
    ));
    assert!(
        out.contains("ID: 2, Customer: Karim, Product: Fan, Status: Pending, Total Price: 1100")
    );
}

#[test]
fn test_ids_continue_after_reload() {
    let dir = TempDir::new().unwrap();
    let path = report_path(&dir);

    let mut ledger = DeliveryLedger::open(Box::new(XlsxGateway::new()), path.clone());
    let fields = NewOrder {
        customer_name: "Nadia".to_string(),
        phone_number: "01912345678".to_string(),
        address: "Uttara".to_string(),
        product_name: "Iron".to_string(),
        buying_price: dec!(800),
        product_price: dec!(1200),
    };
    assert_eq!(ledger.add_order(fields.clone(), "1").unwrap(), 1);

    let mut ledger = DeliveryLedger::open(Box::new(XlsxGateway::new()), path);
    assert_eq!(ledger.orders().len(), 1);
    assert_eq!(ledger.add_order(fields, "2").unwrap(), 2);
    assert_eq!(ledger.orders()[1].delivery_fee, DeliveryZone::Remote.fee());
}

#[test]
fn test_delete_all_leaves_header_and_zero_summary() {
    let dir = TempDir::new().unwrap();
    let path = report_path(&dir);

    let script = "1\nA\n1\nP\n500\n300\n1\nX\n4\ny\n5\n";
    let out = run_session(Box::new(XlsxGateway::new()), &path, script);
    assert!(out.contains("All data deleted."));

    let rows = sheet_rows(&path);
    assert_eq!(text(&rows[0][0]), "ID");
    assert_eq!(text(&rows[3][0]), "Summary");
    assert_eq!(text(&rows[4][1]), "0");
    assert!(XlsxGateway::new().load(&path).unwrap().is_empty());
}

#[test]
fn test_corrupt_report_starts_empty_and_is_not_overwritten_on_exit() {
    let dir = TempDir::new().unwrap();
    let path = report_path(&dir);
    std::fs::write(&path, b"not a spreadsheet").unwrap();

    let out = run_session(Box::new(XlsxGateway::new()), &path, "3\n5\n");
    assert!(out.contains("No orders available."));
    assert_eq!(std::fs::read(&path).unwrap(), b"not a spreadsheet");
}

#[test]
fn test_dry_run_session_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = report_path(&dir);

    let script = "1\nA\n1\nP\n500\n300\n1\nX\n3\n5\n";
    let out = run_session(Box::new(DryRunGateway::new()), &path, script);

    assert!(out.contains("Order added successfully (ID 1)."));
    assert!(out.contains("ID: 1, Customer: A, Product: P, Status: Pending, Total Price: 560"));
    assert!(!path.exists());
}
