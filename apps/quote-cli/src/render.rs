//! # Table Rendering
//!
//! Plain-text invoice layout for the terminal.
//!
//! ```text
//! Ravan Ro Damavand Elevator Co.
//! Tehran - Damavand | 021-12345678
//!
//! System: hydraulic    Floors: 5
//!
//!   #  Item                                   Qty  Unit        Unit price            Total
//!   1  Electrical wire No. 4 / 0.75           100  meter           50,000        5,000,000
//!  ...
//!
//! Total: 123,375,000 Rial
//! ```

use liftquote_core::{format_thousands, CompanyInfo, InvoiceHeader, InvoiceResult, QuoteRequest};

const NAME_WIDTH: usize = 36;

/// Renders an invoice as an itemized table.
pub fn invoice_table(
    company: &CompanyInfo,
    request: &QuoteRequest,
    header: Option<&InvoiceHeader>,
    result: &InvoiceResult,
    currency_label: &str,
) -> String {
    let mut out = format!("{}\n{} | {}\n\n", company.name, company.address, company.phone);

    if let Some(header) = header {
        out.push_str(&format!(
            "Customer: {}    Project: {}\n",
            header.customer_name, header.project_name
        ));
    }
    out.push_str(&format!(
        "System: {}    Floors: {}\n\n",
        request.system(),
        request.floors()
    ));

    if result.is_empty() {
        out.push_str("No catalog items apply to this request.\n");
    } else {
        out.push_str(&table_row("#", "Item", "Qty", "Unit", "Unit price", "Total"));
        for (index, item) in result.items.iter().enumerate() {
            out.push_str(&table_row(
                &(index + 1).to_string(),
                &item.name,
                &format_quantity(item.quantity),
                &item.unit,
                &format_thousands(item.unit_price),
                &format_thousands(item.total_price),
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Total: {} {}\n",
        format_thousands(result.total_price),
        currency_label
    ));

    out
}

fn table_row(index: &str, name: &str, quantity: &str, unit: &str, unit_price: &str, total: &str) -> String {
    format!("{index:>3}  {name:<NAME_WIDTH$} {quantity:>8}  {unit:<10} {unit_price:>12} {total:>16}\n")
}

/// Whole quantities print without decimals, fractional ones with two.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{quantity:.2}")
    }
}
