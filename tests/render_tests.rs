mod common;

use chrono::NaiveDate;

use common::{hourly_usd_property, midday, record_at};
use limpia_core::invoice::{build_invoice, render::render_invoice, GeneralFees, InvoiceOptions};

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn sample_invoice(options: InvoiceOptions) -> limpia_core::invoice::Invoice {
    let property = hourly_usd_property(20.0, 15.0);
    let services = vec![
        record_at(&property, midday(2024, 5, 3), 2.0),
        record_at(&property, midday(2024, 5, 10), 1.5),
        record_at(&property, midday(2024, 5, 17), 1.0).as_refresh(),
    ];
    build_invoice(&services, &property, may(1), may(31), options).unwrap()
}

#[test]
fn document_contains_every_line_and_the_totals() {
    let invoice = sample_invoice(InvoiceOptions::with_tax());
    let document = render_invoice(&invoice);

    assert!(document.contains("INVOICE"));
    assert!(document.contains("ACME RENTALS - Villa Azul"));
    assert!(document.contains("Period: 01-05-2024 to 31-05-2024"));
    // One row per billed service.
    assert_eq!(document.matches("2h 00m").count(), 1);
    assert_eq!(document.matches("1h 30m").count(), 1);
    assert!(document.contains("(refresh)"));
    // Totals come straight from the aggregator.
    assert!(document.contains("Total Hours: 4h 30m"));
    assert!(document.contains("Subtotal: $ 85.00"));
    assert!(document.contains("Tax (7%): $ 5.95"));
    assert!(document.contains("TOTAL PAYABLE: $ 90.95"));
}

#[test]
fn tax_line_is_omitted_without_tax() {
    let invoice = sample_invoice(InvoiceOptions::default());
    let document = render_invoice(&invoice);
    assert!(!document.contains("Tax ("));
    assert!(document.contains("TOTAL PAYABLE: $ 85.00"));
}

#[test]
fn fee_block_appears_only_when_fees_are_nonzero() {
    let without = render_invoice(&sample_invoice(InvoiceOptions::default()));
    assert!(!without.contains("Laundry Fee"));
    assert!(!without.contains("Other Fees"));

    let options = InvoiceOptions::default().with_fees(GeneralFees {
        laundry_fee: 10.0,
        refresh_fee: 0.0,
        other_fee: 2.5,
    });
    let with = render_invoice(&sample_invoice(options));
    assert!(with.contains("Laundry Fee: $ 10.00"));
    assert!(!with.contains("Refresh Fee"));
    assert!(with.contains("Other Fees: $ 2.50"));
    assert!(with.contains("Subtotal: $ 97.50"));
}
