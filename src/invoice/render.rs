//! Plain-text invoice document rendering.
//!
//! A pure data-to-text mapping over [`Invoice`]: every line the aggregator
//! billed is printed, the fee block appears only when a fee is nonzero, and
//! the totals are the aggregator's numbers verbatim, never recomputed.

use crate::dates::format_anchor_date;
use crate::format::{format_amount, format_hours_minutes};

use super::Invoice;

const RULE_WIDTH: usize = 62;

/// Renders the invoice as a printable text document.
pub fn render_invoice(invoice: &Invoice) -> String {
    let mut out = String::new();
    let currency = invoice.currency;

    push_line(&mut out, "INVOICE");
    push_line(
        &mut out,
        &format!(
            "{} - {}",
            invoice.client_name.to_uppercase(),
            invoice.property_name
        ),
    );
    push_line(
        &mut out,
        &format!(
            "Period: {} to {}",
            format_anchor_date(invoice.start),
            format_anchor_date(invoice.end)
        ),
    );
    push_rule(&mut out);

    push_line(
        &mut out,
        &format!(
            "{:<24} {:>9} {:>12} {:>12}",
            "DESCRIPTION", "HOURS", "RATE", "AMOUNT"
        ),
    );
    for line in &invoice.lines {
        let description = if line.is_refresh {
            format!("{} (refresh)", line.date.format("%A, %B %-d"))
        } else {
            line.date.format("%A, %B %-d").to_string()
        };
        push_line(
            &mut out,
            &format!(
                "{:<24} {:>9} {:>12} {:>12}",
                description,
                format_hours_minutes(line.hours),
                format_amount(currency, line.rate),
                format_amount(currency, line.amount),
            ),
        );
    }
    push_rule(&mut out);

    let fees = &invoice.options.general_fees;
    if !fees.is_zero() {
        if fees.laundry_fee > 0.0 {
            push_line(
                &mut out,
                &format!("Laundry Fee: {}", format_amount(currency, fees.laundry_fee)),
            );
        }
        if fees.refresh_fee > 0.0 {
            push_line(
                &mut out,
                &format!("Refresh Fee: {}", format_amount(currency, fees.refresh_fee)),
            );
        }
        if fees.other_fee > 0.0 {
            push_line(
                &mut out,
                &format!("Other Fees: {}", format_amount(currency, fees.other_fee)),
            );
        }
        push_rule(&mut out);
    }

    push_line(
        &mut out,
        &format!("Total Hours: {}", format_hours_minutes(invoice.total_hours)),
    );
    push_line(
        &mut out,
        &format!("Subtotal: {}", format_amount(currency, invoice.subtotal)),
    );
    if invoice.options.include_tax {
        let percent = crate::billing::round_currency(invoice.options.tax_rate * 100.0);
        push_line(
            &mut out,
            &format!("Tax ({}%): {}", percent, format_amount(currency, invoice.tax)),
        );
    }
    push_line(
        &mut out,
        &format!(
            "TOTAL PAYABLE: {}",
            format_amount(currency, invoice.grand_total)
        ),
    );

    if !invoice.flagged.is_empty() {
        push_rule(&mut out);
        push_line(
            &mut out,
            &format!(
                "WARNING: {} record(s) excluded due to unrecognized rate plan.",
                invoice.flagged.len()
            ),
        );
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String) {
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}
