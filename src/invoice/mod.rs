//! Invoice aggregation: filters service records to a property and date range,
//! totals them through the rate engine, applies invoice-level fees and
//! optional tax, and exposes everything the document renderer needs.
//!
//! Invoices are derived values. They are rebuilt from current records on every
//! request and never stored, so the same inputs always produce the same
//! invoice.

pub mod render;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::{round_currency, service_amount, DEFAULT_TAX_RATE};
use crate::dates::anchor_date;
use crate::domain::{Currency, Property, ServiceRecord};

/// Flat add-ons entered at invoice time, distinct from any per-record fees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralFees {
    #[serde(default)]
    pub laundry_fee: f64,
    #[serde(default)]
    pub refresh_fee: f64,
    #[serde(default)]
    pub other_fee: f64,
}

impl GeneralFees {
    pub fn total(&self) -> f64 {
        self.laundry_fee + self.refresh_fee + self.other_fee
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// Fees are add-ons; a negative value would silently under-bill.
    pub fn is_valid(&self) -> bool {
        self.laundry_fee >= 0.0 && self.refresh_fee >= 0.0 && self.other_fee >= 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InvoiceOptions {
    pub include_tax: bool,
    /// Tax rate applied when `include_tax` is set; defaults to the business
    /// standard 7%.
    pub tax_rate: f64,
    #[serde(default)]
    pub general_fees: GeneralFees,
}

impl Default for InvoiceOptions {
    fn default() -> Self {
        Self {
            include_tax: false,
            tax_rate: DEFAULT_TAX_RATE,
            general_fees: GeneralFees::default(),
        }
    }
}

impl InvoiceOptions {
    pub fn with_tax() -> Self {
        Self {
            include_tax: true,
            ..Self::default()
        }
    }

    pub fn with_fees(mut self, general_fees: GeneralFees) -> Self {
        self.general_fees = general_fees;
        self
    }
}

/// One billed service on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub record_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub rate: f64,
    pub amount: f64,
    pub is_refresh: bool,
}

/// A fully-aggregated invoice, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub property_id: Uuid,
    pub property_name: String,
    pub client_name: String,
    pub currency: Currency,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lines: Vec<InvoiceLine>,
    pub total_hours: f64,
    pub services_total: f64,
    pub fees_total: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
    /// Records inside the range whose rate plan could not be resolved. They
    /// are excluded from every total; callers must surface them instead of
    /// letting the invoice silently under-bill.
    pub flagged: Vec<Uuid>,
    pub options: InvoiceOptions,
}

/// Builds an invoice for `property` over the inclusive anchor-zone day range
/// `[start, end]`.
///
/// `records` may be the full record set; filtering happens here. Returns
/// `None` when the range is inverted or a general fee is negative, which
/// callers treat as "not enough input yet" rather than an error.
pub fn build_invoice(
    records: &[ServiceRecord],
    property: &Property,
    start: NaiveDate,
    end: NaiveDate,
    options: InvoiceOptions,
) -> Option<Invoice> {
    if start > end || !options.general_fees.is_valid() {
        return None;
    }

    let mut lines = Vec::new();
    let mut flagged = Vec::new();
    let mut total_hours = 0.0;
    let mut services_total = 0.0;

    for record in records {
        if record.property_id != property.id {
            continue;
        }
        let day = anchor_date(record.service_date);
        if day < start || day > end {
            continue;
        }
        match service_amount(record, property) {
            Ok(amount) => {
                total_hours += record.hours_worked;
                services_total += amount;
                lines.push(InvoiceLine {
                    record_id: record.id,
                    date: day,
                    hours: record.hours_worked,
                    rate: property.regular_rate,
                    amount,
                    is_refresh: record.is_refresh_service,
                });
            }
            Err(error) => {
                tracing::warn!(record = %record.id, %error, "excluding record from invoice");
                flagged.push(record.id);
            }
        }
    }

    lines.sort_by(|a, b| a.date.cmp(&b.date));

    let fees_total = options.general_fees.total();
    let subtotal = services_total + fees_total;
    let tax = if options.include_tax {
        round_currency(subtotal * options.tax_rate)
    } else {
        0.0
    };
    let grand_total = subtotal + tax;

    Some(Invoice {
        property_id: property.id,
        property_name: property.name.clone(),
        client_name: property.client_name.clone(),
        currency: property.currency(),
        start,
        end,
        lines,
        total_hours,
        services_total,
        fees_total,
        subtotal,
        tax,
        grand_total,
        flagged,
        options,
    })
}
