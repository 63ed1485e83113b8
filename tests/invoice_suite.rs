mod common;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use common::{hourly_usd_property, midday, record_at};
use limpia_core::domain::{Currency, Property, RateType};
use limpia_core::invoice::{build_invoice, GeneralFees, InvoiceOptions};

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[test]
fn empty_range_yields_zero_totals() {
    let property = hourly_usd_property(20.0, 15.0);
    let invoice =
        build_invoice(&[], &property, may(1), may(31), InvoiceOptions::default()).unwrap();
    assert_eq!(invoice.lines.len(), 0);
    assert_eq!(invoice.total_hours, 0.0);
    assert_eq!(invoice.services_total, 0.0);
    assert_eq!(invoice.tax, 0.0);
    assert_eq!(invoice.grand_total, 0.0);
}

#[test]
fn empty_range_with_fees_totals_the_fees() {
    let property = hourly_usd_property(20.0, 15.0);
    let options = InvoiceOptions::default().with_fees(GeneralFees {
        laundry_fee: 12.0,
        refresh_fee: 0.0,
        other_fee: 3.5,
    });
    let invoice = build_invoice(&[], &property, may(1), may(31), options).unwrap();
    assert_eq!(invoice.fees_total, 15.5);
    assert_eq!(invoice.subtotal, 15.5);
    assert_eq!(invoice.grand_total, 15.5);
}

#[test]
fn end_to_end_hourly_refresh_and_tax() {
    // Rate 20/h, refresh 15: 2h + 1.5h + one refresh = 40 + 30 + 15 = 85,
    // 7% tax 5.95, payable 90.95.
    let property = hourly_usd_property(20.0, 15.0);
    let services = vec![
        record_at(&property, midday(2024, 5, 3), 2.0),
        record_at(&property, midday(2024, 5, 10), 1.5),
        record_at(&property, midday(2024, 5, 17), 1.0).as_refresh(),
    ];
    let invoice =
        build_invoice(&services, &property, may(1), may(31), InvoiceOptions::with_tax()).unwrap();

    assert_eq!(invoice.lines.len(), 3);
    assert_eq!(invoice.services_total, 85.0);
    assert_eq!(invoice.subtotal, 85.0);
    assert_eq!(invoice.tax, 5.95);
    assert!((invoice.grand_total - 90.95).abs() < 1e-9);
    assert_eq!(invoice.total_hours, 4.5);
    assert_eq!(invoice.currency, Currency::Usd);
}

#[test]
fn records_for_other_properties_are_excluded() {
    let property = hourly_usd_property(20.0, 15.0);
    let other = hourly_usd_property(50.0, 15.0);
    let services = vec![
        record_at(&property, midday(2024, 5, 3), 2.0),
        record_at(&other, midday(2024, 5, 3), 8.0),
    ];
    let invoice =
        build_invoice(&services, &property, may(1), may(31), InvoiceOptions::default()).unwrap();
    assert_eq!(invoice.lines.len(), 1);
    assert_eq!(invoice.services_total, 40.0);
}

#[test]
fn range_boundaries_are_anchored_and_inclusive() {
    let property = hourly_usd_property(20.0, 15.0);

    // Anchor-zone midnight of May 1 is 05:00 UTC; one millisecond earlier
    // still belongs to April 30 in the anchor zone.
    let start_midnight_utc = Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap();
    let just_before = record_at(
        &property,
        start_midnight_utc - Duration::milliseconds(1),
        2.0,
    );
    let at_start = record_at(&property, start_midnight_utc, 2.0);

    // End of May 31 in the anchor zone is 04:59:59.999 UTC on June 1.
    let end_of_range_utc =
        Utc.with_ymd_and_hms(2024, 6, 1, 4, 59, 59, ).unwrap() + Duration::milliseconds(999);
    let at_end = record_at(&property, end_of_range_utc, 1.0);
    let past_end = record_at(&property, end_of_range_utc + Duration::milliseconds(1), 1.0);

    let services = vec![just_before, at_start.clone(), at_end.clone(), past_end];
    let invoice =
        build_invoice(&services, &property, may(1), may(31), InvoiceOptions::default()).unwrap();

    let ids: Vec<Uuid> = invoice.lines.iter().map(|line| line.record_id).collect();
    assert_eq!(ids, vec![at_start.id, at_end.id]);
}

#[test]
fn negative_fees_never_reduce_the_total() {
    let property = hourly_usd_property(20.0, 15.0);
    let services = vec![record_at(&property, midday(2024, 5, 3), 2.0)];
    let options = InvoiceOptions::default().with_fees(GeneralFees {
        laundry_fee: -25.0,
        refresh_fee: 0.0,
        other_fee: 0.0,
    });
    assert!(build_invoice(&services, &property, may(1), may(31), options).is_none());
}

#[test]
fn inverted_range_is_incomplete_input() {
    let property = hourly_usd_property(20.0, 15.0);
    assert!(build_invoice(&[], &property, may(31), may(1), InvoiceOptions::default()).is_none());
}

#[test]
fn unknown_rate_records_are_flagged_not_billed() {
    let mut property = hourly_usd_property(20.0, 15.0);
    property.rate_type = RateType::Unknown("WEEKLY_EUR".into());
    let normal = record_at(&property, midday(2024, 5, 3), 2.0);
    let refresh = record_at(&property, midday(2024, 5, 4), 1.0).as_refresh();
    let services = vec![normal.clone(), refresh.clone()];

    let invoice =
        build_invoice(&services, &property, may(1), may(31), InvoiceOptions::default()).unwrap();

    // The refresh record short-circuits before the rate plan and still bills.
    assert_eq!(invoice.lines.len(), 1);
    assert_eq!(invoice.lines[0].record_id, refresh.id);
    assert_eq!(invoice.services_total, 15.0);
    assert_eq!(invoice.flagged, vec![normal.id]);
}

#[test]
fn same_inputs_always_produce_the_same_invoice() {
    let property = hourly_usd_property(17.5, 12.0);
    let services = vec![
        record_at(&property, midday(2024, 5, 3), 2.75),
        record_at(&property, midday(2024, 5, 9), 4.25),
    ];
    let first = build_invoice(&services, &property, may(1), may(31), InvoiceOptions::with_tax())
        .unwrap();
    let second = build_invoice(&services, &property, may(1), may(31), InvoiceOptions::with_tax())
        .unwrap();
    assert_eq!(first.grand_total, second.grand_total);
    assert_eq!(first.tax, second.tax);
    assert_eq!(first.total_hours, second.total_hours);
}

#[test]
fn daily_property_bills_flat_per_service() {
    let property = Property::new("Apto 12", "Condominio Sol", 120.0, RateType::DailyFl, 60.0);
    let services = vec![
        record_at(&property, midday(2024, 5, 3), 0.0),
        record_at(&property, midday(2024, 5, 4), 8.0),
    ];
    let invoice =
        build_invoice(&services, &property, may(1), may(31), InvoiceOptions::default()).unwrap();
    assert_eq!(invoice.services_total, 240.0);
    assert_eq!(invoice.currency, Currency::Florin);
}
