//! Invoice generation: the capability-checked entry point over the pure
//! aggregator and renderer.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::access::Actor;
use crate::invoice::{build_invoice, render::render_invoice, Invoice, InvoiceOptions};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

pub struct InvoiceService;

impl InvoiceService {
    /// Builds an invoice for `property_id` over `[start, end]`. Admin only.
    ///
    /// `Ok(None)` means the inputs are incomplete (unknown property or an
    /// inverted range) and the caller should withhold invoice display.
    pub fn generate(
        registry: &Registry,
        actor: &Actor,
        property_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        options: InvoiceOptions,
    ) -> ServiceResult<Option<Invoice>> {
        if !actor.can_generate_invoices() {
            return Err(ServiceError::Forbidden(
                "only administrators generate invoices".into(),
            ));
        }
        if !options.general_fees.is_valid() {
            return Err(ServiceError::Invalid(
                "invoice fees must be non-negative".into(),
            ));
        }
        let Some(property) = registry.property(property_id) else {
            return Ok(None);
        };
        Ok(build_invoice(
            &registry.services,
            property,
            start,
            end,
            options,
        ))
    }

    /// Renders an already-built invoice as a printable document.
    pub fn render_document(invoice: &Invoice) -> String {
        render_invoice(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Property, RateType};

    #[test]
    fn employee_cannot_generate_invoices() {
        let registry = Registry::new("Ops");
        let actor = Actor::employee(Uuid::new_v4());
        let err = InvoiceService::generate(
            &registry,
            &actor,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            InvoiceOptions::default(),
        )
        .expect_err("must be forbidden");
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn negative_fees_are_rejected() {
        let mut registry = Registry::new("Ops");
        let property_id = registry.add_property(Property::new(
            "Villa Azul",
            "Acme Rentals",
            20.0,
            RateType::HourlyUsd,
            15.0,
        ));
        let admin = Actor::admin(Uuid::new_v4());
        let options = InvoiceOptions::default().with_fees(crate::invoice::GeneralFees {
            laundry_fee: -25.0,
            refresh_fee: 0.0,
            other_fee: 0.0,
        });
        let err = InvoiceService::generate(
            &registry,
            &admin,
            property_id,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            options,
        )
        .expect_err("negative fees must not under-bill");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn unknown_property_yields_incomplete_input() {
        let registry = Registry::new("Ops");
        let admin = Actor::admin(Uuid::new_v4());
        let invoice = InvoiceService::generate(
            &registry,
            &admin,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            InvoiceOptions::default(),
        )
        .unwrap();
        assert!(invoice.is_none());
    }

    #[test]
    fn inverted_range_yields_incomplete_input() {
        let mut registry = Registry::new("Ops");
        let property_id = registry.add_property(Property::new(
            "Villa Azul",
            "Acme Rentals",
            20.0,
            RateType::HourlyUsd,
            15.0,
        ));
        let admin = Actor::admin(Uuid::new_v4());
        let invoice = InvoiceService::generate(
            &registry,
            &admin,
            property_id,
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            InvoiceOptions::default(),
        )
        .unwrap();
        assert!(invoice.is_none());
    }
}
