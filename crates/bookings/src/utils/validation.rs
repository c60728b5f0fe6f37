//! Input validation utilities.

use std::collections::HashSet;

use regex::Regex;
use salon_database::{ServiceOffer, ServiceType};

use crate::types::{SalonError, SalonResult, ServiceEntry};

/// Checks labelled inputs and fails with every blank one listed, in order.
///
/// `fields` pairs a human label with whether the value is present.
pub fn require_fields(fields: &[(&str, bool)]) -> SalonResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SalonError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// A price list counts as filled in when it has rows and every row has both halves.
pub fn services_present(entries: &[ServiceEntry]) -> bool {
    !entries.is_empty()
        && entries.iter().all(|entry| {
            entry.price.is_some()
                && entry
                    .service_type
                    .as_deref()
                    .map(is_present)
                    .unwrap_or(false)
        })
}

/// Turn a submitted price list into offers, keeping its order.
pub fn parse_services(entries: &[ServiceEntry]) -> SalonResult<Vec<ServiceOffer>> {
    if !services_present(entries) {
        return Err(SalonError::validation(
            "every service needs a type and a price",
        ));
    }

    let mut seen = HashSet::new();
    let mut offers = Vec::with_capacity(entries.len());

    for entry in entries {
        let raw_type = entry.service_type.as_deref().unwrap_or_default().trim();
        let service_type: ServiceType = raw_type.parse().map_err(SalonError::validation)?;
        let price = entry.price.unwrap_or_default();

        if !price.is_finite() || price < 0.0 {
            return Err(SalonError::validation(format!(
                "price for {service_type} must be a non-negative number"
            )));
        }
        if !seen.insert(service_type) {
            return Err(SalonError::validation(format!(
                "service type {service_type} is listed more than once"
            )));
        }

        offers.push(ServiceOffer {
            service_type,
            price,
        });
    }

    Ok(offers)
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> SalonResult<()> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|e| SalonError::internal(format!("invalid email pattern: {e}")))?;

    if email.len() > 255 || !email_regex.is_match(email) {
        return Err(SalonError::validation(format!("invalid email address '{email}'")));
    }
    Ok(())
}

/// Trim an optional update value, rejecting one that is present but blank.
pub fn non_blank_update(label: &str, value: Option<String>) -> SalonResult<Option<String>> {
    match value {
        Some(value) if !is_present(&value) => {
            Err(SalonError::validation(format!("{label} cannot be blank")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Optional free text: trimmed, with blanks treated as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
