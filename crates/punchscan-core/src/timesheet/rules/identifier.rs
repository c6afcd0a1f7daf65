//! Service order and category identifier matchers.

use super::patterns::{
    CATEGORY_LABELED, JOB_LABELED, ORDER_BARE, ORDER_LABELED_FUZZY, ORDER_LABELED_STRICT,
    ORDER_SHAPE,
};
use super::{FieldMatch, FieldValue};
use crate::models::entry::Identifier;

/// Upper-case an identifier and canonicalize it.
///
/// Tokens with the service order shape become `SO##-#####-#####`, with a
/// leading `$` read as `S` and a letter `O` in any digit group read as `0`.
/// Anything else is stripped to `[A-Z0-9-]`.
pub fn clean_identifier(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();

    if let Some(caps) = ORDER_SHAPE.captures(&upper) {
        let digits = |i: usize| caps[i].replace('O', "0");
        return format!("SO{}-{}-{}", digits(1), digits(2), digits(3));
    }

    upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Whether a cleaned identifier is a canonical service order number.
pub fn is_service_order(id: &str) -> bool {
    id.len() == 16
        && id.starts_with("SO")
        && ORDER_SHAPE.is_match(id)
        && !id[2..].contains('O')
}

fn order_match(raw: &str, captured: &str) -> Option<FieldMatch> {
    let id = clean_identifier(captured);
    if id.is_empty() {
        return None;
    }
    Some(FieldMatch::single(
        FieldValue::Identifier(Identifier::ServiceOrder(id)),
        raw,
    ))
}

/// `Order Number: SO24-02365-21800`
pub fn labeled_strict(line: &str) -> Option<FieldMatch> {
    let caps = ORDER_LABELED_STRICT.captures(line)?;
    order_match(&caps[0], &caps[1])
}

/// `0rder Humber $O24.O2365.21800`; the captured token needs three digits.
pub fn labeled_fuzzy(line: &str) -> Option<FieldMatch> {
    let caps = ORDER_LABELED_FUZZY.captures(line)?;
    let token = &caps[1];
    if token.chars().filter(char::is_ascii_digit).count() < 3 {
        return None;
    }
    order_match(&caps[0], token)
}

/// A line holding nothing but an order number.
pub fn bare_token(line: &str) -> Option<FieldMatch> {
    let caps = ORDER_BARE.captures(line)?;
    order_match(&caps[0], &caps[1])
}

/// `Job: 4471-B2`, `Code #A100`, `order 22931`
pub fn job_labeled(line: &str) -> Option<FieldMatch> {
    let caps = JOB_LABELED.captures(line)?;
    order_match(&caps[0], &caps[1])
}

/// `Category: Training`, `Task - Shop Cleanup`
pub fn category_labeled(line: &str) -> Option<FieldMatch> {
    let caps = CATEGORY_LABELED.captures(line)?;
    let label = caps[1]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_uppercase();
    let label: String = label
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    if label.is_empty() {
        return None;
    }
    Some(FieldMatch::single(
        FieldValue::Identifier(Identifier::Category(label)),
        &caps[0],
    ))
}
