//! Value encoding for the destination schema.
//!
//! Re-encodes an extracted [`Value`] into the wire [`Property`] shape
//! declared by the *destination* schema. The destination's type tag
//! always wins: a field whose tag differs between master and slave is
//! reinterpreted under the slave's tag, not the master's.

use tracing::debug;

use crate::model::{Property, PropertyKind, RichText, SelectOption, Value};

/// Encode a value for a destination property of the given kind.
///
/// Returns `None` for kinds the encoder does not handle (email,
/// phone_number, formula, and anything unsupported), in which case the
/// caller drops the field from the write entirely. This silent drop is
/// long-standing behavior; it is traced but deliberately not an error.
#[must_use]
pub fn encode(kind: PropertyKind, value: &Value) -> Option<Property> {
    match kind {
        PropertyKind::Title => Some(Property::Title {
            title: vec![RichText::text(stringify(value))],
        }),
        PropertyKind::RichText => Some(Property::RichText {
            rich_text: vec![RichText::text(stringify(value))],
        }),
        PropertyKind::Number => Some(Property::Number {
            number: value.as_number(),
        }),
        PropertyKind::Select => Some(Property::Select {
            select: if value.is_truthy() {
                Some(SelectOption::new(value.to_text()))
            } else {
                None
            },
        }),
        PropertyKind::MultiSelect => Some(Property::MultiSelect {
            multi_select: match value {
                Value::List(items) if !items.is_empty() => {
                    items.iter().map(SelectOption::new).collect()
                }
                _ => vec![],
            },
        }),
        PropertyKind::Date => Some(Property::Date {
            date: if value.is_truthy() {
                Some(crate::model::DateValue::start(value.to_text()))
            } else {
                None
            },
        }),
        PropertyKind::Url => Some(Property::Url {
            url: if value.is_truthy() {
                Some(value.to_text())
            } else {
                None
            },
        }),
        PropertyKind::Checkbox => Some(Property::Checkbox {
            checkbox: match value {
                Value::Bool(b) => *b,
                _ => false,
            },
        }),
        PropertyKind::Email
        | PropertyKind::PhoneNumber
        | PropertyKind::Formula
        | PropertyKind::Unsupported => {
            debug!(?kind, "no encoding for destination property kind, dropping field");
            None
        }
    }
}

/// Stringify for text-shaped targets; falsy values become `""`.
fn stringify(value: &Value) -> String {
    if value.is_truthy() {
        value.to_text()
    } else {
        String::new()
    }
}
