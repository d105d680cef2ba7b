//! Typed value extraction from source pages.
//!
//! Pure functions from a page's wire-level property to a plain
//! [`Value`]. The distinction between "absent" (`None`) and "present
//! but blank" (`Some(Text(""))`, `Some(List([]))`) matters: validation
//! treats both as missing, but only the latter proves the property
//! exists on the page.

use crate::model::{FormulaValue, Page, Property, RichText, Value};

/// Extract the plain value of a named property from a page.
///
/// Returns `None` when the property is absent, unset, or of a type
/// this tool does not read. Never fails.
#[must_use]
pub fn extract(page: &Page, field_name: &str) -> Option<Value> {
    let property = page.property(field_name)?;

    match property {
        Property::Title { title } => Some(Value::Text(concat_segments(title))),
        Property::RichText { rich_text } => Some(Value::Text(concat_segments(rich_text))),
        Property::Number { number } => number.map(Value::Number),
        Property::Select { select } => {
            select.as_ref().map(|option| Value::Text(option.name.clone()))
        }
        Property::MultiSelect { multi_select } => Some(Value::List(
            multi_select.iter().map(|option| option.name.clone()).collect(),
        )),
        Property::Date { date } => date.as_ref().map(|d| Value::Text(d.start.clone())),
        Property::Url { url } => url.clone().map(Value::Text),
        Property::Email { email } => email.clone().map(Value::Text),
        Property::PhoneNumber { phone_number } => phone_number.clone().map(Value::Text),
        Property::Checkbox { checkbox } => Some(Value::Bool(*checkbox)),
        Property::Formula { formula } => extract_formula(formula),
        Property::Unsupported => None,
    }
}

/// Join all text segments of a title or rich text property in order.
///
/// An empty segment list yields `""`, not absence: the property exists
/// on the page, it just has no content.
fn concat_segments(segments: &[RichText]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.content.as_str())
        .collect()
}

/// Unwrap a formula result into a plain value.
///
/// The result is tagged with exactly one of string, number, boolean,
/// or date; a date result yields only its start.
fn extract_formula(formula: &FormulaValue) -> Option<Value> {
    match formula {
        FormulaValue::String { string } => string.clone().map(Value::Text),
        FormulaValue::Number { number } => number.map(Value::Number),
        FormulaValue::Boolean { boolean } => boolean.map(Value::Bool),
        FormulaValue::Date { date } => date.as_ref().map(|d| Value::Text(d.start.clone())),
    }
}
