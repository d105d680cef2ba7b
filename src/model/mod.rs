//! Data models for the Notion property system.
//!
//! This module defines the wire-level property model and the plain
//! values the transcoding layer works with:
//! - [`Page`] - one row of a Notion database, with named typed properties
//! - [`Property`] - tagged union over the supported property types
//! - [`PropertyKind`] - a property's type tag (used for schema maps)
//! - [`Value`] - an extracted plain value, independent of wire shape
//! - [`SyncStatus`] - terminal sync state stamped on master pages

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One page (row) of a Notion database.
///
/// Pages are transient views fetched per run and owned by the Notion
/// API; nothing is persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Opaque page identifier assigned by Notion.
    pub id: String,
    /// Property name to typed value.
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

impl Page {
    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

/// A typed property value, discriminated by the `type` field.
///
/// The serde tag attribute matches the Notion wire format:
/// `{"type":"select","select":{"name":"Tech"}}`. Property types the
/// sync does not understand deserialize to [`Property::Unsupported`]
/// instead of failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    /// Title text, as an ordered list of segments.
    Title { title: Vec<RichText> },
    /// Rich text, as an ordered list of segments.
    RichText { rich_text: Vec<RichText> },
    /// A floating-point number, unset when `None`.
    Number { number: Option<f64> },
    /// Single-choice select, unset when `None`.
    Select { select: Option<SelectOption> },
    /// Multi-choice select, possibly empty.
    MultiSelect { multi_select: Vec<SelectOption> },
    /// A date range; only `start` is required by Notion.
    Date { date: Option<DateValue> },
    /// A URL string.
    Url { url: Option<String> },
    /// An email address string.
    Email { email: Option<String> },
    /// A phone number string.
    PhoneNumber { phone_number: Option<String> },
    /// A boolean checkbox.
    Checkbox { checkbox: bool },
    /// A computed formula result.
    Formula { formula: FormulaValue },
    /// Any property type this tool does not handle.
    #[serde(other)]
    Unsupported,
}

/// One text segment of a title or rich text property.
///
/// Notion segments carry annotations and hrefs we never read; only the
/// nested text content matters here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: TextContent,
}

/// Nested text payload of a rich text segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    /// Build a plain text segment, the only segment shape we write.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// A select or multi-select option, identified by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub name: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A date range; `end` is open-ended when `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DateValue {
    #[must_use]
    pub fn start(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }
}

/// The result carried by a formula property.
///
/// Notion tags the result with exactly one of these types, so
/// extraction is a plain match rather than a priority probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
}

/// A property's declared type tag, as reported by the database schema.
///
/// Used as the value type of a schema map: destination property name to
/// declared kind. Encoding always follows the destination's kind, never
/// the source's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Date,
    Url,
    Email,
    PhoneNumber,
    Checkbox,
    Formula,
    Unsupported,
}

impl PropertyKind {
    /// Map a wire type tag to a kind; unknown tags become `Unsupported`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "date" => Self::Date,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "checkbox" => Self::Checkbox,
            "formula" => Self::Formula,
            _ => Self::Unsupported,
        }
    }
}

impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Destination property name to declared type tag.
///
/// Fetched once per run from the slave database and read-only after.
pub type SchemaMap = HashMap<String, PropertyKind>;

/// A plain value extracted from a property, detached from wire shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
}

impl Value {
    /// Whether this value counts as "present with data".
    ///
    /// Empty text, zero, `false`, and an empty list are all falsy,
    /// matching how the validation and encoding layers test values.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0,
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Whether this value is "present but blank".
    ///
    /// Blank means empty text or an empty list. Numbers and booleans
    /// are never blank; an unset number shows up as an absent
    /// extraction instead.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Stringify for writing into a text-shaped destination property.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(", "),
        }
    }

    /// The numeric payload, if this value is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Terminal sync state stamped on each master page.
///
/// A page is only selected while `NotSynced`; after one attempt it
/// moves to exactly one of `Synced` or `Failed` and is never selected
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    NotSynced,
    Synced,
    Failed,
}

impl SyncStatus {
    /// Wire name used in the master's "Sync Status" select property.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotSynced => "Not Synced",
            Self::Synced => "Synced",
            Self::Failed => "Failed",
        }
    }
}
