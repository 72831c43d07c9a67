//! Per-field display instructions
//!
//! A [`FieldInstruction`] pairs a stable field id with a [`DisplayPayload`].
//! The payload is an enum, so at most one shape is ever populated.

use crate::action::ActionItem;
use crate::component::{ButtonItem, PageComponent, SummaryListItem, TableItem};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Content a field contributes to a page
///
/// Serializes as `{}` when empty, otherwise as a single-key object such as
/// `{"summaryListItem": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayPayload {
    /// Field renders nothing (feature off, permission absent, not applicable)
    #[default]
    Empty,

    /// Summary-list row
    SummaryListItem(SummaryListItem),

    /// Table row
    TableItem(TableItem),

    /// Button
    ButtonItem(ButtonItem),

    /// Arbitrary component list
    PageComponents(Vec<PageComponent>),
}

impl DisplayPayload {
    /// Check if nothing is rendered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Key the payload serializes under
    #[must_use]
    pub fn shape(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::SummaryListItem(_) => Some("summaryListItem"),
            Self::TableItem(_) => Some("tableItem"),
            Self::ButtonItem(_) => Some("buttonItem"),
            Self::PageComponents(_) => Some("pageComponents"),
        }
    }

    /// Summary-list row, if that is the populated shape
    #[inline]
    #[must_use]
    pub fn summary_list_item(&self) -> Option<&SummaryListItem> {
        match self {
            Self::SummaryListItem(item) => Some(item),
            _ => None,
        }
    }

    /// Table row, if that is the populated shape
    #[inline]
    #[must_use]
    pub fn table_item(&self) -> Option<&TableItem> {
        match self {
            Self::TableItem(item) => Some(item),
            _ => None,
        }
    }

    /// Page components, if that is the populated shape
    #[inline]
    #[must_use]
    pub fn page_components(&self) -> Option<&[PageComponent]> {
        match self {
            Self::PageComponents(components) => Some(components),
            _ => None,
        }
    }

    /// Every action item in the payload, nested components included
    #[must_use]
    pub fn action_items(&self) -> Vec<&ActionItem> {
        match self {
            Self::Empty | Self::ButtonItem(_) => Vec::new(),
            Self::SummaryListItem(item) => item
                .actions
                .items
                .iter()
                .chain(
                    item.value
                        .page_components
                        .iter()
                        .flat_map(PageComponent::action_items),
                )
                .collect(),
            Self::TableItem(row) => row.0.iter().filter_map(|c| c.action.as_ref()).collect(),
            Self::PageComponents(components) => components
                .iter()
                .flat_map(PageComponent::action_items)
                .collect(),
        }
    }
}

impl Serialize for DisplayPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(shape) = self.shape() else {
            return serializer.serialize_map(Some(0))?.end();
        };
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Empty => {}
            Self::SummaryListItem(item) => map.serialize_entry(shape, item)?,
            Self::TableItem(item) => map.serialize_entry(shape, item)?,
            Self::ButtonItem(item) => map.serialize_entry(shape, item)?,
            Self::PageComponents(items) => map.serialize_entry(shape, items)?,
        }
        map.end()
    }
}

/// Result of one submapper: a field id and what to display for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInstruction {
    /// Stable field id, unique within one mapping
    pub id: String,

    /// Display content
    pub display: DisplayPayload,
}

impl FieldInstruction {
    /// Create instruction
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, display: DisplayPayload) -> Self {
        Self {
            id: id.into(),
            display,
        }
    }

    /// Instruction that renders nothing
    #[inline]
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, DisplayPayload::Empty)
    }

    /// Summary-list row instruction
    #[inline]
    #[must_use]
    pub fn summary_list_item(id: impl Into<String>, item: SummaryListItem) -> Self {
        Self::new(id, DisplayPayload::SummaryListItem(item))
    }

    /// Every action item in the instruction
    #[inline]
    #[must_use]
    pub fn action_items(&self) -> Vec<&ActionItem> {
        self.display.action_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Actions, Content, SummaryValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row() -> SummaryListItem {
        SummaryListItem {
            key: Content::text("Appellant"),
            value: SummaryValue::new(Content::text("Jo Bloggs")),
            actions: Actions::from_optional([Some(ActionItem::new("Change", "/appellant"))]),
            classes: None,
        }
    }

    #[test]
    fn empty_payload_serializes_as_empty_object() {
        let instruction = FieldInstruction::empty("hearing");
        assert_eq!(
            serde_json::to_value(&instruction).unwrap(),
            json!({"id": "hearing", "display": {}})
        );
    }

    #[test]
    fn populated_payload_has_exactly_one_key() {
        let value = serde_json::to_value(FieldInstruction::summary_list_item("appellant", row()))
            .unwrap();
        let display = value["display"].as_object().unwrap();
        assert_eq!(display.len(), 1);
        assert!(display.contains_key("summaryListItem"));
        assert_eq!(
            display["summaryListItem"]["value"],
            json!({"text": "Jo Bloggs"})
        );
    }

    #[test]
    fn action_items_are_reported() {
        let instruction = FieldInstruction::summary_list_item("appellant", row());
        assert_eq!(instruction.action_items().len(), 1);
        assert!(FieldInstruction::empty("x").action_items().is_empty());
    }
}
