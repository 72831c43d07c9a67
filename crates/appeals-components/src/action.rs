//! Action affordances
//!
//! [`ActionItem`] is the edit/view link attached to a row; [`ActionVerb`] holds
//! the one textual convention every row follows: an absent value is offered
//! for adding, a present one for changing or viewing.

use serde::Serialize;
use std::collections::BTreeMap;

/// Edit/view/change link on a summary-list row or table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Link text
    pub text: String,

    /// Link target
    pub href: String,

    /// Screen-reader suffix for the link text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visually_hidden_text: Option<String>,

    /// Extra HTML attributes (e.g. `data-cy`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ActionItem {
    /// Create action
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            visually_hidden_text: None,
            attributes: BTreeMap::new(),
        }
    }

    /// With visually hidden text
    #[inline]
    #[must_use]
    pub fn with_hidden_text(mut self, text: impl Into<String>) -> Self {
        self.visually_hidden_text = Some(text.into());
        self
    }

    /// With attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Tag with the `data-cy` test hook derived from the text and field id
    #[must_use]
    pub fn with_test_hook(self, field_id: &str) -> Self {
        let hook = format!("{}-{field_id}", self.text.to_lowercase().replace(' ', "-"));
        self.with_attribute("data-cy", hook)
    }
}

/// Verb pair chosen by whether the underlying value is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVerb {
    /// "Add" / "Change"
    #[default]
    AddOrChange,

    /// "Schedule" / "Change"
    ScheduleOrChange,

    /// "Set up" / "Change"
    SetUpOrChange,

    /// "Assign" / "Change"
    AssignOrChange,

    /// "Add" / "Manage" (document folders)
    AddOrManage,

    /// "Review" / "View" (received representations)
    ReviewOrView,

    /// Always "View"
    View,
}

impl ActionVerb {
    /// Link text for the given presence of a value
    #[must_use]
    pub fn text(self, value_present: bool) -> &'static str {
        match (self, value_present) {
            (Self::View, _) => "View",
            (Self::AddOrChange | Self::AddOrManage, false) => "Add",
            (Self::ScheduleOrChange, false) => "Schedule",
            (Self::SetUpOrChange, false) => "Set up",
            (Self::AssignOrChange, false) => "Assign",
            (Self::ReviewOrView, false) => "Review",
            (Self::AddOrManage, true) => "Manage",
            (Self::ReviewOrView, true) => "View",
            (
                Self::AddOrChange | Self::ScheduleOrChange | Self::SetUpOrChange
                | Self::AssignOrChange,
                true,
            ) => "Change",
        }
    }
}
