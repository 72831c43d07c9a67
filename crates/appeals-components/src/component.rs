//! Page component descriptions
//!
//! Provides [`PageComponent`], the type-tagged render instruction consumed by the
//! page templates, plus the row shapes ([`SummaryListItem`], [`TableItem`],
//! [`ButtonItem`]) that summary lists and tables are assembled from.

use crate::action::ActionItem;
use serde::Serialize;
use std::collections::BTreeMap;

/// Text or pre-escaped markup
///
/// Serializes as `{"text": ...}` or `{"html": ...}`, the shape the templates expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    /// Plain text, escaped by the renderer
    Text(String),

    /// Markup the caller has already escaped
    Html(String),
}

impl Content {
    /// Plain text content
    #[inline]
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Pre-escaped markup content
    #[inline]
    #[must_use]
    pub fn html(value: impl Into<String>) -> Self {
        Self::Html(value.into())
    }

    /// Raw string regardless of kind
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }

    /// Whether this is markup
    #[inline]
    #[must_use]
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Opening/closing markup applied around a rendered component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapperHtml {
    /// Markup emitted before the component
    pub opening: String,

    /// Markup emitted after the component
    pub closing: String,
}

impl WrapperHtml {
    /// Create wrapper
    #[inline]
    #[must_use]
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }
}

/// Action list attached to a summary-list row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Actions {
    /// Action links; never contains placeholder entries
    pub items: Vec<ActionItem>,
}

impl Actions {
    /// No actions
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from optional entries, dropping the absent ones
    #[must_use]
    pub fn from_optional(items: impl IntoIterator<Item = Option<ActionItem>>) -> Self {
        Self {
            items: items.into_iter().flatten().collect(),
        }
    }

    /// Check if there are no actions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Value cell of a summary-list row
///
/// Carries either text or markup, optionally followed by nested components
/// (e.g. a "show more" disclosure for long details).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryValue {
    /// Primary content
    #[serde(flatten)]
    pub content: Content,

    /// Components rendered inside the value cell
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_components: Vec<PageComponent>,
}

impl SummaryValue {
    /// Value without nested components
    #[inline]
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content,
            page_components: Vec::new(),
        }
    }

    /// Append a nested component
    #[inline]
    #[must_use]
    pub fn with_component(mut self, component: PageComponent) -> Self {
        self.page_components.push(component);
        self
    }
}

/// GOV.UK summary-list row (key/value/actions triple)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryListItem {
    /// Row label
    pub key: Content,

    /// Row value
    pub value: SummaryValue,

    /// Change/add affordances
    pub actions: Actions,

    /// Extra CSS classes for the row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

/// Single table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    /// Cell content
    #[serde(flatten)]
    pub content: Content,

    /// Action rendered as a link inside the cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionItem>,

    /// Extra CSS classes for the cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl TableCell {
    /// Cell without an action
    #[inline]
    #[must_use]
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            action: None,
            classes: None,
        }
    }

    /// Cell holding only an action link
    #[inline]
    #[must_use]
    pub fn action(action: ActionItem) -> Self {
        Self {
            content: Content::text(""),
            action: Some(action),
            classes: None,
        }
    }

    /// With CSS classes
    #[inline]
    #[must_use]
    pub fn with_classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }
}

/// Ordered row of table cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableItem(pub Vec<TableCell>);

impl TableItem {
    /// Cells in column order
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[TableCell] {
        &self.0
    }
}

/// Button affordance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonItem {
    /// Button label
    pub text: String,

    /// Link target; a form submit button when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Extra CSS classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,

    /// Extra HTML attributes
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ButtonItem {
    /// Link button
    #[inline]
    #[must_use]
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
            classes: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Secondary styling
    #[inline]
    #[must_use]
    pub fn secondary(mut self) -> Self {
        self.classes = Some("govuk-button--secondary".to_string());
        self
    }

    /// Add attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// `summary-list` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryListParameters {
    /// Rows in display order
    pub rows: Vec<SummaryListItem>,

    /// Extra CSS classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

/// `table` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableParameters {
    /// Header cells
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<TableCell>,

    /// Body rows
    pub rows: Vec<TableItem>,

    /// Whether the first cell of each row is a header
    pub first_cell_is_header: bool,
}

/// `html` / `inset-text` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlParameters {
    /// Pre-escaped markup
    pub html: String,
}

/// `input` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputParameters {
    /// Form field name
    pub name: String,

    /// Field id
    pub id: String,

    /// Field label
    pub label: Content,

    /// Current value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// `textarea` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextareaParameters {
    /// Form field name
    pub name: String,

    /// Field id
    pub id: String,

    /// Field label
    pub label: Content,

    /// Current value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Visible rows
    pub rows: u16,
}

/// Option in a `radios`/`checkboxes` group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceItem {
    /// Submitted value
    pub value: String,

    /// Label
    pub text: String,

    /// Whether pre-selected
    pub checked: bool,
}

/// `radios` / `checkboxes` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceParameters {
    /// Form field name
    pub name: String,

    /// Fieldset legend
    pub legend: String,

    /// Choices in display order
    pub items: Vec<ChoiceItem>,
}

/// `details` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsParameters {
    /// Disclosure summary line
    pub summary_text: String,

    /// Revealed content
    #[serde(flatten)]
    pub content: Content,
}

/// `show-more` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMoreParameters {
    /// Full text, truncated by the renderer
    pub text: String,

    /// Label for the toggle (e.g. "Details")
    pub label_text: String,
}

/// Component kind with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "parameters", rename_all = "kebab-case")]
pub enum ComponentKind {
    /// GOV.UK summary list
    SummaryList(SummaryListParameters),

    /// GOV.UK table
    Table(TableParameters),

    /// GOV.UK button
    Button(ButtonItem),

    /// Raw markup block
    Html(HtmlParameters),

    /// Inset text block
    InsetText(HtmlParameters),

    /// Text input
    Input(InputParameters),

    /// Textarea
    Textarea(TextareaParameters),

    /// Checkbox group
    Checkboxes(ChoiceParameters),

    /// Radio group
    Radios(ChoiceParameters),

    /// Disclosure
    Details(DetailsParameters),

    /// Truncating "show more" disclosure
    ShowMore(ShowMoreParameters),
}

/// Type-tagged render instruction
///
/// Serializes as `{"type": "...", "parameters": {...}, "wrapperHtml": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComponent {
    /// Kind and parameters
    #[serde(flatten)]
    pub kind: ComponentKind,

    /// Markup applied around the rendered component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper_html: Option<WrapperHtml>,
}

impl PageComponent {
    /// Component without wrapper
    #[inline]
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            wrapper_html: None,
        }
    }

    /// Wrap in opening/closing markup
    #[inline]
    #[must_use]
    pub fn wrapped(mut self, wrapper: WrapperHtml) -> Self {
        self.wrapper_html = Some(wrapper);
        self
    }

    /// Discriminator as written to `type`
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ComponentKind::SummaryList(_) => "summary-list",
            ComponentKind::Table(_) => "table",
            ComponentKind::Button(_) => "button",
            ComponentKind::Html(_) => "html",
            ComponentKind::InsetText(_) => "inset-text",
            ComponentKind::Input(_) => "input",
            ComponentKind::Textarea(_) => "textarea",
            ComponentKind::Checkboxes(_) => "checkboxes",
            ComponentKind::Radios(_) => "radios",
            ComponentKind::Details(_) => "details",
            ComponentKind::ShowMore(_) => "show-more",
        }
    }

    /// Every action item reachable from this component, including nested ones
    #[must_use]
    pub fn action_items(&self) -> Vec<&ActionItem> {
        match &self.kind {
            ComponentKind::SummaryList(params) => params
                .rows
                .iter()
                .flat_map(|row| {
                    row.actions.items.iter().chain(
                        row.value
                            .page_components
                            .iter()
                            .flat_map(PageComponent::action_items),
                    )
                })
                .collect(),
            ComponentKind::Table(params) => params
                .rows
                .iter()
                .flat_map(|row| row.0.iter().filter_map(|cell| cell.action.as_ref()))
                .collect(),
            _ => Vec::new(),
        }
    }
}
