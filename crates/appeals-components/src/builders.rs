//! Primitive component builders
//!
//! Each builder turns a semantic value plus [`RowOptions`] into a
//! [`FieldInstruction`]. Builders never fail: missing optional values degrade to
//! a default text, and an action is attached only when the row is editable and
//! has a link.

use crate::action::{ActionItem, ActionVerb};
use crate::component::{
    Actions, ButtonItem, ComponentKind, Content, PageComponent, ShowMoreParameters,
    SummaryListItem, SummaryValue, TableCell, TableItem,
};
use crate::display::{DisplayPayload, FieldInstruction};
use crate::folder::{DocumentFolder, FolderStatus};
use crate::format::{
    date_iso_string_to_display_date, escape_html, format_yes_no_or, list_or_only_item,
    NOT_ANSWERED,
};

/// Presentation options shared by the summary-list builders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowOptions {
    /// Field id
    pub id: String,

    /// Row label
    pub text: String,

    /// Target of the row action
    pub link: Option<String>,

    /// Whether the viewer may act on the row
    pub editable: bool,

    /// Action label; "Change" when unset
    pub action_text: Option<String>,

    /// Screen-reader suffix; the lowercased label when unset
    pub visually_hidden_text: Option<String>,

    /// Row CSS classes
    pub classes: Option<String>,
}

impl RowOptions {
    /// Options for a read-only row
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// With action link
    #[inline]
    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set editability
    #[inline]
    #[must_use]
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// With action label
    #[inline]
    #[must_use]
    pub fn action_text(mut self, text: impl Into<String>) -> Self {
        self.action_text = Some(text.into());
        self
    }

    /// Action label from a verb convention
    #[inline]
    #[must_use]
    pub fn verb(self, verb: ActionVerb, value_present: bool) -> Self {
        self.action_text(verb.text(value_present))
    }

    /// With visually hidden text
    #[inline]
    #[must_use]
    pub fn hidden_text(mut self, text: impl Into<String>) -> Self {
        self.visually_hidden_text = Some(text.into());
        self
    }

    /// With row classes
    #[inline]
    #[must_use]
    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    /// The row action, present only for an editable row with a non-empty link
    #[must_use]
    pub fn action(&self) -> Option<ActionItem> {
        if !self.editable {
            return None;
        }
        let link = self.link.as_deref().filter(|l| !l.is_empty())?;
        let text = self.action_text.as_deref().unwrap_or("Change");
        let hidden = self
            .visually_hidden_text
            .clone()
            .unwrap_or_else(|| self.text.to_lowercase());
        Some(
            ActionItem::new(text, link)
                .with_hidden_text(hidden)
                .with_test_hook(&self.id),
        )
    }

    fn into_instruction(self, value: SummaryValue) -> FieldInstruction {
        let actions = Actions::from_optional([self.action()]);
        let item = SummaryListItem {
            key: Content::text(self.text),
            value,
            actions,
            classes: self.classes,
        };
        FieldInstruction::summary_list_item(self.id, item)
    }
}

/// Row showing text or pre-escaped markup
#[must_use]
pub fn text_summary_list_item(options: RowOptions, value: impl Into<Content>) -> FieldInstruction {
    options.into_instruction(SummaryValue::new(value.into()))
}

/// Row with a prepared value (content plus nested components)
#[must_use]
pub fn value_summary_list_item(options: RowOptions, value: SummaryValue) -> FieldInstruction {
    options.into_instruction(value)
}

/// Row showing optional text, or `default_text` when absent or blank
#[must_use]
pub fn optional_text_summary_list_item(
    options: RowOptions,
    value: Option<&str>,
    default_text: &str,
) -> FieldInstruction {
    let text = value.filter(|v| !v.trim().is_empty()).unwrap_or(default_text);
    text_summary_list_item(options, Content::text(text))
}

/// Row answering a yes/no question; unset answers show `default_text`
/// ([`NOT_ANSWERED`] when `None`)
#[must_use]
pub fn boolean_summary_list_item(
    options: RowOptions,
    value: Option<bool>,
    default_text: Option<&str>,
) -> FieldInstruction {
    let answer = format_yes_no_or(value, default_text.unwrap_or(NOT_ANSWERED));
    text_summary_list_item(options, Content::text(answer))
}

/// Yes/no answer with supplementary details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanWithDetails {
    /// The answer
    pub value: Option<bool>,

    /// Details given alongside the answer
    pub details: Option<String>,

    /// Text for an unset answer; [`NOT_ANSWERED`] when `None`
    pub default_text: Option<String>,

    /// Show details even when the answer is "No"
    pub show_details_when_answer_is_no: bool,

    /// Render details in a "show more" disclosure instead of inline
    pub with_show_more: bool,
}

impl BooleanWithDetails {
    /// Answer with details
    #[inline]
    #[must_use]
    pub fn new(value: Option<bool>, details: Option<&str>) -> Self {
        Self {
            value,
            details: details.map(str::to_string),
            ..Self::default()
        }
    }

    /// Show details for a "No" answer too
    #[inline]
    #[must_use]
    pub fn show_details_when_answer_is_no(mut self) -> Self {
        self.show_details_when_answer_is_no = true;
        self
    }

    /// Use a "show more" disclosure
    #[inline]
    #[must_use]
    pub fn with_show_more(mut self) -> Self {
        self.with_show_more = true;
        self
    }

    fn details_shown(&self) -> Option<&str> {
        let details = self.details.as_deref().filter(|d| !d.trim().is_empty())?;
        match self.value {
            Some(true) => Some(details),
            Some(false) if self.show_details_when_answer_is_no => Some(details),
            _ => None,
        }
    }
}

/// Row answering a yes/no question with optional details beneath the answer
#[must_use]
pub fn boolean_with_details_summary_list_item(
    options: RowOptions,
    answer: &BooleanWithDetails,
) -> FieldInstruction {
    let text = format_yes_no_or(
        answer.value,
        answer.default_text.as_deref().unwrap_or(NOT_ANSWERED),
    );
    let value = match answer.details_shown() {
        None => SummaryValue::new(Content::text(text)),
        Some(details) if answer.with_show_more => SummaryValue::new(Content::text(text))
            .with_component(PageComponent::new(ComponentKind::ShowMore(
                ShowMoreParameters {
                    text: details.to_string(),
                    label_text: "Details".to_string(),
                },
            ))),
        Some(details) => SummaryValue::new(Content::Html(format!(
            "{}<br>{}",
            escape_html(text),
            escape_html(details)
        ))),
    };
    options.into_instruction(value)
}

/// Row showing a display date, or `default_text` when absent or unparseable
#[must_use]
pub fn date_summary_list_item(
    options: RowOptions,
    iso_date: Option<&str>,
    pattern: &str,
    default_text: &str,
) -> FieldInstruction {
    let text = match iso_date {
        None => default_text.to_string(),
        Some(iso) => date_iso_string_to_display_date(iso, pattern).unwrap_or_else(|e| {
            tracing::warn!(field = %options.id, error = %e, "date not displayable");
            default_text.to_string()
        }),
    };
    text_summary_list_item(options, Content::Text(text))
}

/// Row showing a list: fallback when empty, sole item verbatim, else bullets
#[must_use]
pub fn list_summary_list_item<S: AsRef<str>>(
    options: RowOptions,
    items: &[S],
    fallback_text: &str,
) -> FieldInstruction {
    text_summary_list_item(options, list_or_only_item(items, fallback_text))
}

/// Row listing the received documents of a folder
///
/// Without an explicit action label the verb follows the folder state
/// ("Add" when nothing was received, "Manage" otherwise).
#[must_use]
pub fn document_folder_summary_list_item(
    mut options: RowOptions,
    folder: Option<&DocumentFolder>,
) -> FieldInstruction {
    let status = FolderStatus::of(folder);
    if options.action_text.is_none() {
        options = options.verb(ActionVerb::AddOrManage, status == FolderStatus::Uploaded);
    }
    let names: Vec<&str> = folder
        .map(|f| {
            f.documents
                .iter()
                .filter(|d| d.is_received())
                .map(|d| d.name.as_str())
                .collect()
        })
        .unwrap_or_default();
    text_summary_list_item(options, list_or_only_item(&names, status.text()))
}

/// Options for a folder table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRowOptions {
    /// Field id
    pub id: String,

    /// Label in the first cell
    pub label: String,

    /// Base path; `upload-documents/{id}` or `manage-documents/{id}` is appended
    pub base_link: String,

    /// Whether the viewer may upload/manage
    pub editable: bool,
}

impl FolderRowOptions {
    /// Create options
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        base_link: impl Into<String>,
        editable: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_link: base_link.into(),
            editable,
        }
    }
}

/// Upload link for an empty folder, manage link otherwise
#[must_use]
pub fn folder_link(base_link: &str, folder: &DocumentFolder) -> String {
    let base = base_link.trim_end_matches('/');
    match folder.status() {
        FolderStatus::NotReceived => format!("{base}/upload-documents/{}", folder.folder_id),
        FolderStatus::Uploaded => format!("{base}/manage-documents/{}", folder.folder_id),
    }
}

/// Table row `[label, status, action]` for a costs document folder
///
/// A missing folder renders "Not received" with no action, since there is no
/// folder id to link to.
#[must_use]
pub fn costs_folder_table_item(
    options: FolderRowOptions,
    folder: Option<&DocumentFolder>,
) -> FieldInstruction {
    let status = FolderStatus::of(folder);
    let action = folder.filter(|_| options.editable).map(|folder| {
        ActionItem::new(
            ActionVerb::AddOrManage.text(status == FolderStatus::Uploaded),
            folder_link(&options.base_link, folder),
        )
        .with_hidden_text(options.label.to_lowercase())
        .with_test_hook(&options.id)
    });
    let action_cell = match action {
        Some(action) => TableCell::action(action),
        None => TableCell::new(""),
    };
    let row = TableItem(vec![
        TableCell::new(options.label).with_classes("govuk-table__header"),
        TableCell::new(status.text()),
        action_cell.with_classes("govuk-!-text-align-right"),
    ]);
    FieldInstruction::new(options.id, DisplayPayload::TableItem(row))
}

/// Button instruction
#[inline]
#[must_use]
pub fn button_instruction(id: impl Into<String>, button: ButtonItem) -> FieldInstruction {
    FieldInstruction::new(id, DisplayPayload::ButtonItem(button))
}

/// Component-list instruction
#[inline]
#[must_use]
pub fn page_components_instruction(
    id: impl Into<String>,
    components: Vec<PageComponent>,
) -> FieldInstruction {
    FieldInstruction::new(id, DisplayPayload::PageComponents(components))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::{Document, DocumentVersion};
    use crate::format::DEFAULT_DATE_PATTERN;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn row(instruction: &FieldInstruction) -> &SummaryListItem {
        instruction.display.summary_list_item().unwrap()
    }

    fn received_folder() -> DocumentFolder {
        DocumentFolder::new(12, "costs/decision").with_document(Document {
            id: "doc-1".to_string(),
            name: "decision.pdf".to_string(),
            latest_version: Some(DocumentVersion {
                version: 1,
                ..DocumentVersion::default()
            }),
        })
    }

    #[test]
    fn editable_row_with_link_has_one_action() {
        let instruction = text_summary_list_item(
            RowOptions::new("appellant", "Appellant")
                .link("/appeals/1/appellant")
                .editable(true),
            "Jo Bloggs",
        );
        let item = row(&instruction);
        assert_eq!(item.actions.items.len(), 1);
        assert_eq!(item.actions.items[0].text, "Change");
        assert_eq!(item.actions.items[0].href, "/appeals/1/appellant");
        assert_eq!(
            item.actions.items[0].visually_hidden_text.as_deref(),
            Some("appellant")
        );
    }

    #[test]
    fn editable_row_without_link_has_no_action() {
        let instruction =
            text_summary_list_item(RowOptions::new("x", "X").editable(true), "value");
        assert!(row(&instruction).actions.is_empty());

        let blank =
            text_summary_list_item(RowOptions::new("x", "X").link("").editable(true), "value");
        assert!(row(&blank).actions.is_empty());
    }

    #[test]
    fn custom_action_text_is_used() {
        let instruction = text_summary_list_item(
            RowOptions::new("inspector", "Inspector")
                .link("/inspector")
                .editable(true)
                .verb(ActionVerb::AssignOrChange, false),
            "Not assigned",
        );
        assert_eq!(row(&instruction).actions.items[0].text, "Assign");
    }

    #[test]
    fn boolean_rows() {
        let yes = boolean_summary_list_item(RowOptions::new("a", "A"), Some(true), None);
        assert_eq!(row(&yes).value.content, Content::text("Yes"));

        let unset = boolean_summary_list_item(RowOptions::new("a", "A"), None, None);
        assert_eq!(row(&unset).value.content, Content::text("Not answered"));

        let custom = boolean_summary_list_item(RowOptions::new("a", "A"), None, Some("N/A"));
        assert_eq!(row(&custom).value.content, Content::text("N/A"));
    }

    #[test]
    fn details_hidden_for_no_by_default() {
        let answer = BooleanWithDetails::new(Some(false), Some("locked gate"));
        let instruction = boolean_with_details_summary_list_item(RowOptions::new("a", "A"), &answer);
        assert_eq!(row(&instruction).value.content, Content::text("No"));
    }

    #[test]
    fn details_shown_for_no_when_requested() {
        let answer =
            BooleanWithDetails::new(Some(false), Some("locked gate")).show_details_when_answer_is_no();
        let instruction = boolean_with_details_summary_list_item(RowOptions::new("a", "A"), &answer);
        assert_eq!(
            row(&instruction).value.content,
            Content::html("No<br>locked gate")
        );
    }

    #[test]
    fn details_in_show_more_component() {
        let answer = BooleanWithDetails::new(Some(true), Some("long text")).with_show_more();
        let instruction = boolean_with_details_summary_list_item(RowOptions::new("a", "A"), &answer);
        let value = &row(&instruction).value;
        assert_eq!(value.content, Content::text("Yes"));
        assert_eq!(value.page_components.len(), 1);
        assert_eq!(value.page_components[0].type_name(), "show-more");
    }

    #[test]
    fn date_rows_degrade_to_default() {
        let ok = date_summary_list_item(
            RowOptions::new("d", "D"),
            Some("2024-03-05T00:00:00Z"),
            DEFAULT_DATE_PATTERN,
            "Not provided",
        );
        assert_eq!(row(&ok).value.content, Content::text("5 March 2024"));

        let missing =
            date_summary_list_item(RowOptions::new("d", "D"), None, DEFAULT_DATE_PATTERN, "Not provided");
        assert_eq!(row(&missing).value.content, Content::text("Not provided"));

        let bad = date_summary_list_item(
            RowOptions::new("d", "D"),
            Some("soon"),
            DEFAULT_DATE_PATTERN,
            "Not provided",
        );
        assert_eq!(row(&bad).value.content, Content::text("Not provided"));
    }

    #[test]
    fn folder_row_for_missing_folder() {
        let instruction = costs_folder_table_item(
            FolderRowOptions::new("costs-decision", "Costs decision", "/appeals/1/costs/decision", true),
            None,
        );
        let cells = instruction.display.table_item().unwrap().cells();
        assert_eq!(cells[1].content, Content::text("Not received"));
        assert!(instruction.action_items().is_empty());
    }

    #[test]
    fn folder_row_links_to_upload_then_manage() {
        let empty = DocumentFolder::new(3, "costs/decision");
        let upload = costs_folder_table_item(
            FolderRowOptions::new("costs-decision", "Costs decision", "/appeals/1/costs/decision/", true),
            Some(&empty),
        );
        let action = upload.action_items()[0].clone();
        assert_eq!(action.text, "Add");
        assert_eq!(action.href, "/appeals/1/costs/decision/upload-documents/3");

        let received = received_folder();
        let manage = costs_folder_table_item(
            FolderRowOptions::new("costs-decision", "Costs decision", "/appeals/1/costs/decision", true),
            Some(&received),
        );
        let action = manage.action_items()[0].clone();
        assert_eq!(action.text, "Manage");
        assert_eq!(action.href, "/appeals/1/costs/decision/manage-documents/12");
        assert_eq!(
            manage.display.table_item().unwrap().cells()[1].content,
            Content::text("Uploaded")
        );
    }

    #[test]
    fn document_folder_row_lists_names() {
        let folder = received_folder();
        let instruction = document_folder_summary_list_item(
            RowOptions::new("application-form", "Application form")
                .link("/docs")
                .editable(true),
            Some(&folder),
        );
        let item = row(&instruction);
        assert_eq!(item.value.content, Content::text("decision.pdf"));
        assert_eq!(item.actions.items[0].text, "Manage");

        let missing = document_folder_summary_list_item(RowOptions::new("f", "F"), None);
        assert_eq!(row(&missing).value.content, Content::text("Not received"));
    }

    proptest! {
        #[test]
        fn read_only_rows_never_carry_actions(
            label in "[A-Za-z ]{1,20}",
            link in proptest::option::of("/[a-z/]{0,20}"),
            value in proptest::option::of(any::<bool>()),
            details in proptest::option::of("[a-z ]{0,20}"),
            show_no in any::<bool>(),
        ) {
            let options = RowOptions {
                id: "field".to_string(),
                text: label,
                link,
                editable: false,
                ..RowOptions::default()
            };
            let mut answer = BooleanWithDetails::new(value, details.as_deref());
            answer.show_details_when_answer_is_no = show_no;

            let instructions = [
                text_summary_list_item(options.clone(), "v"),
                boolean_summary_list_item(options.clone(), value, None),
                boolean_with_details_summary_list_item(options.clone(), &answer),
                list_summary_list_item(options.clone(), &["a", "b"], "None"),
                document_folder_summary_list_item(options, Some(&received_folder())),
                costs_folder_table_item(
                    FolderRowOptions::new("c", "C", "/c", false),
                    Some(&received_folder()),
                ),
            ];
            for instruction in &instructions {
                prop_assert!(instruction.action_items().is_empty());
            }
        }
    }
}
