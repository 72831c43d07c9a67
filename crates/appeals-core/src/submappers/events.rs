//! Hearing and inquiry arrangements

use super::shared::address_content;
use super::MapResult;
use crate::aggregate::{AppealStatus, Event, ProcedureType};
use crate::context::SubmapperContext;
use crate::session::Permission;
use appeals_components::format::{date_iso_string_to_display_date, NOT_PROVIDED};
use appeals_components::{
    page_components_instruction, text_summary_list_item, ActionVerb, ComponentKind, Content,
    FieldInstruction, PageComponent, RowOptions, SummaryListParameters,
};

pub(super) fn hearing(ctx: &SubmapperContext) -> MapResult {
    Ok(event_item(
        ctx,
        EventKind {
            id: "hearing",
            label: "Hearing",
            procedure: ProcedureType::Hearing,
            enabled: ctx.flags().hearing,
        },
        ctx.appeal.hearing.as_ref(),
    ))
}

pub(super) fn inquiry(ctx: &SubmapperContext) -> MapResult {
    Ok(event_item(
        ctx,
        EventKind {
            id: "inquiry",
            label: "Inquiry",
            procedure: ProcedureType::Inquiry,
            enabled: ctx.flags().inquiry,
        },
        ctx.appeal.inquiry.as_ref(),
    ))
}

struct EventKind {
    id: &'static str,
    label: &'static str,
    procedure: ProcedureType,
    enabled: bool,
}

/// Empty unless the appeal follows this procedure. An arranged event renders
/// as its own summary list; otherwise a single "Set up" row.
fn event_item(ctx: &SubmapperContext, kind: EventKind, event: Option<&Event>) -> FieldInstruction {
    if !kind.enabled || ctx.appeal.procedure_type != Some(kind.procedure) {
        return FieldInstruction::empty(kind.id);
    }
    let editable = ctx.editable(
        Permission::SetEvents,
        !ctx.appeal.status.is_past(AppealStatus::AwaitingEvent),
    );

    let Some(event) = event else {
        let options = RowOptions::new(kind.id, kind.label)
            .link(ctx.route(&format!("{}/setup", kind.id)))
            .editable(editable)
            .verb(ActionVerb::SetUpOrChange, false);
        return text_summary_list_item(options, Content::text("Not set up"));
    };

    let date = date_iso_string_to_display_date(&event.start_time, ctx.date_pattern())
        .unwrap_or_else(|_| NOT_PROVIDED.to_string());
    let days = event
        .estimated_days
        .map_or_else(|| NOT_PROVIDED.to_string(), |d| d.to_string());

    let row = |id: &str, label: &str, value: Content, change: &str| {
        let options = RowOptions::new(format!("{}-{id}", kind.id), label)
            .link(ctx.route(&format!("{}/change/{change}", kind.id)))
            .editable(editable)
            .verb(ActionVerb::AddOrChange, true);
        text_summary_list_item(options, value)
            .display
            .summary_list_item()
            .cloned()
    };

    let rows = [
        row("date", "Date", Content::Text(date), "date"),
        row("address", "Address", address_content(event.address.as_ref()), "address"),
        row("estimated-days", "Estimated days", Content::Text(days), "estimated-days"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let list = PageComponent::new(ComponentKind::SummaryList(SummaryListParameters {
        rows,
        classes: Some("govuk-summary-list--no-border".to_string()),
    }));
    page_components_instruction(kind.id, vec![list])
}
