//! Start date, timetable due dates and final comments

use super::MapResult;
use crate::aggregate::AppealStatus;
use crate::context::{RepresentationStatus, SubmapperContext};
use crate::session::Permission;
use appeals_components::format::NOT_PROVIDED;
use appeals_components::{
    date_summary_list_item, text_summary_list_item, ActionVerb, Content, FieldInstruction,
    RowOptions,
};

pub(super) fn start_date(ctx: &SubmapperContext) -> MapResult {
    let start = ctx.appeal.start_date.as_deref();
    let suffix = if start.is_some() { "start-case/change" } else { "start-case/add" };
    let options = RowOptions::new("start-date", "Start date")
        .link(ctx.route(suffix))
        .editable(ctx.editable(
            Permission::UpdateCase,
            !ctx.appeal.status.is_past(AppealStatus::ReadyToStart),
        ))
        .verb(ActionVerb::AddOrChange, start.is_some());
    Ok(date_summary_list_item(options, start, ctx.date_pattern(), NOT_PROVIDED))
}

pub(super) fn lpa_questionnaire_due_date(ctx: &SubmapperContext) -> MapResult {
    let due = ctx
        .appeal
        .timetable
        .as_ref()
        .and_then(|t| t.lpa_questionnaire_due_date.as_deref());
    Ok(due_date_item(
        ctx,
        "lpa-questionnaire-due-date",
        "LPA questionnaire due",
        due,
        AppealStatus::LpaQuestionnaire,
    ))
}

pub(super) fn lpa_statement_due_date(ctx: &SubmapperContext) -> MapResult {
    let due = ctx
        .appeal
        .timetable
        .as_ref()
        .and_then(|t| t.lpa_statement_due_date.as_deref());
    Ok(due_date_item(
        ctx,
        "lpa-statement-due-date",
        "LPA statement due",
        due,
        AppealStatus::Statements,
    ))
}

pub(super) fn final_comments_due_date(ctx: &SubmapperContext) -> MapResult {
    let due = ctx
        .appeal
        .timetable
        .as_ref()
        .and_then(|t| t.final_comments_due_date.as_deref());
    Ok(due_date_item(
        ctx,
        "final-comments-due-date",
        "Final comments due",
        due,
        AppealStatus::FinalComments,
    ))
}

/// Due date row; frozen once the date has passed or the case has moved
/// beyond the stage the date governs
fn due_date_item(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    due: Option<&str>,
    stage: AppealStatus,
) -> FieldInstruction {
    let gate = ctx.appeal.start_date.is_some()
        && !ctx.has_passed(due)
        && !ctx.appeal.status.is_past(stage);
    let options = RowOptions::new(id, label)
        .link(ctx.route("appeal-timetables/edit"))
        .editable(ctx.editable(Permission::UpdateCase, gate))
        .verb(ActionVerb::ScheduleOrChange, due.is_some());
    date_summary_list_item(options, due, ctx.date_pattern(), "Not scheduled")
}

pub(super) fn appellant_final_comments(ctx: &SubmapperContext) -> MapResult {
    const ID: &str = "appellant-final-comments";
    if !ctx.flags().final_comments {
        return Ok(FieldInstruction::empty(ID));
    }
    let summary = ctx.final_comments(ID)?;
    Ok(final_comments_item(
        ctx,
        ID,
        "Appellant final comments",
        summary.appellant,
        "final-comments/appellant",
    ))
}

pub(super) fn lpa_final_comments(ctx: &SubmapperContext) -> MapResult {
    const ID: &str = "lpa-final-comments";
    if !ctx.flags().final_comments {
        return Ok(FieldInstruction::empty(ID));
    }
    let summary = ctx.final_comments(ID)?;
    Ok(final_comments_item(
        ctx,
        ID,
        "LPA final comments",
        summary.lpa,
        "final-comments/lpa",
    ))
}

/// Final comments row; nothing to act on until comments arrive
fn final_comments_item(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    status: RepresentationStatus,
    link: &str,
) -> FieldInstruction {
    let options = RowOptions::new(id, label)
        .link(ctx.route(link))
        .editable(ctx.editable(Permission::UpdateCase, status.is_received()))
        .verb(ActionVerb::ReviewOrView, status.is_reviewed());
    text_summary_list_item(options, Content::text(status.display_name()))
}
