//! Case overview page

use super::{costs, events, shared, timetable, MapResult, Registry, Variant};
use crate::aggregate::{AppealStatus, ProcedureType, User};
use crate::context::SubmapperContext;
use crate::session::Permission;
use appeals_components::format::NOT_PROVIDED;
use appeals_components::{
    button_instruction, optional_text_summary_list_item, text_summary_list_item, ActionItem,
    ActionVerb, ButtonItem, Content, FieldInstruction, RowOptions, SummaryListItem, SummaryValue,
};
use appeals_mapping::{gated_actions, MappingError};

/// Registry for the case overview page
///
/// # Errors
/// [`MappingError::DuplicateSubmapper`] if two entries share an id.
pub(crate) fn registry(variant: Variant) -> Result<Registry, MappingError> {
    let mut registry = Registry::new()
        .with("appeal-type", appeal_type)?
        .with("procedure-type", procedure_type)?
        .with("appellant", shared::appellant)?
        .with("agent", shared::agent)?
        .with("site-address", shared::site_address)?
        .with("local-planning-authority", local_planning_authority)?
        .with("planning-application-reference", planning_application_reference)?
        .with("case-officer", case_officer)?
        .with("inspector", inspector)?
        .with("start-date", timetable::start_date)?
        .with("lpa-questionnaire-due-date", timetable::lpa_questionnaire_due_date)?;

    if variant == Variant::Full {
        registry.register("lpa-statement-due-date", timetable::lpa_statement_due_date)?;
        registry.register("final-comments-due-date", timetable::final_comments_due_date)?;
    }
    registry.register("appellant-final-comments", timetable::appellant_final_comments)?;
    if variant == Variant::Full {
        registry.register("lpa-final-comments", timetable::lpa_final_comments)?;
    }

    registry
        .with("hearing", events::hearing)?
        .with("inquiry", events::inquiry)?
        .with("costs-appellant-application", costs::costs_appellant_application)?
        .with("costs-lpa-application", costs::costs_lpa_application)?
        .with("costs-decision", costs::costs_decision)?
        .with("case-history", case_history)?
        .with("issue-decision", issue_decision)
}

fn appeal_type(ctx: &SubmapperContext) -> MapResult {
    let options = RowOptions::new("appeal-type", "Appeal type")
        .link(ctx.route("change-appeal-type/appeal-type"))
        .editable(ctx.editable(Permission::UpdateCase, !ctx.appeal.has_decision()))
        .verb(ActionVerb::AddOrChange, true);
    Ok(text_summary_list_item(
        options,
        Content::text(ctx.appeal.appeal_type.display_name()),
    ))
}

fn procedure_type(ctx: &SubmapperContext) -> MapResult {
    let procedure = ctx.appeal.procedure_type;
    let options = RowOptions::new("procedure-type", "Appeal procedure")
        .link(ctx.route("change-appeal-procedure-type"))
        .editable(ctx.editable(Permission::UpdateCase, !ctx.appeal.has_decision()))
        .verb(ActionVerb::AddOrChange, procedure.is_some());
    Ok(optional_text_summary_list_item(
        options,
        procedure.map(ProcedureType::display_name),
        NOT_PROVIDED,
    ))
}

fn local_planning_authority(ctx: &SubmapperContext) -> MapResult {
    Ok(text_summary_list_item(
        RowOptions::new("local-planning-authority", "Local planning authority"),
        ctx.appeal.local_planning_authority.as_str(),
    ))
}

fn planning_application_reference(ctx: &SubmapperContext) -> MapResult {
    let reference = ctx.appeal.planning_application_reference.as_deref();
    let options = RowOptions::new("planning-application-reference", "LPA application reference")
        .link(ctx.route("planning-application-reference/change"))
        .editable(ctx.can_update_open_case())
        .verb(ActionVerb::AddOrChange, reference.is_some());
    Ok(optional_text_summary_list_item(options, reference, NOT_PROVIDED))
}

fn case_officer(ctx: &SubmapperContext) -> MapResult {
    Ok(assigned_user_item(
        ctx,
        "case-officer",
        "Case officer",
        ctx.appeal.case_officer.as_ref(),
        Permission::SetCaseOfficer,
    ))
}

fn inspector(ctx: &SubmapperContext) -> MapResult {
    Ok(assigned_user_item(
        ctx,
        "inspector",
        "Inspector",
        ctx.appeal.inspector.as_ref(),
        Permission::SetInspector,
    ))
}

fn assigned_user_item(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    user: Option<&User>,
    permission: Permission,
) -> FieldInstruction {
    let options = RowOptions::new(id, label)
        .link(ctx.route(&format!("assign-user/{id}")))
        .editable(ctx.editable(permission, !ctx.appeal.status.is_closed()))
        .verb(ActionVerb::AssignOrChange, user.is_some());
    optional_text_summary_list_item(options, user.map(User::display_name), "Not assigned")
}

/// Row exists only to carry the gated "View" link
fn case_history(ctx: &SubmapperContext) -> MapResult {
    const ID: &str = "case-history";
    let actions = gated_actions([ctx.gated_action(
        Permission::ViewCaseHistory,
        ActionItem::new(ActionVerb::View.text(true), ctx.route("case-history"))
            .with_hidden_text("case history")
            .with_test_hook(ID),
    )]);
    if actions.is_empty() {
        return Ok(FieldInstruction::empty(ID));
    }
    Ok(FieldInstruction::summary_list_item(
        ID,
        SummaryListItem {
            key: Content::text("Case history"),
            value: SummaryValue::new(Content::text("")),
            actions,
            classes: None,
        },
    ))
}

fn issue_decision(ctx: &SubmapperContext) -> MapResult {
    const ID: &str = "issue-decision";
    let ready = ctx.appeal.status == AppealStatus::IssueDetermination && !ctx.appeal.has_decision();
    if !ctx.editable(Permission::IssueDecision, ready) {
        return Ok(FieldInstruction::empty(ID));
    }
    Ok(button_instruction(
        ID,
        ButtonItem::link("Issue decision", ctx.route("issue-decision/decision"))
            .with_attribute("data-cy", "issue-decision"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AppealType, Decision, DecisionOutcome};
    use crate::submappers::test_support::{appeal, context};
    use appeals_components::DisplayPayload;
    use pretty_assertions::assert_eq;

    #[test]
    fn appeal_type_frozen_after_decision() {
        let mut a = appeal(AppealType::PlanningAppeal, AppealStatus::Complete);
        a.decision = Some(Decision {
            outcome: DecisionOutcome::Allowed,
            letter_date: None,
        });
        let ctx = context(a, &[Permission::UpdateCase]);
        let instruction = appeal_type(&ctx).unwrap();
        assert_eq!(
            instruction.display.summary_list_item().unwrap().value.content,
            Content::text("Planning appeal")
        );
        assert!(instruction.action_items().is_empty());
    }

    #[test]
    fn procedure_type_offers_add_when_unset() {
        let ctx = context(
            appeal(AppealType::PlanningAppeal, AppealStatus::Validation),
            &[Permission::UpdateCase],
        );
        let instruction = procedure_type(&ctx).unwrap();
        assert_eq!(instruction.action_items()[0].text, "Add");

        let mut a = appeal(AppealType::PlanningAppeal, AppealStatus::Validation);
        a.procedure_type = Some(ProcedureType::Written);
        let ctx = context(a, &[Permission::UpdateCase]);
        assert_eq!(procedure_type(&ctx).unwrap().action_items()[0].text, "Change");
    }

    #[test]
    fn case_officer_uses_own_permission() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::AssignCaseOfficer),
            &[Permission::UpdateCase],
        );
        assert!(case_officer(&ctx).unwrap().action_items().is_empty());

        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::AssignCaseOfficer),
            &[Permission::SetCaseOfficer],
        );
        let instruction = case_officer(&ctx).unwrap();
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(row.value.content, Content::text("Not assigned"));
        assert_eq!(row.actions.items[0].text, "Assign");
        assert_eq!(
            row.actions.items[0].href,
            "/appeals-service/appeal-details/42/assign-user/case-officer"
        );
    }

    #[test]
    fn assigned_inspector_shows_name() {
        let mut a = appeal(AppealType::Householder, AppealStatus::Event);
        a.inspector = Some(User {
            id: "u1".to_string(),
            name: Some("Sam Inspector".to_string()),
            email: None,
        });
        let ctx = context(a, &[Permission::SetInspector]);
        let instruction = inspector(&ctx).unwrap();
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(row.value.content, Content::text("Sam Inspector"));
        assert_eq!(row.actions.items[0].text, "Change");
    }

    #[test]
    fn lpa_is_read_only() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Validation),
            &Permission::ALL,
        );
        assert!(local_planning_authority(&ctx).unwrap().action_items().is_empty());
    }

    #[test]
    fn case_history_hidden_without_permission() {
        let ctx = context(appeal(AppealType::Householder, AppealStatus::Validation), &[]);
        assert!(case_history(&ctx).unwrap().display.is_empty());

        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Validation),
            &[Permission::ViewCaseHistory],
        );
        let instruction = case_history(&ctx).unwrap();
        let action = instruction.action_items()[0];
        assert_eq!(action.text, "View");
        assert_eq!(action.href, "/appeals-service/appeal-details/42/case-history");
        assert_eq!(action.attributes["data-cy"], "view-case-history");
    }

    #[test]
    fn issue_decision_button_only_when_ready() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Event),
            &[Permission::IssueDecision],
        );
        assert!(issue_decision(&ctx).unwrap().display.is_empty());

        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::IssueDetermination),
            &[Permission::IssueDecision],
        );
        let instruction = issue_decision(&ctx).unwrap();
        let DisplayPayload::ButtonItem(button) = &instruction.display else {
            panic!("expected button");
        };
        assert_eq!(button.text, "Issue decision");
        assert_eq!(
            button.href.as_deref(),
            Some("/appeals-service/appeal-details/42/issue-decision/decision")
        );
    }
}
