//! Submappers and helpers used on more than one page

use super::MapResult;
use crate::aggregate::{Address, ServiceUser, ValidationOutcome, ValidationOutcomeKind};
use crate::context::SubmapperContext;
use appeals_components::format::{format_reasons, join_lines_html, NONE, NOT_PROVIDED};
use appeals_components::{
    document_folder_summary_list_item, folder_link, text_summary_list_item,
    value_summary_list_item, ActionVerb, ComponentKind, Content, DetailsParameters,
    DocumentFolder, FieldInstruction, PageComponent, RowOptions, SummaryValue,
};

pub(super) fn appellant(ctx: &SubmapperContext) -> MapResult {
    Ok(service_user_item(
        ctx,
        "appellant",
        "Appellant",
        ctx.appeal.appellant.as_ref(),
        "service-user/change/appellant",
    ))
}

pub(super) fn agent(ctx: &SubmapperContext) -> MapResult {
    Ok(service_user_item(
        ctx,
        "agent",
        "Agent",
        ctx.appeal.agent.as_ref(),
        "service-user/change/agent",
    ))
}

pub(super) fn site_address(ctx: &SubmapperContext) -> MapResult {
    let site = ctx.appeal.appeal_site.as_ref();
    let options = RowOptions::new("site-address", "Site address")
        .link(ctx.route("site-address/change"))
        .editable(ctx.can_update_open_case())
        .verb(ActionVerb::AddOrChange, site.is_some());
    Ok(text_summary_list_item(options, address_content(site)))
}

fn service_user_item(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    user: Option<&ServiceUser>,
    link: &str,
) -> FieldInstruction {
    let options = RowOptions::new(id, label)
        .link(ctx.route(link))
        .editable(ctx.can_update_open_case())
        .verb(ActionVerb::AddOrChange, user.is_some());
    let content = match user.map(ServiceUser::lines) {
        Some(lines) if !lines.is_empty() => Content::Html(join_lines_html(&lines)),
        _ => Content::text(NOT_PROVIDED),
    };
    text_summary_list_item(options, content)
}

/// Address lines separated by line breaks, or "Not provided"
pub(super) fn address_content(address: Option<&Address>) -> Content {
    match address.map(Address::lines) {
        Some(lines) if !lines.is_empty() => Content::Html(join_lines_html(&lines)),
        _ => Content::text(NOT_PROVIDED),
    }
}

/// Documents row linking to the folder's upload or manage page
pub(super) fn folder_item(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    folder: Option<&DocumentFolder>,
) -> FieldInstruction {
    let mut options = RowOptions::new(id, label).editable(ctx.can_update_open_case());
    if let Some(folder) = folder {
        options = options.link(folder_link(&ctx.current_route, folder));
    }
    document_folder_summary_list_item(options, folder)
}

/// Validation outcome row; reasons go in a disclosure beneath the outcome
pub(super) fn validation_outcome_item(
    ctx: &SubmapperContext,
    validation: Option<&ValidationOutcome>,
    link: &str,
) -> FieldInstruction {
    let options = RowOptions::new("validation-outcome", "Validation outcome")
        .link(ctx.route(link))
        .editable(ctx.can_update_open_case())
        .verb(ActionVerb::ReviewOrView, validation.is_some());

    let Some(validation) = validation else {
        return text_summary_list_item(options, Content::text("Not validated"));
    };

    let mut value = SummaryValue::new(Content::text(validation.outcome.display_name()));
    if validation.outcome != ValidationOutcomeKind::Valid {
        value = value.with_component(PageComponent::new(ComponentKind::Details(
            DetailsParameters {
                summary_text: "Reasons".to_string(),
                content: format_reasons(&validation.reasons, NONE),
            },
        )));
    }
    value_summary_list_item(options, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AppealStatus, AppealType};
    use crate::session::Permission;
    use crate::submappers::test_support::{appeal, context};
    use appeals_components::Reason;
    use pretty_assertions::assert_eq;

    #[test]
    fn appellant_lines_are_escaped_and_joined() {
        let mut a = appeal(AppealType::Householder, AppealStatus::Validation);
        a.appellant = Some(ServiceUser {
            first_name: Some("Jo".to_string()),
            last_name: Some("O'Brien <Ltd>".to_string()),
            email: Some("jo@example.com".to_string()),
            ..ServiceUser::default()
        });
        let ctx = context(a, &[Permission::UpdateCase]);
        let instruction = appellant(&ctx).unwrap();
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(
            row.value.content,
            Content::Html("Jo O&#x27;Brien &lt;Ltd&gt;<br>jo@example.com".to_string())
        );
        assert_eq!(row.actions.items[0].text, "Change");
        assert_eq!(
            row.actions.items[0].href,
            "/appeals-service/appeal-details/42/service-user/change/appellant"
        );
    }

    #[test]
    fn missing_agent_offers_add() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Validation),
            &[Permission::UpdateCase],
        );
        let instruction = agent(&ctx).unwrap();
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(row.value.content, Content::text(NOT_PROVIDED));
        assert_eq!(row.actions.items[0].text, "Add");
    }

    #[test]
    fn closed_case_is_read_only() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Withdrawn),
            &[Permission::UpdateCase],
        );
        assert!(site_address(&ctx).unwrap().action_items().is_empty());
    }

    #[test]
    fn invalid_outcome_lists_reasons() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Validation),
            &[Permission::UpdateCase],
        );
        let outcome = ValidationOutcome {
            outcome: ValidationOutcomeKind::Incomplete,
            reasons: vec![Reason::named("Missing plans").with_text("Site plan")],
        };
        let instruction = validation_outcome_item(&ctx, Some(&outcome), "appellant-case/validation");
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(row.value.content, Content::text("Incomplete"));
        assert_eq!(row.actions.items[0].text, "View");
        assert_eq!(row.value.page_components.len(), 1);
        assert_eq!(row.value.page_components[0].type_name(), "details");
    }

    #[test]
    fn unvalidated_outcome_offers_review() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Validation),
            &[Permission::UpdateCase],
        );
        let instruction = validation_outcome_item(&ctx, None, "appellant-case/validation");
        let row = instruction.display.summary_list_item().unwrap();
        assert_eq!(row.value.content, Content::text("Not validated"));
        assert_eq!(row.actions.items[0].text, "Review");
    }
}
