//! Appellant case page

use super::{shared, MapResult, Registry, Variant};
use crate::aggregate::ApplicationDecision;
use crate::context::SubmapperContext;
use appeals_components::format::NOT_PROVIDED;
use appeals_components::{
    boolean_summary_list_item, boolean_with_details_summary_list_item, date_summary_list_item,
    optional_text_summary_list_item, ActionVerb, BooleanWithDetails, RowOptions,
};
use appeals_mapping::MappingError;

/// Registry for the appellant case page
///
/// # Errors
/// [`MappingError::DuplicateSubmapper`] if two entries share an id.
pub(crate) fn registry(variant: Variant) -> Result<Registry, MappingError> {
    let mut registry = Registry::new()
        .with("appellant", shared::appellant)?
        .with("site-address", shared::site_address)?
        .with("site-ownership", site_ownership)?
        .with("green-belt", green_belt)?
        .with("inspector-access", inspector_access)?
        .with("health-and-safety", health_and_safety)?
        .with("application-reference", application_reference)?
        .with("application-date", application_date)?
        .with("development-description", development_description)?
        .with("application-decision", application_decision)?
        .with("appellant-costs-application", appellant_costs_application)?
        .with("application-form", application_form)?
        .with("appeal-statement", appeal_statement)?
        .with("validation-outcome", validation_outcome)?;
    match variant {
        Variant::Full => registry.register("agricultural-holding", agricultural_holding)?,
        Variant::Expedited => {}
    }
    Ok(registry)
}

/// Row options for an appellant-case answer; "Add" until answered
fn row(ctx: &SubmapperContext, id: &str, label: &str, answered: bool) -> RowOptions {
    RowOptions::new(id, label)
        .link(ctx.route(&format!("appellant-case/{id}/change")))
        .verb(ActionVerb::AddOrChange, answered)
        .editable(ctx.can_update_open_case())
}

fn site_ownership(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("site-ownership")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "site-ownership",
            "Does the appellant own all the land involved in the appeal?",
            case.owns_all_land.is_some(),
        ),
        case.owns_all_land,
        None,
    ))
}

fn green_belt(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("green-belt")?;
    Ok(boolean_summary_list_item(
        row(ctx, "green-belt", "Is the site in a green belt?", case.is_green_belt.is_some()),
        case.is_green_belt,
        None,
    ))
}

fn inspector_access(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("inspector-access")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "inspector-access",
            "Will an inspector need to access your land or property?",
            case.site_access_required.is_some(),
        ),
        &BooleanWithDetails::new(case.site_access_required, case.site_access_details.as_deref()),
    ))
}

fn health_and_safety(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("health-and-safety")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "health-and-safety",
            "Potential safety risks",
            case.has_health_and_safety_issues.is_some(),
        ),
        &BooleanWithDetails::new(
            case.has_health_and_safety_issues,
            case.health_and_safety_details.as_deref(),
        )
        .with_show_more(),
    ))
}

fn application_reference(ctx: &SubmapperContext) -> MapResult {
    let reference = ctx.appeal.planning_application_reference.as_deref();
    let options = row(ctx, "application-reference", "Application reference", reference.is_some());
    Ok(optional_text_summary_list_item(options, reference, NOT_PROVIDED))
}

fn application_date(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("application-date")?;
    let date = case.application_date.as_deref();
    let options = row(ctx, "application-date", "Application date", date.is_some());
    Ok(date_summary_list_item(options, date, ctx.date_pattern(), NOT_PROVIDED))
}

fn development_description(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("development-description")?;
    let description = case.development_description.as_deref();
    let options = row(
        ctx,
        "development-description",
        "Original description of development",
        description.is_some(),
    );
    Ok(optional_text_summary_list_item(options, description, NOT_PROVIDED))
}

fn application_decision(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("application-decision")?;
    let decision = case.application_decision;
    let options = row(
        ctx,
        "application-decision",
        "Was your application granted or refused?",
        decision.is_some(),
    );
    Ok(optional_text_summary_list_item(
        options,
        decision.map(ApplicationDecision::display_name),
        NOT_PROVIDED,
    ))
}

fn appellant_costs_application(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("appellant-costs-application")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "appellant-costs-application",
            "Do you need to apply for an award of appeal costs?",
            case.applied_for_costs.is_some(),
        ),
        case.applied_for_costs,
        None,
    ))
}

fn agricultural_holding(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("agricultural-holding")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "agricultural-holding",
            "Is the appeal site part of an agricultural holding?",
            case.is_agricultural_holding.is_some(),
        ),
        case.is_agricultural_holding,
        None,
    ))
}

fn application_form(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("application-form")?;
    Ok(shared::folder_item(
        ctx,
        "application-form",
        "Application form",
        case.application_form.as_ref(),
    ))
}

fn appeal_statement(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("appeal-statement")?;
    Ok(shared::folder_item(
        ctx,
        "appeal-statement",
        "Appeal statement",
        case.appeal_statement.as_ref(),
    ))
}

fn validation_outcome(ctx: &SubmapperContext) -> MapResult {
    let case = ctx.appellant_case("validation-outcome")?;
    Ok(shared::validation_outcome_item(
        ctx,
        case.validation.as_ref(),
        "appellant-case/validation",
    ))
}
