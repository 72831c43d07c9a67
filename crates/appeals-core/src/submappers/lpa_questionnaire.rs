//! LPA questionnaire page

use super::{shared, MapResult, Registry, Variant};
use crate::context::SubmapperContext;
use appeals_components::format::{NONE, NOT_PROVIDED};
use appeals_components::{
    boolean_summary_list_item, boolean_with_details_summary_list_item, list_summary_list_item,
    ActionVerb, BooleanWithDetails, RowOptions,
};
use appeals_mapping::MappingError;

/// Registry for the LPA questionnaire page
///
/// # Errors
/// [`MappingError::DuplicateSubmapper`] if two entries share an id.
pub(crate) fn registry(variant: Variant) -> Result<Registry, MappingError> {
    let registry = Registry::new()
        .with("is-correct-appeal-type", is_correct_appeal_type)?
        .with("conservation-area", conservation_area)?
        .with("listed-buildings", listed_buildings)?
        .with("green-belt", green_belt)?
        .with("notification-methods", notification_methods)?
        .with("inspector-access", inspector_access)?
        .with("neighbouring-site-access", neighbouring_site_access)?
        .with("health-and-safety", health_and_safety)?
        .with("extra-conditions", extra_conditions)?
        .with("officer-report", officer_report)?
        .with("validation-outcome", validation_outcome)?;
    match variant {
        Variant::Expedited => Ok(registry),
        Variant::Full => registry
            .with("affects-scheduled-monument", affects_scheduled_monument)?
            .with("protected-species", protected_species)?
            .with("environmental-statement-required", environmental_statement_required),
    }
}

/// "Add" until answered
fn row(ctx: &SubmapperContext, id: &str, label: &str, answered: bool) -> RowOptions {
    RowOptions::new(id, label)
        .link(ctx.route(&format!("lpa-questionnaire/{id}/change")))
        .verb(ActionVerb::AddOrChange, answered)
        .editable(ctx.can_update_open_case())
}

fn is_correct_appeal_type(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("is-correct-appeal-type")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "is-correct-appeal-type",
            "Is this the correct type of appeal?",
            questionnaire.is_correct_appeal_type.is_some(),
        ),
        questionnaire.is_correct_appeal_type,
        None,
    ))
}

/// "Yes" answers list the conservation area map documents instead
fn conservation_area(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("conservation-area")?;
    if questionnaire.is_conservation_area == Some(true) {
        return Ok(shared::folder_item(
            ctx,
            "conservation-area",
            "Conservation area map and guidance",
            questionnaire.conservation_area_map.as_ref(),
        ));
    }
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "conservation-area",
            "Is the site in a conservation area?",
            questionnaire.is_conservation_area.is_some(),
        ),
        questionnaire.is_conservation_area,
        None,
    ))
}

fn listed_buildings(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("listed-buildings")?;
    Ok(list_summary_list_item(
        row(
            ctx,
            "listed-buildings",
            "Listed buildings affected",
            !questionnaire.listed_building_details.is_empty(),
        ),
        &questionnaire.listed_building_details,
        NONE,
    ))
}

fn green_belt(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("green-belt")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "green-belt",
            "Is the site in a green belt?",
            questionnaire.is_green_belt.is_some(),
        ),
        questionnaire.is_green_belt,
        None,
    ))
}

fn notification_methods(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("notification-methods")?;
    Ok(list_summary_list_item(
        row(
            ctx,
            "notification-methods",
            "Notification methods",
            !questionnaire.notification_methods.is_empty(),
        ),
        &questionnaire.notification_methods,
        NOT_PROVIDED,
    ))
}

fn inspector_access(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("inspector-access")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "inspector-access",
            "Might the inspector need access to the appellant's land?",
            questionnaire.site_access_required.is_some(),
        ),
        &BooleanWithDetails::new(
            questionnaire.site_access_required,
            questionnaire.site_access_details.as_deref(),
        ),
    ))
}

fn neighbouring_site_access(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("neighbouring-site-access")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "neighbouring-site-access",
            "Might the inspector need to enter a neighbour's land?",
            questionnaire.neighbouring_site_access_required.is_some(),
        ),
        &BooleanWithDetails::new(
            questionnaire.neighbouring_site_access_required,
            questionnaire.neighbouring_site_access_details.as_deref(),
        ),
    ))
}

fn health_and_safety(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("health-and-safety")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "health-and-safety",
            "Potential safety risks",
            questionnaire.has_health_and_safety_issues.is_some(),
        ),
        &BooleanWithDetails::new(
            questionnaire.has_health_and_safety_issues,
            questionnaire.health_and_safety_details.as_deref(),
        )
        .with_show_more(),
    ))
}

/// Details are kept even for a "No" answer, so they are always shown
fn extra_conditions(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("extra-conditions")?;
    Ok(boolean_with_details_summary_list_item(
        row(
            ctx,
            "extra-conditions",
            "Extra conditions",
            questionnaire.has_extra_conditions.is_some(),
        ),
        &BooleanWithDetails::new(
            questionnaire.has_extra_conditions,
            questionnaire.extra_conditions.as_deref(),
        )
        .show_details_when_answer_is_no(),
    ))
}

fn officer_report(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("officer-report")?;
    Ok(shared::folder_item(
        ctx,
        "officer-report",
        "Planning officer's report",
        questionnaire.officer_report.as_ref(),
    ))
}

fn validation_outcome(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("validation-outcome")?;
    Ok(shared::validation_outcome_item(
        ctx,
        questionnaire.validation.as_ref(),
        "lpa-questionnaire/validation",
    ))
}

fn affects_scheduled_monument(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("affects-scheduled-monument")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "affects-scheduled-monument",
            "Would the development affect a scheduled monument?",
            questionnaire.affects_scheduled_monument.is_some(),
        ),
        questionnaire.affects_scheduled_monument,
        None,
    ))
}

fn protected_species(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("protected-species")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "protected-species",
            "Would the development affect a protected species?",
            questionnaire.has_protected_species.is_some(),
        ),
        questionnaire.has_protected_species,
        None,
    ))
}

fn environmental_statement_required(ctx: &SubmapperContext) -> MapResult {
    let questionnaire = ctx.lpa_questionnaire("environmental-statement-required")?;
    Ok(boolean_summary_list_item(
        row(
            ctx,
            "environmental-statement-required",
            "Is an environmental statement required?",
            questionnaire.is_environmental_statement_required.is_some(),
        ),
        questionnaire.is_environmental_statement_required,
        None,
    ))
}
