//! Costs document folders

use super::MapResult;
use crate::context::SubmapperContext;
use crate::session::Permission;
use appeals_components::{
    costs_folder_table_item, DocumentFolder, FieldInstruction, FolderRowOptions,
};

pub(super) fn costs_appellant_application(ctx: &SubmapperContext) -> MapResult {
    Ok(folder_row(
        ctx,
        "costs-appellant-application",
        "Appellant costs application",
        "costs/appellant/application",
        ctx.appeal.costs.appellant_application_folder.as_ref(),
    ))
}

pub(super) fn costs_lpa_application(ctx: &SubmapperContext) -> MapResult {
    Ok(folder_row(
        ctx,
        "costs-lpa-application",
        "LPA costs application",
        "costs/lpa/application",
        ctx.appeal.costs.lpa_application_folder.as_ref(),
    ))
}

pub(super) fn costs_decision(ctx: &SubmapperContext) -> MapResult {
    const ID: &str = "costs-decision";
    if !ctx.flags().costs_decision {
        return Ok(FieldInstruction::empty(ID));
    }
    Ok(folder_row(
        ctx,
        ID,
        "Costs decision",
        "costs/decision",
        ctx.appeal.costs.decision_folder.as_ref(),
    ))
}

fn folder_row(
    ctx: &SubmapperContext,
    id: &str,
    label: &str,
    base: &str,
    folder: Option<&DocumentFolder>,
) -> FieldInstruction {
    let editable = ctx.can(Permission::ManageCosts);
    costs_folder_table_item(FolderRowOptions::new(id, label, ctx.route(base), editable), folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AppealStatus, AppealType};
    use crate::config::{FeatureFlags, MapperConfig};
    use crate::submappers::test_support::{appeal, context};
    use appeals_components::{Content, Document, DocumentVersion, RedactionStatus, VirusCheckStatus};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn received(folder_id: u64) -> DocumentFolder {
        DocumentFolder::new(folder_id, "costs/decision").with_document(Document {
            id: "d1".to_string(),
            name: "decision.pdf".to_string(),
            latest_version: Some(DocumentVersion {
                version: 1,
                virus_check_status: VirusCheckStatus::Scanned,
                redaction_status: RedactionStatus::Unredacted,
            }),
        })
    }

    #[test]
    fn missing_decision_folder_renders_not_received() {
        let ctx = context(
            appeal(AppealType::Householder, AppealStatus::Complete),
            &[Permission::ManageCosts],
        );
        let instruction = costs_decision(&ctx).unwrap();
        let row = instruction.display.table_item().unwrap();
        assert_eq!(row.cells()[1].content, Content::text("Not received"));
        assert!(instruction.action_items().is_empty());
    }

    #[test]
    fn received_folder_links_to_manage() {
        let mut a = appeal(AppealType::Householder, AppealStatus::Complete);
        a.costs.decision_folder = Some(received(9));
        let ctx = context(a, &[Permission::ManageCosts]);
        let instruction = costs_decision(&ctx).unwrap();
        let actions = instruction.action_items();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].text, "Manage");
        assert_eq!(
            actions[0].href,
            "/appeals-service/appeal-details/42/costs/decision/manage-documents/9"
        );
    }

    #[test]
    fn empty_folder_links_to_upload() {
        let mut a = appeal(AppealType::Householder, AppealStatus::Statements);
        a.costs.appellant_application_folder =
            Some(DocumentFolder::new(3, "costs/appellant/application"));
        let ctx = context(a, &[Permission::ManageCosts]);
        let instruction = costs_appellant_application(&ctx).unwrap();
        let actions = instruction.action_items();
        assert_eq!(actions[0].text, "Add");
        assert!(actions[0].href.ends_with("/costs/appellant/application/upload-documents/3"));
    }

    #[test]
    fn costs_need_manage_costs() {
        let mut a = appeal(AppealType::Householder, AppealStatus::Statements);
        a.costs.lpa_application_folder = Some(received(4));
        let ctx = context(a, &[Permission::UpdateCase]);
        assert!(costs_lpa_application(&ctx).unwrap().action_items().is_empty());
    }

    #[test]
    fn disabled_costs_decision_renders_nothing() {
        let mut ctx = context(
            appeal(AppealType::Householder, AppealStatus::Complete),
            &[Permission::ManageCosts],
        );
        ctx.config = Arc::new(MapperConfig::new().with_feature_flags(FeatureFlags {
            costs_decision: false,
            ..FeatureFlags::default()
        }));
        let instruction = costs_decision(&ctx).unwrap();
        assert_eq!(instruction, FieldInstruction::empty("costs-decision"));
    }
}
