//! Promotion rule mutations.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use discounts_app::{
    auth::Permission,
    domain::promotions::{data::NewPromotionRule, records::PromotionRuleUuid},
};
use tracing::info;

use crate::graphql::{
    context::ContextExt as _,
    errors::{DiscountError, service_error},
    ids::{PROMOTION_RULE, from_global_id},
    inputs::{PromotionRuleCreateInput, PromotionRuleUpdateInput},
    types::PromotionRuleType,
};

#[derive(SimpleObject, Debug, Default)]
pub(crate) struct PromotionRuleCreatePayload {
    pub promotion_rule: Option<PromotionRuleType>,
    pub errors: Vec<DiscountError>,
}

#[derive(SimpleObject, Debug, Default)]
pub(crate) struct PromotionRuleUpdatePayload {
    pub promotion_rule: Option<PromotionRuleType>,
    pub errors: Vec<DiscountError>,
}

#[derive(SimpleObject, Debug, Default)]
pub(crate) struct PromotionRuleDeletePayload {
    /// The deleted rule as it was stored immediately before deletion.
    pub promotion_rule: Option<PromotionRuleType>,
    pub errors: Vec<DiscountError>,
}

fn rule_uuid(id: &ID) -> Result<PromotionRuleUuid, DiscountError> {
    from_global_id(PROMOTION_RULE, id)
        .map(PromotionRuleUuid::from_uuid)
        .map_err(|source| DiscountError::invalid_id("id", &source))
}

#[derive(Default)]
pub(crate) struct PromotionRuleMutations;

#[Object]
impl PromotionRuleMutations {
    /// Creates a rule within a promotion.
    ///
    /// Requires the MANAGE_DISCOUNTS permission.
    async fn promotion_rule_create(
        &self,
        ctx: &Context<'_>,
        input: PromotionRuleCreateInput,
    ) -> Result<Option<PromotionRuleCreatePayload>> {
        let actor = ctx.require_permission(Permission::ManageDiscounts)?;

        let fields = match input.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                return Ok(Some(PromotionRuleCreatePayload {
                    errors,
                    ..Default::default()
                }));
            }
        };

        let created = ctx
            .promotions()?
            .create_rule(
                actor,
                NewPromotionRule {
                    uuid: PromotionRuleUuid::new(),
                    promotion_uuid: fields.promotion,
                    name: fields.name,
                    description: fields.description,
                    reward: fields.reward,
                },
            )
            .await;

        let payload = match created {
            Ok(rule) => PromotionRuleCreatePayload {
                promotion_rule: Some(PromotionRuleType(rule)),
                errors: Vec::new(),
            },
            Err(source) => PromotionRuleCreatePayload {
                errors: vec![service_error("promotion", source)?],
                ..Default::default()
            },
        };

        Ok(Some(payload))
    }

    /// Updates an existing promotion rule.
    ///
    /// Requires the MANAGE_DISCOUNTS permission.
    async fn promotion_rule_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: PromotionRuleUpdateInput,
    ) -> Result<Option<PromotionRuleUpdatePayload>> {
        let actor = ctx.require_permission(Permission::ManageDiscounts)?;

        let uuid = match rule_uuid(&id) {
            Ok(uuid) => uuid,
            Err(error) => {
                return Ok(Some(PromotionRuleUpdatePayload {
                    errors: vec![error],
                    ..Default::default()
                }));
            }
        };

        let update = match input.validate() {
            Ok(update) => update,
            Err(errors) => {
                return Ok(Some(PromotionRuleUpdatePayload {
                    errors,
                    ..Default::default()
                }));
            }
        };

        let payload = match ctx.promotions()?.update_rule(actor, uuid, update).await {
            Ok(rule) => PromotionRuleUpdatePayload {
                promotion_rule: Some(PromotionRuleType(rule)),
                errors: Vec::new(),
            },
            Err(source) => PromotionRuleUpdatePayload {
                errors: vec![service_error("id", source)?],
                ..Default::default()
            },
        };

        Ok(Some(payload))
    }

    /// Deletes a promotion rule.
    ///
    /// Requires the MANAGE_DISCOUNTS permission. Appends a `RULE_DELETED`
    /// event to the owning promotion.
    async fn promotion_rule_delete(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<PromotionRuleDeletePayload>> {
        let actor = ctx.require_permission(Permission::ManageDiscounts)?;

        let uuid = match rule_uuid(&id) {
            Ok(uuid) => uuid,
            Err(error) => {
                return Ok(Some(PromotionRuleDeletePayload {
                    errors: vec![error],
                    ..Default::default()
                }));
            }
        };

        let payload = match ctx.promotions()?.delete_rule(actor, uuid).await {
            Ok(rule) => {
                info!(rule_uuid = %rule.uuid, %actor, "promotion rule deleted via graphql");

                PromotionRuleDeletePayload {
                    promotion_rule: Some(PromotionRuleType(rule)),
                    errors: Vec::new(),
                }
            }
            Err(source) => PromotionRuleDeletePayload {
                errors: vec![service_error("id", source)?],
                ..Default::default()
            },
        };

        Ok(Some(payload))
    }
}
