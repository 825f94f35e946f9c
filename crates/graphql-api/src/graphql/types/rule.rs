//! `PromotionRule` object.

use async_graphql::{Context, ID, Object, Result};
use discounts_app::domain::promotions::records::PromotionRuleRecord;
use tracing::error;

use crate::graphql::{
    context::ContextExt as _,
    errors::internal_error,
    ids::{PROMOTION_RULE, to_global_id},
    types::{PromotionType, enums::RewardValueTypeEnum},
};

/// A rule's representation; after deletion it is the last stored state.
#[derive(Debug, Clone)]
pub(crate) struct PromotionRuleType(pub PromotionRuleRecord);

#[Object(name = "PromotionRule")]
impl PromotionRuleType {
    async fn id(&self) -> ID {
        to_global_id(PROMOTION_RULE, self.0.uuid.into_uuid())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn reward_value_type(&self) -> Option<RewardValueTypeEnum> {
        self.0.reward.map(|reward| RewardValueTypeEnum::of(reward).0)
    }

    /// Percentage (1-100) or fixed amount in minor currency units.
    async fn reward_value(&self) -> Result<Option<i32>> {
        let Some(reward) = self.0.reward else {
            return Ok(None);
        };

        let (_, value) = RewardValueTypeEnum::of(reward);

        i32::try_from(value).map(Some).map_err(|source| {
            error!(rule_uuid = %self.0.uuid, value, "stored reward exceeds Int: {source}");
            internal_error()
        })
    }

    async fn promotion(&self, ctx: &Context<'_>) -> Result<PromotionType> {
        // Rules cascade with their promotion, so a missing one is a storage fault.
        ctx.promotions()?
            .get_promotion(self.0.promotion_uuid)
            .await
            .map(PromotionType)
            .map_err(|source| {
                error!(promotion_uuid = %self.0.promotion_uuid, "failed to load rule promotion: {source}");
                internal_error()
            })
    }
}
