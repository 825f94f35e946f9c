//! Test Helpers

use uuid::Uuid;

use crate::{
    domain::promotions::{
        PromotionsService, PromotionsServiceError,
        data::{Actor, NewPromotion, NewPromotionRule, rewards::RuleReward},
        records::{PromotionRecord, PromotionRuleRecord, PromotionRuleUuid, PromotionUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_promotion(
    ctx: &TestContext,
    name: &str,
) -> Result<PromotionRecord, PromotionsServiceError> {
    ctx.promotions
        .create_promotion(
            Actor::User(Uuid::now_v7()),
            NewPromotion {
                uuid: PromotionUuid::new(),
                name: name.to_string(),
                description: None,
                starts_at: None,
                ends_at: None,
            },
        )
        .await
}

pub(crate) async fn create_rule(
    ctx: &TestContext,
    promotion: PromotionUuid,
    name: &str,
) -> Result<PromotionRuleRecord, PromotionsServiceError> {
    ctx.promotions
        .create_rule(
            Actor::User(Uuid::now_v7()),
            NewPromotionRule {
                uuid: PromotionRuleUuid::new(),
                promotion_uuid: promotion,
                name: name.to_string(),
                description: None,
                reward: Some(RuleReward::PercentageOff { percentage: 10 }),
            },
        )
        .await
}
