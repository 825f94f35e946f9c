//! Promotions Service

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        PromotionsServiceError,
        data::{
            Actor, NewPromotion, NewPromotionRule, PromotionRuleUpdate, PromotionUpdate,
            events::{NewPromotionEvent, PromotionEventKind},
        },
        records::{
            PromotionEventRecord, PromotionRecord, PromotionRuleRecord, PromotionRuleUuid,
            PromotionUuid,
        },
        repositories::{
            events::PgEventsRepository, promotions::PgPromotionsRepository,
            rules::PgRulesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    rules: PgRulesRepository,
    events: PgEventsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            rules: PgRulesRepository::new(),
            events: PgEventsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip_all,
        fields(promotion_uuid = %promotion.uuid, actor = %actor),
        err
    )]
    async fn create_promotion(
        &self,
        actor: Actor,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.promotions.create_promotion(&mut tx, promotion).await?;

        self.events
            .create_event(
                &mut tx,
                NewPromotionEvent::for_promotion(
                    record.uuid,
                    PromotionEventKind::PromotionCreated,
                    actor,
                ),
            )
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip_all,
        fields(promotion_uuid = %uuid, actor = %actor),
        err
    )]
    async fn update_promotion(
        &self,
        actor: Actor,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .promotions
            .update_promotion(&mut tx, uuid, update)
            .await?;

        self.events
            .create_event(
                &mut tx,
                NewPromotionEvent::for_promotion(
                    record.uuid,
                    PromotionEventKind::PromotionUpdated,
                    actor,
                ),
            )
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "updated promotion");

        Ok(record)
    }

    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.promotions.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_rules(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionRuleRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rules = self.rules.list_rules(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(rules)
    }

    async fn list_events(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionEventRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let events = self.events.list_events(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(events)
    }

    #[tracing::instrument(
        name = "promotions.service.create_rule",
        skip_all,
        fields(
            promotion_uuid = %rule.promotion_uuid,
            rule_uuid = %rule.uuid,
            actor = %actor
        ),
        err
    )]
    async fn create_rule(
        &self,
        actor: Actor,
        rule: NewPromotionRule,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.rules.create_rule(&mut tx, rule).await?;

        self.events
            .create_event(
                &mut tx,
                NewPromotionEvent::for_rule(
                    record.promotion_uuid,
                    PromotionEventKind::RuleCreated,
                    record.uuid,
                    actor,
                ),
            )
            .await?;

        tx.commit().await?;

        info!(rule_uuid = %record.uuid, "created promotion rule");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_rule",
        skip_all,
        fields(rule_uuid = %uuid, actor = %actor),
        err
    )]
    async fn update_rule(
        &self,
        actor: Actor,
        uuid: PromotionRuleUuid,
        update: PromotionRuleUpdate,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.rules.update_rule(&mut tx, uuid, update).await?;

        self.events
            .create_event(
                &mut tx,
                NewPromotionEvent::for_rule(
                    record.promotion_uuid,
                    PromotionEventKind::RuleUpdated,
                    record.uuid,
                    actor,
                ),
            )
            .await?;

        tx.commit().await?;

        info!(rule_uuid = %record.uuid, "updated promotion rule");

        Ok(record)
    }

    async fn get_rule(
        &self,
        uuid: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.rules.get_rule(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_rule",
        skip_all,
        fields(rule_uuid = %uuid, actor = %actor),
        err
    )]
    async fn delete_rule(
        &self,
        actor: Actor,
        uuid: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.rules.delete_rule(&mut tx, uuid).await?;

        self.events
            .create_event(
                &mut tx,
                NewPromotionEvent::for_rule(
                    record.promotion_uuid,
                    PromotionEventKind::RuleDeleted,
                    record.uuid,
                    actor,
                ),
            )
            .await?;

        tx.commit().await?;

        info!(
            rule_uuid = %record.uuid,
            promotion_uuid = %record.promotion_uuid,
            "deleted promotion rule"
        );

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Creates a promotion and records a `promotion_created` event.
    async fn create_promotion(
        &self,
        actor: Actor,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Applies a partial update and records a `promotion_updated` event.
    async fn update_promotion(
        &self,
        actor: Actor,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieve the rules of a promotion, oldest first.
    async fn list_rules(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionRuleRecord>, PromotionsServiceError>;

    /// Retrieve the event log of a promotion, oldest first.
    async fn list_events(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionEventRecord>, PromotionsServiceError>;

    /// Creates a rule and records a `rule_created` event.
    async fn create_rule(
        &self,
        actor: Actor,
        rule: NewPromotionRule,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError>;

    /// Applies a partial update and records a `rule_updated` event.
    async fn update_rule(
        &self,
        actor: Actor,
        uuid: PromotionRuleUuid,
        update: PromotionRuleUpdate,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError>;

    /// Retrieve a single rule.
    async fn get_rule(
        &self,
        uuid: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError>;

    /// Deletes a rule, returning its last stored state, and records exactly
    /// one `rule_deleted` event in the same transaction.
    async fn delete_rule(
        &self,
        actor: Actor,
        uuid: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::promotions::data::rewards::RuleReward,
        test::{TestContext, helpers},
    };

    use super::*;

    fn staff() -> Actor {
        Actor::User(Uuid::now_v7())
    }

    async fn count_events(ctx: &TestContext, kind: PromotionEventKind) -> TestResult<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM promotion_events WHERE type::text = $1",
        )
        .bind(kind.as_str())
        .fetch_one(ctx.db.pool())
        .await?;

        Ok(count)
    }

    #[tokio::test]
    async fn create_promotion_returns_record_and_logs_event() -> TestResult {
        let ctx = TestContext::new().await;
        let actor = staff();
        let uuid = PromotionUuid::new();

        let promotion = ctx
            .promotions
            .create_promotion(
                actor,
                NewPromotion {
                    uuid,
                    name: "Summer sale".to_string(),
                    description: Some("Everything must go".to_string()),
                    starts_at: None,
                    ends_at: None,
                },
            )
            .await?;

        assert_eq!(promotion.uuid, uuid);
        assert_eq!(promotion.name, "Summer sale");

        let events = ctx.promotions.list_events(uuid).await?;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PromotionEventKind::PromotionCreated);
        assert_eq!(events[0].actor, actor);
        assert_eq!(events[0].rule_uuid, None);

        Ok(())
    }

    #[tokio::test]
    async fn create_promotion_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "First").await?;

        let result = ctx
            .promotions
            .create_promotion(
                staff(),
                NewPromotion {
                    uuid: promotion.uuid,
                    name: "Second".to_string(),
                    description: None,
                    starts_at: None,
                    ends_at: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_promotion_with_inverted_period_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let starts_at = Timestamp::now();

        let result = ctx
            .promotions
            .create_promotion(
                staff(),
                NewPromotion {
                    uuid: PromotionUuid::new(),
                    name: "Backwards".to_string(),
                    description: None,
                    starts_at: Some(starts_at),
                    ends_at: Some(starts_at.checked_sub(1.hour())?),
                },
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_promotion_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Original").await?;

        let updated = ctx
            .promotions
            .update_promotion(
                staff(),
                promotion.uuid,
                PromotionUpdate {
                    description: Some("Now with a description".to_string()),
                    ..PromotionUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Original");
        assert_eq!(
            updated.description.as_deref(),
            Some("Now with a description")
        );
        assert!(updated.updated_at >= promotion.updated_at);

        let kinds: Vec<PromotionEventKind> = ctx
            .promotions
            .list_events(promotion.uuid)
            .await?
            .into_iter()
            .map(|event| event.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                PromotionEventKind::PromotionCreated,
                PromotionEventKind::PromotionUpdated
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_promotion_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .promotions
            .update_promotion(staff(), PromotionUuid::new(), PromotionUpdate::default())
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_promotion_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.promotions.get_promotion(PromotionUuid::new()).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_rule_stores_reward_and_logs_rule_created() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let actor = Actor::App(Uuid::now_v7());
        let uuid = PromotionRuleUuid::new();

        let rule = ctx
            .promotions
            .create_rule(
                actor,
                NewPromotionRule {
                    uuid,
                    promotion_uuid: promotion.uuid,
                    name: "Ten percent off shoes".to_string(),
                    description: None,
                    reward: Some(RuleReward::PercentageOff { percentage: 10 }),
                },
            )
            .await?;

        assert_eq!(rule.uuid, uuid);
        assert_eq!(rule.promotion_uuid, promotion.uuid);
        assert_eq!(
            rule.reward,
            Some(RuleReward::PercentageOff { percentage: 10 })
        );

        let events = ctx.promotions.list_events(promotion.uuid).await?;
        let last = events.last().ok_or("expected an event")?;

        assert_eq!(last.kind, PromotionEventKind::RuleCreated);
        assert_eq!(last.rule_uuid, Some(uuid));
        assert_eq!(last.actor, actor);

        Ok(())
    }

    #[tokio::test]
    async fn create_rule_for_unknown_promotion_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .promotions
            .create_rule(
                staff(),
                NewPromotionRule {
                    uuid: PromotionRuleUuid::new(),
                    promotion_uuid: PromotionUuid::new(),
                    name: "Orphan".to_string(),
                    description: None,
                    reward: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_rule_with_out_of_range_percentage_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;

        let result = ctx
            .promotions
            .create_rule(
                staff(),
                NewPromotionRule {
                    uuid: PromotionRuleUuid::new(),
                    promotion_uuid: promotion.uuid,
                    name: "Too generous".to_string(),
                    description: None,
                    reward: Some(RuleReward::PercentageOff { percentage: 150 }),
                },
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_rule_with_unstorable_amount_returns_invalid_reward() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;

        let result = ctx
            .promotions
            .create_rule(
                staff(),
                NewPromotionRule {
                    uuid: PromotionRuleUuid::new(),
                    promotion_uuid: promotion.uuid,
                    name: "Too generous".to_string(),
                    description: None,
                    reward: Some(RuleReward::FixedAmountOff { amount: u64::MAX }),
                },
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidReward(_))),
            "expected InvalidReward, got {result:?}"
        );
        assert_eq!(count_events(&ctx, PromotionEventKind::RuleCreated).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn update_rule_replaces_reward_and_logs_rule_updated() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let rule = helpers::create_rule(&ctx, promotion.uuid, "Rule").await?;

        let updated = ctx
            .promotions
            .update_rule(
                staff(),
                rule.uuid,
                PromotionRuleUpdate {
                    reward: Some(RuleReward::FixedAmountOff { amount: 500 }),
                    ..PromotionRuleUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Rule");
        assert_eq!(
            updated.reward,
            Some(RuleReward::FixedAmountOff { amount: 500 })
        );

        let events = ctx.promotions.list_events(promotion.uuid).await?;
        let last = events.last().ok_or("expected an event")?;

        assert_eq!(last.kind, PromotionEventKind::RuleUpdated);
        assert_eq!(last.rule_uuid, Some(rule.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn update_rule_without_reward_keeps_existing_reward() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let rule = helpers::create_rule(&ctx, promotion.uuid, "Rule").await?;

        let updated = ctx
            .promotions
            .update_rule(
                staff(),
                rule.uuid,
                PromotionRuleUpdate {
                    name: Some("Renamed".to_string()),
                    ..PromotionRuleUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.reward, rule.reward);

        Ok(())
    }

    #[tokio::test]
    async fn delete_rule_returns_last_state_and_removes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let rule = helpers::create_rule(&ctx, promotion.uuid, "Doomed rule").await?;

        let deleted = ctx.promotions.delete_rule(staff(), rule.uuid).await?;

        assert_eq!(deleted.uuid, rule.uuid);
        assert_eq!(deleted.name, "Doomed rule");

        let result = ctx.promotions.get_rule(rule.uuid).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let remaining = ctx.promotions.list_rules(promotion.uuid).await?;

        assert!(
            !remaining.iter().any(|r| r.uuid == rule.uuid),
            "deleted rule should not be listed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_rule_records_exactly_one_rule_deleted_event() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let rule = helpers::create_rule(&ctx, promotion.uuid, "Rule").await?;
        let actor = staff();

        let before = count_events(&ctx, PromotionEventKind::RuleDeleted).await?;

        ctx.promotions.delete_rule(actor, rule.uuid).await?;

        let after = count_events(&ctx, PromotionEventKind::RuleDeleted).await?;

        assert_eq!(after, before + 1);

        let deleted_events: Vec<PromotionEventRecord> = ctx
            .promotions
            .list_events(promotion.uuid)
            .await?
            .into_iter()
            .filter(|event| event.kind == PromotionEventKind::RuleDeleted)
            .collect();

        assert_eq!(deleted_events.len(), 1);
        assert_eq!(deleted_events[0].rule_uuid, Some(rule.uuid));
        assert_eq!(deleted_events[0].actor, actor);

        Ok(())
    }

    #[tokio::test]
    async fn delete_rule_unknown_uuid_returns_not_found_without_event() -> TestResult {
        let ctx = TestContext::new().await;

        let before = count_events(&ctx, PromotionEventKind::RuleDeleted).await?;

        let result = ctx
            .promotions
            .delete_rule(staff(), PromotionRuleUuid::new())
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let after = count_events(&ctx, PromotionEventKind::RuleDeleted).await?;

        assert_eq!(after, before);

        Ok(())
    }

    #[tokio::test]
    async fn delete_rule_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let rule = helpers::create_rule(&ctx, promotion.uuid, "Rule").await?;

        ctx.promotions.delete_rule(staff(), rule.uuid).await?;

        let result = ctx.promotions.delete_rule(staff(), rule.uuid).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_rules_returns_rules_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;
        let promotion = helpers::create_promotion(&ctx, "Promo").await?;
        let first = helpers::create_rule(&ctx, promotion.uuid, "First").await?;
        let second = helpers::create_rule(&ctx, promotion.uuid, "Second").await?;

        let uuids: Vec<PromotionRuleUuid> = ctx
            .promotions
            .list_rules(promotion.uuid)
            .await?
            .into_iter()
            .map(|rule| rule.uuid)
            .collect();

        assert_eq!(uuids, vec![first.uuid, second.uuid]);

        Ok(())
    }
}
