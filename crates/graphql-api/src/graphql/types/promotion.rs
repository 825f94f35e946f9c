//! `Promotion` object.

use async_graphql::{Context, ID, Object, Result};
use discounts_app::domain::promotions::records::PromotionRecord;

use crate::graphql::{
    context::ContextExt as _,
    errors::internal_error,
    ids::{PROMOTION, to_global_id},
    types::{PromotionEventType, PromotionRuleType},
};

#[derive(Debug, Clone)]
pub(crate) struct PromotionType(pub PromotionRecord);

#[Object(name = "Promotion")]
impl PromotionType {
    async fn id(&self) -> ID {
        to_global_id(PROMOTION, self.0.uuid.into_uuid())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Start of the promotion period (RFC 3339).
    async fn start_date(&self) -> Option<String> {
        self.0.starts_at.map(|at| at.to_string())
    }

    /// End of the promotion period (RFC 3339).
    async fn end_date(&self) -> Option<String> {
        self.0.ends_at.map(|at| at.to_string())
    }

    async fn created_at(&self) -> String {
        self.0.created_at.to_string()
    }

    async fn updated_at(&self) -> String {
        self.0.updated_at.to_string()
    }

    async fn rules(&self, ctx: &Context<'_>) -> Result<Vec<PromotionRuleType>> {
        let rules = ctx
            .promotions()?
            .list_rules(self.0.uuid)
            .await
            .map_err(|source| {
                tracing::error!("failed to list promotion rules: {source}");
                internal_error()
            })?;

        Ok(rules.into_iter().map(PromotionRuleType).collect())
    }

    /// Lifecycle events, oldest first.
    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<PromotionEventType>> {
        let events = ctx
            .promotions()?
            .list_events(self.0.uuid)
            .await
            .map_err(|source| {
                tracing::error!("failed to list promotion events: {source}");
                internal_error()
            })?;

        Ok(events.into_iter().map(PromotionEventType).collect())
    }
}
