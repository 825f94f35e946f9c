//! `PromotionEvent` object.

use async_graphql::{ID, Object};
use discounts_app::domain::promotions::{data::Actor, records::PromotionEventRecord};

use crate::graphql::{
    ids::{APP, PROMOTION_EVENT, PROMOTION_RULE, USER, to_global_id},
    types::enums::PromotionEventsEnum,
};

#[derive(Debug, Clone)]
pub(crate) struct PromotionEventType(pub PromotionEventRecord);

#[Object(name = "PromotionEvent")]
impl PromotionEventType {
    async fn id(&self) -> ID {
        to_global_id(PROMOTION_EVENT, self.0.uuid.into_uuid())
    }

    #[graphql(name = "type")]
    async fn kind(&self) -> PromotionEventsEnum {
        self.0.kind.into()
    }

    /// The rule the event concerns; kept after the rule itself is deleted.
    async fn rule_id(&self) -> Option<ID> {
        self.0
            .rule_uuid
            .map(|uuid| to_global_id(PROMOTION_RULE, uuid.into_uuid()))
    }

    async fn date(&self) -> String {
        self.0.created_at.to_string()
    }

    /// Global ID of the staff user (`User`) or app (`App`) that made the change.
    async fn created_by(&self) -> ID {
        match self.0.actor {
            Actor::User(uuid) => to_global_id(USER, uuid),
            Actor::App(uuid) => to_global_id(APP, uuid),
        }
    }
}
