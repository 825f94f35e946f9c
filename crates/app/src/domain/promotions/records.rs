//! Promotions Records

use jiff::Timestamp;

use crate::{
    domain::promotions::data::{Actor, events::PromotionEventKind, rewards::RuleReward},
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Promotion Rule UUID
pub type PromotionRuleUuid = TypedUuid<PromotionRuleRecord>;

/// Promotion Rule Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRuleRecord {
    pub uuid: PromotionRuleUuid,
    pub promotion_uuid: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub reward: Option<RuleReward>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Promotion Event UUID
pub type PromotionEventUuid = TypedUuid<PromotionEventRecord>;

/// Promotion Event Record
///
/// Events are append-only. `rule_uuid` may point at a rule that has since
/// been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionEventRecord {
    pub uuid: PromotionEventUuid,
    pub promotion_uuid: PromotionUuid,
    pub kind: PromotionEventKind,
    pub rule_uuid: Option<PromotionRuleUuid>,
    pub actor: Actor,
    pub created_at: Timestamp,
}
