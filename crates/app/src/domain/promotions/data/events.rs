//! Promotion Events Data

use std::str::FromStr;

use thiserror::Error;

use crate::domain::promotions::{
    data::Actor,
    records::{PromotionRuleUuid, PromotionUuid},
};

/// Kinds of lifecycle events recorded against a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionEventKind {
    PromotionCreated,
    PromotionUpdated,
    RuleCreated,
    RuleUpdated,
    RuleDeleted,
    PromotionStarted,
    PromotionEnded,
}

impl PromotionEventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PromotionCreated => "promotion_created",
            Self::PromotionUpdated => "promotion_updated",
            Self::RuleCreated => "rule_created",
            Self::RuleUpdated => "rule_updated",
            Self::RuleDeleted => "rule_deleted",
            Self::PromotionStarted => "promotion_started",
            Self::PromotionEnded => "promotion_ended",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown promotion event kind: {0}")]
pub struct UnknownPromotionEventKind(String);

impl FromStr for PromotionEventKind {
    type Err = UnknownPromotionEventKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "promotion_created" => Ok(Self::PromotionCreated),
            "promotion_updated" => Ok(Self::PromotionUpdated),
            "rule_created" => Ok(Self::RuleCreated),
            "rule_updated" => Ok(Self::RuleUpdated),
            "rule_deleted" => Ok(Self::RuleDeleted),
            "promotion_started" => Ok(Self::PromotionStarted),
            "promotion_ended" => Ok(Self::PromotionEnded),
            other => Err(UnknownPromotionEventKind(other.to_string())),
        }
    }
}

/// New Promotion Event Data
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewPromotionEvent {
    pub promotion_uuid: PromotionUuid,
    pub kind: PromotionEventKind,
    pub rule_uuid: Option<PromotionRuleUuid>,
    pub actor: Actor,
}

impl NewPromotionEvent {
    pub(crate) const fn for_promotion(
        promotion_uuid: PromotionUuid,
        kind: PromotionEventKind,
        actor: Actor,
    ) -> Self {
        Self {
            promotion_uuid,
            kind,
            rule_uuid: None,
            actor,
        }
    }

    pub(crate) const fn for_rule(
        promotion_uuid: PromotionUuid,
        kind: PromotionEventKind,
        rule_uuid: PromotionRuleUuid,
        actor: Actor,
    ) -> Self {
        Self {
            promotion_uuid,
            kind,
            rule_uuid: Some(rule_uuid),
            actor,
        }
    }
}
