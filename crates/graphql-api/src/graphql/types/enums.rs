//! GraphQL enums mirroring domain values.

use async_graphql::Enum;
use discounts_app::domain::promotions::data::{events::PromotionEventKind, rewards::RuleReward};

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "PromotionEventsEnum")]
pub(crate) enum PromotionEventsEnum {
    PromotionCreated,
    PromotionUpdated,
    RuleCreated,
    RuleUpdated,
    RuleDeleted,
    PromotionStarted,
    PromotionEnded,
}

impl From<PromotionEventKind> for PromotionEventsEnum {
    fn from(kind: PromotionEventKind) -> Self {
        match kind {
            PromotionEventKind::PromotionCreated => Self::PromotionCreated,
            PromotionEventKind::PromotionUpdated => Self::PromotionUpdated,
            PromotionEventKind::RuleCreated => Self::RuleCreated,
            PromotionEventKind::RuleUpdated => Self::RuleUpdated,
            PromotionEventKind::RuleDeleted => Self::RuleDeleted,
            PromotionEventKind::PromotionStarted => Self::PromotionStarted,
            PromotionEventKind::PromotionEnded => Self::PromotionEnded,
        }
    }
}

/// How a rule's `rewardValue` is applied.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "RewardValueTypeEnum")]
pub(crate) enum RewardValueTypeEnum {
    /// A fixed amount in minor currency units.
    Fixed,

    /// A percentage of the price.
    Percentage,
}

impl RewardValueTypeEnum {
    pub(crate) fn of(reward: RuleReward) -> (Self, u64) {
        match reward {
            RuleReward::PercentageOff { percentage } => (Self::Percentage, u64::from(percentage)),
            RuleReward::FixedAmountOff { amount } => (Self::Fixed, amount),
        }
    }
}
