//! GraphQL object types.

pub(crate) mod enums;
pub(crate) mod event;
pub(crate) mod promotion;
pub(crate) mod rule;

pub(crate) use event::PromotionEventType;
pub(crate) use promotion::PromotionType;
pub(crate) use rule::PromotionRuleType;
