//! Promotions Data

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::promotions::{
    data::rewards::RuleReward,
    records::{PromotionRuleUuid, PromotionUuid},
};

pub mod events;
pub mod rewards;

/// Who performed a change; recorded on every promotion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A staff user.
    User(Uuid),

    /// An installed app.
    App(Uuid),
}

impl Actor {
    #[must_use]
    pub const fn user_uuid(self) -> Option<Uuid> {
        match self {
            Self::User(uuid) => Some(uuid),
            Self::App(_) => None,
        }
    }

    #[must_use]
    pub const fn app_uuid(self) -> Option<Uuid> {
        match self {
            Self::App(uuid) => Some(uuid),
            Self::User(_) => None,
        }
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::User(uuid) => write!(f, "user:{uuid}"),
            Self::App(uuid) => write!(f, "app:{uuid}"),
        }
    }
}

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// Promotion Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// New Promotion Rule Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotionRule {
    pub uuid: PromotionRuleUuid,
    pub promotion_uuid: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub reward: Option<RuleReward>,
}

/// Promotion Rule Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionRuleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub reward: Option<RuleReward>,
}
