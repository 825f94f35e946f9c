//! Mutation inputs and their validation into domain data.

use async_graphql::{ID, InputObject};
use discounts_app::domain::promotions::{
    data::{PromotionRuleUpdate, PromotionUpdate, rewards::RuleReward},
    records::PromotionUuid,
};
use jiff::Timestamp;

use crate::graphql::{
    errors::{DiscountError, DiscountErrorCode},
    ids::{PROMOTION, from_global_id},
    types::enums::RewardValueTypeEnum,
};

#[derive(InputObject, Debug, Clone)]
pub(crate) struct PromotionCreateInput {
    pub name: String,
    pub description: Option<String>,
    /// RFC 3339 timestamp.
    pub start_date: Option<String>,
    /// RFC 3339 timestamp; must be after `startDate`.
    pub end_date: Option<String>,
}

#[derive(InputObject, Debug, Clone)]
pub(crate) struct PromotionUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(InputObject, Debug, Clone)]
pub(crate) struct PromotionRuleCreateInput {
    /// The promotion the rule belongs to.
    pub promotion: ID,
    pub name: String,
    pub description: Option<String>,
    pub reward_value_type: Option<RewardValueTypeEnum>,
    /// Percentage (1-100) or amount in minor units (1 up to 2147483647).
    pub reward_value: Option<i64>,
}

#[derive(InputObject, Debug, Clone)]
pub(crate) struct PromotionRuleUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Must be given together with `rewardValue`.
    pub reward_value_type: Option<RewardValueTypeEnum>,
    pub reward_value: Option<i64>,
}

/// Validated fields shared by promotion creation.
#[derive(Debug)]
pub(crate) struct PromotionFields {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// Validated fields shared by rule creation.
#[derive(Debug)]
pub(crate) struct RuleFields {
    pub promotion: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub reward: Option<RuleReward>,
}

impl PromotionCreateInput {
    pub(crate) fn validate(self) -> Result<PromotionFields, Vec<DiscountError>> {
        let mut errors = Vec::new();

        check_name(&self.name, &mut errors);

        let starts_at = parse_date("startDate", self.start_date.as_deref(), &mut errors);
        let ends_at = parse_date("endDate", self.end_date.as_deref(), &mut errors);

        check_period(starts_at, ends_at, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PromotionFields {
            name: self.name,
            description: self.description,
            starts_at,
            ends_at,
        })
    }
}

impl PromotionUpdateInput {
    pub(crate) fn validate(self) -> Result<PromotionUpdate, Vec<DiscountError>> {
        let mut errors = Vec::new();

        if let Some(name) = self.name.as_deref() {
            check_name(name, &mut errors);
        }

        let starts_at = parse_date("startDate", self.start_date.as_deref(), &mut errors);
        let ends_at = parse_date("endDate", self.end_date.as_deref(), &mut errors);

        check_period(starts_at, ends_at, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PromotionUpdate {
            name: self.name,
            description: self.description,
            starts_at,
            ends_at,
        })
    }
}

impl PromotionRuleCreateInput {
    pub(crate) fn validate(self) -> Result<RuleFields, Vec<DiscountError>> {
        let mut errors = Vec::new();

        let promotion = match from_global_id(PROMOTION, &self.promotion) {
            Ok(uuid) => Some(PromotionUuid::from_uuid(uuid)),
            Err(source) => {
                errors.push(DiscountError::invalid_id("promotion", &source));
                None
            }
        };

        check_name(&self.name, &mut errors);

        let reward = parse_reward(self.reward_value_type, self.reward_value, &mut errors);

        match promotion {
            Some(promotion) if errors.is_empty() => Ok(RuleFields {
                promotion,
                name: self.name,
                description: self.description,
                reward,
            }),
            _ => Err(errors),
        }
    }
}

impl PromotionRuleUpdateInput {
    pub(crate) fn validate(self) -> Result<PromotionRuleUpdate, Vec<DiscountError>> {
        let mut errors = Vec::new();

        if let Some(name) = self.name.as_deref() {
            check_name(name, &mut errors);
        }

        let reward = parse_reward(self.reward_value_type, self.reward_value, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PromotionRuleUpdate {
            name: self.name,
            description: self.description,
            reward,
        })
    }
}

fn check_name(name: &str, errors: &mut Vec<DiscountError>) {
    if name.trim().is_empty() {
        errors.push(DiscountError::new(
            "name",
            DiscountErrorCode::Required,
            "This field cannot be blank.",
        ));
    }
}

fn parse_date(
    field: &str,
    raw: Option<&str>,
    errors: &mut Vec<DiscountError>,
) -> Option<Timestamp> {
    let raw = raw?;

    match raw.parse::<Timestamp>() {
        Ok(at) => Some(at),
        Err(source) => {
            errors.push(DiscountError::new(
                field,
                DiscountErrorCode::Invalid,
                format!("Invalid RFC 3339 timestamp: {source}"),
            ));
            None
        }
    }
}

fn check_period(
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
    errors: &mut Vec<DiscountError>,
) {
    if let (Some(starts_at), Some(ends_at)) = (starts_at, ends_at)
        && starts_at >= ends_at
    {
        errors.push(DiscountError::new(
            "endDate",
            DiscountErrorCode::Invalid,
            "End date must be after the start date.",
        ));
    }
}

/// Rewards are read back as GraphQL `Int`, so amounts stop at `i32::MAX`.
const MAX_FIXED_AMOUNT: u64 = 2_147_483_647;

fn parse_reward(
    kind: Option<RewardValueTypeEnum>,
    value: Option<i64>,
    errors: &mut Vec<DiscountError>,
) -> Option<RuleReward> {
    let (kind, value) = match (kind, value) {
        (None, None) => return None,
        (Some(_), None) => {
            errors.push(DiscountError::new(
                "rewardValue",
                DiscountErrorCode::Required,
                "Reward value is required when a reward value type is given.",
            ));
            return None;
        }
        (None, Some(_)) => {
            errors.push(DiscountError::new(
                "rewardValueType",
                DiscountErrorCode::Required,
                "Reward value type is required when a reward value is given.",
            ));
            return None;
        }
        (Some(kind), Some(value)) => (kind, value),
    };

    let reward = match kind {
        RewardValueTypeEnum::Percentage => u16::try_from(value)
            .ok()
            .filter(|percentage| (1..=100).contains(percentage))
            .map(|percentage| RuleReward::PercentageOff { percentage }),
        RewardValueTypeEnum::Fixed => u64::try_from(value)
            .ok()
            .filter(|amount| (1..=MAX_FIXED_AMOUNT).contains(amount))
            .map(|amount| RuleReward::FixedAmountOff { amount }),
    };

    if reward.is_none() {
        errors.push(DiscountError::new(
            "rewardValue",
            DiscountErrorCode::Invalid,
            match kind {
                RewardValueTypeEnum::Percentage => "Percentage must be between 1 and 100.",
                RewardValueTypeEnum::Fixed => "Amount must be between 1 and 2147483647.",
            },
        ));
    }

    reward
}
