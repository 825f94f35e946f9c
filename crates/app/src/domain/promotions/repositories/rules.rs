//! Promotion Rules Repository

use std::num::TryFromIntError;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::promotions::{
    PromotionsServiceError,
    data::{NewPromotionRule, PromotionRuleUpdate, rewards::RuleReward},
    records::{PromotionRuleRecord, PromotionRuleUuid, PromotionUuid},
};

const COLUMN_REWARD_KIND: &str = "reward_kind";
const COLUMN_REWARD_PERCENTAGE: &str = "reward_percentage";
const COLUMN_REWARD_AMOUNT: &str = "reward_amount";

const CREATE_RULE_SQL: &str = include_str!("../sql/create_rule.sql");
const UPDATE_RULE_SQL: &str = include_str!("../sql/update_rule.sql");
const GET_RULE_SQL: &str = include_str!("../sql/get_rule.sql");
const LIST_RULES_SQL: &str = include_str!("../sql/list_rules.sql");
const DELETE_RULE_SQL: &str = include_str!("../sql/delete_rule.sql");

/// Column values for a reward: `(kind, percentage, amount)`.
type RewardSqlValues = (Option<&'static str>, Option<i64>, Option<i64>);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRulesRepository;

impl PgRulesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rule: NewPromotionRule,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let (reward_kind, reward_percentage, reward_amount) = to_reward_sql_values(rule.reward)?;

        query_as::<Postgres, PromotionRuleRecord>(CREATE_RULE_SQL)
            .bind(rule.uuid.into_uuid())
            .bind(rule.promotion_uuid.into_uuid())
            .bind(rule.name)
            .bind(rule.description)
            .bind(reward_kind)
            .bind(reward_percentage)
            .bind(reward_amount)
            .fetch_one(&mut **tx)
            .await
            .map_err(PromotionsServiceError::from)
    }

    pub(crate) async fn update_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rule: PromotionRuleUuid,
        update: PromotionRuleUpdate,
    ) -> Result<PromotionRuleRecord, PromotionsServiceError> {
        let replace_reward = update.reward.is_some();
        let (reward_kind, reward_percentage, reward_amount) = to_reward_sql_values(update.reward)?;

        query_as::<Postgres, PromotionRuleRecord>(UPDATE_RULE_SQL)
            .bind(rule.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(replace_reward)
            .bind(reward_kind)
            .bind(reward_percentage)
            .bind(reward_amount)
            .fetch_one(&mut **tx)
            .await
            .map_err(PromotionsServiceError::from)
    }

    pub(crate) async fn get_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rule: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRuleRecord>(GET_RULE_SQL)
            .bind(rule.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_rules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionRuleRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRuleRecord>(LIST_RULES_SQL)
            .bind(promotion.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Hard-delete a rule, returning its last stored state.
    pub(crate) async fn delete_rule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rule: PromotionRuleUuid,
    ) -> Result<PromotionRuleRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRuleRecord>(DELETE_RULE_SQL)
            .bind(rule.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

/// Amounts beyond `BIGINT` cannot be stored.
fn to_reward_sql_values(reward: Option<RuleReward>) -> Result<RewardSqlValues, TryFromIntError> {
    let Some(reward) = reward else {
        return Ok((None, None, None));
    };

    let reward_kind = reward.to_str();

    match reward {
        RuleReward::PercentageOff { percentage } => {
            Ok((Some(reward_kind), Some(i64::from(percentage)), None))
        }
        RuleReward::FixedAmountOff { amount } => Ok((
            Some(reward_kind),
            None,
            Some(i64::try_from(amount)?),
        )),
    }
}

fn from_reward_columns(
    kind: Option<&str>,
    percentage: Option<i64>,
    amount: Option<i64>,
) -> Result<Option<RuleReward>, sqlx::Error> {
    match (kind, percentage, amount) {
        (None, None, None) => Ok(None),
        (Some("percentage_off"), Some(percentage), None) => {
            let percentage =
                u16::try_from(percentage).map_err(|e| sqlx::Error::ColumnDecode {
                    index: COLUMN_REWARD_PERCENTAGE.to_string(),
                    source: Box::new(e),
                })?;

            Ok(Some(RuleReward::PercentageOff { percentage }))
        }
        (Some("amount_off"), None, Some(amount)) => {
            let amount = u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                index: COLUMN_REWARD_AMOUNT.to_string(),
                source: Box::new(e),
            })?;

            Ok(Some(RuleReward::FixedAmountOff { amount }))
        }
        _ => Err(sqlx::Error::ColumnDecode {
            index: COLUMN_REWARD_KIND.to_string(),
            source: "inconsistent reward columns".into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRuleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let reward_kind: Option<String> = row.try_get(COLUMN_REWARD_KIND)?;

        let reward = from_reward_columns(
            reward_kind.as_deref(),
            row.try_get(COLUMN_REWARD_PERCENTAGE)?,
            row.try_get(COLUMN_REWARD_AMOUNT)?,
        )?;

        Ok(Self {
            uuid: PromotionRuleUuid::from_uuid(row.try_get("uuid")?),
            promotion_uuid: PromotionUuid::from_uuid(row.try_get("promotion_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            reward,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
