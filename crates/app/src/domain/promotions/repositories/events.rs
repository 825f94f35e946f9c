//! Promotion Events Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::promotions::{
    data::{
        Actor,
        events::{NewPromotionEvent, PromotionEventKind},
    },
    records::{PromotionEventRecord, PromotionEventUuid, PromotionRuleUuid, PromotionUuid},
};

const CREATE_EVENT_SQL: &str = include_str!("../sql/create_event.sql");
const LIST_EVENTS_SQL: &str = include_str!("../sql/list_events.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEventsRepository;

impl PgEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: NewPromotionEvent,
    ) -> Result<PromotionEventRecord, sqlx::Error> {
        query_as::<Postgres, PromotionEventRecord>(CREATE_EVENT_SQL)
            .bind(PromotionEventUuid::new().into_uuid())
            .bind(event.promotion_uuid.into_uuid())
            .bind(event.kind.as_str())
            .bind(event.rule_uuid.map(PromotionRuleUuid::into_uuid))
            .bind(event.actor.user_uuid())
            .bind(event.actor.app_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Vec<PromotionEventRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionEventRecord>(LIST_EVENTS_SQL)
            .bind(promotion.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn actor_from_columns(user: Option<Uuid>, app: Option<Uuid>) -> Result<Actor, sqlx::Error> {
    match (user, app) {
        (Some(user), None) => Ok(Actor::User(user)),
        (None, Some(app)) => Ok(Actor::App(app)),
        _ => Err(sqlx::Error::ColumnDecode {
            index: "user_uuid".to_string(),
            source: "event must reference exactly one of user_uuid, app_uuid".into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind = row
            .try_get::<String, _>("type")?
            .parse::<PromotionEventKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: PromotionEventUuid::from_uuid(row.try_get("uuid")?),
            promotion_uuid: PromotionUuid::from_uuid(row.try_get("promotion_uuid")?),
            kind,
            rule_uuid: row
                .try_get::<Option<Uuid>, _>("rule_uuid")?
                .map(PromotionRuleUuid::from_uuid),
            actor: actor_from_columns(row.try_get("user_uuid")?, row.try_get("app_uuid")?)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
