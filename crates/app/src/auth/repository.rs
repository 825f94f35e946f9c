//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    ActiveApiToken, ApiTokenMetadata, ApiTokenVersion, NewApiToken, Permission, Permissions,
    PrincipalKind,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const TOUCH_API_TOKEN_LAST_USED_SQL: &str = include_str!("sql/touch_api_token_last_used.sql");
const LIST_API_TOKENS_BY_PRINCIPAL_SQL: &str = include_str!("sql/list_api_tokens_by_principal.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.principal_kind.as_str())
            .bind(token.principal_uuid)
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(permission_names(&token.permissions))
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_api_token_by_uuid(
        &self,
        token_uuid: Uuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token_last_used(
        &self,
        token_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_LAST_USED_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await
            .map(|_result| ())
    }

    pub(crate) async fn list_api_tokens_by_principal(
        &self,
        principal_uuid: Uuid,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_BY_PRINCIPAL_SQL)
            .bind(principal_uuid)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn revoke_api_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }
}

fn permission_names(permissions: &Permissions) -> Vec<String> {
    permissions
        .iter()
        .map(|permission| permission.as_str().to_string())
        .collect()
}

fn decode_permissions(row: &PgRow) -> sqlx::Result<Permissions> {
    row.try_get::<Vec<String>, _>("permissions")?
        .iter()
        .map(|name| {
            name.parse::<Permission>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "permissions".to_string(),
                    source: Box::new(e),
                })
        })
        .collect()
}

fn decode_principal_kind(row: &PgRow) -> sqlx::Result<PrincipalKind> {
    row.try_get::<String, _>("principal_kind")?
        .parse::<PrincipalKind>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "principal_kind".to_string(),
            source: Box::new(e),
        })
}

fn decode_version(row: &PgRow) -> sqlx::Result<ApiTokenVersion> {
    ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            principal_kind: decode_principal_kind(row)?,
            principal_uuid: row.try_get("principal_uuid")?,
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
            permissions: decode_permissions(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            principal_kind: decode_principal_kind(row)?,
            principal_uuid: row.try_get("principal_uuid")?,
            version: decode_version(row)?,
            permissions: decode_permissions(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
