//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{
    ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
    Permissions, Principal, PrincipalKind, compute_token_verifier, format_api_token,
    generate_api_token_secret, parse_api_token, repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given principal.
    ///
    /// The raw token is only ever returned here; storage keeps the verifier.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails.
    #[tracing::instrument(
        name = "auth.issue_api_token",
        skip_all,
        fields(principal_kind = %principal_kind, principal_uuid = %principal_uuid),
        err
    )]
    pub async fn issue_api_token(
        &self,
        principal_kind: PrincipalKind,
        principal_uuid: Uuid,
        permissions: Permissions,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = compute_token_verifier(&token_uuid, version, &principal_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                principal_kind,
                principal_uuid,
                version,
                token_hash,
                permissions,
                expires_at,
            })
            .await?;

        info!(token_uuid = %metadata.uuid, "issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens issued to the given principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        principal_uuid: Uuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_principal(principal_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[tracing::instrument(name = "auth.revoke_api_token", skip(self), err)]
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|e| {
            debug!(error = %e, "rejected malformed api token");
            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected = compute_token_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.principal_uuid,
            &parsed_token.secret,
        );

        if expected != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; authentication does not depend on it.
        if let Err(e) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(error = %e, token_uuid = %parsed_token.token_uuid, "failed to touch api token");
        }

        Ok(Principal::Authenticated {
            kind: token.principal_kind,
            uuid: token.principal_uuid,
            permissions: token.permissions,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the principal it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;
}
