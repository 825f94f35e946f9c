//! Auth data models.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::promotions::data::Actor};

/// Granted permission set; callers rarely hold more than a couple.
pub type Permissions = SmallVec<[Permission; 2]>;

/// Permissions that can be granted to staff users and apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Create, update and delete promotions and their rules.
    ManageDiscounts,
}

impl Permission {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageDiscounts => "manage_discounts",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownAuthValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manage_discounts" => Ok(Self::ManageDiscounts),
            other => Err(UnknownAuthValue::Permission(other.to_string())),
        }
    }
}

/// The type of caller an API token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Staff,
    App,
    Customer,
}

impl PrincipalKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::App => "app",
            Self::Customer => "customer",
        }
    }
}

impl Display for PrincipalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalKind {
    type Err = UnknownAuthValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "staff" => Ok(Self::Staff),
            "app" => Ok(Self::App),
            "customer" => Ok(Self::Customer),
            other => Err(UnknownAuthValue::PrincipalKind(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum UnknownAuthValue {
    #[error("unknown permission: {0}")]
    Permission(String),

    #[error("unknown principal kind: {0}")]
    PrincipalKind(String),
}

/// The caller a request is executed on behalf of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Principal {
    /// No credentials were presented.
    #[default]
    Anonymous,

    /// A caller identified by a valid API token.
    Authenticated {
        kind: PrincipalKind,
        uuid: Uuid,
        permissions: Permissions,
    },
}

impl Principal {
    /// Whether the caller holds `permission`.
    ///
    /// Customers never hold permissions, whatever their token says.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Self::Authenticated {
                kind: PrincipalKind::Staff | PrincipalKind::App,
                permissions,
                ..
            } => permissions.contains(&permission),
            Self::Authenticated {
                kind: PrincipalKind::Customer,
                ..
            }
            | Self::Anonymous => false,
        }
    }

    /// The actor recorded on audit events for changes made by this caller.
    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        match self {
            Self::Authenticated {
                kind: PrincipalKind::Staff,
                uuid,
                ..
            } => Some(Actor::User(*uuid)),
            Self::Authenticated {
                kind: PrincipalKind::App,
                uuid,
                ..
            } => Some(Actor::App(*uuid)),
            Self::Authenticated {
                kind: PrincipalKind::Customer,
                ..
            }
            | Self::Anonymous => None,
        }
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub principal_kind: PrincipalKind,
    pub principal_uuid: Uuid,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,

    pub permissions: Permissions,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub principal_kind: PrincipalKind,
    pub principal_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub permissions: Permissions,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub principal_kind: PrincipalKind,
    pub principal_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub permissions: Permissions,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
