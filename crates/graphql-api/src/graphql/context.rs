//! Resolver context helpers.

use std::sync::Arc;

use async_graphql::{Context, Result};
use discounts_app::{
    auth::{Permission, Principal},
    domain::promotions::{PromotionsService, data::Actor},
};

use crate::graphql::errors::permission_denied;

pub(crate) type SharedPromotionsService = Arc<dyn PromotionsService>;

pub(crate) trait ContextExt {
    fn promotions(&self) -> Result<&SharedPromotionsService>;

    /// The caller of the current request; anonymous when none was attached.
    fn principal(&self) -> &Principal;

    /// Resolve the actor to attribute changes to, failing unless the caller holds `permission`.
    fn require_permission(&self, permission: Permission) -> Result<Actor>;
}

static ANONYMOUS: Principal = Principal::Anonymous;

impl ContextExt for Context<'_> {
    fn promotions(&self) -> Result<&SharedPromotionsService> {
        self.data::<SharedPromotionsService>()
    }

    fn principal(&self) -> &Principal {
        self.data_opt::<Principal>().unwrap_or(&ANONYMOUS)
    }

    fn require_permission(&self, permission: Permission) -> Result<Actor> {
        let principal = self.principal();

        if !principal.has_permission(permission) {
            return Err(permission_denied());
        }

        principal.actor().ok_or_else(permission_denied)
    }
}
