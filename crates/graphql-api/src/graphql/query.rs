//! Query root.

use async_graphql::{Context, Error, ID, Object, Result};
use discounts_app::{
    auth::Permission,
    domain::promotions::{PromotionsServiceError, records::PromotionUuid},
};
use tracing::error;

use crate::graphql::{
    context::ContextExt as _,
    errors::internal_error,
    ids::{PROMOTION, from_global_id},
    types::PromotionType,
};

#[derive(Default)]
pub(crate) struct Query;

#[Object]
impl Query {
    /// Look up a promotion by ID.
    ///
    /// Requires the MANAGE_DISCOUNTS permission.
    async fn promotion(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PromotionType>> {
        ctx.require_permission(Permission::ManageDiscounts)?;

        let uuid = from_global_id(PROMOTION, &id).map_err(|source| Error::new(source.to_string()))?;

        match ctx
            .promotions()?
            .get_promotion(PromotionUuid::from_uuid(uuid))
            .await
        {
            Ok(promotion) => Ok(Some(PromotionType(promotion))),
            Err(PromotionsServiceError::NotFound) => Ok(None),
            Err(source) => {
                error!("failed to load promotion: {source}");

                Err(internal_error())
            }
        }
    }
}
