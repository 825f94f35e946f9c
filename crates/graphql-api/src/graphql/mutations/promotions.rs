//! Promotion mutations.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use discounts_app::{
    auth::Permission,
    domain::promotions::{data::NewPromotion, records::PromotionUuid},
};
use tracing::info;

use crate::graphql::{
    context::ContextExt as _,
    errors::{DiscountError, service_error},
    ids::{PROMOTION, from_global_id},
    inputs::{PromotionCreateInput, PromotionUpdateInput},
    types::PromotionType,
};

#[derive(SimpleObject, Debug, Default)]
pub(crate) struct PromotionCreatePayload {
    pub promotion: Option<PromotionType>,
    pub errors: Vec<DiscountError>,
}

#[derive(SimpleObject, Debug, Default)]
pub(crate) struct PromotionUpdatePayload {
    pub promotion: Option<PromotionType>,
    pub errors: Vec<DiscountError>,
}

#[derive(Default)]
pub(crate) struct PromotionMutations;

#[Object]
impl PromotionMutations {
    /// Creates a new promotion.
    ///
    /// Requires the MANAGE_DISCOUNTS permission.
    async fn promotion_create(
        &self,
        ctx: &Context<'_>,
        input: PromotionCreateInput,
    ) -> Result<Option<PromotionCreatePayload>> {
        let actor = ctx.require_permission(Permission::ManageDiscounts)?;

        let fields = match input.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                return Ok(Some(PromotionCreatePayload {
                    errors,
                    ..Default::default()
                }));
            }
        };

        let created = ctx
            .promotions()?
            .create_promotion(
                actor,
                NewPromotion {
                    uuid: PromotionUuid::new(),
                    name: fields.name,
                    description: fields.description,
                    starts_at: fields.starts_at,
                    ends_at: fields.ends_at,
                },
            )
            .await;

        let payload = match created {
            Ok(promotion) => {
                info!(promotion_uuid = %promotion.uuid, %actor, "promotion created via graphql");

                PromotionCreatePayload {
                    promotion: Some(PromotionType(promotion)),
                    errors: Vec::new(),
                }
            }
            Err(source) => PromotionCreatePayload {
                errors: vec![service_error("name", source)?],
                ..Default::default()
            },
        };

        Ok(Some(payload))
    }

    /// Updates an existing promotion.
    ///
    /// Requires the MANAGE_DISCOUNTS permission.
    async fn promotion_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: PromotionUpdateInput,
    ) -> Result<Option<PromotionUpdatePayload>> {
        let actor = ctx.require_permission(Permission::ManageDiscounts)?;

        let uuid = match from_global_id(PROMOTION, &id) {
            Ok(uuid) => PromotionUuid::from_uuid(uuid),
            Err(source) => {
                return Ok(Some(PromotionUpdatePayload {
                    errors: vec![DiscountError::invalid_id("id", &source)],
                    ..Default::default()
                }));
            }
        };

        let update = match input.validate() {
            Ok(update) => update,
            Err(errors) => {
                return Ok(Some(PromotionUpdatePayload {
                    errors,
                    ..Default::default()
                }));
            }
        };

        let payload = match ctx.promotions()?.update_promotion(actor, uuid, update).await {
            Ok(promotion) => PromotionUpdatePayload {
                promotion: Some(PromotionType(promotion)),
                errors: Vec::new(),
            },
            Err(source) => PromotionUpdatePayload {
                errors: vec![service_error("id", source)?],
                ..Default::default()
            },
        };

        Ok(Some(payload))
    }
}
