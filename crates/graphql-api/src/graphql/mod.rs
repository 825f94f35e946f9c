//! GraphQL schema, resolvers and HTTP endpoint.

use async_graphql::{EmptySubscription, Schema};

use crate::graphql::{context::SharedPromotionsService, mutations::Mutation, query::Query};

mod context;
mod errors;
pub(crate) mod handler;
mod ids;
mod inputs;
mod mutations;
mod query;
mod types;


pub(crate) type DiscountsSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema; per-request callers are attached as [`discounts_app::auth::Principal`] data.
pub(crate) fn build_schema(promotions: SharedPromotionsService) -> DiscountsSchema {
    Schema::build(Query, Mutation::default(), EmptySubscription)
        .data(promotions)
        .finish()
}
