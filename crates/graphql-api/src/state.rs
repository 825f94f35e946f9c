//! State

use std::sync::Arc;

use discounts_app::context::AppContext;

use crate::graphql::{DiscountsSchema, build_schema};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) schema: DiscountsSchema,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        let schema = build_schema(app.promotions.clone());

        Self { app, schema }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }
}
