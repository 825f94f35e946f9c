//! GraphQL HTTP endpoint.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use salvo::prelude::*;
use tracing::{debug, info};

use crate::{extensions::*, state::State};

/// Execute a GraphQL request on behalf of the authenticated principal.
#[handler]
pub(crate) async fn execute(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_500()?.clone();

    let request = req
        .parse_json::<async_graphql::Request>()
        .await
        .map_err(|source| {
            debug!("rejected graphql request body: {source}");

            StatusError::bad_request().brief("Body must be a GraphQL request document")
        })?;

    if let Some(operation) = request.operation_name.as_deref() {
        info!(operation, "executing graphql operation");
    }

    let response = state.schema.execute(request.data(principal)).await;

    res.render(Json(response));

    Ok(())
}

/// Serve the GraphiQL explorer.
#[handler]
pub(crate) async fn graphiql(res: &mut Response) {
    res.render(Text::Html(GraphiQLSource::build().endpoint("/graphql").finish()));
}
