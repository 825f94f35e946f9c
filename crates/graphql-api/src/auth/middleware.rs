//! Auth middleware.
//!
//! Requests without an `Authorization` header continue as [`Principal::Anonymous`];
//! resolvers decide whether that is enough.

use std::sync::Arc;

use discounts_app::auth::{AuthServiceError, Principal};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, info};

use crate::{extensions::*, state::State};

#[derive(Debug, PartialEq, Eq)]
enum Credentials<'a> {
    Missing,
    Bearer(&'a str),
    Malformed,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let principal = match extract_credentials(req) {
        Credentials::Missing => Principal::Anonymous,
        Credentials::Malformed => {
            res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

            return;
        }
        Credentials::Bearer(token) => {
            let state = match depot.obtain_or_500::<Arc<State>>() {
                Ok(state) => state,
                Err(status) => {
                    res.render(status);

                    return;
                }
            };

            match state.app.auth.authenticate_bearer(token).await {
                Ok(principal) => principal,
                Err(AuthServiceError::NotFound) => {
                    info!("rejected invalid api token");

                    res.render(StatusError::unauthorized().brief("Invalid API token"));

                    return;
                }
                Err(AuthServiceError::Sql(source)) => {
                    error!("failed to validate api token: {source}");

                    res.render(StatusError::internal_server_error());

                    return;
                }
                Err(AuthServiceError::Token(source)) => {
                    error!("failed to process api token: {source}");

                    res.render(StatusError::internal_server_error());

                    return;
                }
            }
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_credentials(req: &Request) -> Credentials<'_> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Credentials::Missing;
    };

    let Ok(value) = value.to_str() else {
        return Credentials::Malformed;
    };

    let mut parts = value.splitn(2, ' ');

    let (Some(scheme), Some(token)) = (parts.next(), parts.next().map(str::trim)) else {
        return Credentials::Malformed;
    };

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Credentials::Malformed;
    }

    Credentials::Bearer(token)
}
