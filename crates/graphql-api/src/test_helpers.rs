//! Test helpers.

use std::sync::Arc;

use async_graphql::{Request as GraphQLRequest, Response as GraphQLResponse, Variables};
use discounts_app::{
    auth::{MockAuthService, Permission, Principal, PrincipalKind},
    context::AppContext,
    domain::promotions::MockPromotionsService,
};
use salvo::{affix_state::inject, prelude::*};
use serde_json::Value;
use smallvec::smallvec;
use uuid::Uuid;

use crate::{graphql::build_schema, state::State};

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state(promotions: MockPromotionsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        promotions: Arc::new(promotions),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(MockPromotionsService::new(), auth)
}

pub(crate) fn staff(permissions: &[Permission]) -> Principal {
    Principal::Authenticated {
        kind: PrincipalKind::Staff,
        uuid: Uuid::now_v7(),
        permissions: permissions.iter().copied().collect(),
    }
}

pub(crate) fn app(permissions: &[Permission]) -> Principal {
    Principal::Authenticated {
        kind: PrincipalKind::App,
        uuid: Uuid::now_v7(),
        permissions: permissions.iter().copied().collect(),
    }
}

pub(crate) fn customer() -> Principal {
    Principal::Authenticated {
        kind: PrincipalKind::Customer,
        uuid: Uuid::now_v7(),
        permissions: smallvec![],
    }
}

/// Run `query` against a schema backed by `promotions`, as `principal`.
pub(crate) async fn execute(
    promotions: MockPromotionsService,
    principal: Principal,
    query: &str,
    variables: Value,
) -> GraphQLResponse {
    build_schema(Arc::new(promotions))
        .execute(
            GraphQLRequest::new(query)
                .variables(Variables::from_json(variables))
                .data(principal),
        )
        .await
}

/// A service routing `/graphql` as a fixed principal, bypassing token authentication.
pub(crate) fn graphql_service(promotions: MockPromotionsService, principal: Principal) -> Service {
    let router = Router::new()
        .hoop(inject(state(promotions, strict_auth_mock())))
        .hoop(inject(principal))
        .push(Router::with_path("graphql").post(crate::graphql::handler::execute));

    Service::new(router)
}
