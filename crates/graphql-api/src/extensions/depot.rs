//! Depot helper extensions.

use std::any::Any;

use discounts_app::auth::Principal;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_500(&self) -> Result<&Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    /// The auth middleware always stores a principal, so absence is a routing bug.
    fn principal_or_500(&self) -> Result<&Principal, StatusError> {
        self.obtain_or_500::<Principal>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_principal_is_an_internal_error() {
        let depot = Depot::new();

        assert!(depot.principal_or_500().is_err(), "expected missing principal to fail");
    }

    #[test]
    fn inserted_principal_is_returned() {
        let mut depot = Depot::new();

        depot.insert_principal(Principal::Anonymous);

        assert!(
            matches!(depot.principal_or_500(), Ok(Principal::Anonymous)),
            "expected anonymous principal"
        );
    }
}
