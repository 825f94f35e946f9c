//! Promotions Repositories

pub(crate) mod events;
pub(crate) mod promotions;
pub(crate) mod rules;
