//! Discounts Domain Concerns

pub mod promotions;
