//! Promotions

pub mod data;
mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::PromotionsServiceError;
pub use service::*;
