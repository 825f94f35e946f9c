//! Mutation root.

use async_graphql::MergedObject;

mod promotions;
mod rules;

#[derive(MergedObject, Default)]
pub(crate) struct Mutation(promotions::PromotionMutations, rules::PromotionRuleMutations);
