//! Promotion Rule Rewards

/// Rule Reward Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleReward {
    PercentageOff { percentage: u16 },
    FixedAmountOff { amount: u64 },
}

impl RuleReward {
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "percentage_off",
            Self::FixedAmountOff { .. } => "amount_off",
        }
    }
}
