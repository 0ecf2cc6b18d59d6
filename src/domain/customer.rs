use super::CustomerId;
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Loyalty tier of a customer.
///
/// The tier only affects the freight discount during pricing; checkout never
/// changes it. Keeping this a closed enum forces every dispatch over tiers
/// to be an exhaustive `match`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Base,
    Silver,
    Gold,
}

impl FromStr for CustomerTier {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            other => Err(CheckoutError::InvalidInput(format!(
                "unknown customer tier: {other}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub tier: CustomerTier,
}

impl Customer {
    pub fn new(id: CustomerId, tier: CustomerTier) -> Self {
        Self { id, tier }
    }
}
