// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use num::{BigInt, BigRational, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt, iter,
    ops::{Add, AddAssign},
};

/// Exact rational voting weight.
///
/// All threshold math is done on `BigRational`, never on floats or
/// truncating integers, so every replica that applies the same votes
/// computes bit-identical cumulative power.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct VotingPower(BigRational);

impl VotingPower {
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn from_integer(value: u64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// `numer / denom`. `denom` must be nonzero.
    pub fn new(numer: u64, denom: u64) -> Self {
        Self(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Two thirds of this value, computed with exact rational
    /// multiplication. A vote total finalizes only when it is strictly
    /// greater than the threshold of the total power.
    pub fn supermajority_threshold(&self) -> Self {
        Self(&self.0 * BigRational::new(BigInt::from(2), BigInt::from(3)))
    }
}

impl Add for VotingPower {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<&VotingPower> for VotingPower {
    fn add_assign(&mut self, rhs: &VotingPower) {
        self.0 += &rhs.0;
    }
}

impl<'a> iter::Sum<&'a VotingPower> for VotingPower {
    fn sum<I: Iterator<Item = &'a VotingPower>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, power| {
            acc += power;
            acc
        })
    }
}

impl fmt::Display for VotingPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for VotingPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VotingPower({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn threshold_comparison_is_strict() {
        // Three validators of power one: total = 3, threshold = 2. Two
        // votes do not finalize, three do.
        let threshold = VotingPower::from_integer(3).supermajority_threshold();
        assert_eq!(threshold, VotingPower::from_integer(2));
        assert!(VotingPower::from_integer(2) <= threshold);
        assert!(VotingPower::from_integer(3) > threshold);
    }

    #[test]
    fn fractional_threshold_has_no_rounding_drift() {
        // total = 1, threshold = 2/3; 2/3 must not finalize, 2/3 + 1/1000 must.
        let total = VotingPower::from_integer(1);
        let threshold = total.supermajority_threshold();
        assert_eq!(threshold, VotingPower::new(2, 3));
        assert!(VotingPower::new(2, 3) <= threshold);
        assert!(VotingPower::new(2, 3) + VotingPower::new(1, 1000) > threshold);
    }

    proptest! {
        #[test]
        fn sum_of_integer_powers_is_exact(powers in prop::collection::vec(0u64..1_000_000, 0..50)) {
            let sum: VotingPower = powers
                .iter()
                .map(|p| VotingPower::from_integer(*p))
                .collect::<Vec<_>>()
                .iter()
                .sum();
            let expected = VotingPower::from_integer(powers.iter().sum::<u64>());
            prop_assert_eq!(sum, expected);
        }

        #[test]
        fn strictness_matches_integer_cross_multiplication(power in 0u64..10_000, total in 1u64..10_000) {
            // power > total * 2/3  <=>  3 * power > 2 * total
            let exceeded = VotingPower::from_integer(power)
                > VotingPower::from_integer(total).supermajority_threshold();
            prop_assert_eq!(exceeded, 3 * (power as u128) > 2 * (total as u128));
        }
    }
}
