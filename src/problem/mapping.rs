#![allow(non_snake_case)]

use super::EntryInX;
use crate::algebra::FloatT;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sign with which an entry of `X` contributes to a decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

/// A decision variable represented by an entry of `X`:
/// `value = offset ± X[entry_in_X]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct DecisionVariableInSdpaX<T> {
    pub coeff_sign: Sign,
    pub offset: T,
    pub entry_in_X: EntryInX,
}

impl<T> DecisionVariableInSdpaX<T>
where
    T: FloatT,
{
    pub fn new(coeff_sign: Sign, offset: T, entry_in_X: EntryInX) -> Self {
        Self {
            coeff_sign,
            offset,
            entry_in_X,
        }
    }

    /// value of the decision variable given the value of its `X` entry
    pub fn value_from(&self, X_entry: T) -> T {
        match self.coeff_sign {
            Sign::Positive => self.offset + X_entry,
            Sign::Negative => self.offset - X_entry,
        }
    }
}

/// Index into the vector `s` of free variables
pub type FreeVariableIndex = usize;

/// Where each original decision variable lives in the canonical problem.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum VariableInSdpa<T> {
    /// an entry of the PSD matrix `X`, with sign and offset
    InX(DecisionVariableInSdpaX<T>),
    /// pinned to a constant during canonicalization
    Constant(T),
    /// a free variable `s[i]`
    Free(FreeVariableIndex),
}

#[test]
fn test_sign_and_offset() {
    let entry = EntryInX::new(0, 1, 1);
    let pos = DecisionVariableInSdpaX::new(Sign::Positive, 1.5, entry);
    let neg = DecisionVariableInSdpaX::new(Sign::Negative, 1.5, entry);
    assert_eq!(pos.value_from(2.0), 3.5);
    assert_eq!(neg.value_from(2.0), -0.5);
}
