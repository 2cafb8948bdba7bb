//! クレジット残高
//!
//! 不変条件: `remaining <= total`。残高不足の消費は拒否する（切り詰めない）。

use serde::{Deserialize, Serialize};

use crate::error::{Error, StudioError};

/// 初回受取・ログイン時に付与する総量
pub const STARTER_CREDITS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCreditState")]
pub struct CreditState {
    remaining: u32,
    total: u32,
    has_claimed_initial: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCreditState {
    remaining: u32,
    total: u32,
    #[serde(default)]
    has_claimed_initial: bool,
}

impl TryFrom<RawCreditState> for CreditState {
    type Error = Error;

    fn try_from(raw: RawCreditState) -> Result<Self, Self::Error> {
        CreditState::new(raw.remaining, raw.total, raw.has_claimed_initial)
    }
}

impl CreditState {
    pub fn new(remaining: u32, total: u32, has_claimed_initial: bool) -> Result<Self, Error> {
        if remaining > total {
            return Err(Error::InvalidCredits(format!(
                "remaining {remaining} exceeds total {total}"
            )));
        }
        Ok(Self {
            remaining,
            total,
            has_claimed_initial,
        })
    }

    /// 未ログイン状態 `{0, 10, false}`
    pub fn signed_out() -> Self {
        Self {
            remaining: 0,
            total: STARTER_CREDITS,
            has_claimed_initial: false,
        }
    }

    /// 受取直後 `{10, 10, true}`
    pub fn claimed() -> Self {
        Self {
            remaining: STARTER_CREDITS,
            total: STARTER_CREDITS,
            has_claimed_initial: true,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_claimed_initial(&self) -> bool {
        self.has_claimed_initial
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.remaining >= cost
    }

    pub fn spend(&mut self, cost: u32) -> Result<(), StudioError> {
        if !self.can_afford(cost) {
            return Err(StudioError::InsufficientCredits {
                required: cost,
                remaining: self.remaining,
            });
        }
        self.remaining -= cost;
        Ok(())
    }
}

impl Default for CreditState {
    fn default() -> Self {
        Self::signed_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;

    #[test]
    fn test_signed_out_defaults() {
        let credits = CreditState::default();
        assert_eq!(credits.remaining(), 0);
        assert_eq!(credits.total(), 10);
        assert!(!credits.has_claimed_initial());
    }

    #[test]
    fn test_spend_deducts_tier_cost() {
        for resolution in Resolution::ALL {
            let mut credits = CreditState::claimed();
            credits.spend(resolution.cost()).expect("残高は十分");
            assert_eq!(credits.remaining(), 10 - resolution.cost());
            assert_eq!(credits.total(), 10);
        }
    }

    #[test]
    fn test_spend_rejects_without_clamping() {
        let mut credits = CreditState::new(2, 10, true).expect("有効な残高");
        let err = credits.spend(3).unwrap_err();
        assert_eq!(
            err,
            StudioError::InsufficientCredits {
                required: 3,
                remaining: 2
            }
        );
        assert_eq!(credits.remaining(), 2);
    }

    #[test]
    fn test_spend_exact_balance() {
        let mut credits = CreditState::new(3, 10, true).expect("有効な残高");
        credits.spend(3).expect("ちょうど足りる");
        assert_eq!(credits.remaining(), 0);
        assert!(!credits.can_afford(1));
    }

    #[test]
    fn test_new_rejects_remaining_above_total() {
        assert!(matches!(
            CreditState::new(11, 10, true),
            Err(Error::InvalidCredits(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CreditState =
            serde_json::from_str(r#"{"remaining":4,"total":10,"hasClaimedInitial":true}"#)
                .expect("デシリアライズ失敗");
        assert_eq!(ok.remaining(), 4);

        let bad = serde_json::from_str::<CreditState>(r#"{"remaining":40,"total":10}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&CreditState::claimed()).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"remaining":10,"total":10,"hasClaimedInitial":true}"#);
    }
}
