//! Fixed assets and depreciation scheduling
//!
//! Workshop equipment (lifts, diagnostic rigs, chargers) is depreciated
//! monthly. Auto-calculated postings always use the straight-line monthly
//! amount; the other methods are selectable on the asset record but do not
//! yet change the computation.
//! TODO: declining-balance and units-of-production schedules, pending product
//! sign-off on the exact conventions.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Depreciation method configured on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    StraightLine,
    DecliningBalance,
    UnitsOfProduction,
    SumOfYears,
}

/// Lifecycle state of a fixed asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    FullyDepreciated,
    Disposed,
    WrittenOff,
}

/// A capital asset on the workshop's books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedAsset {
    pub id: String,
    pub name: String,
    pub purchase_price: BigDecimal,
    pub salvage_value: BigDecimal,
    pub useful_life_years: u32,
    pub depreciation_method: DepreciationMethod,
    pub accumulated_depreciation: BigDecimal,
    pub status: AssetStatus,
    pub purchased_on: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FixedAsset {
    /// Register a new asset in `Active` state
    pub fn new(
        id: String,
        name: String,
        purchase_price: BigDecimal,
        salvage_value: BigDecimal,
        useful_life_years: u32,
        depreciation_method: DepreciationMethod,
        purchased_on: NaiveDate,
    ) -> AssetResult<Self> {
        let zero = BigDecimal::from(0);
        if useful_life_years == 0 {
            return Err(AssetError::InvalidAsset(
                "useful life must be at least one year".to_string(),
            ));
        }
        if purchase_price < zero || salvage_value < zero {
            return Err(AssetError::InvalidAsset(
                "purchase price and salvage value cannot be negative".to_string(),
            ));
        }
        if salvage_value > purchase_price {
            return Err(AssetError::InvalidAsset(
                "salvage value cannot exceed purchase price".to_string(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            id,
            name,
            purchase_price,
            salvage_value,
            useful_life_years,
            depreciation_method,
            accumulated_depreciation: BigDecimal::from(0),
            status: AssetStatus::Active,
            purchased_on,
            created_at: now,
            updated_at: now,
        })
    }

    /// `purchase_price - accumulated_depreciation`
    pub fn book_value(&self) -> BigDecimal {
        &self.purchase_price - &self.accumulated_depreciation
    }

    /// Total amount this asset can ever depreciate by
    pub fn depreciable_base(&self) -> BigDecimal {
        &self.purchase_price - &self.salvage_value
    }

    /// Depreciation still available before book value hits salvage value
    pub fn remaining_base(&self) -> BigDecimal {
        self.book_value() - &self.salvage_value
    }

    /// Straight-line annual depreciation
    pub fn annual_depreciation(&self) -> BigDecimal {
        self.depreciable_base() / BigDecimal::from(self.useful_life_years)
    }

    /// Straight-line monthly depreciation, the auto-posting default
    pub fn monthly_depreciation(&self) -> BigDecimal {
        self.annual_depreciation() / BigDecimal::from(12)
    }

    /// Post one period of depreciation.
    ///
    /// With `amount` absent or zero the straight-line monthly amount is
    /// used, whatever method the asset is configured with. A posting that
    /// would push book value below salvage value is capped at the remaining
    /// base; landing exactly on salvage value flips the asset to
    /// `FullyDepreciated`. The asset itself is not mutated; the updated copy
    /// comes back alongside the entry.
    pub fn record_depreciation(
        &self,
        period: NaiveDate,
        amount: Option<BigDecimal>,
    ) -> AssetResult<(DepreciationEntry, FixedAsset)> {
        if self.status != AssetStatus::Active {
            return Err(AssetError::NotActive(self.id.clone()));
        }

        let zero = BigDecimal::from(0);
        let remaining = self.remaining_base();
        if remaining <= zero {
            return Err(AssetError::FullyDepreciated(self.id.clone()));
        }

        let requested = match amount {
            Some(a) if a < zero => {
                return Err(AssetError::InvalidAmount(
                    "depreciation amount cannot be negative".to_string(),
                ))
            }
            Some(a) if a > zero => a,
            _ => self.monthly_depreciation(),
        };

        let applied = if requested > remaining {
            remaining
        } else {
            requested
        };

        let mut updated = self.clone();
        updated.accumulated_depreciation += &applied;
        if updated.remaining_base() <= zero {
            updated.status = AssetStatus::FullyDepreciated;
        }
        updated.updated_at = chrono::Utc::now().naive_utc();

        let entry = DepreciationEntry {
            id: Uuid::new_v4(),
            asset_id: self.id.clone(),
            period,
            amount: applied,
            posted_at: chrono::Utc::now().naive_utc(),
        };

        Ok((entry, updated))
    }

    /// Sell or trade in the asset.
    ///
    /// `gain_loss = disposal_amount - book_value` at the time of disposal;
    /// positive when sold above book value.
    pub fn dispose(
        &self,
        disposal_date: NaiveDate,
        disposal_amount: BigDecimal,
        reason: String,
    ) -> AssetResult<Disposal> {
        if matches!(self.status, AssetStatus::Disposed | AssetStatus::WrittenOff) {
            return Err(AssetError::AlreadyRetired(self.id.clone()));
        }

        let gain_loss = &disposal_amount - self.book_value();

        let mut updated = self.clone();
        updated.status = AssetStatus::Disposed;
        updated.updated_at = chrono::Utc::now().naive_utc();

        Ok(Disposal {
            asset_id: self.id.clone(),
            disposed_on: disposal_date,
            disposal_amount,
            gain_loss,
            reason,
            asset: updated,
        })
    }

    /// Write the asset off entirely (damage, theft, obsolescence).
    ///
    /// The loss is the full book value at write-off; accumulated
    /// depreciation is brought up to the depreciable base.
    pub fn write_off(&self, reason: String) -> AssetResult<WriteOff> {
        if matches!(self.status, AssetStatus::Disposed | AssetStatus::WrittenOff) {
            return Err(AssetError::AlreadyRetired(self.id.clone()));
        }

        let loss = self.book_value();

        let mut updated = self.clone();
        updated.accumulated_depreciation = updated.depreciable_base();
        updated.status = AssetStatus::WrittenOff;
        updated.updated_at = chrono::Utc::now().naive_utc();

        Ok(WriteOff {
            asset_id: self.id.clone(),
            loss,
            reason,
            asset: updated,
        })
    }
}

/// One posted period of depreciation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationEntry {
    pub id: Uuid,
    pub asset_id: String,
    /// The period this posting covers (first day of the month by convention)
    pub period: NaiveDate,
    pub amount: BigDecimal,
    pub posted_at: NaiveDateTime,
}

/// Result of disposing of an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disposal {
    pub asset_id: String,
    pub disposed_on: NaiveDate,
    pub disposal_amount: BigDecimal,
    /// Positive for a gain, negative for a loss
    pub gain_loss: BigDecimal,
    pub reason: String,
    pub asset: FixedAsset,
}

/// Result of writing an asset off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOff {
    pub asset_id: String,
    pub loss: BigDecimal,
    pub reason: String,
    pub asset: FixedAsset,
}

/// Fixed-asset errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
    #[error("asset {0} is not active")]
    NotActive(String),
    #[error("asset {0} is already fully depreciated")]
    FullyDepreciated(String),
    #[error("asset {0} has already been retired")]
    AlreadyRetired(String),
    #[error("invalid depreciation amount: {0}")]
    InvalidAmount(String),
}

/// Result type for fixed-asset operations
pub type AssetResult<T> = Result<T, AssetError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> BigDecimal {
        BigDecimal::from(v)
    }

    fn lift() -> FixedAsset {
        FixedAsset::new(
            "lift-01".into(),
            "Two-post lift".into(),
            d(120000),
            d(0),
            5,
            DepreciationMethod::StraightLine,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn period(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, 1).unwrap()
    }

    #[test]
    fn straight_line_monthly_default() {
        let asset = lift();
        assert_eq!(asset.annual_depreciation(), d(24000));
        assert_eq!(asset.monthly_depreciation(), d(2000));
    }

    #[test]
    fn six_auto_postings_reach_the_expected_book_value() {
        let mut asset = lift();
        for month in 1..=6 {
            let (entry, updated) = asset.record_depreciation(period(month), None).unwrap();
            assert_eq!(entry.amount, d(2000));
            asset = updated;
        }
        assert_eq!(asset.accumulated_depreciation, d(12000));
        assert_eq!(asset.book_value(), d(108000));
        assert_eq!(asset.status, AssetStatus::Active);
    }

    #[test]
    fn book_value_never_increases_under_postings() {
        let mut asset = lift();
        let mut last = asset.book_value();
        for month in 1..=12 {
            let (_, updated) = asset
                .record_depreciation(period(month), Some(d(1500)))
                .unwrap();
            assert!(updated.book_value() <= last);
            last = updated.book_value();
            asset = updated;
        }
    }

    #[test]
    fn oversized_posting_is_capped_at_salvage_value() {
        let asset = FixedAsset::new(
            "charger-01".into(),
            "DC fast charger".into(),
            d(50000),
            d(5000),
            5,
            DepreciationMethod::StraightLine,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();

        let (entry, updated) = asset
            .record_depreciation(period(1), Some(d(99999)))
            .unwrap();

        assert_eq!(entry.amount, d(45000));
        assert_eq!(updated.book_value(), d(5000));
        assert_eq!(updated.status, AssetStatus::FullyDepreciated);

        let err = updated.record_depreciation(period(2), None).unwrap_err();
        assert!(matches!(err, AssetError::NotActive(_)));
    }

    #[test]
    fn other_methods_still_auto_post_straight_line() {
        let asset = FixedAsset::new(
            "rig-01".into(),
            "Diagnostic rig".into(),
            d(120000),
            d(0),
            5,
            DepreciationMethod::DecliningBalance,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();

        let (entry, _) = asset.record_depreciation(period(1), None).unwrap();
        assert_eq!(entry.amount, d(2000));
    }

    #[test]
    fn disposal_gain_loss_sign_follows_book_value() {
        let mut asset = lift();
        for month in 1..=6 {
            asset = asset.record_depreciation(period(month), None).unwrap().1;
        }
        // book value is now 108000

        let gain = asset
            .dispose(period(7), d(110000), "Sold to sister garage".into())
            .unwrap();
        assert_eq!(gain.gain_loss, d(2000));
        assert_eq!(gain.asset.status, AssetStatus::Disposed);

        let loss = asset
            .dispose(period(7), d(100000), "Distress sale".into())
            .unwrap();
        assert_eq!(loss.gain_loss, d(-8000));
    }

    #[test]
    fn write_off_books_the_full_remaining_value() {
        let asset = FixedAsset::new(
            "scooter-01".into(),
            "Courtesy scooter".into(),
            d(80000),
            d(10000),
            4,
            DepreciationMethod::StraightLine,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();

        let write_off = asset.write_off("Stolen".into()).unwrap();
        assert_eq!(write_off.loss, d(80000));
        assert_eq!(write_off.asset.accumulated_depreciation, d(70000));
        assert_eq!(write_off.asset.status, AssetStatus::WrittenOff);

        let err = write_off.asset.write_off("Twice".into()).unwrap_err();
        assert!(matches!(err, AssetError::AlreadyRetired(_)));
    }

    #[test]
    fn constructor_rejects_bad_parameters() {
        let zero_life = FixedAsset::new(
            "x".into(),
            "Broken".into(),
            d(1000),
            d(0),
            0,
            DepreciationMethod::StraightLine,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert!(zero_life.is_err());

        let salvage_above_cost = FixedAsset::new(
            "y".into(),
            "Backwards".into(),
            d(1000),
            d(2000),
            3,
            DepreciationMethod::StraightLine,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert!(salvage_above_cost.is_err());
    }

    #[test]
    fn asset_wire_shape_uses_snake_case_status() {
        let asset = lift();
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(
            json.get("status"),
            Some(&serde_json::Value::String("active".into()))
        );
        assert!(json.get("accumulated_depreciation").is_some());
        assert_eq!(
            json.get("depreciation_method"),
            Some(&serde_json::Value::String("straight_line".into()))
        );
    }
}
