//! GST line-item arithmetic for Indian tax compliance
//!
//! Intra-state supplies split the tax evenly into CGST + SGST; inter-state
//! supplies carry the whole tax as IGST. Everything here is pure arithmetic
//! over `BigDecimal`; rounding happens only at display time.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Standard GST slabs for goods and services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstSlab {
    /// Exempt items - 0%
    Exempt,
    /// Reduced rate items - 5%
    Reduced,
    /// Standard rate items - 12%
    Standard,
    /// Higher rate items (most services) - 18%
    Higher,
    /// Luxury goods - 28%
    Luxury,
}

impl GstSlab {
    /// The percentage for this slab
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstSlab::Exempt => BigDecimal::from(0),
            GstSlab::Reduced => BigDecimal::from(5),
            GstSlab::Standard => BigDecimal::from(12),
            GstSlab::Higher => BigDecimal::from(18),
            GstSlab::Luxury => BigDecimal::from(28),
        }
    }

    /// Match a raw percentage back to a slab, if it is one of the five
    pub fn from_rate(rate: &BigDecimal) -> Option<GstSlab> {
        [
            GstSlab::Exempt,
            GstSlab::Reduced,
            GstSlab::Standard,
            GstSlab::Higher,
            GstSlab::Luxury,
        ]
        .into_iter()
        .find(|slab| &slab.rate() == rate)
    }
}

/// One line of a draft invoice or vendor bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: BigDecimal,
    /// Unit rate before tax
    pub rate: BigDecimal,
    /// GST percentage for this line
    pub gst_rate: BigDecimal,
    /// Inter-state supply: the whole tax goes to IGST
    pub is_igst: bool,
}

impl LineItem {
    pub fn new(
        description: String,
        quantity: BigDecimal,
        rate: BigDecimal,
        gst_rate: BigDecimal,
        is_igst: bool,
    ) -> Self {
        Self {
            description,
            quantity,
            rate,
            gst_rate,
            is_igst,
        }
    }

    /// Convenience constructor using a standard slab
    pub fn with_slab(
        description: String,
        quantity: BigDecimal,
        rate: BigDecimal,
        slab: GstSlab,
        is_igst: bool,
    ) -> Self {
        Self::new(description, quantity, rate, slab.rate(), is_igst)
    }

    /// Line amount before tax: `quantity * rate`
    pub fn amount(&self) -> BigDecimal {
        &self.quantity * &self.rate
    }

    /// Tax on this line, split across the GST components
    pub fn tax_split(&self) -> TaxSplit {
        let tax = self.amount() * &self.gst_rate / BigDecimal::from(100);
        if self.is_igst {
            TaxSplit {
                cgst: BigDecimal::from(0),
                sgst: BigDecimal::from(0),
                igst: tax,
            }
        } else {
            let half = tax / BigDecimal::from(2);
            TaxSplit {
                cgst: half.clone(),
                sgst: half,
                igst: BigDecimal::from(0),
            }
        }
    }
}

/// Tax on a single line, split across the three GST components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
}

impl TaxSplit {
    pub fn total(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }
}

/// Aggregate totals across a document's line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
    pub total: BigDecimal,
}

impl InvoiceTotals {
    pub fn zero() -> Self {
        Self {
            subtotal: BigDecimal::from(0),
            cgst: BigDecimal::from(0),
            sgst: BigDecimal::from(0),
            igst: BigDecimal::from(0),
            total: BigDecimal::from(0),
        }
    }

    pub fn total_tax(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }
}

/// Compute document totals across line items.
///
/// Pure and total over its domain: an empty list yields all-zero totals, and
/// negative quantities or rates pass through unrejected (the posting layer
/// validates documents, not this calculator).
pub fn compute_totals(items: &[LineItem]) -> InvoiceTotals {
    let mut totals = InvoiceTotals::zero();

    for item in items {
        let split = item.tax_split();
        totals.subtotal += item.amount();
        totals.cgst += split.cgst;
        totals.sgst += split.sgst;
        totals.igst += split.igst;
    }

    totals.total = &totals.subtotal + &totals.cgst + &totals.sgst + &totals.igst;
    totals
}

/// Recover the pre-tax base from a GST-inclusive total.
///
/// Used when a bill is entered with tax-inclusive pricing:
/// `base = total * 100 / (100 + rate)`.
pub fn reverse_from_total(total: &BigDecimal, gst_rate: &BigDecimal) -> BigDecimal {
    total * BigDecimal::from(100) / (BigDecimal::from(100) + gst_rate)
}
