//! # Garage Books
//!
//! Accounting core for an EV service workshop: GST invoicing, double-entry
//! journals, bank reconciliation, and fixed-asset depreciation.
//!
//! ## Features
//!
//! - **Double-entry journals**: entry validation, posting, reversal, and
//!   trial balance generation with a decimal tolerance for imported figures
//! - **GST calculations**: CGST/SGST/IGST line-item arithmetic across the
//!   standard slabs, with reverse calculation for tax-inclusive pricing
//! - **Bank reconciliation**: session lifecycle with idempotent transaction
//!   matching and lenient completion
//! - **Fixed assets**: straight-line depreciation schedules, disposal, and
//!   write-off with gain/loss computation
//! - **Multi-tenant storage abstraction**: every operation carries an
//!   explicit organization context; no ambient tenant state
//!
//! ## Quick start
//!
//! ```rust
//! use garage_books::{compute_totals, GstSlab, LineItem};
//! use bigdecimal::BigDecimal;
//!
//! let items = vec![LineItem::with_slab(
//!     "Battery health check".to_string(),
//!     BigDecimal::from(1),
//!     BigDecimal::from(1500),
//!     GstSlab::Higher,
//!     false,
//! )];
//! let totals = compute_totals(&items);
//! assert_eq!(totals.total, BigDecimal::from(1770));
//! ```

pub mod assets;
pub mod currency;
pub mod ledger;
pub mod reconciliation;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use assets::*;
pub use currency::format_inr;
pub use ledger::*;
pub use reconciliation::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;

// Re-export posting patterns for convenience
pub use ledger::journal::patterns;
