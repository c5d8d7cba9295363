//! GST computation for service invoices and vendor bills

pub mod gst;

pub use gst::*;
