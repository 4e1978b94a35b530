//! ISO9660 extensions
//!
//! Only Rock Ridge alternate names are decoded.

pub mod rock_ridge;
