//! Fixed-layout NetFlow protocols (V1, V5).
//!
//! Unlike V9/IPFIX these versions carry no templates: every record has a
//! compile-time-known field layout, so parsing is a single `nom_derive` pass
//! with no cache or reconciliation state involved.

pub mod v1;
pub mod v5;
