//! Custom actions for the Product actor.
//!
//! `is_new` and `is_bestseller` are mutually exclusive. There is no constraint on the
//! fields themselves; the setters below keep them apart, so flags should only ever be
//! changed through these actions.

/// Catalog flag operations on a [`Product`](crate::model::Product).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Flags the product as new and clears the bestseller flag.
    MarkNew,
    /// Flags the product as a bestseller and clears the new flag.
    MarkBestseller,
    ClearNew,
    ClearBestseller,
}
