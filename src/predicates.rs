//! Stateless guard predicates.
//!
//! These are the building blocks guards are composed from. Composition is
//! plain Rust: wrap the calls you need in one closure per transition.
//!
//! ```rust
//! use brigade::predicates::{is_at_location, is_holding_item};
//!
//! let ready_to_pick = |holding: &str, location: &str| {
//!     is_holding_item(holding, "empty") && is_at_location(location, "at_onion_station")
//! };
//! assert!(ready_to_pick("empty", "at_onion_station"));
//! assert!(!ready_to_pick("onion", "at_onion_station"));
//! ```

/// True when the agent's current location equals `target`.
pub fn is_at_location<A, B>(current: &A, target: &B) -> bool
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    current == target
}

/// True when the item the agent holds equals `target`.
pub fn is_holding_item<A, B>(current: &A, target: &B) -> bool
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    current == target
}

/// True when there is at least one pending order.
pub fn has_orders<T>(orders: &[T]) -> bool {
    !orders.is_empty()
}
