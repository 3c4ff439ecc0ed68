//! Rankable item trait
//!
//! The engine never inspects item contents beyond a stable identifier and a
//! display name; everything else is display metadata owned by the caller.

use std::fmt::Debug;

/// An item that can be placed into a ranking
///
/// Identity is carried entirely by [`Rankable::id`]. Two items with the same
/// id are considered the same item, and the engine rejects inputs that
/// contain the same id twice.
///
/// # Example
///
/// ```rust
/// use parkrank::ranking::traits::Rankable;
///
/// #[derive(Clone, Debug)]
/// struct Flavor(&'static str);
///
/// impl Rankable for Flavor {
///     fn id(&self) -> &str {
///         self.0
///     }
/// }
///
/// assert_eq!(Flavor("mint").label(), "mint");
/// ```
pub trait Rankable: Clone + Debug {
    /// Stable unique identifier
    fn id(&self) -> &str;

    /// Human-readable label, used in logs
    fn label(&self) -> &str {
        self.id()
    }
}

impl Rankable for String {
    fn id(&self) -> &str {
        self.as_str()
    }
}

impl Rankable for &'static str {
    fn id(&self) -> &str {
        self
    }
}
