//! Core view-state newtypes

/// Fixed per-record height estimate, in rows (or any consistent unit).
///
/// Every record is assumed to occupy exactly this height, which keeps the
/// window calculation O(1). Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ItemHeight(f64);

/// Error returned when an item height is zero, negative, or not finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Item height must be a positive finite number (got {0})")]
pub struct InvalidItemHeight(pub f64);

impl ItemHeight {
    /// Smart constructor that validates the height is positive and finite.
    pub fn new(height: f64) -> Result<Self, InvalidItemHeight> {
        if height.is_finite() && height > 0.0 {
            Ok(Self(height))
        } else {
            Err(InvalidItemHeight(height))
        }
    }

    /// Get the raw f64 value.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for ItemHeight {
    fn default() -> Self {
        Self(4.0)
    }
}
