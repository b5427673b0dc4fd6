//! Synthetic list items used to animate "added" and "reused" rows.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    pub id: u64,
    pub text: String,
}

impl Item {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Number of rows every list starts with.
pub const INITIAL_LEN: usize = 3;

/// `Item 1`, `Item 2`, `Item 3` with ids 1..=3.
pub fn initial_items() -> Vec<Item> {
    (1..=INITIAL_LEN as u64)
        .map(|i| Item::new(i, format!("Item {i}")))
        .collect()
}

/// Monotonic id source. Ids never repeat within one owner, however fast
/// items are added.
#[derive(Debug, Clone)]
pub struct ItemIds {
    next: u64,
}

impl ItemIds {
    /// Starts after the ids used by [`initial_items`].
    pub fn new() -> Self {
        Self {
            next: INITIAL_LEN as u64 + 1,
        }
    }

    pub fn fresh(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for ItemIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_items_are_the_fixed_three() {
        let items = initial_items();
        assert_eq!(
            items,
            vec![
                Item::new(1, "Item 1"),
                Item::new(2, "Item 2"),
                Item::new(3, "Item 3"),
            ]
        );
    }

    #[test]
    fn fresh_ids_never_collide_with_initial_rows() {
        let mut ids = ItemIds::new();
        let a = ids.fresh();
        let b = ids.fresh();
        assert!(a > INITIAL_LEN as u64);
        assert_eq!(b, a + 1);
    }
}
