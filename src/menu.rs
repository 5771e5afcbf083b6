//! # Menu Module
//!
//! The food stall's fixed menu: an ordered list of numbered items shared
//! read-only by every conversation.

/// Items offered by the stall, in the order they are numbered and matched
pub const DEFAULT_ITEMS: [&str; 8] = [
    "Pizza",
    "Burger",
    "Schwarma",
    "Nuggets",
    "Brownie",
    "Pastry",
    "Baguette",
    "Ice cream",
];

/// A single numbered menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Position shown to the user, starting at 1
    pub number: u8,
    /// Display label, also used for matching
    pub label: String,
}

/// Immutable ordered menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu from labels, numbering them from 1 in the given order
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labels
            .into_iter()
            .zip(1u8..)
            .map(|(label, number)| MenuItem {
                number,
                label: label.into(),
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the first item (in menu order) whose label occurs anywhere in `text`
    ///
    /// Matching is a case-insensitive substring search, so "I want BURGERS"
    /// selects "Burger".
    pub fn find_in(&self, text: &str) -> Option<&MenuItem> {
        let haystack = text.to_lowercase();
        self.items
            .iter()
            .find(|item| haystack.contains(&item.label.to_lowercase()))
    }

    /// Render the menu as numbered lines, e.g. "1. Pizza\n2. Burger"
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}. {}", item.number, item.label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::from_labels(DEFAULT_ITEMS)
    }
}
