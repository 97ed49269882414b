//! The category selection owned by the view layer.
//!
//! Deliberately permissive: `select` accepts any name, including ones no
//! post carries. Filtering an unknown selection simply yields nothing.

use crate::domain::categories::ALL_CATEGORY;
use crate::domain::posts::PostFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    selected: String,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self {
            selected: ALL_CATEGORY.to_string(),
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_all(&self) -> bool {
        self.selected == ALL_CATEGORY
    }

    /// Move to the given category unconditionally.
    pub fn select(&mut self, category: impl Into<String>) {
        self.selected = category.into();
    }

    pub fn as_filter(&self) -> PostFilter<'_> {
        if self.is_all() {
            PostFilter::All
        } else {
            PostFilter::Category(&self.selected)
        }
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_all() {
        let selection = CategorySelection::new();
        assert!(selection.is_all());
        assert_eq!(selection.selected(), "ALL");
        assert_eq!(selection.as_filter(), PostFilter::All);
    }

    #[test]
    fn select_moves_unconditionally() {
        let mut selection = CategorySelection::new();

        selection.select("rust");
        assert_eq!(selection.selected(), "rust");
        assert_eq!(selection.as_filter(), PostFilter::Category("rust"));

        // Unknown names are accepted as-is; validity is not this type's job.
        selection.select("definitely-not-a-category");
        assert_eq!(selection.selected(), "definitely-not-a-category");
    }

    #[test]
    fn selecting_all_again_restores_the_identity_filter() {
        let mut selection = CategorySelection::new();
        selection.select("rust");
        selection.select(ALL_CATEGORY);
        assert!(selection.is_all());
    }
}
