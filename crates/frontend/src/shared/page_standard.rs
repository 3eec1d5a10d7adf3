//! Page category constants.
//!
//! Every routed page declares an HTML `id` of the form `{entity}--{category}`
//! (e.g. `"a001_booking--list"`) and a `data-page-category` attribute with
//! one of the constants below.

/// Table of records with search, filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Administration page (settings, permissions).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Informational page without the standard header/content split.
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_SYSTEM, PAGE_CAT_CUSTOM];

/// Whether `id` matches the `{entity}--{category}` format
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_booking--list"));
        assert!(!is_valid_page_id("a001_booking"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_booking--"));
    }

    #[test]
    fn test_known_category() {
        assert!(is_known_category(PAGE_CAT_SYSTEM));
        assert!(!is_known_category("legacy"));
    }
}
