//! PageFrame: root wrapper for every routed page.
//!
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="a001_booking--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Sets the page id, the category attribute and the category's BEM class
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a001_booking--list"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) || !is_known_category(category) {
        log::warn!("Page '{}' has non-standard metadata (category '{}')", page_id, category);
    }

    let base_class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        PAGE_CAT_CUSTOM => "page page--custom",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
