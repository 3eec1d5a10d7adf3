/// Search and sort helpers shared by list views
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::data_table::SortDirection;

/// Delay between the last keystroke and the search update
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Highlights case-insensitive matches of `filter` in `text`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    for (start, end) in ranges {
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-match">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Byte ranges of non-overlapping case-insensitive matches.
///
/// Lowercasing can change byte lengths outside ASCII, so matching walks
/// char boundaries of the original text.
fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.to_lowercase();
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let found = text[start..].char_indices().find_map(|(offset, _)| {
            let from = start + offset;
            let mut end = from;
            let mut lowered = String::new();
            for (i, c) in text[from..].char_indices() {
                if lowered.len() >= needle.len() {
                    break;
                }
                lowered.extend(c.to_lowercase());
                end = from + i + c.len_utf8();
            }
            (lowered == needle).then_some((from, end))
        });
        match found {
            Some((from, end)) => {
                ranges.push((from, end));
                start = end;
            }
            None => break,
        }
    }
    ranges
}

/// Search box that reports its value after typing pauses
#[component]
pub fn SearchInput(
    /// Current committed value
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Replacing the stored timeout drops and cancels the previous one
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Arrow shown next to a sortable header
pub fn get_sort_indicator(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
        SortDirection::None => " ⇅",
    }
}

pub fn get_sort_class(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "sort-icon",
        _ => "sort-icon sort-icon--active",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(match_ranges("Pending PEND", "pend"), vec![(0, 4), (8, 12)]);
        assert!(match_ranges("Done", "pend").is_empty());
    }

    #[test]
    fn test_match_ranges_non_ascii() {
        let text = "Улица Ленина";
        let ranges = match_ranges(text, "ленина");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].0..ranges[0].1], "Ленина");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(SortDirection::Asc), " ▲");
        assert_eq!(get_sort_indicator(SortDirection::None), " ⇅");
        assert_eq!(get_sort_class(SortDirection::Desc), "sort-icon sort-icon--active");
    }
}
