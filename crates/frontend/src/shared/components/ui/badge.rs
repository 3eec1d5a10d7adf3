use leptos::prelude::*;

/// Badge with a color variant
#[component]
pub fn Badge(
    /// "primary", "success", "warning", "error" or "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || variant_class(variant.get().as_deref().unwrap_or("neutral"));
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

/// Badge colored by a record status code such as `COMPLETED` or `SUSPENDED`
#[component]
pub fn StatusBadge(
    #[prop(into)]
    status: Signal<String>,
    children: Children,
) -> impl IntoView {
    let class = move || format!("badge badge--status {}", variant_class(status_variant(&status.get())));

    view! { <span class=class>{children()}</span> }
}

fn variant_class(variant: &str) -> &'static str {
    match variant {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

/// Maps a status code to a badge variant
pub fn status_variant(status: &str) -> &'static str {
    match status {
        "COMPLETED" | "ACTIVE" => "success",
        "PENDING" | "INACTIVE" => "warning",
        "CANCELLED" | "SUSPENDED" => "error",
        "ASSIGNED" | "IN_PROGRESS" => "primary",
        _ => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_variant() {
        assert_eq!(status_variant("COMPLETED"), "success");
        assert_eq!(status_variant("SUSPENDED"), "error");
        assert_eq!(status_variant("whatever"), "neutral");
    }
}
