// web_app/components/table.rs - List table controls
//
// Sort headers, pagination with a rows-per-page selector, and the tri-state
// facet toggle. None of these hold state: they render what the page's
// controller says and report clicks back as callbacks.

use leptos::prelude::*;

use crate::web_app::state::{PageSize, SortDirection};

/// Clickable column header
#[component]
pub fn SortLabel(
    label: &'static str,
    /// Whether this column is the active sort field
    active: Signal<bool>,
    /// Direction the header shows (descending for inactive columns)
    direction: Signal<SortDirection>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                if active.get() {
                    "inline-flex items-center gap-1 font-semibold text-gray-900"
                } else {
                    "inline-flex items-center gap-1 font-medium text-gray-500 hover:text-gray-700"
                }
            }
            on:click=move |_| on_toggle.run(())
        >
            {label}
            <span class=move || if active.get() { "opacity-100" } else { "opacity-0" }>
                {move || sort_arrow(direction.get())}
            </span>
        </button>
    }
}

fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}

/// Pagination footer with rows-per-page selector
#[component]
pub fn TablePagination(
    /// Current page (0-indexed)
    page_index: Signal<u32>,
    page_size: Signal<PageSize>,
    /// Server-side match count
    total: Signal<u64>,
    on_page: Callback<u32>,
    on_page_size: Callback<PageSize>,
) -> impl IntoView {
    let last_page = move || last_page_index(total.get(), page_size.get());
    let can_go_prev = move || page_index.get() > 0;
    let can_go_next = move || page_index.get() < last_page();

    let go_prev = move |_| {
        if can_go_prev() {
            on_page.run(page_index.get().saturating_sub(1));
        }
    };

    let go_next = move |_| {
        if can_go_next() {
            on_page.run(page_index.get() + 1);
        }
    };

    let on_size_change = move |ev: leptos::ev::Event| {
        let size = event_target_value(&ev)
            .parse::<u32>()
            .ok()
            .and_then(PageSize::new);
        if let Some(size) = size {
            on_page_size.run(size);
        }
    };

    let button_class = "px-3 py-1.5 bg-white border border-gray-200 rounded-lg shadow-sm \
                        disabled:opacity-50 disabled:cursor-not-allowed \
                        hover:bg-gray-50 hover:border-gray-300 transition-all text-sm text-gray-700";

    view! {
        <div class="flex items-center justify-end gap-6 px-4 py-3 border-t border-gray-100 text-sm text-gray-600">
            <label class="flex items-center gap-2">
                "Rows per page:"
                <select
                    class="px-2 py-1 border border-gray-300 rounded-lg bg-white cursor-pointer"
                    on:change=on_size_change
                >
                    {PageSize::options().map(|size| {
                        let rows = size.get();
                        view! {
                            <option
                                value=rows.to_string()
                                selected=move || page_size.get() == size
                            >
                                {rows}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>

            <span>
                {move || range_label(page_index.get(), page_size.get(), total.get())}
            </span>

            <div class="flex gap-2">
                <button type="button" class=button_class disabled=move || !can_go_prev() on:click=go_prev>
                    "←"
                </button>
                <button type="button" class=button_class disabled=move || !can_go_next() on:click=go_next>
                    "→"
                </button>
            </div>
        </div>
    }
}

fn last_page_index(total: u64, size: PageSize) -> u32 {
    let pages = total.div_ceil(size.get() as u64);
    pages.saturating_sub(1).min(u32::MAX as u64) as u32
}

/// "21-40 of 45"
fn range_label(page: u32, size: PageSize, total: u64) -> String {
    if total == 0 {
        return "0 of 0".to_string();
    }
    let first = page as u64 * size.get() as u64 + 1;
    let last = (first + size.get() as u64 - 1).min(total);
    if first > total {
        return format!("0 of {total}");
    }
    format!("{first}-{last} of {total}")
}

/// Tri-state filter: both, only `true`, only `false`
#[component]
pub fn FacetToggle(
    /// Label of the `true` position
    on_label: &'static str,
    /// Label of the `false` position
    off_label: &'static str,
    value: Signal<Option<bool>>,
    on_change: Callback<Option<bool>>,
) -> impl IntoView {
    let positions = [(None, "All"), (Some(true), on_label), (Some(false), off_label)];

    view! {
        <div class="inline-flex rounded-lg border border-gray-200 overflow-hidden text-sm" role="group">
            {positions.into_iter().map(|(position, label)| {
                view! {
                    <button
                        type="button"
                        class=move || {
                            if value.get() == position {
                                "px-3 py-1.5 bg-blue-600 text-white font-medium"
                            } else {
                                "px-3 py-1.5 bg-white text-gray-700 hover:bg-gray-50"
                            }
                        }
                        on:click=move |_| on_change.run(position)
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(rows: u32) -> PageSize {
        PageSize::new(rows).unwrap()
    }

    #[test]
    fn test_range_label() {
        let test_cases = [
            (0, 20, 0, "0 of 0"),
            (0, 20, 45, "1-20 of 45"),
            (2, 20, 45, "41-45 of 45"),
            (1, 5, 7, "6-7 of 7"),
            (9, 10, 12, "0 of 12"),
        ];
        for (page, rows, total, expected) in test_cases {
            assert_eq!(range_label(page, size(rows), total), expected, "page {} of {}", page, total);
        }
    }

    #[test]
    fn test_last_page_index() {
        assert_eq!(last_page_index(0, size(20)), 0);
        assert_eq!(last_page_index(20, size(20)), 0);
        assert_eq!(last_page_index(21, size(20)), 1);
        assert_eq!(last_page_index(45, size(10)), 4);
    }

    #[test]
    fn test_sort_arrow() {
        assert_eq!(sort_arrow(SortDirection::Ascending), "↑");
        assert_eq!(sort_arrow(SortDirection::Descending), "↓");
    }
}
