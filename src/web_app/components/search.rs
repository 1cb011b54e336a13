// web_app/components/search.rs - Search-related components
//
// The autocomplete box above each list. Typing only feeds the suggestion
// fetcher; the list itself is filtered when the user submits or picks a
// suggestion.

use leptos::prelude::*;

/// Search box with a suggestion dropdown
#[component]
pub fn SearchAutocomplete(
    /// Raw text in the box
    input: Signal<String>,
    /// Candidate labels for the current input
    suggestions: Signal<Vec<String>>,
    /// Called on every keystroke
    on_input: Callback<String>,
    /// Called when a search is submitted or a suggestion picked
    on_commit: Callback<Option<String>>,
    #[prop(default = "Search...")]
    placeholder: &'static str,
) -> impl IntoView {
    // Whether the dropdown is showing; purely presentational
    let open = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        open.set(false);
        on_commit.run(committed_value(&input.get_untracked()));
    };

    let pick = move |label: String| {
        open.set(false);
        on_input.run(label.clone());
        on_commit.run(Some(label));
    };

    view! {
        <form on:submit=on_submit class="relative w-full max-w-md">
            <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                <span class="text-gray-400">"🔍"</span>
            </div>
            <input
                type="search"
                placeholder=placeholder
                autocomplete="off"
                class="w-full pl-10 pr-4 py-2 border border-gray-300 rounded-lg \
                       focus:ring-2 focus:ring-blue-500 focus:border-transparent \
                       outline-none transition-shadow shadow-sm"
                prop:value=move || input.get()
                on:input=move |ev| {
                    open.set(true);
                    on_input.run(event_target_value(&ev));
                }
                on:focus=move |_| open.set(true)
                on:blur=move |_| open.set(false)
            />
            <Show when=move || open.get() && !suggestions.with(|s| s.is_empty())>
                <ul class="absolute z-30 mt-1 w-full bg-white border border-gray-200 rounded-lg shadow-lg max-h-64 overflow-y-auto">
                    <For
                        each=move || suggestions.get()
                        key=|label| label.clone()
                        children=move |label| {
                            let shown = label.clone();
                            view! {
                                <li>
                                    <button
                                        type="button"
                                        class="w-full text-left px-4 py-2 text-sm text-gray-700 hover:bg-blue-50"
                                        // mousedown fires before the input's blur closes the list
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            pick(label.clone());
                                        }
                                    >
                                        {shown}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </form>
    }
}

/// An empty box clears the filter rather than searching for "".
fn committed_value(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_value() {
        assert_eq!(committed_value(""), None);
        assert_eq!(committed_value("eng"), Some("eng".to_string()));
        // Whitespace is a real query
        assert_eq!(committed_value(" "), Some(" ".to_string()));
    }
}
