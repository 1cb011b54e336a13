// web_app/pages/roles.rs - Role list page
//
// Paginated, sortable, searchable list of every role. A committed search
// that matches exactly one role jumps straight to that role.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::web_app::components::*;
use crate::web_app::links::{role_path, DetailLink};
use crate::web_app::model::*;
use crate::web_app::pages::list_binding::use_list_binding;
use crate::web_app::server_fns::{list_roles, suggest_roles};
use crate::web_app::state::{Intent, ListOptions};

#[component]
pub fn ListRolesPage() -> impl IntoView {
    let binding = use_list_binding::<RoleOrderBy, RoleGroup, RoleGroup, _, _, _, _>(
        ListOptions::role_list(),
        |view| list_roles(RoleListQuery::from_view(&view)),
        suggest_roles,
    );
    let controller = binding.controller;
    let view = binding.view;

    // Single-match redirect; replaces the history entry so "back" skips
    // the one-row list
    let navigate = use_navigate();
    Effect::new(move |_| {
        controller.track();
        let target = controller
            .try_update_untracked(|c| c.take_redirect())
            .flatten();
        if let Some(role) = target {
            navigate(
                &role_path(&role),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let search_input = Signal::derive(move || controller.with(|c| c.search_input().to_string()));
    let suggestions = Signal::derive(move || {
        controller.with(|c| c.suggestions().iter().map(|role| role.name.clone()).collect::<Vec<_>>())
    });
    let on_input = Callback::new(move |text: String| binding.set_search_input(text));
    let on_commit = binding.intent_callback(Intent::CommitSearch);

    let sort_header = move |label: &'static str, column: RoleOrderBy| {
        view! {
            <SortLabel
                label=label
                active=Signal::derive(move || view.with(|v| v.sort_field == column))
                direction=Signal::derive(move || view.with(|v| v.header_direction(column)))
                on_toggle=binding.intent_callback(move |()| Intent::ToggleSort(column))
            />
        }
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex flex-wrap items-center justify-between gap-4 mb-6">
                <h1 class="text-2xl font-bold text-gray-900">"Roles"</h1>
                <SearchAutocomplete
                    input=search_input
                    suggestions=suggestions
                    on_input=on_input
                    on_commit=on_commit
                    placeholder="Search roles..."
                />
            </div>

            <section class="bg-white rounded-2xl shadow-sm border border-gray-100 overflow-hidden">
                {move || {
                    controller.with(|c| {
                        if let Some(error) = c.results().error() {
                            return view! { <ErrorDisplay error=error.to_string() /> }.into_any();
                        }
                        if c.results().is_loading() {
                            return view! { <Loading message="Loading roles..." /> }.into_any();
                        }
                        let rows = c.rows().to_vec();
                        let filler = c.filler_rows();
                        view! {
                            <table class="min-w-full divide-y divide-gray-100">
                                <thead class="bg-gray-50 text-left text-sm">
                                    <tr>
                                        <th class="px-4 py-3">{sort_header("Name", RoleOrderBy::Name)}</th>
                                        <th class="px-4 py-3 font-medium text-gray-500">"Description"</th>
                                        <th class="px-4 py-3">{sort_header("Created", RoleOrderBy::CreatedAt)}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-gray-100 text-sm">
                                    {rows.into_iter().map(|role| view! { <RoleRow role=role /> }).collect_view()}
                                    {(0..filler).map(|_| view! {
                                        <tr class="h-12"><td colspan="3"></td></tr>
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    })
                }}

                <TablePagination
                    page_index=Signal::derive(move || view.with(|v| v.page_index))
                    page_size=Signal::derive(move || view.with(|v| v.page_size))
                    total=Signal::derive(move || controller.with(|c| c.total()))
                    on_page=binding.intent_callback(Intent::ChangePage)
                    on_page_size=binding.intent_callback(Intent::ChangePageSize)
                />
            </section>
        </div>
    }
}

#[component]
fn RoleRow(role: RoleGroup) -> impl IntoView {
    let created = role.created_at.format("%Y-%m-%d").to_string();
    let description = role.description.clone().unwrap_or_default();
    view! {
        <tr class="h-12 hover:bg-gray-50">
            <td class="px-4 py-2 font-medium">
                <EntityLink link=DetailLink::role(&role) />
            </td>
            <td class="px-4 py-2 text-gray-600 truncate max-w-md">{description}</td>
            <td class="px-4 py-2 text-gray-500">{created}</td>
        </tr>
    }
}
