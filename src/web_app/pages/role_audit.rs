// web_app/pages/role_audit.rs - Role membership audit page
//
// Header for one role followed by the history of every group that held it:
// who added it, when it started and ended, who removed it, and why.
// The role is looked up first; a missing role is a terminal "not found".

use chrono::Utc;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::web_app::components::*;
use crate::web_app::links::DetailLink;
use crate::web_app::model::*;
use crate::web_app::pages::list_binding::use_list_binding;
use crate::web_app::server_fns::{found_role, get_role, list_role_audits, suggest_groups};
use crate::web_app::state::{Facet, Intent, ListOptions};

#[component]
pub fn RoleAuditPage() -> impl IntoView {
    let params = use_params_map();
    let role_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());

    let role = Resource::new(move || role_id.get(), get_role);

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <Suspense fallback=move || view! { <Loading message="Loading role..." /> }>
                {move || {
                    role.get().map(|lookup| match found_role(&role_id.get_untracked(), lookup) {
                        Ok(role) => {
                            // Keyed on the route id so switching roles starts a fresh table
                            let id = role_id.get_untracked();
                            view! {
                                <RoleHeader role=role />
                                <RoleAuditTable role_id=id />
                            }
                            .into_any()
                        }
                        Err(err) => {
                            tracing::warn!("Role lookup failed: {}", err);
                            view! { <NotFoundNotice what="Role" /> }.into_any()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn RoleHeader(role: RoleGroup) -> impl IntoView {
    let description = role.description.clone();
    let deleted = role.is_deleted();
    view! {
        <div class="mb-6">
            <div class="flex items-center gap-3">
                <h1 class="text-2xl font-bold text-gray-900">
                    <EntityLink link=DetailLink::role(&role) />
                </h1>
                <Show when=move || deleted>
                    <Badge variant="red">"Deleted"</Badge>
                </Show>
            </div>
            {description.map(|text| view! { <p class="mt-2 text-gray-600">{text}</p> })}
        </div>
    }
}

#[component]
fn RoleAuditTable(role_id: String) -> impl IntoView {
    let binding = use_list_binding::<AuditOrderBy, RoleMembership, Group, _, _, _, _>(
        ListOptions::role_audit(),
        move |view| list_role_audits(RoleAuditQuery::from_view(&role_id, &view)),
        suggest_groups,
    );
    let controller = binding.controller;
    let view = binding.view;

    let search_input = Signal::derive(move || controller.with(|c| c.search_input().to_string()));
    let suggestions = Signal::derive(move || {
        controller.with(|c| c.suggestions().iter().map(|group| group.name.clone()).collect::<Vec<_>>())
    });

    let facet = move |facet: Facet| Signal::derive(move || view.with(|v| v.facets.get(facet)));

    let sort_header = move |column: AuditOrderBy| {
        view! {
            <SortLabel
                label=column.label()
                active=Signal::derive(move || view.with(|v| v.sort_field == column))
                direction=Signal::derive(move || view.with(|v| v.header_direction(column)))
                on_toggle=binding.intent_callback(move |()| Intent::ToggleSort(column))
            />
        }
    };

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4 mb-4">
            <SearchAutocomplete
                input=search_input
                suggestions=suggestions
                on_input=Callback::new(move |text: String| binding.set_search_input(text))
                on_commit=binding.intent_callback(Intent::CommitSearch)
                placeholder="Search groups..."
            />
            <div class="flex items-center gap-3">
                <FacetToggle
                    on_label="Active"
                    off_label="Inactive"
                    value=facet(Facet::Active)
                    on_change=binding.intent_callback(|value: Option<bool>| Intent::ToggleFacet(Facet::Active, value))
                />
                <FacetToggle
                    on_label="Owners"
                    off_label="Members"
                    value=facet(Facet::Owner)
                    on_change=binding.intent_callback(|value: Option<bool>| Intent::ToggleFacet(Facet::Owner, value))
                />
            </div>
        </div>

        <section class="bg-white rounded-2xl shadow-sm border border-gray-100 overflow-hidden">
            {move || {
                controller.with(|c| {
                    if let Some(error) = c.results().error() {
                        return view! { <ErrorDisplay error=error.to_string() /> }.into_any();
                    }
                    if c.results().is_loading() {
                        return view! { <Loading message="Loading audit..." /> }.into_any();
                    }
                    let rows = c.rows().to_vec();
                    let filler = c.filler_rows();
                    let refreshing = c.is_refreshing();
                    view! {
                        <table class=if refreshing { "min-w-full opacity-75" } else { "min-w-full" }>
                            <thead class="bg-gray-50 text-left text-sm">
                                <tr>
                                    <th class="px-4 py-3">{sort_header(AuditOrderBy::Moniker)}</th>
                                    <th class="px-4 py-3 font-medium text-gray-500">"Group Type"</th>
                                    <th class="px-4 py-3 font-medium text-gray-500">"Member or Owner"</th>
                                    <th class="px-4 py-3 font-medium text-gray-500">"Added by"</th>
                                    <th class="px-4 py-3">{sort_header(AuditOrderBy::CreatedAt)}</th>
                                    <th class="px-4 py-3">{sort_header(AuditOrderBy::EndedAt)}</th>
                                    <th class="px-4 py-3 font-medium text-gray-500">"Removed by"</th>
                                    <th class="px-4 py-3 font-medium text-gray-500">"Justification"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-100 text-sm">
                                {rows.into_iter().map(|row| view! { <AuditRow row=row /> }).collect_view()}
                                {(0..filler).map(|_| view! {
                                    <tr class="h-12"><td colspan="8"></td></tr>
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
    }
}

#[component]
fn AuditRow(row: RoleMembership) -> impl IntoView {
    let now = Utc::now();
    let group = row.group.as_ref().map(DetailLink::group);
    let group_type = row.group.as_ref().map(|group| match DetailLink::group_type(group) {
        Some(link) => view! { <EntityLink link=link /> }.into_any(),
        None => view! { <span>{group.group_type.to_string()}</span> }.into_any(),
    });
    let added_by = row.created_actor.as_ref().map(DetailLink::user);
    let removed_by = row.removed_by(now).map(DetailLink::user);
    let started = row.created_at.format("%Y-%m-%d").to_string();
    let ending = match row.ended_at {
        Some(ended_at) => ended_at.format("%Y-%m-%d").to_string(),
        None => "Never".to_string(),
    };
    let ended = row.has_ended(now);
    let role_label = row.role_label();

    view! {
        <tr class=if ended { "h-12 bg-gray-50 text-gray-500" } else { "h-12 hover:bg-gray-50" }>
            <td class="px-4 py-2 font-medium">
                {group.map(|link| view! { <EntityLink link=link /> })}
            </td>
            <td class="px-4 py-2">{group_type}</td>
            <td class="px-4 py-2">
                <Badge variant=if row.is_owner { "blue" } else { "gray" }>{role_label}</Badge>
            </td>
            <td class="px-4 py-2">
                {added_by.map(|link| view! { <EntityLink link=link /> })}
            </td>
            <td class="px-4 py-2">{started}</td>
            <td class="px-4 py-2">{ending}</td>
            <td class="px-4 py-2">
                {removed_by.map(|link| view! { <EntityLink link=link /> })}
            </td>
            <td class="px-4 py-2 text-gray-600 truncate max-w-xs">{row.created_reason.clone()}</td>
        </tr>
    }
}
