//! 侧边导航
//!
//! 菜单表来自 `web::route::NAV_ENTRIES`，按角色过滤后照声明顺序
//! 渲染。带子项的条目渲染为可展开分组。

use leptos::prelude::*;
use mudra_shared::Role;

use crate::auth::{logout, use_auth};
use crate::web::route::{AppRoute, NAV_ENTRIES, NavEntry};
use crate::web::router::use_router;

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let role = Signal::derive(move || auth.state.get().session.as_ref().map(|s| s.role));
    // 当前展开的分组
    let (expanded, set_expanded) = signal(Option::<&'static str>::None);

    let entries = move || {
        let role = role.get().unwrap_or(Role::Agent);
        NAV_ENTRIES
            .iter()
            .filter(|entry| entry.visible_for(role))
            .collect::<Vec<&'static NavEntry>>()
    };

    let on_logout = move |_| logout(auth);

    view! {
        <aside class="w-64 shrink-0 bg-[#1a3a6b] text-white min-h-screen flex flex-col">
            <div class="px-6 py-6 border-b border-white/10">
                <h1 class="text-xl font-bold">"MudraPlus"</h1>
                <p class="text-xs text-slate-300 mt-1">"Loan Management"</p>
            </div>

            <nav class="flex-1 px-3 py-4 space-y-1">
                <For
                    each=entries
                    key=|entry| entry.label
                    children=move |entry: &'static NavEntry| {
                        let current = router.current_route();
                        if entry.children.is_empty() {
                            let route = AppRoute::from_path(entry.path);
                            let is_active = move || current.get() == route;
                            view! {
                                <button
                                    class="w-full text-left px-3 py-2.5 rounded-lg text-sm font-medium transition hover:bg-white/10"
                                    class=("bg-white/15", is_active)
                                    on:click=move |_| router.navigate(entry.path)
                                >
                                    {entry.label}
                                </button>
                            }
                            .into_any()
                        } else {
                            let is_open = move || expanded.get() == Some(entry.label);
                            // 任一子项处于当前路由时分组高亮
                            let group_active = move || {
                                entry
                                    .children
                                    .iter()
                                    .any(|child| current.get() == AppRoute::from_path(child.path))
                            };
                            view! {
                                <div>
                                    <button
                                        class="w-full flex items-center justify-between px-3 py-2.5 rounded-lg text-sm font-medium transition hover:bg-white/10"
                                        class=("bg-white/15", group_active)
                                        on:click=move |_| {
                                            set_expanded
                                                .update(|open| {
                                                    *open = if *open == Some(entry.label) {
                                                        None
                                                    } else {
                                                        Some(entry.label)
                                                    };
                                                });
                                        }
                                    >
                                        <span>{entry.label}</span>
                                        <span class="text-xs">
                                            {move || if is_open() { "▾" } else { "▸" }}
                                        </span>
                                    </button>
                                    <Show when=is_open>
                                        <div class="ml-3 mt-1 space-y-1">
                                            {entry
                                                .children
                                                .iter()
                                                .map(|child| {
                                                    let route = AppRoute::from_path(child.path);
                                                    let is_active = move || current.get() == route;
                                                    view! {
                                                        <button
                                                            class="w-full text-left px-3 py-2 rounded-lg text-sm text-slate-200 transition hover:bg-white/10"
                                                            class=("bg-white/15", is_active)
                                                            on:click=move |_| router.navigate(child.path)
                                                        >
                                                            {child.label}
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </Show>
                                </div>
                            }
                            .into_any()
                        }
                    }
                />
            </nav>

            <div class="px-3 py-4 border-t border-white/10">
                <button
                    class="w-full text-left px-3 py-2.5 rounded-lg text-sm font-medium text-red-300 transition hover:bg-white/10"
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>
        </aside>
    }
}
