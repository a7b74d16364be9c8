//! 顶栏：标题、当前账号、登出

use leptos::prelude::*;

use crate::auth::{logout, use_auth};

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();

    let admin_name = move || {
        auth.state
            .get()
            .session
            .as_ref()
            .map(|s| s.admin_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Admin User".to_string())
    };
    let role_label = move || {
        auth.state
            .get()
            .session
            .as_ref()
            .map(|s| s.role.as_str().to_uppercase())
            .unwrap_or_default()
    };
    let initial = move || admin_name().chars().next().unwrap_or('A').to_string();

    view! {
        <header class="sticky top-0 z-40 bg-white border-b border-slate-200">
            <div class="px-4 md:px-8 py-4 flex items-center justify-between gap-4">
                <div>
                    <h1 class="text-2xl hidden md:block font-bold text-gray-900">
                        "Loan Management System"
                    </h1>
                    <p class="text-sm hidden md:block text-gray-500">
                        "Comprehensive finance management platform"
                    </p>
                </div>

                <div class="flex items-center gap-4">
                    <div class="flex items-center gap-3 pl-4 border-l border-slate-200">
                        <div class="w-10 h-10 rounded-full bg-[#1a3a6b] text-white flex items-center justify-center font-bold">
                            {initial}
                        </div>
                        <div class="hidden md:block">
                            <p class="text-sm font-semibold text-slate-800">{admin_name}</p>
                            <p class="text-xs text-slate-500">{role_label}</p>
                        </div>
                    </div>
                    <button
                        class="px-3 py-2 rounded-lg text-sm font-medium text-red-600 hover:bg-red-50 transition"
                        on:click=move |_| logout(auth)
                    >
                        "Logout"
                    </button>
                </div>
            </div>
        </header>
    }
}
