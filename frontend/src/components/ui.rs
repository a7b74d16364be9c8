//! 页面共用的小组件：加载圈、错误/成功横幅、空态
//! 以及状态徽章的配色表

use leptos::prelude::*;
use mudra_shared::models::{KycStatus, LoanStatus};

pub fn kyc_badge_class(status: KycStatus) -> &'static str {
    match status {
        KycStatus::Pending => "px-2 py-1 text-xs font-semibold rounded bg-amber-100 text-amber-800",
        KycStatus::Submitted => "px-2 py-1 text-xs font-semibold rounded bg-blue-100 text-blue-800",
        KycStatus::Verified => "px-2 py-1 text-xs font-semibold rounded bg-green-100 text-green-800",
        KycStatus::Rejected => "px-2 py-1 text-xs font-semibold rounded bg-red-100 text-red-800",
    }
}

pub fn loan_badge_class(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Requested => {
            "px-2 py-1 text-xs font-semibold rounded bg-amber-100 text-amber-800"
        }
        LoanStatus::Applied => "px-2 py-1 text-xs font-semibold rounded bg-blue-100 text-blue-800",
        LoanStatus::Approve => {
            "px-2 py-1 text-xs font-semibold rounded bg-indigo-100 text-indigo-800"
        }
        LoanStatus::Active => "px-2 py-1 text-xs font-semibold rounded bg-green-100 text-green-800",
        LoanStatus::Closed => "px-2 py-1 text-xs font-semibold rounded bg-slate-100 text-slate-700",
        LoanStatus::Defaulted => "px-2 py-1 text-xs font-semibold rounded bg-red-100 text-red-800",
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="inline-block h-8 w-8 animate-spin rounded-full border-4 border-slate-300 border-t-[#1a3a6b]"></span>
        </div>
    }
}

/// 可关闭的错误横幅；列表页出错时已有数据保持展示，横幅叠加在上方
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="flex items-center justify-between gap-3 p-4 bg-red-50 border border-red-200 rounded-lg text-red-700">
                <span class="text-sm font-medium">
                    {move || message.get().unwrap_or_default()}
                </span>
                <button
                    class="text-red-500 hover:text-red-700 font-bold"
                    on:click=move |_| on_dismiss.run(())
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="flex items-center gap-3 p-4 bg-emerald-50 border border-emerald-200 rounded-lg text-emerald-700">
                <span class="text-sm font-medium">
                    {move || message.get().unwrap_or_default()}
                </span>
            </div>
        </Show>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="text-center py-16 text-slate-500">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// 列表页底部的翻页条
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] has_next: Signal<bool>,
    #[prop(into)] on_prev: Callback<()>,
    #[prop(into)] on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-end gap-3 px-6 py-4 border-t border-slate-200">
            <button
                class="px-3 py-1.5 rounded-lg border border-slate-300 text-sm disabled:opacity-40"
                disabled=move || page.get() <= 1
                on:click=move |_| on_prev.run(())
            >
                "Previous"
            </button>
            <span class="text-sm text-slate-600">{move || format!("Page {}", page.get())}</span>
            <button
                class="px-3 py-1.5 rounded-lg border border-slate-300 text-sm disabled:opacity-40"
                disabled=move || !has_next.get()
                on:click=move |_| on_next.run(())
            >
                "Next"
            </button>
        </div>
    }
}
