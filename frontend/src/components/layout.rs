//! 受保护页面的外框：侧边栏 + 顶栏 + 内容区

use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::sidebar::Sidebar;

#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-slate-100">
            <Sidebar />
            <div class="flex-1 flex flex-col min-w-0">
                <Header />
                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
        </div>
    }
}
