//! Postboard 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web`: 浏览器原生 API 封装与路由服务
//! - `auth`: 认证上下文
//! - `components`: UI 组件层
//!
//! 界面状态与业务规则全部在 `postboard` 核心库中，这里只负责渲染和事件绑定。

mod auth;
mod components {
    pub mod add_post_dialog;
    pub mod home;
    pub mod login;
    pub mod post_card;
}
mod config;
pub mod logging;

// 原生 Web API 封装模块
// 直接使用 web_sys，替代 gloo-* 系列 crate，以减小 WASM 二进制体积。
pub(crate) mod web;

use crate::auth::AppContext;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::config::BuildEnv;

use leptos::prelude::*;
use postboard::{AppConfig, AppRoute};
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取构建期配置
    let config = match AppConfig::from_env(&BuildEnv) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid build configuration");
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div role="alert" class="alert alert-error max-w-lg">
                        <span>{e.to_string()}</span>
                    </div>
                </div>
            }
            .into_any();
        }
    };

    // 2. 创建应用上下文（恢复会话并订阅认证状态）
    provide_context(AppContext::new(config));

    view! {
        // 3. 路由器只负责匹配，认证守卫由页面自己挂载
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
    .into_any()
}
