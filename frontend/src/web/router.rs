//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 认证守卫不在这里，由各页面的 `AuthGate` 负责。

use leptos::prelude::*;
use postboard::{AppRoute, Navigator};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        Self {
            current_route,
            set_route,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与应用同生命周期
        closure.forget();
    }
}

impl Navigator for RouterService {
    fn navigate_to(&self, route: AppRoute) {
        if self.current_route.get_untracked() == route {
            return;
        }
        tracing::debug!(%route, protected = route.requires_auth(), "navigate");
        push_history_state(route.to_path());
        self.set_route.set(route);
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(children: Children) -> impl IntoView {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);

    children()
}

/// 路由出口组件：根据当前路由渲染对应的组件
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}
