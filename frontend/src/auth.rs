//! 认证上下文
//!
//! 持有全局的 [`FirebaseAuth`] 与配置，并把认证状态桥接为 Leptos 信号。
//! 重定向不在这里处理，由各页面的 `AuthGate` 负责。

use crate::web::{BrowserHttpClient, BrowserStorage};
use leptos::prelude::*;
use postboard::{AppConfig, AuthService, FirebaseAuth, Identity, Subscription};
use std::rc::Rc;

pub type WebAuth = FirebaseAuth<BrowserHttpClient, BrowserStorage>;

/// 应用上下文
///
/// 所有字段都是 arena 句柄，可以自由复制进闭包。
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    pub auth: StoredValue<Rc<WebAuth>, LocalStorage>,
    /// 当前身份（只读）
    pub identity: ReadSignal<Option<Identity>>,
    _subscription: StoredValue<Subscription, LocalStorage>,
}

impl AppContext {
    /// 创建认证服务（会从存储恢复上次的会话）并订阅其状态
    pub fn new(config: AppConfig) -> Self {
        let auth = Rc::new(WebAuth::new(BrowserHttpClient, BrowserStorage, &config));
        let (identity, set_identity) = signal(auth.current());
        let subscription = auth.subscribe(Box::new(move |id: Option<Identity>| {
            set_identity.set(id);
        }));

        Self {
            config: StoredValue::new(config),
            auth: StoredValue::new_local(auth),
            identity,
            _subscription: StoredValue::new_local(subscription),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.with(Option::is_some)
    }

    pub fn sign_out(&self) {
        self.auth.with_value(|auth| auth.sign_out());
    }
}

/// 从 Context 获取应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
