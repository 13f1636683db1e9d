//! 认证模块
//!
//! - `AuthService`: 身份变化通知流，订阅返回 [`Subscription`] 守卫
//! - `FirebaseAuth`: 基于 Identity Toolkit REST API 的生产实现
//!
//! 会话通过 [`SessionStorage`] 持久化，刷新页面后自动恢复。

use crate::config::AppConfig;
use crate::error::{PostboardError, Result};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use postboard_shared::STORAGE_SESSION_KEY;
use postboard_shared::identity::{SignInResponse, SignInWithPasswordRequest};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{info, warn};

pub use postboard_shared::Identity;

// =========================================================
// 订阅守卫
// =========================================================

/// 订阅句柄
///
/// drop 时自动注销回调，无论以何种路径离开作用域。
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

// =========================================================
// 抽象接口
// =========================================================

pub type AuthCallback = Box<dyn Fn(Option<Identity>)>;

/// 身份变化通知流
pub trait AuthService {
    /// 注册回调：立即以当前状态调用一次，此后每次变化再调用
    fn subscribe(&self, callback: AuthCallback) -> Subscription;
}

/// 为存储请求提供 Bearer 凭据
pub trait IdTokenProvider {
    fn id_token(&self) -> Option<String>;
}

/// 会话持久化接口
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

impl<T: AuthService> AuthService for Rc<T> {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        (**self).subscribe(callback)
    }
}

impl<T: IdTokenProvider> IdTokenProvider for Rc<T> {
    fn id_token(&self) -> Option<String> {
        (**self).id_token()
    }
}

// =========================================================
// 身份通知流
// =========================================================

#[derive(Default)]
struct StreamInner {
    current: Option<Identity>,
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn(Option<Identity>)>)>,
}

/// 持有当前身份与监听者列表
///
/// 回调在借用释放后调用，因此回调内可以再次订阅或注销。
#[derive(Clone, Default)]
pub struct AuthStream {
    inner: Rc<RefCell<StreamInner>>,
}

impl AuthStream {
    pub fn new(current: Option<Identity>) -> Self {
        let stream = Self::default();
        stream.inner.borrow_mut().current = current;
        stream
    }

    pub fn current(&self) -> Option<Identity> {
        self.inner.borrow().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// 更新身份并通知所有监听者
    pub fn emit(&self, identity: Option<Identity>) {
        let listeners: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = identity.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(identity.clone());
        }
    }
}

impl AuthService for AuthStream {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let callback: Rc<dyn Fn(Option<Identity>)> = Rc::from(callback);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, callback.clone()));
            (id, inner.current.clone())
        };

        callback(current);

        let weak: Weak<RefCell<StreamInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(i, _)| *i != id);
            }
        })
    }
}

// =========================================================
// 生产环境实现 (Firebase Authentication)
// =========================================================

pub struct FirebaseAuth<C, S> {
    client: C,
    storage: S,
    sign_in_url: String,
    stream: AuthStream,
}

impl<C: HttpClient, S: SessionStorage> FirebaseAuth<C, S> {
    /// 创建认证服务，并从存储中恢复上次的会话
    pub fn new(client: C, storage: S, config: &AppConfig) -> Self {
        let sign_in_url = format!(
            "{}/v1/accounts:signInWithPassword?key={}",
            config.auth_endpoint,
            urlencoding::encode(&config.api_key)
        );
        let restored = Self::restore(&storage);
        Self {
            client,
            storage,
            sign_in_url,
            stream: AuthStream::new(restored),
        }
    }

    fn restore(storage: &S) -> Option<Identity> {
        let raw = storage.get(STORAGE_SESSION_KEY)?;
        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                info!(uid = %identity.uid, "session restored");
                Some(identity)
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable session");
                storage.remove(STORAGE_SESSION_KEY);
                None
            }
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.stream.current()
    }

    /// 邮箱密码登录，成功后持久化会话并通知订阅者
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let req = HttpRequest::new(&self.sign_in_url, HttpMethod::Post).with_json(
            &SignInWithPasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )?;

        let resp = self.client.send(req).await?;
        if !resp.ok() {
            let message = resp.error_message();
            warn!(status = resp.status, %message, "sign-in rejected");
            return Err(match resp.status {
                400 => PostboardError::Auth(message),
                status => PostboardError::from_status(status, message),
            });
        }

        let identity = Identity::from(resp.json::<SignInResponse>()?);
        match serde_json::to_string(&identity) {
            Ok(raw) => {
                if !self.storage.set(STORAGE_SESSION_KEY, &raw) {
                    warn!("session could not be persisted");
                }
            }
            Err(e) => warn!(error = %e, "session could not be serialized"),
        }

        info!(uid = %identity.uid, "signed in");
        self.stream.emit(Some(identity.clone()));
        Ok(identity)
    }

    /// 注销：清除持久化会话并通知订阅者
    pub fn sign_out(&self) {
        self.storage.remove(STORAGE_SESSION_KEY);
        info!("signed out");
        self.stream.emit(None);
    }
}

impl<C, S> AuthService for FirebaseAuth<C, S> {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        self.stream.subscribe(callback)
    }
}

impl<C, S> IdTokenProvider for FirebaseAuth<C, S> {
    fn id_token(&self) -> Option<String> {
        self.stream.current().map(|identity| identity.id_token)
    }
}
