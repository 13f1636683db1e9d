//! 认证守卫
//!
//! 挂载时订阅身份变化：身份存在则进入 `Authenticated` 并通知调用方加载数据，
//! 身份缺失则进入 `Unauthenticated` 并请求导航到登录页。
//! 守卫被 drop 时订阅随之注销。

use crate::auth::{AuthService, Identity, Subscription};
use crate::route::{AppRoute, Navigator};
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

/// 会话状态，只由认证回调修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated)
    }
}

impl From<Option<&Identity>> for Session {
    fn from(identity: Option<&Identity>) -> Self {
        match identity {
            Some(_) => Session::Authenticated,
            None => Session::Unauthenticated,
        }
    }
}

pub struct AuthGate {
    session: Rc<Cell<Session>>,
    _subscription: Subscription,
}

impl AuthGate {
    /// 注册监听
    ///
    /// `on_change` 在会话状态写入之后、导航请求之前调用。
    /// 订阅时会以当前身份立即回调一次。
    pub fn mount<A, N, F>(auth: &A, navigator: N, on_change: F) -> Self
    where
        A: AuthService + ?Sized,
        N: Navigator + 'static,
        F: Fn(Session) + 'static,
    {
        let session = Rc::new(Cell::new(Session::Unauthenticated));
        let state = session.clone();

        let subscription = auth.subscribe(Box::new(move |identity: Option<Identity>| {
            let next = Session::from(identity.as_ref());
            state.set(next);
            on_change(next);

            match identity {
                Some(identity) => info!(uid = %identity.uid, "auth gate open"),
                None => {
                    info!("auth gate closed, redirecting to login");
                    navigator.navigate_to(AppRoute::auth_failure_redirect());
                }
            }
        }));

        Self {
            session,
            _subscription: subscription,
        }
    }

    pub fn session(&self) -> Session {
        self.session.get()
    }
}
