//! Postboard 核心库
//!
//! 与平台无关的帖子列表逻辑：
//! - `store`: 文档存储接口与 Firestore REST 实现
//! - `auth`: 身份通知流与 Firebase Authentication REST 实现
//! - `gate`: 认证守卫
//! - `screen`: 帖子列表界面的状态与操作
//! - `route`: 路由与导航接口
//!
//! 所有外部协作者（HTTP、存储、认证、导航、任务调度）都以 trait 注入，
//! 浏览器实现位于 `postboard-frontend`。

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod request;
pub mod route;
pub mod screen;
pub mod store;
pub mod task;

pub use auth::{AuthService, FirebaseAuth, Identity, IdTokenProvider, SessionStorage, Subscription};
pub use config::{AppConfig, EnvAdapter};
pub use error::{PostboardError, Result};
pub use gate::{AuthGate, Session};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::{AppRoute, Navigator};
pub use screen::{Draft, MountedScreen, Notification, PostListScreen, PostListView, ScreenView, Severity};
pub use store::{DocumentStore, FirestoreStore, StoredDocument};
pub use task::Spawner;

pub use postboard_shared::{NewPost, Post};
