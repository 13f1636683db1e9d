//! 帖子列表界面的状态与操作
//!
//! 存储是唯一的数据源，内存中的列表只是缓存：每次写操作完成后都整体重新拉取。
//! 界面层通过 [`PostListScreen::set_observer`] 获得每次状态变化后的视图模型。

use crate::auth::AuthService;
use crate::error::Result;
use crate::gate::{AuthGate, Session};
use crate::route::Navigator;
use crate::store::DocumentStore;
use crate::task::Spawner;
use postboard_shared::{NewPost, Post};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

// =========================================================
// 视图模型
// =========================================================

/// 新建帖子的草稿（模态框）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// 操作结果提示（非致命）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// 由界面在显示时分配，内容相同的两次提示也互不相等
    pub seq: u64,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            seq: 0,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            seq: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListView {
    pub posts: Vec<Post>,
    pub draft: Draft,
    pub notification: Option<Notification>,
    pub loading: bool,
}

/// 渲染结果：未认证时什么都不渲染
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Hidden,
    Visible(PostListView),
}

impl ScreenView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, ScreenView::Hidden)
    }
}

// =========================================================
// 界面状态
// =========================================================

struct ScreenState {
    session: Session,
    mounted: bool,
    posts: Vec<Post>,
    draft: Draft,
    notification: Option<Notification>,
    loading: bool,
    /// 每次拉取开始时递增，只有最新一次拉取的结果会被采用
    fetch_generation: u64,
    notification_seq: u64,
}

impl ScreenState {
    fn show(&mut self, mut notification: Notification) {
        self.notification_seq += 1;
        notification.seq = self.notification_seq;
        self.notification = Some(notification);
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            session: Session::Unauthenticated,
            mounted: true,
            posts: Vec::new(),
            draft: Draft::default(),
            notification: None,
            loading: false,
            fetch_generation: 0,
            notification_seq: 0,
        }
    }
}

type Observer = Rc<dyn Fn(ScreenView)>;

struct Inner<S> {
    store: S,
    collection: String,
    state: RefCell<ScreenState>,
    observer: RefCell<Option<Observer>>,
}

/// 帖子列表界面
///
/// 克隆只复制句柄，所有克隆共享同一份状态。
pub struct PostListScreen<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for PostListScreen<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: DocumentStore + 'static> PostListScreen<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                collection: collection.into(),
                state: RefCell::new(ScreenState::default()),
                observer: RefCell::new(None),
            }),
        }
    }

    /// 挂载：启动认证守卫，认证通过时把首次加载交给 `spawner`
    ///
    /// 返回的 [`MountedScreen`] 被 drop 时卸载界面并注销认证监听。
    pub fn mount<A, N, P>(&self, auth: &A, navigator: N, spawner: P) -> MountedScreen<S>
    where
        A: AuthService + ?Sized,
        N: Navigator + 'static,
        P: Spawner + 'static,
    {
        self.inner.state.borrow_mut().mounted = true;

        let screen = self.clone();
        let gate = AuthGate::mount(auth, navigator, move |session| {
            screen.set_session(session);
            if session.is_authenticated() {
                let screen = screen.clone();
                spawner.spawn(Box::pin(async move {
                    // 失败已记录并转为通知
                    let _ = screen.fetch().await;
                }));
            }
        });

        MountedScreen {
            screen: self.clone(),
            gate,
        }
    }

    /// 注册视图观察者，每次状态变化后以最新视图调用
    pub fn set_observer(&self, observer: impl Fn(ScreenView) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
        self.notify();
    }

    pub fn render(&self) -> ScreenView {
        let state = self.inner.state.borrow();
        if !state.session.is_authenticated() {
            return ScreenView::Hidden;
        }
        ScreenView::Visible(PostListView {
            posts: state.posts.clone(),
            draft: state.draft.clone(),
            notification: state.notification.clone(),
            loading: state.loading,
        })
    }

    pub fn session(&self) -> Session {
        self.inner.state.borrow().session
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    fn notify(&self) {
        if !self.is_mounted() {
            return;
        }
        let observer = self.inner.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(self.render());
        }
    }

    /// 修改状态并通知观察者；已卸载时丢弃修改
    fn update(&self, f: impl FnOnce(&mut ScreenState)) {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return;
            }
            f(&mut state);
        }
        self.notify();
    }

    fn is_live(&self) -> bool {
        let state = self.inner.state.borrow();
        state.mounted && state.session.is_authenticated()
    }

    /// 认证回调写入会话；失去身份时清空缓存与草稿
    fn set_session(&self, session: Session) {
        self.update(|state| {
            state.session = session;
            if !session.is_authenticated() {
                state.posts.clear();
                state.draft = Draft::default();
                state.notification = None;
                state.loading = false;
            }
        });
    }

    /// 卸载：之后完成的请求不再修改状态
    pub fn unmount(&self) {
        self.inner.state.borrow_mut().mounted = false;
        self.inner.observer.borrow_mut().take();
    }

    // =========================================================
    // 数据操作
    // =========================================================

    /// 拉取整个集合并整体替换内存列表；未认证时不做任何事
    pub async fn fetch(&self) -> Result<()> {
        if !self.is_live() {
            debug!("fetch skipped: not authenticated");
            return Ok(());
        }
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.fetch_generation += 1;
            state.fetch_generation
        };
        self.update(|state| state.loading = true);

        let result = self.inner.store.list_all(&self.inner.collection).await;

        if !self.is_live() {
            debug!("fetch result discarded: screen no longer live");
            return result.map(|_| ());
        }
        if self.inner.state.borrow().fetch_generation != generation {
            debug!(generation, "fetch result discarded: superseded by a newer fetch");
            return result.map(|_| ());
        }

        match result {
            Ok(documents) => {
                let total = documents.len();
                let posts: Vec<Post> = documents
                    .into_iter()
                    .filter_map(|doc| {
                        let post = Post::from_fields(doc.id.clone(), &doc.fields);
                        if post.is_none() {
                            warn!(id = %doc.id, "skipping document without title/content");
                        }
                        post
                    })
                    .collect();
                debug!(total, kept = posts.len(), "posts fetched");
                self.update(|state| {
                    state.posts = posts;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "fetch failed");
                self.update(|state| {
                    state.loading = false;
                    state.show(Notification::error(format!("Failed to load posts: {e}")));
                });
                Err(e)
            }
        }
    }

    /// 新建帖子
    ///
    /// 任一字段为空时静默放弃：不发请求，不改状态。
    pub async fn add(&self, title: &str, content: &str) -> Result<()> {
        let Some(post) = NewPost::new(title, content) else {
            debug!("add ignored: empty title or content");
            return Ok(());
        };
        if !self.is_live() {
            debug!("add skipped: not authenticated");
            return Ok(());
        }

        match self
            .inner
            .store
            .insert(&self.inner.collection, post.into_fields())
            .await
        {
            Ok(id) => {
                info!(%id, "post added");
                self.update(|state| {
                    state.draft = Draft::default();
                    state.show(Notification::success("Post added"));
                });
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "add failed");
                self.update(|state| {
                    state.show(Notification::error(format!("Failed to add post: {e}")));
                });
                return Err(e);
            }
        }

        self.fetch().await
    }

    /// 以当前草稿内容新建帖子
    pub async fn submit_draft(&self) -> Result<()> {
        let (title, content) = {
            let state = self.inner.state.borrow();
            (state.draft.title.clone(), state.draft.content.clone())
        };
        self.add(&title, &content).await
    }

    /// 删除帖子，完成后重新拉取
    pub async fn delete(&self, post_id: &str) -> Result<()> {
        if !self.is_live() {
            debug!("delete skipped: not authenticated");
            return Ok(());
        }

        if let Err(e) = self
            .inner
            .store
            .delete_by_id(&self.inner.collection, post_id)
            .await
        {
            warn!(id = post_id, error = %e, code = e.error_code(), "delete failed");
            self.update(|state| {
                state.show(Notification::error(format!("Failed to delete post: {e}")));
            });
            return Err(e);
        }

        info!(id = post_id, "post deleted");
        self.update(|state| state.show(Notification::success("Post deleted")));
        self.fetch().await
    }

    // =========================================================
    // 草稿与模态框
    // =========================================================

    pub fn open_form(&self) {
        self.update(|state| state.draft.visible = true);
    }

    /// 取消：关闭模态框并清空草稿
    pub fn cancel_form(&self) {
        self.update(|state| state.draft = Draft::default());
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.update(|state| state.draft.title = title);
    }

    pub fn set_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.update(|state| state.draft.content = content);
    }

    pub fn dismiss_notification(&self) {
        self.update(|state| state.notification = None);
    }
}

/// 已挂载的界面
///
/// drop 时先卸载界面，再注销认证监听。
pub struct MountedScreen<S: DocumentStore + 'static> {
    screen: PostListScreen<S>,
    gate: AuthGate,
}

impl<S: DocumentStore + 'static> MountedScreen<S> {
    pub fn screen(&self) -> &PostListScreen<S> {
        &self.screen
    }

    pub fn session(&self) -> Session {
        self.gate.session()
    }
}

impl<S: DocumentStore + 'static> Drop for MountedScreen<S> {
    fn drop(&mut self) {
        self.screen.unmount();
    }
}
