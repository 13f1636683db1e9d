use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use postboard::auth::AuthStream;
use postboard::store::StoredDocument;
use postboard::{
    AppRoute, DocumentStore, Draft, Identity, MountedScreen, Navigator, NewPost, PostListScreen,
    PostListView, Result, ScreenView, Spawner,
};
use postboard_shared::firestore::Fields;
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

/// In-memory store that assigns random ids and logs every call
#[derive(Clone, Default)]
struct MemoryStore {
    docs: Rc<RefCell<Vec<StoredDocument>>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl MemoryStore {
    fn with_posts(posts: &[(&str, &str, &str)]) -> Self {
        let store = Self::default();
        for (id, title, content) in posts {
            store.docs.borrow_mut().push(StoredDocument {
                id: id.to_string(),
                fields: NewPost::new(*title, *content).unwrap().into_fields(),
            });
        }
        store
    }

    fn writes(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|entry| !entry.starts_with("list"))
            .count()
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        self.log.borrow_mut().push(format!("list:{collection}"));
        Ok(self.docs.borrow().clone())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        self.log.borrow_mut().push(format!("insert:{collection}"));
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.docs.borrow_mut().push(StoredDocument {
            id: id.clone(),
            fields,
        });
        Ok(id)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("delete:{collection}:{id}"));
        self.docs.borrow_mut().retain(|doc| doc.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator {
    visits: Rc<RefCell<Vec<AppRoute>>>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: AppRoute) {
        self.visits.borrow_mut().push(route);
    }
}

#[derive(Clone, Default)]
struct QueuedSpawner {
    queue: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
}

impl QueuedSpawner {
    async fn run_pending(&self) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            };
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl Spawner for QueuedSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.queue.borrow_mut().push(task);
    }
}

fn identity() -> Identity {
    Identity {
        uid: "uid-1".into(),
        email: "reader@example.com".into(),
        id_token: "token".into(),
        refresh_token: String::new(),
    }
}

struct Harness {
    store: MemoryStore,
    screen: PostListScreen<MemoryStore>,
    stream: AuthStream,
    nav: RecordingNavigator,
    spawner: QueuedSpawner,
    mounted: Option<MountedScreen<MemoryStore>>,
}

impl Harness {
    async fn signed_in(store: MemoryStore) -> Self {
        Self::mount(store, Some(identity())).await
    }

    async fn mount(store: MemoryStore, current: Option<Identity>) -> Self {
        let screen = PostListScreen::new(store.clone(), "posts");
        let stream = AuthStream::new(current);
        let nav = RecordingNavigator::default();
        let spawner = QueuedSpawner::default();
        let mounted = screen.mount(&stream, nav.clone(), spawner.clone());
        spawner.run_pending().await;
        Self {
            store,
            screen,
            stream,
            nav,
            spawner,
            mounted: Some(mounted),
        }
    }

    fn view(&self) -> PostListView {
        match self.screen.render() {
            ScreenView::Visible(view) => view,
            ScreenView::Hidden => panic!("screen should be visible"),
        }
    }

    fn titles(&self) -> Vec<(String, String)> {
        self.view()
            .posts
            .into_iter()
            .map(|p| (p.title, p.content))
            .collect()
    }
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn test_add_to_empty_store() {
    let h = Harness::signed_in(MemoryStore::default()).await;
    assert!(h.view().posts.is_empty());

    h.screen.open_form();
    h.screen.set_title("Hello");
    h.screen.set_content("World");
    h.screen.submit_draft().await.unwrap();

    let view = h.view();
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].title, "Hello");
    assert_eq!(view.posts[0].content, "World");
    assert!(!view.posts[0].id.is_empty());
    assert_eq!(view.draft, Draft::default());
    assert!(!view.draft.visible);

    // insert is followed by a full re-fetch
    assert_eq!(
        *h.store.log.borrow(),
        vec!["list:posts", "insert:posts", "list:posts"]
    );
}

#[tokio::test]
async fn test_add_then_fetch_contains_each_pair() {
    let h = Harness::signed_in(MemoryStore::default()).await;
    let pairs = [
        ("a", "b"),
        ("Title with spaces", "multi\nline\ncontent"),
        ("ünïcödé", "✓"),
    ];
    for (title, content) in pairs {
        h.screen.add(title, content).await.unwrap();
        h.screen.fetch().await.unwrap();
        assert!(
            h.titles()
                .contains(&(title.to_string(), content.to_string()))
        );
    }
    assert_eq!(h.view().posts.len(), pairs.len());
}

#[tokio::test]
async fn test_empty_fields_issue_no_request() {
    let h = Harness::signed_in(MemoryStore::with_posts(&[("1", "t", "c")])).await;
    h.screen.open_form();
    let before = h.view();

    for (title, content) in [("", "x"), ("x", ""), ("", "")] {
        h.screen.add(title, content).await.unwrap();
    }

    assert_eq!(h.store.writes(), 0);
    assert_eq!(h.store.log.borrow().len(), 1);
    assert_eq!(h.view(), before);
    assert!(h.view().draft.visible);
}

#[tokio::test]
async fn test_delete_removes_only_that_post() {
    let h = Harness::signed_in(MemoryStore::with_posts(&[
        ("1", "first", "one"),
        ("2", "second", "two"),
    ]))
    .await;
    assert_eq!(h.view().posts.len(), 2);

    h.screen.delete("1").await.unwrap();

    let ids: Vec<_> = h.view().posts.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["2"]);
    assert_eq!(
        *h.store.log.borrow(),
        vec!["list:posts", "delete:posts:1", "list:posts"]
    );
}

#[tokio::test]
async fn test_delete_every_listed_post() {
    let h = Harness::signed_in(MemoryStore::with_posts(&[
        ("1", "a", "a"),
        ("2", "b", "b"),
        ("3", "c", "c"),
    ]))
    .await;

    let ids: Vec<_> = h.view().posts.into_iter().map(|p| p.id).collect();
    for id in ids {
        h.screen.delete(&id).await.unwrap();
        h.screen.fetch().await.unwrap();
        assert!(h.view().posts.iter().all(|p| p.id != id));
    }
    assert!(h.view().posts.is_empty());
}

#[tokio::test]
async fn test_unauthenticated_mount_renders_nothing_and_redirects() {
    let h = Harness::mount(MemoryStore::with_posts(&[("1", "t", "c")]), None).await;
    assert!(h.screen.render().is_hidden());
    assert_eq!(*h.nav.visits.borrow(), vec![AppRoute::Login]);
    assert!(h.store.log.borrow().is_empty());
}

#[tokio::test]
async fn test_losing_identity_hides_list_and_redirects_once_per_notification() {
    let h = Harness::signed_in(MemoryStore::with_posts(&[("1", "t", "c")])).await;
    assert_eq!(h.view().posts.len(), 1);
    assert!(h.nav.visits.borrow().is_empty());

    h.stream.emit(None);
    assert!(h.screen.render().is_hidden());
    assert_eq!(*h.nav.visits.borrow(), vec![AppRoute::Login]);

    h.stream.emit(None);
    assert_eq!(h.nav.visits.borrow().len(), 2);

    // data operations stay locked while signed out
    h.screen.add("x", "y").await.unwrap();
    h.screen.delete("1").await.unwrap();
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn test_signing_back_in_reloads() {
    let h = Harness::mount(MemoryStore::with_posts(&[("1", "t", "c")]), None).await;
    h.stream.emit(Some(identity()));
    h.spawner.run_pending().await;

    assert_eq!(h.view().posts.len(), 1);
    assert_eq!(*h.store.log.borrow(), vec!["list:posts"]);
}

#[tokio::test]
async fn test_unmount_releases_auth_listener() {
    let mut h = Harness::signed_in(MemoryStore::default()).await;
    assert_eq!(h.stream.listener_count(), 1);

    h.mounted.take();
    assert_eq!(h.stream.listener_count(), 0);
    assert!(!h.screen.is_mounted());

    h.stream.emit(None);
    assert!(h.nav.visits.borrow().is_empty());
}
