use crate::auth::{WebAuth, use_app};
use crate::components::add_post_dialog::AddPostDialog;
use crate::components::post_card::PostCard;
use crate::web::router::use_router;
use crate::web::{BrowserHttpClient, LocalSpawner};
use leptos::prelude::*;
use leptos::task::spawn_local;
use postboard::{
    FirestoreStore, MountedScreen, Notification, Post, PostListScreen, PostListView,
    ScreenView,
};
use std::rc::Rc;
use std::time::Duration;

type WebStore = FirestoreStore<BrowserHttpClient, Rc<WebAuth>>;

/// 从视图信号派生单个字段；未认证时取默认值
fn project<T>(view: ReadSignal<ScreenView>, f: fn(&PostListView) -> T) -> Memo<T>
where
    T: Default + PartialEq + Send + Sync + 'static,
{
    Memo::new(move |_| {
        view.with(|v| match v {
            ScreenView::Visible(list) => f(list),
            ScreenView::Hidden => T::default(),
        })
    })
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (view, set_view) = signal(ScreenView::Hidden);

    let auth = app.auth.get_value();
    let documents_url = app.config.with_value(|c| c.documents_url());
    let collection = app.config.with_value(|c| c.collection.clone());
    let store = FirestoreStore::new(BrowserHttpClient, auth.clone(), documents_url);

    let screen = PostListScreen::new(store, collection);
    // 先注册观察者，首次认证回调的结果才能进入信号
    screen.set_observer(move |v| set_view.set(v));
    let mounted: MountedScreen<WebStore> = screen.mount(&auth, router, LocalSpawner);

    let screen = StoredValue::new_local(screen);
    let mounted = StoredValue::new_local(Some(mounted));
    on_cleanup(move || {
        mounted.try_update_value(|m| {
            m.take();
        });
    });

    // 细粒度派生，避免输入框随每次按键重建
    let hidden = Memo::new(move |_| view.with(ScreenView::is_hidden));
    let posts = project(view, |v| v.posts.clone());
    let loading = project(view, |v| v.loading);
    let notification = project(view, |v| v.notification.clone());
    let form_open = project(view, |v| v.draft.visible);
    let title = project(view, |v| v.draft.title.clone());
    let content = project(view, |v| v.draft.content.clone());

    let on_delete = Callback::new(move |id: String| {
        let screen = screen.get_value();
        spawn_local(async move {
            // 失败已转为通知
            let _ = screen.delete(&id).await;
        });
    });

    let on_submit = Callback::new(move |_: ()| {
        let screen = screen.get_value();
        spawn_local(async move {
            let _ = screen.submit_draft().await;
        });
    });

    // 3秒后清除通知
    Effect::new(move |_| {
        if let Some(seq) = notification.with(|n| n.as_ref().map(|n| n.seq)) {
            set_timeout(
                move || {
                    let still_shown = notification
                        .try_with_untracked(|n| n.as_ref().map(|n| n.seq))
                        .flatten();
                    if still_shown == Some(seq) {
                        screen.try_with_value(|s| s.dismiss_notification());
                    }
                },
                Duration::from_secs(3),
            );
        }
    });

    let on_sign_out = move |_| app.sign_out();

    view! {
        <Show when=move || !hidden.get()>
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-3xl mx-auto space-y-8">
                    // 通知提示框
                    <Show when=move || notification.with(Option::is_some)>
                        <div class="toast toast-top toast-end z-50">
                            <div class=move || {
                                if notification.with(|n| n.as_ref().is_some_and(Notification::is_error)) {
                                    "alert alert-error shadow-lg"
                                } else {
                                    "alert alert-success shadow-lg"
                                }
                            }>
                                <span>
                                    {move || notification.with(|n| {
                                        n.as_ref().map(|n| n.message.clone()).unwrap_or_default()
                                    })}
                                </span>
                            </div>
                        </div>
                    </Show>

                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 gap-2">
                            <a class="btn btn-ghost text-xl">"Postboard"</a>
                            <span class="badge badge-neutral hidden md:inline-flex">
                                {move || app.identity.with(|id| {
                                    id.as_ref().map(|id| id.email.clone()).unwrap_or_default()
                                })}
                            </span>
                        </div>
                        <div class="flex-none gap-2">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| screen.with_value(|s| s.open_form())
                            >
                                "Add Post"
                            </button>
                            <button on:click=on_sign_out class="btn btn-outline btn-error">
                                "Sign out"
                            </button>
                        </div>
                    </div>

                    <Show when=move || loading.get() && posts.with(Vec::is_empty)>
                        <div class="flex justify-center py-8">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    </Show>
                    <Show when=move || !loading.get() && posts.with(Vec::is_empty)>
                        <div class="text-center py-8 text-base-content/50">
                            "No posts yet. Add one to get started."
                        </div>
                    </Show>

                    <div class="space-y-4">
                        <For
                            each=move || posts.get()
                            key=|post: &Post| post.id.clone()
                            children=move |post: Post| view! { <PostCard post=post on_delete=on_delete /> }
                        />
                    </div>

                    <AddPostDialog
                        open=form_open
                        title=title
                        content=content
                        on_title=move |t: String| screen.with_value(|s| s.set_title(t))
                        on_content=move |c: String| screen.with_value(|s| s.set_content(c))
                        on_submit=on_submit
                        on_cancel=move |_: ()| screen.with_value(|s| s.cancel_form())
                    />
                </div>
            </div>
        </Show>
    }
}
