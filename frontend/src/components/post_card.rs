use leptos::prelude::*;
use postboard::Post;

/// 单个帖子卡片
#[component]
pub fn PostCard(post: Post, #[prop(into)] on_delete: Callback<String>) -> impl IntoView {
    let Post { id, title, content } = post;

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h2 class="card-title break-words">{title}</h2>
                <p class="whitespace-pre-wrap break-words text-base-content/80">{content}</p>
                <div class="card-actions justify-end">
                    <button
                        class="btn btn-sm btn-outline btn-error"
                        on:click=move |_| on_delete.run(id.clone())
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
