use leptos::prelude::*;

/// 新建帖子的模态框
///
/// 表单状态由调用方持有，这里只负责渲染与转发输入。
#[component]
pub fn AddPostDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] content: Signal<String>,
    #[prop(into)] on_title: Callback<String>,
    #[prop(into)] on_content: Callback<String>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    view! {
        // Esc 关闭时同步为取消
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:close=move |_| {
                if open.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div class="modal-box">
                <h3 class="font-bold text-lg">"New post"</h3>

                <form on:submit=submit class="space-y-4 pt-4">
                    <div class="form-control">
                        <label for="post_title" class="label">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input
                            id="post_title"
                            type="text"
                            placeholder="Title"
                            on:input=move |ev| on_title.run(event_target_value(&ev))
                            prop:value=title
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="post_content" class="label">
                            <span class="label-text">"Content"</span>
                        </label>
                        <textarea
                            id="post_content"
                            rows="5"
                            placeholder="Content"
                            on:input=move |ev| on_content.run(event_target_value(&ev))
                            prop:value=content
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Add Post"</button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
