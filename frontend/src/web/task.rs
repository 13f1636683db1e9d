use futures::future::LocalBoxFuture;
use postboard::Spawner;

/// 把后台任务交给浏览器的微任务队列
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}
