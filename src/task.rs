use futures::future::LocalBoxFuture;

/// 后台任务调度接口
///
/// 认证回调是同步的，首次加载需要交给平台的任务队列执行。
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

impl<T: Spawner + ?Sized> Spawner for std::rc::Rc<T> {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        (**self).spawn(task)
    }
}
