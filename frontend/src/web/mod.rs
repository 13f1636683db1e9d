//! 浏览器原生 API 封装模块
//!
//! 为核心库的协作者接口提供浏览器实现：fetch、LocalStorage、History、
//! 任务队列和控制台。

mod console;
mod http;
pub mod router;
mod storage;
mod task;

pub use console::ConsoleMakeWriter;
pub use http::BrowserHttpClient;
pub use storage::BrowserStorage;
pub use task::LocalSpawner;
