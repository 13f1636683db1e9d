//! 日志初始化

use crate::web::ConsoleMakeWriter;
use tracing::level_filters::LevelFilter;

/// 安装输出到浏览器控制台的 tracing 订阅者
///
/// 级别由构建时的 `POSTBOARD_LOG` 决定，默认 `info`。
/// wasm 中没有系统时钟，因此不输出时间戳。
pub fn init() {
    let level = option_env!("POSTBOARD_LOG")
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);

    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .try_init();
}
