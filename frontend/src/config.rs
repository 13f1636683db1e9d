//! 编译期配置
//!
//! 浏览器中没有进程环境变量，配置在构建时通过 `option_env!` 固化。

use postboard::EnvAdapter;
use postboard::config::{
    VAR_API_KEY, VAR_AUTH_ENDPOINT, VAR_COLLECTION, VAR_DATABASE, VAR_FIRESTORE_ENDPOINT,
    VAR_PROJECT_ID,
};

pub struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            VAR_API_KEY => option_env!("POSTBOARD_API_KEY"),
            VAR_PROJECT_ID => option_env!("POSTBOARD_PROJECT_ID"),
            VAR_DATABASE => option_env!("POSTBOARD_DATABASE"),
            VAR_COLLECTION => option_env!("POSTBOARD_COLLECTION"),
            VAR_FIRESTORE_ENDPOINT => option_env!("POSTBOARD_FIRESTORE_ENDPOINT"),
            VAR_AUTH_ENDPOINT => option_env!("POSTBOARD_AUTH_ENDPOINT"),
            _ => None,
        };
        value.map(str::to_string)
    }
}
