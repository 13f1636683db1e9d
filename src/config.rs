use crate::error::{PostboardError, Result};
use postboard_shared::COLLECTION_POSTS;

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 未设置对应变量时使用的默认值
const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";
const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

pub const VAR_API_KEY: &str = "POSTBOARD_API_KEY";
pub const VAR_PROJECT_ID: &str = "POSTBOARD_PROJECT_ID";
pub const VAR_DATABASE: &str = "POSTBOARD_DATABASE";
pub const VAR_COLLECTION: &str = "POSTBOARD_COLLECTION";
pub const VAR_FIRESTORE_ENDPOINT: &str = "POSTBOARD_FIRESTORE_ENDPOINT";
pub const VAR_AUTH_ENDPOINT: &str = "POSTBOARD_AUTH_ENDPOINT";

/// 抽象环境变量接口
pub trait EnvAdapter {
    fn var(&self, name: &str) -> Option<String>;
}

/// 运行时配置
///
/// 负责从 [`EnvAdapter`] 读取变量，实现配置解耦。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub project_id: String,
    pub database: String,
    pub collection: String,
    pub firestore_endpoint: String,
    pub auth_endpoint: String,
}

impl AppConfig {
    pub fn from_env(env: &impl EnvAdapter) -> Result<Self> {
        let required = |name: &str| {
            env.var(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PostboardError::Config(format!("{name} is not set")))
        };
        let optional = |name: &str, default: &str| {
            env.var(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            api_key: required(VAR_API_KEY)?,
            project_id: required(VAR_PROJECT_ID)?,
            database: optional(VAR_DATABASE, DEFAULT_DATABASE),
            collection: optional(VAR_COLLECTION, COLLECTION_POSTS),
            firestore_endpoint: optional(VAR_FIRESTORE_ENDPOINT, DEFAULT_FIRESTORE_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            auth_endpoint: optional(VAR_AUTH_ENDPOINT, DEFAULT_AUTH_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// 文档根路径：`{endpoint}/v1/projects/{p}/databases/{d}/documents`
    pub fn documents_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            self.firestore_endpoint, self.project_id, self.database
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        pub fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        pub fn with(mut self, name: &str, value: &str) -> Self {
            self.vars.insert(name.to_string(), value.to_string());
            self
        }
    }

    impl EnvAdapter for MockEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }

    pub fn test_config() -> AppConfig {
        AppConfig::from_env(
            &MockEnv::new()
                .with(VAR_API_KEY, "test-key")
                .with(VAR_PROJECT_ID, "demo"),
        )
        .unwrap()
    }

    #[test]
    fn defaults_fill_optional_vars() {
        let config = test_config();
        assert_eq!(config.database, "(default)");
        assert_eq!(config.collection, "posts");
        assert_eq!(
            config.documents_url(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents"
        );
    }

    #[test]
    fn overrides_and_trailing_slash() {
        let env = MockEnv::new()
            .with(VAR_API_KEY, "k")
            .with(VAR_PROJECT_ID, "p")
            .with(VAR_COLLECTION, "notes")
            .with(VAR_FIRESTORE_ENDPOINT, "http://localhost:8080/");
        let config = AppConfig::from_env(&env).unwrap();
        assert_eq!(config.collection, "notes");
        assert_eq!(
            config.documents_url(),
            "http://localhost:8080/v1/projects/p/databases/(default)/documents"
        );
    }

    #[test]
    fn missing_required_var_is_config_error() {
        let env = MockEnv::new().with(VAR_API_KEY, "k").with(VAR_PROJECT_ID, " ");
        let err = AppConfig::from_env(&env).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains(VAR_PROJECT_ID));
    }
}
