use thiserror::Error;

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// 每个变体对应一个稳定的错误代码，供 UI 通知和日志使用。
#[derive(Debug, Error)]
pub enum PostboardError {
    /// 网络层失败（请求没有拿到任何响应）
    #[error("network error: {0}")]
    Http(String),

    /// 存储返回非 2xx
    #[error("store error ({status}): {message}")]
    Store { status: u16, message: String },

    /// 凭据缺失或失效 (401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 资源不存在 (404)
    #[error("{0} not found")]
    NotFound(String),

    /// 登录失败，如密码错误
    #[error("authentication failed: {0}")]
    Auth(String),

    /// JSON 编解码失败
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 配置缺失或无效
    #[error("configuration error: {0}")]
    Config(String),
}

impl PostboardError {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            PostboardError::Http(_) => "NETWORK_ERROR",
            PostboardError::Store { .. } => "STORE_ERROR",
            PostboardError::Unauthorized(_) => "UNAUTHORIZED",
            PostboardError::NotFound(_) => "RESOURCE_NOT_FOUND",
            PostboardError::Auth(_) => "AUTH_FAILED",
            PostboardError::Serialization(_) => "JSON_PARSE_ERROR",
            PostboardError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// 根据 HTTP 状态码归类错误
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => PostboardError::Unauthorized(message),
            404 => PostboardError::NotFound(message),
            _ => PostboardError::Store { status, message },
        }
    }
}

pub type Result<T, E = PostboardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            PostboardError::from_status(401, "x"),
            PostboardError::Unauthorized(_)
        ));
        assert!(matches!(
            PostboardError::from_status(403, "x"),
            PostboardError::Unauthorized(_)
        ));
        assert!(matches!(
            PostboardError::from_status(404, "x"),
            PostboardError::NotFound(_)
        ));
        let err = PostboardError::from_status(500, "boom");
        assert_eq!(err.error_code(), "STORE_ERROR");
        assert_eq!(err.to_string(), "store error (500): boom");
    }
}
