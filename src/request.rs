use crate::error::{PostboardError, Result};
use postboard_shared::firestore::ApiErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self> {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(serde_json::to_string(body)?);
        Ok(req)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// 从 Google API 错误体中取出消息，取不到时退回原始文本
    pub fn error_message(&self) -> String {
        match serde_json::from_str::<ApiErrorBody>(&self.body) {
            Ok(body) if !body.error.message.is_empty() => body.error.message,
            _ if self.body.is_empty() => format!("HTTP {}", self.status),
            _ => self.body.clone(),
        }
    }

    /// 非 2xx 时转换为对应错误
    pub fn error_for_status(self) -> Result<Self> {
        if self.ok() {
            Ok(self)
        } else {
            Err(PostboardError::from_status(self.status, self.error_message()))
        }
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// 按顺序返回预设响应，并记录收到的请求
    #[derive(Default)]
    pub struct ScriptedHttpClient {
        pub requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<Result<HttpResponse>>>,
    }

    impl ScriptedHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Err(PostboardError::Http(message.to_string())));
            self
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for ScriptedHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PostboardError::Http("no scripted response".into())))
        }
    }

    #[test]
    fn error_message_prefers_google_error_body() {
        let resp = HttpResponse {
            status: 400,
            body: r#"{"error":{"code":400,"message":"INVALID_PASSWORD","status":"INVALID_ARGUMENT"}}"#
                .into(),
        };
        assert_eq!(resp.error_message(), "INVALID_PASSWORD");

        let resp = HttpResponse {
            status: 502,
            body: String::new(),
        };
        assert_eq!(resp.error_message(), "HTTP 502");

        let resp = HttpResponse {
            status: 500,
            body: "upstream down".into(),
        };
        assert_eq!(resp.error_message(), "upstream down");
    }

    #[test]
    fn with_json_sets_content_type() {
        let req = HttpRequest::new("http://x", HttpMethod::Post)
            .with_json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.headers["Content-Type"], "application/json");
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }
}
