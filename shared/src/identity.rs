//! Firebase Authentication (Identity Toolkit v1) 传输格式

use serde::{Deserialize, Serialize};

/// `accounts:signInWithPassword` 请求体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithPasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// `accounts:signInWithPassword` 响应体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// 有效期（秒），以字符串传输
    #[serde(default)]
    pub expires_in: Option<String>,
}

/// 已登录的身份
///
/// 会被序列化进本地存储，用于刷新页面后恢复会话。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl From<SignInResponse> for Identity {
    fn from(resp: SignInResponse) -> Self {
        Self {
            uid: resp.local_id,
            email: resp.email,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        }
    }
}
