use serde::{Deserialize, Serialize};

pub mod firestore;
pub mod identity;

pub use identity::Identity;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 帖子所在的集合名
pub const COLLECTION_POSTS: &str = "posts";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";

/// 会话在本地存储中的 key
pub const STORAGE_SESSION_KEY: &str = "postboard_session";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 帖子
///
/// `id` 由外部存储在创建时分配，之后不再改变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// 新帖子（写入存储的字段）
///
/// 不携带 id：id 只能由存储分配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// 两个字段都非空时才构造
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Option<Self> {
        let title = title.into();
        let content = content.into();
        if title.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self { title, content })
    }

    pub fn into_fields(self) -> firestore::Fields {
        let mut fields = firestore::Fields::new();
        fields.insert(FIELD_TITLE.to_string(), firestore::Value::string(self.title));
        fields.insert(
            FIELD_CONTENT.to_string(),
            firestore::Value::string(self.content),
        );
        fields
    }
}

impl Post {
    /// 从存储记录还原帖子，缺少字段时返回 `None`
    pub fn from_fields(id: impl Into<String>, fields: &firestore::Fields) -> Option<Self> {
        let title = fields.get(FIELD_TITLE)?.as_str()?;
        let content = fields.get(FIELD_CONTENT)?.as_str()?;
        Some(Self {
            id: id.into(),
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_rejects_empty_fields() {
        assert!(NewPost::new("", "x").is_none());
        assert!(NewPost::new("x", "").is_none());
        assert!(NewPost::new("", "").is_none());
        assert!(NewPost::new("Hello", "World").is_some());
    }

    #[test]
    fn post_from_fields_requires_both_strings() {
        let fields = NewPost::new("Hello", "multi\nline").unwrap().into_fields();
        let post = Post::from_fields("abc", &fields).unwrap();
        assert_eq!(post.id, "abc");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "multi\nline");

        let mut partial = firestore::Fields::new();
        partial.insert(FIELD_TITLE.into(), firestore::Value::string("only title"));
        assert!(Post::from_fields("abc", &partial).is_none());
    }
}
