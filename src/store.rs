//! 文档存储
//!
//! `DocumentStore` 是界面层唯一依赖的存储接口；`FirestoreStore` 是基于
//! Firestore REST API 的生产实现。

use crate::auth::IdTokenProvider;
use crate::error::Result;
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use async_trait::async_trait;
use postboard_shared::firestore::{CreateDocumentBody, Document, Fields, ListDocumentsResponse};
use tracing::debug;

/// 单页拉取的文档数，只影响传输分页，`list_all` 始终返回整个集合
const LIST_PAGE_SIZE: u32 = 300;

/// 存储中的一条记录
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Fields,
}

impl From<Document> for StoredDocument {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id().to_string(),
            fields: doc.fields,
        }
    }
}

// =========================================================
// 抽象存储接口
// =========================================================

#[async_trait(?Send)]
pub trait DocumentStore {
    /// 读取集合中的全部文档
    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>>;
    /// 写入新文档，返回存储分配的 id
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String>;
    /// 按 id 删除文档
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<()>;
}

// =========================================================
// 生产环境实现 (Firestore REST)
// =========================================================

pub struct FirestoreStore<C, T> {
    client: C,
    tokens: T,
    documents_url: String,
}

impl<C: HttpClient, T: IdTokenProvider> FirestoreStore<C, T> {
    /// `documents_url` 见 [`crate::config::AppConfig::documents_url`]
    pub fn new(client: C, tokens: T, documents_url: impl Into<String>) -> Self {
        Self {
            client,
            tokens,
            documents_url: documents_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/{}",
            self.documents_url,
            urlencoding::encode(collection)
        )
    }

    fn authorized(&self, req: HttpRequest) -> HttpRequest {
        match self.tokens.id_token() {
            Some(token) => req.with_header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }
}

#[async_trait(?Send)]
impl<C: HttpClient, T: IdTokenProvider> DocumentStore for FirestoreStore<C, T> {
    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let base = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!("{base}?pageSize={LIST_PAGE_SIZE}");
            if let Some(token) = &page_token {
                url.push_str("&pageToken=");
                url.push_str(&urlencoding::encode(token));
            }
            debug!(collection, page = ?page_token, "firestore list");

            let req = self.authorized(HttpRequest::new(&url, HttpMethod::Get));
            let page: ListDocumentsResponse =
                self.client.send(req).await?.error_for_status()?.json()?;

            documents.extend(page.documents.into_iter().map(StoredDocument::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        debug!(collection, "firestore insert");
        let req = HttpRequest::new(&self.collection_url(collection), HttpMethod::Post)
            .with_json(&CreateDocumentBody { fields: &fields })?;

        let doc: Document = self
            .client
            .send(self.authorized(req))
            .await?
            .error_for_status()?
            .json()?;

        Ok(doc.id().to_string())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<()> {
        debug!(collection, id, "firestore delete");
        let url = format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id)
        );
        let req = self.authorized(HttpRequest::new(&url, HttpMethod::Delete));
        self.client.send(req).await?.error_for_status()?;
        Ok(())
    }
}
