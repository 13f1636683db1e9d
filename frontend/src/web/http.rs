//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 [`HttpClient`]。

use async_trait::async_trait;
use postboard::{HttpClient, HttpRequest, HttpResponse, PostboardError, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn js_error(context: &str, e: JsValue) -> PostboardError {
    PostboardError::Http(format!("{}: {:?}", context, e))
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

#[async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_error("请求构建失败", e))?;

        let window = web_sys::window()
            .ok_or_else(|| PostboardError::Http("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| js_error("响应读取失败", e))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_error("响应读取失败", e))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
