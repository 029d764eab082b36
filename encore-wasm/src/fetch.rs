use async_trait::async_trait;
use encore::{ApiRequest, ApiResponse, Error, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

/// `window.fetch` as an [`encore::Transport`].
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> FetchTransport {
        FetchTransport { window }
    }

    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, JsValue> {
        let request = query(request)?;
        let resp_value = JsFuture::from(self.window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;
        let body = JsFuture::from(resp.text()?).await?;
        Ok(ApiResponse {
            status: resp.status(),
            body: body.as_string().unwrap_or_default(),
        })
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> encore::Result<ApiResponse> {
        self.fetch(&request)
            .await
            .map_err(|e| Error::Transport(describe(&e)))
    }
}

fn query(request: &ApiRequest) -> Result<Request, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &request.body {
        opts.set_body(&JsValue::from_str(body));
    }
    let req = Request::new_with_str_and_init(&request.url, &opts)?;
    for (name, value) in &request.headers {
        req.headers().set(name, value)?;
    }
    Ok(req)
}

pub fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
