use encore::{ApiClient, ApiConfig, App};
use log::{error, info};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

mod browser;
mod fetch;
mod logger;
mod render;
mod toast;

pub use browser::BrowserNavigation;
pub use fetch::FetchTransport;
pub use render::Page;
pub use toast::Toaster;

pub type PageApp = App<FetchTransport, Toaster, BrowserNavigation>;

// Called by our JS entry point once the module is loaded
#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    logger::init();
    let window = web_sys::window().ok_or_else(|| JsValue::from("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from("should have a document on window"))?;
    let root = document
        .get_element_by_id("app")
        .ok_or_else(|| JsValue::from("app element missing"))?;
    let toaster = Toaster::new(window.clone(), document.clone())?;
    let page = Rc::new(Page::new(document, root));
    let config = ApiConfig::default();
    info!("using backend at {}", config.base_url);

    let page_ref = Rc::clone(&page);
    let app = Rc::new_cyclic(|weak: &Weak<PageApp>| {
        let weak = weak.clone();
        App::new(
            ApiClient::new(config, FetchTransport::new(window.clone())),
            toaster,
            BrowserNavigation::new(window),
        )
        .on_change(move || {
            if let Some(app) = weak.upgrade() {
                if let Err(e) = page_ref.draw(&app) {
                    error!("render failed: {}", fetch::describe(&e));
                }
            }
        })
    });
    page.draw(&app)?;
    // The page keeps the app alive for as long as it is open.
    std::mem::forget(app);
    Ok(())
}
