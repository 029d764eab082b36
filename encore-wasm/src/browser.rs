use crate::fetch::describe;
use encore::{Error, Navigation};
use wasm_bindgen::JsValue;
use web_sys::Window;

pub struct BrowserNavigation {
    window: Window,
}

impl BrowserNavigation {
    pub fn new(window: Window) -> BrowserNavigation {
        BrowserNavigation { window }
    }
}

fn nav_error(e: JsValue) -> Error {
    Error::Navigation(describe(&e))
}

impl Navigation for BrowserNavigation {
    fn current_url(&self) -> encore::Result<String> {
        self.window.location().href().map_err(nav_error)
    }

    fn replace_url(&self, url: &str) -> encore::Result<()> {
        self.window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url)))
            .map_err(nav_error)
    }

    fn navigate(&self, url: &str) -> encore::Result<()> {
        self.window.location().set_href(url).map_err(nav_error)
    }
}
