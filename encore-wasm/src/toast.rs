use crate::fetch::describe;
use encore::{Notice, NoticeLevel, Notifier};
use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

/// Shows notices as toasts that remove themselves after
/// [`Notice::duration`].
pub struct Toaster {
    window: Window,
    document: Document,
    container: Element,
}

impl Toaster {
    pub fn new(window: Window, document: Document) -> Result<Toaster, JsValue> {
        let container = match document.get_element_by_id("toasts") {
            Some(container) => container,
            None => {
                let container = document.create_element("div")?;
                container.set_id("toasts");
                document
                    .body()
                    .ok_or_else(|| JsValue::from("body element missing"))?
                    .append_child(&container)?;
                container
            }
        };
        Ok(Toaster {
            window,
            document,
            container,
        })
    }

    fn show(&self, notice: &Notice) -> Result<(), JsValue> {
        let toast = self.document.create_element("div")?;
        toast.set_class_name(match notice.level {
            NoticeLevel::Info => "toast toast-info",
            NoticeLevel::Error => "toast toast-error",
        });
        toast.set_attribute("role", "status")?;
        toast.set_text_content(Some(&notice.message));
        self.container.append_child(&toast)?;
        let remove = Closure::once_into_js(move || toast.remove());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                notice.duration().as_millis() as i32,
            )?;
        Ok(())
    }
}

impl Notifier for Toaster {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.show(&notice) {
            error!("could not show notice {:?}: {}", notice.message, describe(&e));
        }
    }
}
