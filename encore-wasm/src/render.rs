use crate::PageApp;
use encore::view::confidence_label;
use encore::{PlaylistPanel, RecommendedTrack, Screen, Track};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAudioElement, HtmlButtonElement, HtmlImageElement, HtmlInputElement,
};

/// Owns the `#app` element and the handlers wired into its current content.
pub struct Page {
    document: Document,
    root: Element,
    handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl Page {
    pub fn new(document: Document, root: Element) -> Page {
        Page {
            document,
            root,
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Rebuilds the page from the app's current state.
    pub fn draw(&self, app: &Rc<PageApp>) -> Result<(), JsValue> {
        while let Some(child) = self.root.first_element_child() {
            child.remove();
        }
        self.handlers.borrow_mut().clear();

        let header = self.document.create_element("header")?;
        header.set_class_name("App-header");
        let title = self.document.create_element("h1")?;
        title.set_text_content(Some("Playlist Continuation Engine"));
        header.append_child(&title)?;

        let state = app.state();
        match app.screen(&state) {
            Screen::Login => {
                let login = self.button("Login with Spotify", "login-btn", false)?;
                self.on_click(&login, app, |app| async move { app.login().await });
                header.append_child(&login)?;
            }
            Screen::Main {
                busy,
                playlist,
                recommendations,
            } => {
                let main = self.document.create_element("div")?;
                main.set_class_name("main-content");
                main.append_child(&self.input_section(app, busy)?.into())?;
                if let Some(panel) = playlist {
                    main.append_child(&self.playlist_section(app, &panel, busy)?.into())?;
                }
                if !recommendations.is_empty() {
                    main.append_child(&self.recommendations_section(recommendations)?.into())?;
                }
                header.append_child(&main)?;
            }
        }
        self.root.append_child(&header)?;
        Ok(())
    }

    fn input_section(&self, app: &Rc<PageApp>, busy: bool) -> Result<Element, JsValue> {
        let section = self.document.create_element("div")?;
        section.set_class_name("input-section");
        let input = self
            .document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        input.set_type("text");
        input.set_class_name("playlist-input");
        input.set_placeholder("Paste Spotify playlist URL...");
        input.set_value(&app.reference());
        let weak = Rc::downgrade(app);
        let field = input.clone();
        let a = Closure::wrap(Box::new(move || {
            if let Some(app) = weak.upgrade() {
                app.set_reference(&field.value());
            }
        }) as Box<dyn FnMut()>);
        input.set_oninput(Some(a.as_ref().unchecked_ref()));
        self.handlers.borrow_mut().push(a);
        section.append_child(&input)?;

        let load = self.button(
            if busy { "Loading..." } else { "Load Playlist" },
            "load-btn",
            busy,
        )?;
        self.on_click(&load, app, |app| async move { app.load_playlist().await });
        section.append_child(&load)?;
        Ok(section)
    }

    fn playlist_section(
        &self,
        app: &Rc<PageApp>,
        panel: &PlaylistPanel,
        busy: bool,
    ) -> Result<Element, JsValue> {
        let section = self.document.create_element("div")?;
        section.set_class_name("playlist-section");
        let heading = self.document.create_element("h2")?;
        heading.set_text_content(Some(&panel.heading()));
        section.append_child(&heading)?;
        let list = self.document.create_element("div")?;
        list.set_class_name("track-list");
        for track in panel.recent {
            let item = self.track_item(track, "track-item")?;
            item.append_child(&self.track_text(track, "")?.into())?;
            list.append_child(&item)?;
        }
        section.append_child(&list)?;
        let recommend = self.button("Get AI Recommendations", "recommend-btn", busy)?;
        self.on_click(&recommend, app, |app| async move { app.recommend().await });
        section.append_child(&recommend)?;
        Ok(section)
    }

    fn recommendations_section(
        &self,
        recommendations: &[RecommendedTrack],
    ) -> Result<Element, JsValue> {
        let section = self.document.create_element("div")?;
        section.set_class_name("recommendations-section");
        let heading = self.document.create_element("h2")?;
        heading.set_text_content(Some("Recommended Tracks"));
        section.append_child(&heading)?;
        let list = self.document.create_element("div")?;
        list.set_class_name("track-list");
        for rec in recommendations {
            let item = self.track_item(&rec.track, "track-item recommendation")?;
            let info = self.track_text(&rec.track, "track-info")?;
            let explanations = self.document.create_element("div")?;
            explanations.set_class_name("explanations");
            for explanation in &rec.explanations {
                let tag = self.document.create_element("span")?;
                tag.set_class_name("explanation-tag");
                tag.set_text_content(Some(explanation));
                explanations.append_child(&tag)?;
            }
            info.append_child(&explanations)?;
            let confidence = self.document.create_element("p")?;
            confidence.set_class_name("confidence");
            confidence.set_text_content(Some(&confidence_label(rec)));
            info.append_child(&confidence)?;
            item.append_child(&info)?;
            if let Some(preview) = &rec.track.preview_url {
                let audio = self
                    .document
                    .create_element("audio")?
                    .dyn_into::<HtmlAudioElement>()?;
                audio.set_controls(true);
                audio.set_src(preview);
                item.append_child(&audio)?;
            }
            list.append_child(&item)?;
        }
        section.append_child(&list)?;
        Ok(section)
    }

    fn track_item(&self, track: &Track, class: &str) -> Result<Element, JsValue> {
        let item = self.document.create_element("div")?;
        item.set_class_name(class);
        let image = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()?;
        image.set_src(&track.album_art);
        image.set_alt(&track.name);
        item.append_child(&image)?;
        Ok(item)
    }

    fn track_text(&self, track: &Track, class: &str) -> Result<Element, JsValue> {
        let div = self.document.create_element("div")?;
        if !class.is_empty() {
            div.set_class_name(class);
        }
        let name = self.document.create_element("p")?;
        let strong = self.document.create_element("strong")?;
        strong.set_text_content(Some(&track.name));
        name.append_child(&strong)?;
        div.append_child(&name)?;
        let artist = self.document.create_element("p")?;
        artist.set_text_content(Some(&track.artist));
        div.append_child(&artist)?;
        Ok(div)
    }

    fn button(&self, text: &str, class: &str, disabled: bool) -> Result<HtmlButtonElement, JsValue> {
        let button = self
            .document
            .create_element("button")?
            .dyn_into::<HtmlButtonElement>()?;
        button.set_type("button");
        button.set_class_name(class);
        button.set_text_content(Some(text));
        button.set_disabled(disabled);
        Ok(button)
    }

    fn on_click<F, Fut>(&self, button: &HtmlButtonElement, app: &Rc<PageApp>, action: F)
    where
        F: Fn(Rc<PageApp>) -> Fut + 'static,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let weak: Weak<PageApp> = Rc::downgrade(app);
        let a = Closure::wrap(Box::new(move || {
            if let Some(app) = weak.upgrade() {
                wasm_bindgen_futures::spawn_local(action(app));
            }
        }) as Box<dyn FnMut()>);
        button.set_onclick(Some(a.as_ref().unchecked_ref()));
        self.handlers.borrow_mut().push(a);
    }
}
