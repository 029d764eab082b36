//! The controller behind the page.
//!
//! `App` owns the view state and runs the three user actions against the
//! backend. It is single threaded: state sits in `RefCell`s and no borrow is
//! held across an `.await`, so actions may interleave freely on one event
//! loop.

use crate::api::{ApiClient, Transport};
use crate::error::Error;
use crate::navigation::Navigation;
use crate::notify::{Notice, Notifier};
use crate::playlist::extract_playlist_id;
use crate::session::{take_session, Session};
use crate::state::ViewState;
use crate::view::{self, Screen};
use log::{debug, error, info, warn};
use std::cell::{Cell, Ref, RefCell};

pub const PLAYLIST_ERROR: &str =
    "Error loading playlist. Make sure the URL is correct and the playlist is public.";
pub const RECOMMEND_ERROR: &str = "Error getting recommendations. Please try again.";
pub const LOGIN_ERROR: &str = "Could not reach the login service. Please try again.";
pub const EMPTY_PLAYLIST: &str = "Playlist has no tracks";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Login,
    LoadPlaylist,
    Recommend,
}

impl Action {
    fn index(self) -> usize {
        match self {
            Action::Login => 0,
            Action::LoadPlaylist => 1,
            Action::Recommend => 2,
        }
    }
}

/// Clears its action's in-flight flag when dropped, whichever way the
/// request ended.
struct InFlight<'a> {
    flags: &'a Cell<[bool; 3]>,
    action: Action,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut flags = self.flags.get();
        flags[self.action.index()] = false;
        self.flags.set(flags);
    }
}

pub struct App<T, N, V> {
    api: ApiClient<T>,
    notifier: N,
    navigation: V,
    state: RefCell<ViewState>,
    reference: RefCell<String>,
    in_flight: Cell<[bool; 3]>,
    listener: Option<Box<dyn Fn()>>,
}

impl<T, N, V> App<T, N, V>
where
    T: Transport,
    N: Notifier,
    V: Navigation,
{
    /// Builds the controller and adopts a session handed over in the page
    /// URL, scrubbing the token from the address bar.
    pub fn new(api: ApiClient<T>, notifier: N, navigation: V) -> App<T, N, V> {
        let session = bootstrap(&navigation);
        App {
            api,
            notifier,
            navigation,
            state: RefCell::new(ViewState::start(session)),
            reference: RefCell::new(String::new()),
            in_flight: Cell::new([false; 3]),
            listener: None,
        }
    }

    /// Called after every change to state or to the loading flag.
    pub fn on_change(mut self, listener: impl Fn() + 'static) -> App<T, N, V> {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn navigation(&self) -> &V {
        &self.navigation
    }

    pub fn state(&self) -> Ref<'_, ViewState> {
        self.state.borrow()
    }

    pub fn reference(&self) -> String {
        self.reference.borrow().clone()
    }

    /// Updates the playlist reference as the user types.
    pub fn set_reference(&self, reference: &str) {
        *self.reference.borrow_mut() = reference.to_owned();
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.in_flight.get()[action.index()]
    }

    pub fn is_loading(&self) -> bool {
        self.is_pending(Action::LoadPlaylist) || self.is_pending(Action::Recommend)
    }

    /// Renders the current state. The returned screen borrows `state`.
    pub fn screen<'a>(&self, state: &'a ViewState) -> Screen<'a> {
        view::render(state, self.is_loading())
    }

    /// Asks the backend where the provider's login page is and goes there.
    pub async fn login(&self) {
        let Some(_pending) = self.begin(Action::Login) else {
            return;
        };
        match self.api.login_url().await {
            Ok(url) => {
                info!("redirecting to login");
                if let Err(e) = self.navigation.navigate(&url) {
                    self.fail("login redirect", e, LOGIN_ERROR);
                }
            }
            Err(e) => self.fail("login", e, LOGIN_ERROR),
        }
    }

    /// Fetches the playlist named by the current reference.
    pub async fn load_playlist(&self) {
        let reference = self.reference.borrow().trim().to_owned();
        let Some(session) = self.session() else {
            return;
        };
        if reference.is_empty() {
            return;
        }
        let Some(pending) = self.begin(Action::LoadPlaylist) else {
            return;
        };
        self.changed();
        let playlist_id = extract_playlist_id(&reference);
        match self.api.playlist(&session, playlist_id).await {
            Ok(tracks) => {
                info!("loaded playlist {} ({} tracks)", playlist_id, tracks.len());
                if tracks.is_empty() {
                    self.notifier.notify(Notice::info(EMPTY_PLAYLIST));
                }
                self.update(|state| state.with_playlist(tracks));
            }
            Err(e) => self.fail("loading playlist", e, PLAYLIST_ERROR),
        }
        drop(pending);
        self.changed();
    }

    /// Sends the loaded playlist off for recommendations.
    pub async fn recommend(&self) {
        let (session, tracks) = {
            let state = self.state.borrow();
            match (state.session(), state.playlist()) {
                (Some(session), Some(playlist)) => (session.clone(), playlist.tracks().to_vec()),
                _ => return,
            }
        };
        let Some(pending) = self.begin(Action::Recommend) else {
            return;
        };
        self.changed();
        match self.api.recommend(&session, &tracks).await {
            Ok(recommendations) => {
                info!(
                    "received {} recommendations for {} tracks",
                    recommendations.len(),
                    tracks.len()
                );
                self.update(|state| state.with_recommendations(recommendations));
            }
            Err(e) => self.fail("getting recommendations", e, RECOMMEND_ERROR),
        }
        drop(pending);
        self.changed();
    }

    fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    fn begin(&self, action: Action) -> Option<InFlight<'_>> {
        let mut flags = self.in_flight.get();
        if flags[action.index()] {
            debug!("{:?} already in flight, ignoring", action);
            return None;
        }
        flags[action.index()] = true;
        self.in_flight.set(flags);
        Some(InFlight {
            flags: &self.in_flight,
            action,
        })
    }

    fn update(&self, f: impl FnOnce(ViewState) -> ViewState) {
        let mut state = self.state.borrow_mut();
        let current = std::mem::take(&mut *state);
        *state = f(current);
    }

    fn fail(&self, what: &str, e: Error, message: &str) {
        error!("error {}: {}", what, e);
        self.notifier.notify(Notice::error(message));
    }

    fn changed(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }
}

fn bootstrap(navigation: &impl Navigation) -> Option<Session> {
    let href = match navigation.current_url() {
        Ok(href) => href,
        Err(e) => {
            warn!("could not read page url: {}", e);
            return None;
        }
    };
    let handoff = take_session(&href)?;
    if let Err(e) = navigation.replace_url(&handoff.scrubbed) {
        warn!("could not scrub token from address bar: {}", e);
    }
    info!("session adopted from login redirect");
    Some(handoff.session)
}
