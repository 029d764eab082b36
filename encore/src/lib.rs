//! Core of the playlist continuation client: the backend contract, the
//! session handed over by the login redirect, and the view state the page
//! renders from. Nothing in here touches the browser; the platform side is
//! reached through [`Transport`], [`Navigation`] and [`Notifier`].

pub mod api;
pub mod app;
pub mod error;
pub mod model;
pub mod navigation;
pub mod notify;
pub mod playlist;
pub mod session;
pub mod state;
pub mod view;

pub use api::{ApiClient, ApiConfig, ApiRequest, ApiResponse, Method, Transport};
pub use app::{Action, App};
pub use error::{Error, Result};
pub use model::{RecommendedTrack, Track};
pub use navigation::Navigation;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use playlist::extract_playlist_id;
pub use session::Session;
pub use state::{Playlist, ViewState};
pub use view::{PlaylistPanel, Screen};
