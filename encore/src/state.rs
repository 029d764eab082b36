use crate::model::{RecommendedTrack, Track};
use crate::session::Session;

/// A fetched playlist. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Playlist(Vec<Track>);

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Option<Playlist> {
        if tracks.is_empty() {
            None
        } else {
            Some(Playlist(tracks))
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The last `n` tracks, in playlist order.
    pub fn recent(&self, n: usize) -> &[Track] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

/// Where the user is in login → load → recommend.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewState {
    #[default]
    LoggedOut,
    LoggedIn {
        session: Session,
    },
    PlaylistLoaded {
        session: Session,
        playlist: Playlist,
    },
    Recommended {
        session: Session,
        playlist: Playlist,
        recommendations: Vec<RecommendedTrack>,
    },
}

impl ViewState {
    pub fn start(session: Option<Session>) -> ViewState {
        match session {
            Some(session) => ViewState::LoggedIn { session },
            None => ViewState::LoggedOut,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            ViewState::LoggedOut => None,
            ViewState::LoggedIn { session }
            | ViewState::PlaylistLoaded { session, .. }
            | ViewState::Recommended { session, .. } => Some(session),
        }
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        match self {
            ViewState::PlaylistLoaded { playlist, .. } | ViewState::Recommended { playlist, .. } => {
                Some(playlist)
            }
            _ => None,
        }
    }

    pub fn recommendations(&self) -> &[RecommendedTrack] {
        match self {
            ViewState::Recommended {
                recommendations, ..
            } => recommendations.as_slice(),
            _ => &[],
        }
    }

    /// Swaps in a freshly fetched playlist. Recommendations already on
    /// screen stay until the next recommendation response. An empty playlist
    /// leaves the state as it was.
    pub fn with_playlist(self, tracks: Vec<Track>) -> ViewState {
        let Some(playlist) = Playlist::new(tracks) else {
            return self;
        };
        let (session, recommendations) = match self {
            ViewState::LoggedOut => return ViewState::LoggedOut,
            ViewState::LoggedIn { session } | ViewState::PlaylistLoaded { session, .. } => {
                (session, Vec::new())
            }
            ViewState::Recommended {
                session,
                recommendations,
                ..
            } => (session, recommendations),
        };
        if recommendations.is_empty() {
            ViewState::PlaylistLoaded { session, playlist }
        } else {
            ViewState::Recommended {
                session,
                playlist,
                recommendations,
            }
        }
    }

    /// Replaces the recommendation list. Without a playlist there is nothing
    /// to attach them to and the state is returned unchanged.
    pub fn with_recommendations(self, recommendations: Vec<RecommendedTrack>) -> ViewState {
        match self {
            ViewState::PlaylistLoaded { session, playlist }
            | ViewState::Recommended {
                session, playlist, ..
            } => {
                if recommendations.is_empty() {
                    ViewState::PlaylistLoaded { session, playlist }
                } else {
                    ViewState::Recommended {
                        session,
                        playlist,
                        recommendations,
                    }
                }
            }
            other => other,
        }
    }
}
