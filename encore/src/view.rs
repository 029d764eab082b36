//! What the page shows, derived from [`ViewState`] alone.

use crate::model::{RecommendedTrack, Track};
use crate::state::ViewState;

/// Number of playlist tracks previewed above the recommend button.
pub const RECENT_TRACKS: usize = 5;

#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    Login,
    Main {
        busy: bool,
        playlist: Option<PlaylistPanel<'a>>,
        recommendations: &'a [RecommendedTrack],
    },
}

#[derive(Debug, PartialEq)]
pub struct PlaylistPanel<'a> {
    pub total: usize,
    pub recent: &'a [Track],
}

impl PlaylistPanel<'_> {
    pub fn heading(&self) -> String {
        format!("Your Playlist ({} tracks)", self.total)
    }
}

pub fn confidence_label(track: &RecommendedTrack) -> String {
    format!("Confidence: {}%", track.confidence)
}

pub fn render(state: &ViewState, busy: bool) -> Screen<'_> {
    if state.session().is_none() {
        return Screen::Login;
    }
    Screen::Main {
        busy,
        playlist: state.playlist().map(|p| PlaylistPanel {
            total: p.len(),
            recent: p.recent(RECENT_TRACKS),
        }),
        recommendations: state.recommendations(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn track(id: usize) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {}", id),
            artist: "Artist".to_owned(),
            album_art: String::new(),
            preview_url: None,
        }
    }

    fn loaded(n: usize) -> ViewState {
        ViewState::start(Session::new("tok")).with_playlist((0..n).map(track).collect())
    }

    #[test]
    fn logged_out_shows_login_only() {
        assert_eq!(render(&ViewState::LoggedOut, false), Screen::Login);
        assert_eq!(render(&ViewState::LoggedOut, true), Screen::Login);
    }

    #[test]
    fn logged_in_shows_input_only() {
        let state = ViewState::start(Session::new("tok"));
        assert_eq!(
            render(&state, true),
            Screen::Main {
                busy: true,
                playlist: None,
                recommendations: &[],
            }
        );
    }

    #[test]
    fn long_playlist_shows_last_five() {
        let state = loaded(7);
        let Screen::Main { playlist: Some(panel), .. } = render(&state, false) else {
            panic!("expected playlist panel");
        };
        assert_eq!(panel.total, 7);
        assert_eq!(panel.heading(), "Your Playlist (7 tracks)");
        let ids: Vec<_> = panel.recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "4", "5", "6"]);
    }

    #[test]
    fn short_playlist_shows_everything() {
        let state = loaded(4);
        let Screen::Main { playlist: Some(panel), .. } = render(&state, false) else {
            panic!("expected playlist panel");
        };
        assert_eq!(panel.recent.len(), 4);
        assert_eq!(panel.recent[0].id, "0");
    }

    #[test]
    fn recommendations_are_listed() {
        let rec = RecommendedTrack {
            track: track(9),
            confidence: 92.0,
            explanations: vec!["Similar energy".to_owned()],
        };
        let state = loaded(2).with_recommendations(vec![rec.clone()]);
        let Screen::Main { recommendations, .. } = render(&state, false) else {
            panic!("expected main screen");
        };
        assert_eq!(recommendations, &[rec][..]);
        assert_eq!(confidence_label(&recommendations[0]), "Confidence: 92%");
    }
}
