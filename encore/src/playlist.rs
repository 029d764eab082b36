use regex::Regex;
use std::sync::OnceLock;

fn playlist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("valid playlist pattern"))
}

/// Pulls the playlist id out of a share URL such as
/// `https://open.spotify.com/playlist/5jPjYAdQO0MgzHdwSmYPNZ?si=05d6`.
/// Anything that does not look like one is taken to be the id itself.
pub fn extract_playlist_id(reference: &str) -> &str {
    playlist_pattern()
        .captures(reference)
        .and_then(|c| c.get(1))
        .map_or(reference, |m| m.as_str())
}
