use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album_art: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// A suggested track together with why it was suggested.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RecommendedTrack {
    #[serde(flatten)]
    pub track: Track,
    /// Percentage scale, 0 to 100.
    pub confidence: f64,
    #[serde(default)]
    pub explanations: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginUrl {
    pub auth_url: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendRequest<'a> {
    pub playlist_tracks: &'a [Track],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recommended_track_is_flat_on_the_wire() {
        let value = json!({
            "id": "t1",
            "name": "Song",
            "artist": "Band",
            "album_art": "https://img/1.jpg",
            "preview_url": null,
            "confidence": 87.5,
            "explanations": ["Similar tempo", "Same era"]
        });
        let track: RecommendedTrack = serde_json::from_value(value).unwrap();
        assert_eq!(track.track.id, "t1");
        assert_eq!(track.track.preview_url, None);
        assert_eq!(track.confidence, 87.5);
        assert_eq!(track.explanations, vec!["Similar tempo", "Same era"]);
    }

    #[test]
    fn missing_preview_url_defaults_to_none() {
        let track: Track = serde_json::from_str(
            r#"{"id":"a","name":"b","artist":"c","album_art":"d"}"#,
        )
        .unwrap();
        assert!(track.preview_url.is_none());
    }

    #[test]
    fn recommend_request_wraps_tracks() {
        let tracks = vec![Track {
            id: "a".to_owned(),
            name: "b".to_owned(),
            artist: "c".to_owned(),
            album_art: "d".to_owned(),
            preview_url: Some("e".to_owned()),
        }];
        let body = serde_json::to_value(RecommendRequest {
            playlist_tracks: &tracks,
        })
        .unwrap();
        assert_eq!(body["playlist_tracks"][0]["preview_url"], "e");
        assert_eq!(body["playlist_tracks"].as_array().unwrap().len(), 1);
    }
}
