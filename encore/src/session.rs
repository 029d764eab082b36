use std::fmt;
use url::{form_urlencoded, Position, Url};

/// Query parameter the OAuth callback uses to hand us the token.
pub const TOKEN_PARAM: &str = "access_token";

/// Bearer credential for the backend. Lives only as long as the page.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    /// Returns `None` for an empty token.
    pub fn new(token: impl Into<String>) -> Option<Session> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Session(token))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(..)")
    }
}

/// Result of looking for a redirect credential in the page URL.
#[derive(Debug, PartialEq)]
pub struct Handoff {
    pub session: Session,
    /// Path, query and fragment to show in place of the current URL.
    pub scrubbed: String,
}

/// Finds `access_token` in the query of `href`.
///
/// Every occurrence of the parameter is removed from the scrubbed address.
/// The rest of the query is kept in order and exactly as it was written.
pub fn take_session(href: &str) -> Option<Handoff> {
    let mut url = Url::parse(href).ok()?;
    let query = url.query().unwrap_or_default().to_owned();
    let mut token = None;
    let mut rest = Vec::new();
    for piece in query.split('&') {
        match form_urlencoded::parse(piece.as_bytes()).next() {
            Some((key, value)) if key == TOKEN_PARAM => {
                token.get_or_insert_with(|| value.into_owned());
            }
            _ => rest.push(piece),
        }
    }
    let session = Session::new(token?)?;
    let rest = rest.join("&");
    url.set_query(if rest.is_empty() { None } else { Some(&rest) });
    Some(Handoff {
        session,
        scrubbed: url[Position::BeforePath..].to_owned(),
    })
}
