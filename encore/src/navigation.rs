use crate::error::Result;

/// The page address, as far as the app needs it.
pub trait Navigation {
    /// Full URL of the current page.
    fn current_url(&self) -> Result<String>;

    /// Show `url` in the address bar without loading it or adding a history
    /// entry.
    fn replace_url(&self, url: &str) -> Result<()>;

    /// Leave the page for `url`.
    fn navigate(&self, url: &str) -> Result<()>;
}
