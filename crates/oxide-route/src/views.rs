//! Error page rendering.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Renders the body of an error response.
pub trait ErrorPages: Send + Sync {
    /// Returns the page for `status`, or `None` to fall back to `message`.
    fn render(&self, status: u16, message: &str) -> Option<String>;
}

impl<F> ErrorPages for F
where
    F: Fn(u16, &str) -> Option<String> + Send + Sync,
{
    fn render(&self, status: u16, message: &str) -> Option<String> {
        self(status, message)
    }
}

/// Error pages read from `<dir>/<status>.html`.
///
/// The literal `{{ message }}` in a page is replaced by the error message.
/// Pages are read on every call, so they can be edited while the router runs.
#[derive(Debug, Clone)]
pub struct ViewDir {
    dir: PathBuf,
}

impl ViewDir {
    /// Serves pages from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ErrorPages for ViewDir {
    fn render(&self, status: u16, message: &str) -> Option<String> {
        let file = self.dir.join(format!("{status}.html"));
        match fs::read_to_string(&file) {
            Ok(page) => Some(page.replace("{{ message }}", message)),
            Err(e) => {
                debug!(file = %file.display(), error = %e, "no error page");
                None
            }
        }
    }
}
