//! Public/private path classification.
//!
//! The allow-list is the first gate state: a public path is admitted
//! before any cookie is read or any authority call is considered.
//!
//! Matching is prefix-based with a segment boundary, so `/login` covers
//! `/login` and `/login/reset` but not `/loginx`. The home path `/` is an
//! exact match only — a bare prefix match on `/` would classify every
//! path as public and disable the gate entirely.

/// The master list of paths served without authentication.
const DEFAULT_PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/forgot-password", "/about"];

/// Public path allow-list with segment-boundary prefix matching.
#[derive(Debug, Clone)]
pub struct PublicPaths {
    prefixes: Vec<String>,
}

impl PublicPaths {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `path` is on the allow-list.
    pub fn is_public(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| match prefix.as_str() {
            "/" => path == "/",
            prefix => {
                path == prefix
                    || (path.starts_with(prefix)
                        && path.as_bytes().get(prefix.len()) == Some(&b'/'))
            }
        })
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS.iter().copied())
    }
}
