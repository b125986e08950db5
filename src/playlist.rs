use serde_json::Value;

/// Ordered, non-empty list of media URLs for one review session.
///
/// An empty session is never represented as an empty `Playlist`; callers get
/// `None` back from the constructors and treat that as "no media".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    urls: Vec<String>,
}

impl Playlist {
    /// Build a playlist from already-typed URLs. Blank entries are dropped.
    pub fn new<I, S>(urls: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(Into::into)
            .filter(|url| !url.trim().is_empty())
            .collect();

        if urls.is_empty() {
            None
        } else {
            Some(Self { urls })
        }
    }

    /// Parse the raw provider payload.
    ///
    /// Anything other than an array made only of strings is malformed and
    /// yields `None`, the same as an absent or empty payload.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let items = payload.as_array()?;
        let mut urls = Vec::with_capacity(items.len());
        for item in items {
            urls.push(item.as_str()?.to_string());
        }
        Self::new(urls)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }

    /// Validate a signed navigation target against the playlist bounds.
    pub fn checked_index(&self, index: isize) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.urls.len())
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}
