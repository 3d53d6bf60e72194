#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    /// True when the text came from the cache and no provider call was made.
    pub cached: bool,
}

impl Transcript {
    pub fn fresh(text: String) -> Self {
        Self {
            text,
            cached: false,
        }
    }

    pub fn from_cache(text: String) -> Self {
        Self { text, cached: true }
    }
}
