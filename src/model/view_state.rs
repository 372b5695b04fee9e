/// What the order list should currently render.
///
/// Exactly one variant holds at a time. `Loaded` always carries data; a request
/// that succeeds with nothing to show is `Empty`, never `Loaded` with an empty
/// collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Data present and non-empty.
    Loaded(T),
    /// Request succeeded but nothing matched.
    Empty,
    /// Request failed; carries a human-readable message.
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}
