use std::fmt::Display;

/// What a page shows while its single data fetch is outstanding or done.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ViewState::Loaded(value),
            Err(err) => ViewState::Failed(err.to_string()),
        }
    }
}
