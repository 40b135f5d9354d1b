/// Core error taxonomy for the relay.
///
/// Only storage and platform failures surface here. A lookup miss in the
/// correlation store and an unclassifiable reply payload are expected
/// outcomes, modeled as `Ok(None)` and `ReplyContent::Unknown` respectively.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] teloxide::RequestError),
}
