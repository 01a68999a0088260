use serde::{Deserialize, Serialize};

/// A single image post shown in the grid.
///
/// `id` is the post's index within the batch it was fetched in, so ids repeat
/// across batches. Nothing in the layout relies on it being unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub image: String,
}

impl Post {
    pub fn new(id: u64, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
        }
    }
}
