// Crate error type. Every variant states *where* things went wrong.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening or decoding the maze image failed.
    #[error("could not load maze image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
