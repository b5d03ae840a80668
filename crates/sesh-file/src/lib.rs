//! sesh-file - Filesystem-backed collaborators.

mod token_store;
mod view_cache;

pub use token_store::FileTokenStore;
pub use view_cache::{CachedView, FileViewCache};

use sesh_core::error::{Error, TransportError};

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::from(err))
}
