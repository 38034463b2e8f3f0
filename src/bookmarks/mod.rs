//! Chromium `Bookmarks` file: where it lives, its JSON shape, and flattening.

pub mod decode;
pub mod extract;
pub mod locate;
