//! # Permalink
//!
//! Translates the stable identifier of a post (its source file name) into
//! the public permalink the site serves it under.
//!
//! ```text
//! 2021-07-04-my-post.md        ──► /2021/07/04/my-post.html
//! 2021-07-04-my-post.markdown  ──► /2021/07/04/my-post.html
//! ```
//!
//! The identifier must start with a zero-padded `YYYY-MM-DD-` header. The
//! trailing suffix is inferred from the identifier itself: names ending in
//! `md` drop a three character `.md`, everything else drops nine
//! characters.

pub mod codec;
pub mod error;

pub use codec::{LocatorCodec, PostId, PostKind, PostPermalink, to_locator};
pub use error::{PermalinkError, Result};
