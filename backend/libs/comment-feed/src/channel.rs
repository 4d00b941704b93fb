//! Notification channel naming for the Postgres bridge
//!
//! Channel names are Postgres identifiers: at most 63 bytes, and anything
//! beyond that is silently truncated by the server, which would make two long
//! post ids collide. Post ids also come from clients, so they must never be
//! able to escape the identifier context.
//!
//! Safe ids (`[A-Za-z0-9_-]`, short enough) map to `comments_<post_id>`.
//! Everything else maps to `commentsh_<sha256 prefix>`. The two prefixes
//! differ at byte 8, so no safe id can produce a hashed name and the mapping
//! stays injective.

use sha2::{Digest, Sha256};

/// Prefix for channels named directly after the post id
pub const CHANNEL_PREFIX: &str = "comments_";

/// Prefix for channels named after a digest of the post id
pub const HASHED_CHANNEL_PREFIX: &str = "commentsh_";

/// Longest identifier Postgres keeps without truncation (NAMEDATALEN - 1)
pub const MAX_CHANNEL_LEN: usize = 63;

/// Hex characters of the digest kept in hashed names (192 bits)
const DIGEST_HEX_LEN: usize = 48;

/// Build the notification channel name for a post
///
/// # Example
///
/// ```
/// use comment_feed::channel_for_post;
///
/// assert_eq!(channel_for_post("P1"), "comments_P1");
/// assert!(channel_for_post("p1\"; DROP TABLE posts; --").starts_with("commentsh_"));
/// ```
pub fn channel_for_post(post_id: &str) -> String {
    if is_safe_post_id(post_id) {
        return format!("{}{}", CHANNEL_PREFIX, post_id);
    }

    let digest = hex::encode(Sha256::digest(post_id.as_bytes()));
    format!("{}{}", HASHED_CHANNEL_PREFIX, &digest[..DIGEST_HEX_LEN])
}

/// Whether a post id can be embedded in a channel name verbatim
pub fn is_safe_post_id(post_id: &str) -> bool {
    !post_id.is_empty()
        && CHANNEL_PREFIX.len() + post_id.len() <= MAX_CHANNEL_LEN
        && post_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
