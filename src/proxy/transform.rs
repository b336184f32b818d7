//! Response body rewriting.

use bytes::{Bytes, BytesMut};

const NEEDLE: &[u8] = b"userId";
const REPLACEMENT: &[u8] = b"user_id";

/// Replaces every occurrence of `userId` with `user_id`.
///
/// Plain byte substitution, not JSON-aware: matches inside any text,
/// including string values and longer identifiers.
pub fn transform_body(body: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = find(rest, NEEDLE) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(REPLACEMENT);
        rest = &rest[pos + NEEDLE.len()..];
    }
    out.extend_from_slice(rest);

    out.freeze()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
