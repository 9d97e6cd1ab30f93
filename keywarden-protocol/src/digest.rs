//! Digest primitive shared with the server.
//!
//! The service's token derivation is pinned to MD5 rendered as lowercase
//! hex. The algorithm is an interoperability constant, not a tunable
//! security parameter: MD5 is not collision resistant by modern standards,
//! and the server contract accepts that weakness.

use md5::{Digest, Md5};

/// Returns the lowercase hex MD5 digest of `input`.
#[must_use]
pub fn digest_hex(input: impl AsRef<[u8]>) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_ref());
    hex::encode(hasher.finalize())
}
