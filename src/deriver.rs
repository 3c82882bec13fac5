use crate::error::Result;
use crate::filter::{apply_chain, Filter};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha512};
use std::fmt;
use zeroize::Zeroizing;

/// Length of the working string cut from the base64-encoded digest.
pub const WORKING_LEN: usize = 32;

/// The secret every site password is derived from. Zeroized on drop.
#[derive(Clone)]
pub struct MasterPassword(Zeroizing<String>);

impl MasterPassword {
    /// Wraps `secret` after trimming surrounding whitespace.
    pub fn new(secret: &str) -> Self {
        Self(Zeroizing::new(secret.trim().to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterPassword(<redacted>)")
    }
}

/// Hashes `site:master` with SHA-512 and keeps the first 32 base64 characters.
///
/// A 64-byte digest always encodes to 88 characters, so the cut never fails.
pub fn working_string(site: &str, master: &MasterPassword) -> Zeroizing<String> {
    let mut hasher = Sha512::new();
    hasher.update(site.as_bytes());
    hasher.update(b":");
    hasher.update(master.expose().as_bytes());
    let digest = Zeroizing::new(hasher.finalize().to_vec());

    let mut encoded = Zeroizing::new(STANDARD.encode(&digest[..]));
    encoded.truncate(WORKING_LEN);
    encoded
}

/// Derives the password for `site`: the working string threaded through `filters`.
pub fn derive(
    site: &str,
    master: &MasterPassword,
    filters: &[Filter],
) -> Result<Zeroizing<String>> {
    let base = working_string(site, master);
    apply_chain(filters, &base).map(Zeroizing::new)
}
