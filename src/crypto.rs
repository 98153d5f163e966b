use base64::{engine::general_purpose::URL_SAFE as Base64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroize;

pub const DEFAULT_ITERATIONS: u32 = 390_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 password hashing.
///
/// Stored form is `<base64 salt>$<base64 key>` using the URL-safe alphabet
/// with padding. The iteration count is not part of the stored form, so a
/// hash only verifies under the count it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl PasswordHasher {
    pub fn with_iterations(iterations: u32) -> Self {
        PasswordHasher {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);

        let mut key = self.derive(password, &salt);
        let encoded = format!("{}${}", Base64.encode(salt), Base64.encode(key));
        key.zeroize();
        encoded
    }

    /// Re-derives the key from `password` and the stored salt. Malformed
    /// stored values never verify.
    pub fn verify(&self, stored: &str, password: &str) -> bool {
        let Some((salt_b64, key_b64)) = stored.split_once('$') else {
            warn!("stored password hash has no salt separator");
            return false;
        };
        let (Ok(salt), Ok(expected)) = (Base64.decode(salt_b64), Base64.decode(key_b64)) else {
            warn!("stored password hash is not valid base64");
            return false;
        };
        if expected.len() != KEY_LEN {
            warn!(len = expected.len(), "stored password key has the wrong length");
            return false;
        }

        let mut key = self.derive(password, &salt);
        let matches = bool::from(key[..].ct_eq(&expected[..]));
        key.zeroize();
        matches
    }

    fn derive(&self, password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, self.iterations, &mut key);
        key
    }
}
