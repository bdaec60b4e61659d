//! Key derivation using HKDF, the HMAC-based extract-and-expand KDF of RFC 5869.
//!
//! If you have some secret input keying material (a Diffie-Hellman shared secret, a password
//! that has already been through a password hash, a master key) and you need one or more keys
//! from it, HKDF is how you get them.  It works in two steps:
//!
//! 1. **Extract** concentrates whatever entropy the input has into a fixed-size pseudorandom
//!    key ([`Prk`]), using an optional, non-secret [`Salt`].
//! 2. **Expand** stretches that pseudorandom key into as many bytes of output keying material
//!    ([`Okm`]) as you ask for (up to 255 times the hash's output length), bound to an `info`
//!    string that describes what the key is for.
//!
//! Most of the time you just want [`derive`], which does both.  If you want several keys from
//! the same input, [`extract`] once and [`Prk::expand`] with a different `info` for each; keys
//! expanded with different `info` are independent of one another.
//!
//! The hash is chosen with a type parameter, from the [`sha2`] family (or SHA-1, with the `sha1`
//! feature, if you absolutely must).
//!
//! ```rust
//! use strong_kdf::{Error, Salt, extract, sha2::Sha256};
//! # fn main() -> Result<(), Error> {
//!
//! let shared_secret = b"the output of some key agreement";
//!
//! let prk = extract::<Sha256>(Salt::None, shared_secret);
//! let encryption_key = prk.expand(b"encryption", 32)?;
//! let mac_key = prk.expand(b"authentication", 32)?;
//!
//! assert_ne!(encryption_key, mac_key);
//! # Ok(())
//! # }
//! ```
//!
//! Pseudorandom keys and output keying material are kept wrapped up, and are wiped from memory
//! when dropped; use `expose_secret()` to get at the bytes.
//!
//! For protocols built on the TLS 1.3 key schedule, the [`tls13`] module has
//! HKDF-Expand-Label and Derive-Secret.
mod derive;
mod error;
mod expand;
mod extract;
mod hash;
mod salt;
pub mod tls13;

pub use ::sha2;

pub use derive::derive;
pub use error::Error;
pub use expand::{Okm, expand};
pub use extract::{Prk, extract};
pub use hash::{HashAlgorithm, KeyedHash, MAX_BLOCKS};
pub use salt::{Salt, generate_salt};
