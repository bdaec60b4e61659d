use super::{Error, HashAlgorithm, Okm, Salt, expand::check_output_len, extract};

/// Derive `len` bytes of output keying material from some input keying material.
///
/// This is HKDF-Extract followed by HKDF-Expand, and is what you want most of the time.  If
/// you need several keys from the same input, [`extract`] once and then
/// [`expand`](crate::Prk::expand) with a different `info` for each key.
///
/// # Example
///
/// ```rust
/// use strong_kdf::{Error, Salt, sha2::Sha256};
/// # fn main() -> Result<(), Error> {
///
/// let salt = strong_kdf::generate_salt::<Sha256>();
///
/// let key = strong_kdf::derive::<Sha256>(b"hunter2", &salt, b"session key", 32)?;
/// assert_eq!(32, key.len());
///
/// // The same inputs always derive the same key
/// assert_eq!(key, strong_kdf::derive::<Sha256>(b"hunter2", &salt, b"session key", 32)?);
///
/// // No salt at all is fine too, if not ideal
/// let unsalted = strong_kdf::derive::<Sha256>(b"hunter2", Salt::None, b"session key", 32)?;
/// assert_ne!(key, unsalted);
///
/// // But there's a limit to how much you can ask for
/// let result = strong_kdf::derive::<Sha256>(b"hunter2", &salt, b"session key", 8161);
/// assert!(matches!(result, Err(Error::OutputLength { .. })));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Will return [`Error::OutputLength`] if `len` is more than 255 times the hash's output length.
/// No hashing is done in that case.
#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, len = len))]
pub fn derive<'s, H: HashAlgorithm>(
	ikm: impl AsRef<[u8]>,
	salt: impl Into<Salt<'s>>,
	info: impl AsRef<[u8]>,
	len: usize,
) -> Result<Okm, Error> {
	check_output_len::<H>(len)?;

	extract::<H>(salt, ikm).expand(info, len)
}
