use secrecy::{ExposeSecret as _, SecretSlice};
use std::{fmt, marker::PhantomData};

use super::{Error, HashAlgorithm, KeyedHash as _, Salt};

/// A pseudorandom key, produced by [`extract`] and consumed by [`expand`](crate::expand()).
///
/// The key is tied to the hash algorithm it was extracted with, so it can't accidentally be
/// expanded with a different one.
pub struct Prk<H> {
	key: SecretSlice<u8>,
	hash: PhantomData<fn() -> H>,
}

impl<H: HashAlgorithm> Prk<H> {
	pub(crate) fn new(key: Vec<u8>) -> Self {
		Self {
			key: key.into(),
			hash: PhantomData,
		}
	}

	/// Use an existing pseudorandom key, such as a secret from a protocol's key schedule,
	/// rather than extracting one.
	///
	/// # Errors
	///
	/// Will return [`Error::InvalidPrk`] if `prk` is shorter than the hash's output length.
	pub fn from_bytes(prk: impl AsRef<[u8]>) -> Result<Self, Error> {
		let prk = prk.as_ref();

		if prk.len() < H::OUTPUT_LEN {
			tracing::debug!(
				hash = H::NAME,
				actual = prk.len(),
				min = H::OUTPUT_LEN,
				"PRK too short"
			);
			return Err(Error::invalid_prk(prk.len(), H::OUTPUT_LEN));
		}

		Ok(Self::new(prk.to_vec()))
	}

	pub fn expose_secret(&self) -> &[u8] {
		self.key.expose_secret()
	}
}

impl<H: HashAlgorithm> Clone for Prk<H> {
	fn clone(&self) -> Self {
		Self::new(self.expose_secret().to_vec())
	}
}

impl<H: HashAlgorithm> fmt::Debug for Prk<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Prk")
			.field("hash", &H::NAME)
			.finish_non_exhaustive()
	}
}

/// HKDF-Extract: concentrate the entropy of some input keying material into a pseudorandom key.
///
/// This never fails; HMAC takes salts and input keying material of any length, including none
/// at all.
#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, ikm_len = ikm.as_ref().len()))]
pub fn extract<'s, H: HashAlgorithm>(salt: impl Into<Salt<'s>>, ikm: impl AsRef<[u8]>) -> Prk<H> {
	let salt = salt.into();
	if salt == Salt::None {
		tracing::trace!("no salt, using zeroes");
	}

	let mut mac = H::Mac::new_keyed(&salt.key(H::OUTPUT_LEN));
	mac.update(ikm.as_ref());

	let mut prk = vec![0u8; H::OUTPUT_LEN];
	mac.finalize_into(&mut prk);

	Prk::new(prk)
}
