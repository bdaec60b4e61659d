use std::borrow::Cow;

use super::HashAlgorithm;

/// The salt given to HKDF-Extract.
///
/// A salt is not secret, but a good one (random, `HashLen` bytes long, and shared between the
/// parties deriving keys) makes for a much stronger extraction.  If you don't have a salt, say so
/// with [`Salt::None`], and a salt of `HashLen` zero bytes is used instead.
///
/// Anything that looks like a byte slice converts into a salt, so most callers never need to
/// name this type at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Salt<'a> {
	#[default]
	None,
	Bytes(&'a [u8]),
}

impl<'a> Salt<'a> {
	/// The HMAC key to extract with.
	pub(crate) fn key(self, hash_len: usize) -> Cow<'a, [u8]> {
		match self {
			Salt::None => Cow::Owned(vec![0u8; hash_len]),
			Salt::Bytes(b) => Cow::Borrowed(b),
		}
	}
}

impl<'a> From<&'a [u8]> for Salt<'a> {
	fn from(b: &'a [u8]) -> Self {
		Salt::Bytes(b)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Salt<'a> {
	fn from(b: &'a [u8; N]) -> Self {
		Salt::Bytes(&b[..])
	}
}

impl<'a> From<&'a Vec<u8>> for Salt<'a> {
	fn from(b: &'a Vec<u8>) -> Self {
		Salt::Bytes(&b[..])
	}
}

impl<'a> From<Option<&'a [u8]>> for Salt<'a> {
	fn from(b: Option<&'a [u8]>) -> Self {
		b.map_or(Salt::None, Salt::Bytes)
	}
}

/// Create a random salt of the recommended length for `H`.
///
/// Store it alongside whatever you derive from it; it doesn't need to be kept secret, but you'll
/// need the same salt again to derive the same keys.
#[tracing::instrument(level = "debug", fields(hash = H::NAME))]
pub fn generate_salt<H: HashAlgorithm>() -> Vec<u8> {
	use rand::{RngCore, rng};

	let mut salt = vec![0u8; H::OUTPUT_LEN];

	rng().fill_bytes(&mut salt);

	salt
}
