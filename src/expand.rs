use secrecy::{ExposeSecret as _, SecretSlice, zeroize::Zeroize as _};
use std::fmt;

use super::{Error, HashAlgorithm, KeyedHash as _, Prk};

/// Output keying material; the key(s) you actually wanted.
///
/// Comparing two [`Okm`]s takes the same time regardless of where (or whether) they differ.
pub struct Okm(SecretSlice<u8>);

impl Okm {
	pub fn expose_secret(&self) -> &[u8] {
		self.0.expose_secret()
	}

	pub fn len(&self) -> usize {
		self.expose_secret().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl From<Vec<u8>> for Okm {
	fn from(v: Vec<u8>) -> Self {
		Okm(v.into())
	}
}

impl Clone for Okm {
	fn clone(&self) -> Self {
		self.expose_secret().to_vec().into()
	}
}

impl PartialEq for Okm {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq::constant_time_eq(self.expose_secret(), other.expose_secret())
	}
}

impl Eq for Okm {}

impl fmt::Debug for Okm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Okm")
			.field("len", &self.len())
			.finish_non_exhaustive()
	}
}

pub(crate) fn check_output_len<H: HashAlgorithm>(len: usize) -> Result<(), Error> {
	if len > H::MAX_OUTPUT_LEN {
		tracing::debug!(
			hash = H::NAME,
			requested = len,
			max = H::MAX_OUTPUT_LEN,
			"output length out of range"
		);
		return Err(Error::output_length(len, H::MAX_OUTPUT_LEN));
	}

	Ok(())
}

impl<H: HashAlgorithm> Prk<H> {
	/// HKDF-Expand this key into `len` bytes of output keying material, bound to `info`.
	///
	/// Expanding the same key with different `info` gives independent keys, so one [`Prk`] can
	/// serve many purposes.
	///
	/// # Errors
	///
	/// Will return [`Error::OutputLength`] if `len` is more than 255 times the hash's output
	/// length.
	#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, info_len = info.as_ref().len(), len = len))]
	pub fn expand(&self, info: impl AsRef<[u8]>, len: usize) -> Result<Okm, Error> {
		check_output_len::<H>(len)?;

		let mut okm = vec![0u8; len];
		self.fill(info.as_ref(), &mut okm);

		Ok(okm.into())
	}

	/// As [`Prk::expand`], but fills `out` rather than allocating.
	///
	/// # Errors
	///
	/// Will return [`Error::OutputLength`] if `out` is longer than 255 times the hash's output
	/// length, in which case `out` is left untouched.
	#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, info_len = info.as_ref().len(), len = out.len()))]
	pub fn expand_into(&self, info: impl AsRef<[u8]>, out: &mut [u8]) -> Result<(), Error> {
		check_output_len::<H>(out.len())?;

		self.fill(info.as_ref(), out);

		Ok(())
	}

	// T(i) = HMAC(PRK, T(i-1) || info || i), with T(0) empty
	fn fill(&self, info: &[u8], out: &mut [u8]) {
		if out.is_empty() {
			return;
		}

		let keyed = H::Mac::new_keyed(self.expose_secret());
		let mut block = vec![0u8; H::OUTPUT_LEN];

		// check_output_len ensures there are never more chunks than counter values
		for (chunk, counter) in out.chunks_mut(H::OUTPUT_LEN).zip(1..=u8::MAX) {
			let mut mac = keyed.clone();
			if counter > 1 {
				mac.update(&block);
			}
			mac.update(info);
			mac.update(&[counter]);
			mac.finalize_into(&mut block);

			chunk.copy_from_slice(&block[..chunk.len()]);
		}

		block.zeroize();
	}
}

/// HKDF-Expand: stretch a pseudorandom key into `len` bytes of output keying material.
///
/// # Errors
///
/// Will return [`Error::OutputLength`] if `len` is more than 255 times the hash's output length.
pub fn expand<H: HashAlgorithm>(
	prk: &Prk<H>,
	info: impl AsRef<[u8]>,
	len: usize,
) -> Result<Okm, Error> {
	prk.expand(info, len)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Salt, extract,
		test_support::{CountingSha256, hmac_calls, init},
	};
	use hex_literal::hex;
	use sha1::Sha1;
	use sha2::{Sha256, Sha512};

	fn prk<H: HashAlgorithm>(bytes: &[u8]) -> Prk<H> {
		Prk::from_bytes(bytes).expect("PRK rejected")
	}

	#[test]
	fn rfc5869_case_1() {
		init();
		let prk = prk::<Sha256>(&hex!(
			"077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5"
		));

		assert_eq!(
			&hex!(
				"3cb25f25faacd57a90434f64d0362f2a"
				"2d2d0a90cf1a5a4c5db02d56ecc4c5bf"
				"34007208d5b887185865"
			),
			prk.expand(hex!("f0f1f2f3f4f5f6f7f8f9"), 42)
				.expect("expand failed")
				.expose_secret()
		);
	}

	#[test]
	fn rfc5869_case_3() {
		init();
		let prk = prk::<Sha256>(&hex!(
			"19ef24a32c717b167f33a91d6f648bdf96596776afdb6377ac434c1c293ccb04"
		));

		assert_eq!(
			&hex!(
				"8da4e775a563c18f715f802a063c5a31"
				"b8a11f5c5ee1879ec3454e5f3c738d2d"
				"9d201395faa4b61a96c8"
			),
			expand(&prk, b"", 42).expect("expand failed").expose_secret()
		);
	}

	#[test]
	fn rfc5869_case_4_sha1() {
		init();
		let prk = prk::<Sha1>(&hex!("9b6c18c432a7bf8f0e71c8eb88f4b30baa2ba243"));

		assert_eq!(
			&hex!(
				"085a01ea1b10f36933068b56efa5ad81"
				"a4f14b822f5b091568a9cdd4f155fda2"
				"c22e422478d305f3f896"
			),
			prk.expand(hex!("f0f1f2f3f4f5f6f7f8f9"), 42)
				.expect("expand failed")
				.expose_secret()
		);
	}

	#[test]
	fn zero_length() {
		init();
		let okm = prk::<Sha256>(&[1u8; 32])
			.expand(b"info", 0)
			.expect("expand failed");

		assert!(okm.is_empty());
	}

	#[test]
	fn zero_length_does_no_hashing() {
		init();
		let prk = prk::<CountingSha256>(&[1u8; 32]);
		hmac_calls();

		assert!(prk.expand(b"info", 0).expect("expand failed").is_empty());
		prk.expand_into(b"info", &mut [0u8; 0]).expect("expand failed");
		assert_eq!((0, 0), hmac_calls());

		// Through derive, only extract does any work
		let okm = crate::derive::<CountingSha256>(b"ikm", Salt::None, b"info", 0)
			.expect("derive failed");
		assert!(okm.is_empty());
		assert_eq!((1, 1), hmac_calls());
	}

	#[test]
	fn one_tag_per_block() {
		init();
		let prk = prk::<CountingSha256>(&[1u8; 32]);
		hmac_calls();

		prk.expand(b"info", 1).expect("expand failed");
		assert_eq!((1, 1), hmac_calls());

		prk.expand(b"info", 32).expect("expand failed");
		assert_eq!((1, 1), hmac_calls());

		prk.expand(b"info", 33).expect("expand failed");
		assert_eq!((1, 2), hmac_calls());

		assert!(prk.expand(b"info", 255 * 32 + 1).is_err());
		assert_eq!((0, 0), hmac_calls());
	}

	#[test]
	fn exact_lengths() {
		init();
		let prk = prk::<Sha256>(&[1u8; 32]);

		for len in [1, 31, 32, 33, 63, 64, 65, 100, 8159, 8160] {
			assert_eq!(len, prk.expand(b"info", len).expect("expand failed").len());
		}
	}

	#[test]
	fn bound_is_per_hash() {
		init();
		let sha256 = prk::<Sha256>(&[1u8; 32]);
		assert!(sha256.expand(b"", 255 * 32).is_ok());
		assert!(matches!(
			sha256.expand(b"", 255 * 32 + 1),
			Err(Error::OutputLength {
				requested: 8161,
				max: 8160
			})
		));

		let sha1 = prk::<Sha1>(&[1u8; 20]);
		assert!(sha1.expand(b"", 255 * 20).is_ok());
		assert!(matches!(
			sha1.expand(b"", 255 * 20 + 1),
			Err(Error::OutputLength {
				requested: 5101,
				max: 5100
			})
		));

		let sha512 = prk::<Sha512>(&[1u8; 64]);
		assert!(sha512.expand(b"", 255 * 64).is_ok());
		assert!(matches!(
			sha512.expand(b"", 255 * 64 + 1),
			Err(Error::OutputLength {
				requested: 16321,
				max: 16320
			})
		));
	}

	#[test]
	fn prefix_consistency() {
		init();
		let prk = prk::<Sha256>(&[9u8; 32]);
		let long = prk.expand(b"context", 200).expect("expand failed");

		for len in [0, 1, 31, 32, 33, 64, 199] {
			let short = prk.expand(b"context", len).expect("expand failed");
			assert_eq!(&long.expose_secret()[..len], short.expose_secret());
		}
	}

	#[test]
	fn info_separates_keys() {
		init();
		let prk = extract::<Sha256>(Salt::None, b"shared secret");

		let a = prk.expand(b"encryption", 32).expect("expand failed");
		let b = prk.expand(b"authentication", 32).expect("expand failed");

		assert_ne!(a, b);
		assert_eq!(a, prk.expand(b"encryption", 32).expect("expand failed"));
	}

	#[test]
	fn expand_into_matches_expand() {
		init();
		let prk = prk::<Sha512>(&[3u8; 64]);
		let mut out = [0u8; 150];

		prk.expand_into(b"info", &mut out).expect("expand failed");

		assert_eq!(
			&out[..],
			prk.expand(b"info", 150).expect("expand failed").expose_secret()
		);
	}

	#[test]
	fn expand_into_rejects_oversized_buffer() {
		init();
		let prk = prk::<Sha1>(&[3u8; 20]);
		let mut out = vec![0xffu8; 5101];

		assert!(matches!(
			prk.expand_into(b"", &mut out),
			Err(Error::OutputLength { .. })
		));
		assert!(out.iter().all(|b| *b == 0xff));
	}

	#[test]
	fn long_prk_matches_reference_implementation() {
		init();
		let raw = [5u8; 80];
		let mut expected = [0u8; 77];
		hkdf::Hkdf::<Sha256>::from_prk(&raw)
			.expect("reference rejected PRK")
			.expand(b"info", &mut expected)
			.expect("reference expand failed");

		assert_eq!(
			&expected[..],
			prk::<Sha256>(&raw)
				.expand(b"info", 77)
				.expect("expand failed")
				.expose_secret()
		);
	}

	#[test]
	fn okm_debug_does_not_leak() {
		init();
		let okm = Okm::from(vec![0xcdu8; 4]);
		let dbg = format!("{okm:?}");

		assert!(dbg.contains("len: 4"));
		assert!(!dbg.contains("cd"));
		assert!(!dbg.contains("205"));
	}
}
