use hmac::{
	SimpleHmac,
	digest::{Digest, OutputSizeUser, core_api::BlockSizeUser},
};

/// Largest number of blocks that HKDF-Expand may produce, as the block counter is a single byte.
pub const MAX_BLOCKS: usize = 255;

/// A keyed hash (in practice, HMAC) that produces a fixed-length tag over a key and a message.
///
/// Implementations are keyed once and then cloned for each message, so `Clone` must carry the
/// keyed state across.
pub trait KeyedHash: Clone {
	/// Key a fresh instance.  Any key length must be accepted.
	fn new_keyed(key: &[u8]) -> Self;

	fn update(&mut self, data: &[u8]);

	/// Write the tag into `out`, which is exactly the algorithm's output length.
	fn finalize_into(self, out: &mut [u8]);
}

impl<D> KeyedHash for SimpleHmac<D>
where
	D: Digest + BlockSizeUser + Clone,
{
	fn new_keyed(key: &[u8]) -> Self {
		<Self as hmac::Mac>::new_from_slice(key).expect("HMAC takes keys of any length")
	}

	fn update(&mut self, data: &[u8]) {
		hmac::Mac::update(self, data);
	}

	fn finalize_into(self, out: &mut [u8]) {
		out.copy_from_slice(&hmac::Mac::finalize(self).into_bytes());
	}
}

/// Identifies the hash function that HKDF is built on.
///
/// This is implemented for the SHA-2 family (and SHA-1, with the `sha1` feature), so you
/// usually just name the hash as a type parameter, as in `derive::<Sha256>(...)`.
pub trait HashAlgorithm {
	/// Human-readable name, for logging.
	const NAME: &'static str;

	/// `HashLen`, the size of a PRK and of each expansion block.
	const OUTPUT_LEN: usize;

	/// The most output keying material one PRK can be expanded into.
	const MAX_OUTPUT_LEN: usize = MAX_BLOCKS * Self::OUTPUT_LEN;

	type Mac: KeyedHash;

	/// Plain (unkeyed) hash of `data`.
	fn hash(data: &[u8]) -> Vec<u8>;
}

macro_rules! hmac_hash_algorithm {
	($ty:ty, $name:literal) => {
		impl HashAlgorithm for $ty {
			const NAME: &'static str = $name;
			const OUTPUT_LEN: usize = <<$ty as OutputSizeUser>::OutputSize as typenum::Unsigned>::USIZE;

			type Mac = SimpleHmac<$ty>;

			fn hash(data: &[u8]) -> Vec<u8> {
				<$ty as Digest>::digest(data).to_vec()
			}
		}
	};
}

hmac_hash_algorithm!(sha2::Sha224, "SHA-224");
hmac_hash_algorithm!(sha2::Sha256, "SHA-256");
hmac_hash_algorithm!(sha2::Sha384, "SHA-384");
hmac_hash_algorithm!(sha2::Sha512, "SHA-512");

#[cfg(any(test, feature = "sha1"))]
hmac_hash_algorithm!(sha1::Sha1, "SHA-1");
