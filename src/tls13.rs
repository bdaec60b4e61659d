//! The TLS 1.3 key schedule's wrappers around HKDF-Expand (RFC 8446, section 7.1).
//!
//! TLS 1.3 never calls HKDF-Expand with a raw `info`; it always encodes a label, the desired
//! output length, and a context (usually a transcript hash) into an `HkdfLabel` structure first.
//! The functions here do that encoding, so you can run a TLS 1.3 (or TLS 1.3-alike) key schedule
//! on top of [`extract`](crate::extract) and [`Prk`].

use super::{Error, HashAlgorithm, Okm, Prk, expand::check_output_len};

const LABEL_PREFIX: &[u8] = b"tls13 ";

// label<7..255>, once prefixed
const MIN_LABEL_LEN: usize = 7;
const MAX_LABEL_LEN: usize = 255;
const MAX_CONTEXT_LEN: usize = 255;

/// HKDF-Expand-Label: expand `secret` into `len` bytes, bound to a `label` and a `context`.
///
/// The label is given without the `"tls13 "` prefix; that is added for you.
///
/// # Errors
///
/// Will return [`Error::OutputLength`] if `len` is more than 255 times the hash's output length,
/// or [`Error::InvalidLabel`] if the label is empty or too long, the context is longer than 255
/// bytes, or `len` doesn't fit in the 16-bit length field.
#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, label_len = label.as_ref().len(), context_len = context.as_ref().len(), len = len))]
pub fn expand_label<H: HashAlgorithm>(
	secret: &Prk<H>,
	label: impl AsRef<[u8]>,
	context: impl AsRef<[u8]>,
	len: usize,
) -> Result<Okm, Error> {
	check_output_len::<H>(len)?;

	let info = hkdf_label(label.as_ref(), context.as_ref(), len)?;

	secret.expand(info, len)
}

/// Derive-Secret: expand `secret` with `label`, using the hash of `messages` as the context.
///
/// The output is always exactly the hash's output length, which makes it suitable as the
/// next secret (or salt) in a key schedule.
///
/// # Example
///
/// ```rust
/// use strong_kdf::{Error, Prk, Salt, extract, sha2::Sha256, tls13};
/// # fn main() -> Result<(), Error> {
///
/// // The early secret, with no PSK
/// let early = extract::<Sha256>(Salt::None, [0u8; 32]);
///
/// // The salt for extracting the handshake secret
/// let derived = tls13::derive_secret(&early, "derived", b"")?;
///
/// let handshake = extract::<Sha256>(derived.expose_secret(), b"(EC)DHE shared secret");
/// let client_hs = tls13::derive_secret(&handshake, "c hs traffic", b"ClientHello...ServerHello")?;
///
/// // Traffic secrets are used in turn to expand keys and IVs
/// let key = tls13::expand_label(&Prk::<Sha256>::from_bytes(client_hs.expose_secret())?, "key", b"", 16)?;
/// assert_eq!(16, key.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Will return [`Error::InvalidLabel`] if the label is empty or too long.
#[tracing::instrument(level = "debug", skip_all, fields(hash = H::NAME, label_len = label.as_ref().len(), messages_len = messages.as_ref().len()))]
pub fn derive_secret<H: HashAlgorithm>(
	secret: &Prk<H>,
	label: impl AsRef<[u8]>,
	messages: impl AsRef<[u8]>,
) -> Result<Okm, Error> {
	let transcript_hash = H::hash(messages.as_ref());

	expand_label(secret, label, transcript_hash, H::OUTPUT_LEN)
}

// struct {
//     uint16 length = Length;
//     opaque label<7..255> = "tls13 " + Label;
//     opaque context<0..255> = Context;
// } HkdfLabel;
fn hkdf_label(label: &[u8], context: &[u8], len: usize) -> Result<Vec<u8>, Error> {
	let length = u16::try_from(len)
		.map_err(|_| Error::invalid_label(format!("output length {len} does not fit in 16 bits")))?;

	let full_label_len = LABEL_PREFIX.len() + label.len();
	if !(MIN_LABEL_LEN..=MAX_LABEL_LEN).contains(&full_label_len) {
		tracing::debug!(label_len = label.len(), "label length out of range");
		return Err(Error::invalid_label(format!(
			"label must be between {} and {} bytes, got {}",
			MIN_LABEL_LEN - LABEL_PREFIX.len(),
			MAX_LABEL_LEN - LABEL_PREFIX.len(),
			label.len()
		)));
	}

	if context.len() > MAX_CONTEXT_LEN {
		tracing::debug!(context_len = context.len(), "context too long");
		return Err(Error::invalid_label(format!(
			"context must be at most {MAX_CONTEXT_LEN} bytes, got {}",
			context.len()
		)));
	}

	let mut info = Vec::with_capacity(2 + 1 + full_label_len + 1 + context.len());
	info.extend_from_slice(&length.to_be_bytes());
	// Both lengths were range checked above
	info.push(full_label_len as u8);
	info.extend_from_slice(LABEL_PREFIX);
	info.extend_from_slice(label);
	info.push(context.len() as u8);
	info.extend_from_slice(context);

	Ok(info)
}
