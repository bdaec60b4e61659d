#[derive(Debug, thiserror::Error, thiserror_ext::Construct)]
#[non_exhaustive]
pub enum Error {
	#[error("requested output length {requested} exceeds maximum of {max} bytes")]
	OutputLength { requested: usize, max: usize },

	#[error("pseudorandom key is {actual} bytes, needs at least {min}")]
	InvalidPrk { actual: usize, min: usize },

	#[error("invalid TLS 1.3 HKDF label: {0}")]
	InvalidLabel(String),
}
