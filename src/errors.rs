//! Error types.

use core::fmt;

use crate::der::Tag;
use crate::encoding::RSA_ENCRYPTION_OID;

/// Alias for [`core::result::Result`] with the `rsa-keycodec` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Base64 input could not be decoded.
    InvalidEncoding,

    /// A structural element carried the wrong tag (or the wrong fixed byte).
    StructuralError {
        /// Where in the structure the mismatch was found.
        position: &'static str,
        /// Expected byte.
        expected: u8,
        /// Byte actually present.
        actual: u8,
    },

    /// Length field uses a form other than short form, `0x81` or `0x82`.
    UnsupportedLengthEncoding {
        /// Offset of the length byte within the buffer being read.
        offset: usize,
        /// The offending length byte.
        byte: u8,
    },

    /// AlgorithmIdentifier is not `rsaEncryption` with NULL parameters.
    OidMismatch {
        /// Where in the structure the identifier was expected.
        position: &'static str,
    },

    /// Version field is not the DER encoding of `INTEGER 0`.
    VersionMismatch {
        /// Where in the structure the version was expected.
        position: &'static str,
    },

    /// INTEGER content is empty, negative, or carries a superfluous leading zero.
    MalformedInteger {
        /// Name of the key component being read.
        field: &'static str,
    },

    /// Declared length runs past the end of the input.
    TruncatedInput {
        /// Bytes the encoding asks for.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A SEQUENCE held the wrong number of records.
    RecordCount {
        /// Which SEQUENCE was being split.
        position: &'static str,
        /// Expected number of records.
        expected: usize,
        /// Number of records found.
        actual: usize,
    },

    /// Unconsumed bytes after a complete structure.
    TrailingData {
        /// Which structure was followed by extra bytes.
        position: &'static str,
        /// Number of extra bytes.
        len: usize,
    },

    /// Content is too long for the length forms this codec emits.
    ContentTooLong {
        /// Length of the rejected content.
        len: usize,
    },

    /// A key component is empty once leading zero bytes are removed.
    EmptyComponent {
        /// Name of the key component.
        field: &'static str,
    },

    /// PEM armor errors.
    #[cfg(feature = "pem")]
    Pem(pem_rfc7468::Error),
}

impl Error {
    pub(crate) fn unexpected_tag(position: &'static str, expected: Tag, actual: u8) -> Self {
        Error::StructuralError {
            position,
            expected: expected.into(),
            actual,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding => write!(f, "invalid Base64 encoding"),
            Error::StructuralError {
                position,
                expected,
                actual,
            } => write!(
                f,
                "structural error in {position}: expected 0x{expected:02X}, found 0x{actual:02X}"
            ),
            Error::UnsupportedLengthEncoding { offset, byte } => write!(
                f,
                "unsupported DER length encoding 0x{byte:02X} at offset {offset}"
            ),
            Error::OidMismatch { position } => write!(
                f,
                "{position}: algorithm identifier is not rsaEncryption ({RSA_ENCRYPTION_OID}) with NULL parameters"
            ),
            Error::VersionMismatch { position } => {
                write!(f, "{position}: version is not INTEGER 0")
            }
            Error::MalformedInteger { field } => write!(f, "malformed INTEGER for {field}"),
            Error::TruncatedInput { needed, available } => write!(
                f,
                "truncated input: need {needed} bytes, {available} available"
            ),
            Error::RecordCount {
                position,
                expected,
                actual,
            } => write!(
                f,
                "{position}: expected {expected} records, found {actual}"
            ),
            Error::TrailingData { position, len } => {
                write!(f, "{len} trailing bytes after {position}")
            }
            Error::ContentTooLong { len } => {
                write!(f, "content of {len} bytes exceeds the 0xFFFF length limit")
            }
            Error::EmptyComponent { field } => write!(f, "key component {field} is empty"),
            #[cfg(feature = "pem")]
            Error::Pem(err) => write!(f, "PEM error: {err}"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "pem")]
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Error {
        Error::Pem(err)
    }
}

impl From<base64ct::Error> for Error {
    fn from(_: base64ct::Error) -> Error {
        Error::InvalidEncoding
    }
}
