#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Supported layouts
//!
//! - `SubjectPublicKeyInfo` ([RFC5280]) for public keys
//! - PKCS#1 `RSAPrivateKey` ([RFC8017]) for two-prime private keys
//! - PKCS#8 `PrivateKeyInfo` ([RFC5208]) wrapping a PKCS#1 key
//!
//! Keys are carried as big-endian byte strings: this crate frames them and
//! never does arithmetic on them.
//!
//! # Usage
//!
//! ## Exporting a key
//! ```
//! use rsa_keycodec::{export_private_key_pkcs1, read_private_key_info, RsaPrivateComponents};
//! use hex_literal::hex;
//!
//! let private_key = RsaPrivateComponents::new(
//!     &hex!("ab240c3361d02e37"),
//!     &hex!("010001"),
//!     &hex!("11e54a15259d22f9"),
//!     &hex!("ceff5cf3"),
//!     &hex!("d3a7aaad"),
//!     &hex!("ccaddf17"),
//!     &hex!("cb529d3d"),
//!     &hex!("bb526d6f"),
//! )?;
//!
//! let b64 = export_private_key_pkcs1(&private_key)?;
//! assert_eq!(
//!     b64.as_str(),
//!     "MEACAQACCQCrJAwzYdAuNwIDAQABAggR5UoVJZ0i+QIFAM7/XPMCBQDTp6qtAgUAzK3fFwIFAMtSnT0CBQC7Um1v"
//! );
//! assert_eq!(read_private_key_info(&b64)?, private_key);
//! # Ok::<(), rsa_keycodec::Error>(())
//! ```
//!
//! ## Converting between PKCS#1 and PKCS#8
//! ```
//! use rsa_keycodec::{get_key_format, pkcs1_to_pkcs8, KeyFormat};
//!
//! let pkcs1 = "MEACAQACCQCrJAwzYdAuNwIDAQABAggR5UoVJZ0i+QIFAM7/XPMCBQDTp6qtAgUAzK3fFwIFAMtSnT0CBQC7Um1v";
//! assert_eq!(get_key_format(pkcs1), KeyFormat::Pkcs1);
//!
//! let pkcs8 = pkcs1_to_pkcs8(pkcs1)?;
//! assert_eq!(get_key_format(&pkcs8), KeyFormat::Pkcs8);
//! # Ok::<(), rsa_keycodec::Error>(())
//! ```
//!
//! ## PEM
//!
//! Note: requires the `pem` feature (enabled by default).
//!
#![cfg_attr(feature = "pem", doc = "```")]
#![cfg_attr(not(feature = "pem"), doc = "```ignore")]
//! use rsa_keycodec::{read_public_key_pem, export_public_key_pem, LineEnding};
//!
//! let pem = "-----BEGIN PUBLIC KEY-----
//! MCQwDQYJKoZIhvcNAQEBBQADEwAwEAIJAMxsYTDjW0a/AgMBAAE=
//! -----END PUBLIC KEY-----
//! ";
//!
//! let public_key = read_public_key_pem(pem)?;
//! assert_eq!(public_key.e(), &[0x01, 0x00, 0x01]);
//! assert_eq!(export_public_key_pem(&public_key, LineEnding::LF)?, pem);
//! # Ok::<(), rsa_keycodec::Error>(())
//! ```
//!
//! [RFC5208]: https://datatracker.ietf.org/doc/html/rfc5208#section-5
//! [RFC5280]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1

#[cfg(doctest)]
pub struct ReadmeDoctests;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use const_oid::ObjectIdentifier;
#[cfg(feature = "pem")]
pub use pem_rfc7468::LineEnding;
pub use zeroize::Zeroizing;

mod der;
pub mod errors;

mod encoding;
mod export;
mod format;
mod key;

pub use crate::{
    encoding::{
        decode_private_key_pkcs1, decode_private_key_pkcs8, decode_public_key,
        encode_private_key_pkcs1, encode_private_key_pkcs8, encode_public_key, RSA_ALGORITHM_ID,
        RSA_ENCRYPTION_OID, VERSION_ZERO,
    },
    errors::{Error, Result},
    export::{
        export_private_key_pkcs1, export_private_key_pkcs8, export_public_key, get_key_format,
        pkcs1_to_pkcs8, pkcs8_to_pkcs1, read_private_key_info, read_public_key_info,
    },
    format::{
        convert_pkcs1_to_pkcs8, convert_pkcs8_to_pkcs1, decode_private_key, detect_format,
        KeyFormat,
    },
    key::{RsaPrivateComponents, RsaPublicComponents},
};

#[cfg(feature = "pem")]
pub use crate::export::{
    export_private_key_pkcs1_pem, export_private_key_pkcs8_pem, export_public_key_pem,
    read_private_key_pem, read_public_key_pem, PKCS1_PRIVATE_KEY_LABEL, PKCS8_PRIVATE_KEY_LABEL,
    PUBLIC_KEY_LABEL,
};
