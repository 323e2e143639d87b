//! Base64 and PEM string boundary.
//!
//! These are the entry points most callers want: keys go in and out as
//! Base64-encoded DER (optionally wrapped in PEM armor) and the DER layer is
//! never touched directly. Base64 failures surface as
//! [`Error::InvalidEncoding`], never as a DER error.

use alloc::string::String;
use alloc::vec::Vec;

use base64ct::{Base64, Encoding};
use zeroize::Zeroizing;

use crate::encoding::{
    decode_public_key, encode_private_key_pkcs1, encode_private_key_pkcs8, encode_public_key,
};
use crate::errors::{Error, Result};
use crate::format::{convert_pkcs1_to_pkcs8, convert_pkcs8_to_pkcs1, decode_private_key, detect_format, KeyFormat};
use crate::key::{RsaPrivateComponents, RsaPublicComponents};

/// Decodes standard padded Base64, ignoring ASCII whitespace such as line
/// breaks.
fn decode_base64(input: &str) -> Result<Zeroizing<Vec<u8>>> {
    let compact: Zeroizing<String> = Zeroizing::new(input.split_ascii_whitespace().collect());
    Base64::decode_vec(&compact)
        .map(Zeroizing::new)
        .map_err(|err| {
            tracing::debug!(%err, "rejected Base64 key input");
            Error::InvalidEncoding
        })
}

fn traced<T>(result: Result<T>, what: &'static str) -> Result<T> {
    if let Err(err) = &result {
        tracing::debug!(%err, what, "rejected RSA key");
    }
    result
}

/// Encodes a public key as Base64 `SubjectPublicKeyInfo`.
pub fn export_public_key(key: &RsaPublicComponents) -> Result<String> {
    encode_public_key(key).map(|der| Base64::encode_string(&der))
}

/// Encodes a private key as Base64 PKCS#1 `RSAPrivateKey`.
pub fn export_private_key_pkcs1(key: &RsaPrivateComponents) -> Result<Zeroizing<String>> {
    let der = encode_private_key_pkcs1(key)?;
    Ok(Zeroizing::new(Base64::encode_string(&der)))
}

/// Encodes a private key as Base64 PKCS#8 `PrivateKeyInfo`.
pub fn export_private_key_pkcs8(key: &RsaPrivateComponents) -> Result<Zeroizing<String>> {
    let der = encode_private_key_pkcs8(key)?;
    Ok(Zeroizing::new(Base64::encode_string(&der)))
}

/// Decodes a Base64 `SubjectPublicKeyInfo`.
pub fn read_public_key_info(b64: &str) -> Result<RsaPublicComponents> {
    let der = decode_base64(b64)?;
    traced(decode_public_key(&der), "SubjectPublicKeyInfo")
}

/// Decodes a Base64 private key, detecting whether it is PKCS#1 or PKCS#8.
pub fn read_private_key_info(b64: &str) -> Result<RsaPrivateComponents> {
    let der = decode_base64(b64)?;
    traced(decode_private_key(&der), "private key")
}

/// Reports the layout of a Base64 private key. Input that is not valid
/// Base64 is [`KeyFormat::Unknown`].
pub fn get_key_format(b64: &str) -> KeyFormat {
    let format = match decode_base64(b64) {
        Ok(der) => detect_format(&der),
        Err(_) => KeyFormat::Unknown,
    };
    tracing::trace!(%format, "detected private key format");
    format
}

/// Converts a Base64 PKCS#1 private key to Base64 PKCS#8.
pub fn pkcs1_to_pkcs8(b64: &str) -> Result<Zeroizing<String>> {
    let der = decode_base64(b64)?;
    let pkcs8 = traced(convert_pkcs1_to_pkcs8(&der), "RSAPrivateKey")?;
    Ok(Zeroizing::new(Base64::encode_string(&pkcs8)))
}

/// Converts a Base64 PKCS#8 private key to Base64 PKCS#1.
pub fn pkcs8_to_pkcs1(b64: &str) -> Result<Zeroizing<String>> {
    let der = decode_base64(b64)?;
    let pkcs1 = traced(convert_pkcs8_to_pkcs1(&der), "PrivateKeyInfo")?;
    Ok(Zeroizing::new(Base64::encode_string(&pkcs1)))
}

#[cfg(feature = "pem")]
pub use self::pem::*;

#[cfg(feature = "pem")]
mod pem {
    use super::*;
    use crate::encoding::{decode_private_key_pkcs1, decode_private_key_pkcs8};
    use pem_rfc7468::LineEnding;

    /// Type label for `SubjectPublicKeyInfo`.
    pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
    /// Type label for PKCS#1 private keys.
    pub const PKCS1_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
    /// Type label for PKCS#8 private keys.
    pub const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

    /// Encodes a public key as PEM with the `PUBLIC KEY` label.
    pub fn export_public_key_pem(
        key: &RsaPublicComponents,
        line_ending: LineEnding,
    ) -> Result<String> {
        let der = encode_public_key(key)?;
        Ok(pem_rfc7468::encode_string(PUBLIC_KEY_LABEL, line_ending, &der)?)
    }

    /// Encodes a private key as PEM with the `RSA PRIVATE KEY` label.
    pub fn export_private_key_pkcs1_pem(
        key: &RsaPrivateComponents,
        line_ending: LineEnding,
    ) -> Result<Zeroizing<String>> {
        let der = encode_private_key_pkcs1(key)?;
        let pem = pem_rfc7468::encode_string(PKCS1_PRIVATE_KEY_LABEL, line_ending, &der)?;
        Ok(Zeroizing::new(pem))
    }

    /// Encodes a private key as PEM with the `PRIVATE KEY` label.
    pub fn export_private_key_pkcs8_pem(
        key: &RsaPrivateComponents,
        line_ending: LineEnding,
    ) -> Result<Zeroizing<String>> {
        let der = encode_private_key_pkcs8(key)?;
        let pem = pem_rfc7468::encode_string(PKCS8_PRIVATE_KEY_LABEL, line_ending, &der)?;
        Ok(Zeroizing::new(pem))
    }

    /// Decodes a `PUBLIC KEY` PEM document.
    pub fn read_public_key_pem(pem: &str) -> Result<RsaPublicComponents> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PUBLIC_KEY_LABEL {
            return Err(pem_rfc7468::Error::UnexpectedTypeLabel {
                expected: PUBLIC_KEY_LABEL,
            }
            .into());
        }
        traced(decode_public_key(&der), "SubjectPublicKeyInfo")
    }

    /// Decodes an `RSA PRIVATE KEY` or `PRIVATE KEY` PEM document. The label
    /// selects the layout.
    pub fn read_private_key_pem(pem: &str) -> Result<RsaPrivateComponents> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        let der = Zeroizing::new(der);
        match label {
            PKCS1_PRIVATE_KEY_LABEL => traced(decode_private_key_pkcs1(&der), "RSAPrivateKey"),
            PKCS8_PRIVATE_KEY_LABEL => traced(decode_private_key_pkcs8(&der), "PrivateKeyInfo"),
            _ => Err(pem_rfc7468::Error::UnexpectedTypeLabel {
                expected: PKCS8_PRIVATE_KEY_LABEL,
            }
            .into()),
        }
    }
}
