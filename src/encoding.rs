//! SubjectPublicKeyInfo, PKCS#1 and PKCS#8 encoding support.
//!
//! Every structure is built from, and taken apart with, the TLV primitives in
//! the `der` module. The algorithm identifier and version are matched as fixed
//! byte strings rather than parsed.
//!
//! ```text
//! SubjectPublicKeyInfo  30 LL [RSA_ALGORITHM_ID] 03 LL 00 30 LL [02 LL n][02 LL e]
//! RSAPrivateKey         30 LL 02 01 00 [02 LL n][02 LL e][02 LL d][02 LL p][02 LL q]
//!                             [02 LL dp][02 LL dq][02 LL qinv]
//! PrivateKeyInfo        30 LL 02 01 00 [RSA_ALGORITHM_ID] 04 LL [RSAPrivateKey]
//! ```

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use zeroize::Zeroizing;

use crate::der::{
    encode_tlv, expect_end, expect_tlv, split_tlv_records, strip_integer_padding, Tag,
};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateComponents, RsaPublicComponents, PRIVATE_FIELDS};

/// ObjectID for `rsaEncryption`.
pub const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// DER `AlgorithmIdentifier { rsaEncryption, NULL }`.
pub const RSA_ALGORITHM_ID: [u8; 15] = [
    0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, 0x05, 0x00,
];

/// DER `INTEGER 0`, the version of two-prime PKCS#1 keys and of PKCS#8.
pub const VERSION_ZERO: [u8; 3] = [0x02, 0x01, 0x00];

const SPKI: &str = "SubjectPublicKeyInfo";
const SUBJECT_PUBLIC_KEY: &str = "subjectPublicKey";
const RSA_PUBLIC_KEY: &str = "RSAPublicKey";
const RSA_PRIVATE_KEY: &str = "RSAPrivateKey";
const PRIVATE_KEY_INFO: &str = "PrivateKeyInfo";
const PRIVATE_KEY: &str = "privateKey";

/// Encodes an RSA public key as a DER `SubjectPublicKeyInfo`.
pub fn encode_public_key(key: &RsaPublicComponents) -> Result<Vec<u8>> {
    let mut integers = encode_tlv(Tag::Integer, key.n())?;
    integers.extend(encode_tlv(Tag::Integer, key.e())?);
    let rsa_public_key = encode_tlv(Tag::Sequence, &integers)?;

    let mut bit_string = Vec::with_capacity(rsa_public_key.len() + 1);
    bit_string.push(0x00); // No unused bits.
    bit_string.extend_from_slice(&rsa_public_key);

    let mut spki = RSA_ALGORITHM_ID.to_vec();
    spki.extend(encode_tlv(Tag::BitString, &bit_string)?);
    encode_tlv(Tag::Sequence, &spki)
}

/// Decodes a DER `SubjectPublicKeyInfo` holding an `rsaEncryption` key.
pub fn decode_public_key(der: &[u8]) -> Result<RsaPublicComponents> {
    let (spki, rest) = expect_tlv(der, Tag::Sequence, SPKI)?;
    expect_end(rest, SPKI)?;

    let spki = expect_algorithm_id(spki, SPKI)?;
    let (bit_string, rest) = expect_tlv(spki, Tag::BitString, SUBJECT_PUBLIC_KEY)?;
    expect_end(rest, SPKI)?;

    let (&unused_bits, rsa_public_key) = bit_string.split_first().ok_or(Error::TruncatedInput {
        needed: 1,
        available: 0,
    })?;
    if unused_bits != 0 {
        return Err(Error::StructuralError {
            position: SUBJECT_PUBLIC_KEY,
            expected: 0x00,
            actual: unused_bits,
        });
    }

    let (integers, rest) = expect_tlv(rsa_public_key, Tag::Sequence, RSA_PUBLIC_KEY)?;
    expect_end(rest, SUBJECT_PUBLIC_KEY)?;

    let [n, e] = read_integers(integers, RSA_PUBLIC_KEY, ["modulus", "publicExponent"])?;
    RsaPublicComponents::new(n, e)
}

/// Encodes an RSA private key as a DER PKCS#1 `RSAPrivateKey`.
pub fn encode_private_key_pkcs1(key: &RsaPrivateComponents) -> Result<Zeroizing<Vec<u8>>> {
    let fields = key.fields();
    let capacity = VERSION_ZERO.len() + fields.iter().map(|f| f.len() + 5).sum::<usize>();

    let mut body = Zeroizing::new(Vec::with_capacity(capacity));
    body.extend_from_slice(&VERSION_ZERO);
    for field in fields {
        let integer = Zeroizing::new(encode_tlv(Tag::Integer, field)?);
        body.extend_from_slice(&integer);
    }

    encode_tlv(Tag::Sequence, &body).map(Zeroizing::new)
}

/// Decodes a DER PKCS#1 `RSAPrivateKey`. Only two-prime (version 0) keys
/// are supported.
pub fn decode_private_key_pkcs1(der: &[u8]) -> Result<RsaPrivateComponents> {
    let (body, rest) = expect_tlv(der, Tag::Sequence, RSA_PRIVATE_KEY)?;
    expect_end(rest, RSA_PRIVATE_KEY)?;

    let integers = expect_version_zero(body, RSA_PRIVATE_KEY)?;
    let fields = read_integers(integers, RSA_PRIVATE_KEY, PRIVATE_FIELDS)?;
    RsaPrivateComponents::from_fields(fields)
}

/// Encodes an RSA private key as a DER PKCS#8 `PrivateKeyInfo`.
pub fn encode_private_key_pkcs8(key: &RsaPrivateComponents) -> Result<Zeroizing<Vec<u8>>> {
    let pkcs1 = encode_private_key_pkcs1(key)?;
    let private_key = Zeroizing::new(encode_tlv(Tag::OctetString, &pkcs1)?);

    let mut body = Zeroizing::new(Vec::with_capacity(
        VERSION_ZERO.len() + RSA_ALGORITHM_ID.len() + private_key.len(),
    ));
    body.extend_from_slice(&VERSION_ZERO);
    body.extend_from_slice(&RSA_ALGORITHM_ID);
    body.extend_from_slice(&private_key);

    encode_tlv(Tag::Sequence, &body).map(Zeroizing::new)
}

/// Decodes a DER PKCS#8 `PrivateKeyInfo` wrapping an `rsaEncryption` key.
///
/// The optional `attributes` and `publicKey` fields are not accepted.
pub fn decode_private_key_pkcs8(der: &[u8]) -> Result<RsaPrivateComponents> {
    let (body, rest) = expect_tlv(der, Tag::Sequence, PRIVATE_KEY_INFO)?;
    expect_end(rest, PRIVATE_KEY_INFO)?;

    let body = expect_version_zero(body, PRIVATE_KEY_INFO)?;
    let body = expect_algorithm_id(body, PRIVATE_KEY_INFO)?;
    let (private_key, rest) = expect_tlv(body, Tag::OctetString, PRIVATE_KEY)?;
    expect_end(rest, PRIVATE_KEY_INFO)?;

    decode_private_key_pkcs1(private_key)
}

fn expect_version_zero<'a>(body: &'a [u8], position: &'static str) -> Result<&'a [u8]> {
    body.strip_prefix(&VERSION_ZERO)
        .ok_or(Error::VersionMismatch { position })
}

fn expect_algorithm_id<'a>(body: &'a [u8], position: &'static str) -> Result<&'a [u8]> {
    body.strip_prefix(&RSA_ALGORITHM_ID)
        .ok_or(Error::OidMismatch { position })
}

/// Splits a SEQUENCE body into exactly `N` non-negative INTEGERs, returning
/// their values without sign padding.
fn read_integers<'a, const N: usize>(
    body: &'a [u8],
    position: &'static str,
    fields: [&'static str; N],
) -> Result<[&'a [u8]; N]> {
    let records = split_tlv_records(body)?;
    if records.len() != N {
        return Err(Error::RecordCount {
            position,
            expected: N,
            actual: records.len(),
        });
    }

    let mut values: [&'a [u8]; N] = [<&[u8]>::default(); N];
    for ((value, record), field) in values.iter_mut().zip(&records).zip(fields) {
        if record.tag != u8::from(Tag::Integer) {
            return Err(Error::unexpected_tag(field, Tag::Integer, record.tag));
        }
        *value = strip_integer_padding(record.content, field)?;
    }
    Ok(values)
}
