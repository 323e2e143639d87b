use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serdect::serde::{de, ser, Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Error, Result};

/// Names of the private key components, in PKCS#1 order.
pub(crate) const PRIVATE_FIELDS: [&str; 8] = [
    "modulus",
    "publicExponent",
    "privateExponent",
    "prime1",
    "prime2",
    "exponent1",
    "exponent2",
    "coefficient",
];

/// Drops leading zero bytes, rejecting values with nothing left.
fn minimal(bytes: &[u8], field: &'static str) -> Result<Vec<u8>> {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .ok_or(Error::EmptyComponent { field })?;
    Ok(bytes[start..].to_vec())
}

/// Represents the public part of an RSA key as big-endian byte strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RsaPublicComponents {
    /// Modulus
    n: Vec<u8>,
    /// Public exponent
    e: Vec<u8>,
}

impl RsaPublicComponents {
    /// Create a new public key from its big-endian modulus and exponent.
    ///
    /// Leading zero bytes are removed, so fixed-width exports are accepted.
    /// Fails with [`Error::EmptyComponent`] if either value is zero or empty.
    pub fn new(modulus: &[u8], exponent: &[u8]) -> Result<Self> {
        Ok(Self {
            n: minimal(modulus, "modulus")?,
            e: minimal(exponent, "publicExponent")?,
        })
    }

    /// Returns the modulus.
    pub fn n(&self) -> &[u8] {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// Returns the modulus size in bytes.
    pub fn key_size(&self) -> usize {
        self.n.len()
    }
}

/// Represents a whole RSA key, public and private parts, as the eight
/// big-endian byte strings of a two-prime PKCS#1 key.
///
/// The buffers are zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateComponents {
    /// Modulus
    n: Vec<u8>,
    /// Public exponent
    e: Vec<u8>,
    /// Private exponent
    d: Vec<u8>,
    /// First prime factor of N
    p: Vec<u8>,
    /// Second prime factor of N
    q: Vec<u8>,
    /// D mod (P-1)
    dp: Vec<u8>,
    /// D mod (Q-1)
    dq: Vec<u8>,
    /// Q^-1 mod P
    qinv: Vec<u8>,
}

impl RsaPrivateComponents {
    /// Create a new private key from its eight big-endian components.
    ///
    /// Leading zero bytes are removed. Fails with [`Error::EmptyComponent`]
    /// if any component is zero or empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        modulus: &[u8],
        public_exponent: &[u8],
        private_exponent: &[u8],
        prime1: &[u8],
        prime2: &[u8],
        exponent1: &[u8],
        exponent2: &[u8],
        coefficient: &[u8],
    ) -> Result<Self> {
        Self::from_fields([
            modulus,
            public_exponent,
            private_exponent,
            prime1,
            prime2,
            exponent1,
            exponent2,
            coefficient,
        ])
    }

    pub(crate) fn from_fields(fields: [&[u8]; 8]) -> Result<Self> {
        let [n, e, d, p, q, dp, dq, qinv] = fields;
        let [n_name, e_name, d_name, p_name, q_name, dp_name, dq_name, qinv_name] = PRIVATE_FIELDS;
        Ok(Self {
            n: minimal(n, n_name)?,
            e: minimal(e, e_name)?,
            d: minimal(d, d_name)?,
            p: minimal(p, p_name)?,
            q: minimal(q, q_name)?,
            dp: minimal(dp, dp_name)?,
            dq: minimal(dq, dq_name)?,
            qinv: minimal(qinv, qinv_name)?,
        })
    }

    /// Components in PKCS#1 order.
    pub(crate) fn fields(&self) -> [&[u8]; 8] {
        [
            &self.n,
            &self.e,
            &self.d,
            &self.p,
            &self.q,
            &self.dp,
            &self.dq,
            &self.qinv,
        ]
    }

    /// Returns the modulus.
    pub fn n(&self) -> &[u8] {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// Returns the private exponent.
    pub fn d(&self) -> &[u8] {
        &self.d
    }

    /// Returns the first prime factor.
    pub fn p(&self) -> &[u8] {
        &self.p
    }

    /// Returns the second prime factor.
    pub fn q(&self) -> &[u8] {
        &self.q
    }

    /// Returns the precomputed dp value, D mod (P-1)
    pub fn dp(&self) -> &[u8] {
        &self.dp
    }

    /// Returns the precomputed dq value, D mod (Q-1)
    pub fn dq(&self) -> &[u8] {
        &self.dq
    }

    /// Returns the precomputed qinv value, Q^-1 mod P
    pub fn qinv(&self) -> &[u8] {
        &self.qinv
    }

    /// Returns the modulus size in bytes.
    pub fn key_size(&self) -> usize {
        self.n.len()
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    pub fn to_public(&self) -> RsaPublicComponents {
        RsaPublicComponents {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

impl From<&RsaPrivateComponents> for RsaPublicComponents {
    fn from(private_key: &RsaPrivateComponents) -> Self {
        private_key.to_public()
    }
}

impl fmt::Debug for RsaPrivateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateComponents")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaPrivateComponents {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for RsaPrivateComponents {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateComponents {}

#[cfg(feature = "serde")]
impl Serialize for RsaPublicComponents {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        let der = crate::encoding::encode_public_key(self).map_err(ser::Error::custom)?;
        serdect::slice::serialize_hex_lower_or_bin(&der, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RsaPublicComponents {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let der_bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        crate::encoding::decode_public_key(&der_bytes).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for RsaPrivateComponents {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        let der = crate::encoding::encode_private_key_pkcs8(self).map_err(ser::Error::custom)?;
        serdect::slice::serialize_hex_lower_or_bin(&*der, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RsaPrivateComponents {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let der_bytes = zeroize::Zeroizing::new(serdect::slice::deserialize_hex_or_bin_vec(
            deserializer,
        )?);
        crate::encoding::decode_private_key_pkcs8(&der_bytes).map_err(de::Error::custom)
    }
}
