//! Cross-checks against keys written by OpenSSL and by the `rsa` crate.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa_keycodec::{
    convert_pkcs1_to_pkcs8, convert_pkcs8_to_pkcs1, decode_private_key, decode_private_key_pkcs1,
    decode_private_key_pkcs8, decode_public_key, detect_format, encode_private_key_pkcs1,
    encode_private_key_pkcs8, encode_public_key, KeyFormat, RsaPrivateComponents,
    RSA_ENCRYPTION_OID,
};

struct OpensslKey {
    bits: usize,
    pkcs1: &'static [u8],
    pkcs8: &'static [u8],
    public: &'static [u8],
}

const OPENSSL_KEYS: &[OpensslKey] = &[
    OpensslKey {
        bits: 512,
        pkcs1: include_bytes!("examples/rsa512-pkcs1.der"),
        pkcs8: include_bytes!("examples/rsa512-pkcs8.der"),
        public: include_bytes!("examples/rsa512-pub.der"),
    },
    OpensslKey {
        bits: 1024,
        pkcs1: include_bytes!("examples/rsa1024-pkcs1.der"),
        pkcs8: include_bytes!("examples/rsa1024-pkcs8.der"),
        public: include_bytes!("examples/rsa1024-pub.der"),
    },
    OpensslKey {
        bits: 2048,
        pkcs1: include_bytes!("examples/rsa2048-pkcs1.der"),
        pkcs8: include_bytes!("examples/rsa2048-pkcs8.der"),
        public: include_bytes!("examples/rsa2048-pub.der"),
    },
];

/// Pulls the eight components out of a PKCS#1 key with the `pkcs1` crate.
fn components_from_pkcs1_crate(der: &[u8]) -> RsaPrivateComponents {
    let key = pkcs1::RsaPrivateKey::try_from(der).unwrap();
    RsaPrivateComponents::new(
        key.modulus.as_bytes(),
        key.public_exponent.as_bytes(),
        key.private_exponent.as_bytes(),
        key.prime1.as_bytes(),
        key.prime2.as_bytes(),
        key.exponent1.as_bytes(),
        key.exponent2.as_bytes(),
        key.coefficient.as_bytes(),
    )
    .unwrap()
}

#[test]
fn openssl_keys_decode() {
    for key in OPENSSL_KEYS {
        let from_pkcs1 = decode_private_key_pkcs1(key.pkcs1).unwrap();
        let from_pkcs8 = decode_private_key_pkcs8(key.pkcs8).unwrap();
        assert_eq!(from_pkcs1, from_pkcs8, "{} bits", key.bits);
        assert_eq!(from_pkcs1, components_from_pkcs1_crate(key.pkcs1));
        assert_eq!(from_pkcs1.key_size() * 8, key.bits);

        let public_key = decode_public_key(key.public).unwrap();
        assert_eq!(public_key, from_pkcs1.to_public());
        assert_eq!(public_key.e(), &[0x01, 0x00, 0x01]);
    }
}

#[test]
fn openssl_keys_reencode_byte_for_byte() {
    for key in OPENSSL_KEYS {
        let private_key = decode_private_key(key.pkcs1).unwrap();
        assert_eq!(encode_private_key_pkcs1(&private_key).unwrap().as_slice(), key.pkcs1);
        assert_eq!(encode_private_key_pkcs8(&private_key).unwrap().as_slice(), key.pkcs8);
        assert_eq!(encode_public_key(&private_key.to_public()).unwrap(), key.public);
    }
}

#[test]
fn openssl_keys_convert() {
    for key in OPENSSL_KEYS {
        assert_eq!(detect_format(key.pkcs1), KeyFormat::Pkcs1);
        assert_eq!(detect_format(key.pkcs8), KeyFormat::Pkcs8);
        assert_eq!(detect_format(key.public), KeyFormat::Unknown);

        assert_eq!(convert_pkcs1_to_pkcs8(key.pkcs1).unwrap().as_slice(), key.pkcs8);
        assert_eq!(convert_pkcs8_to_pkcs1(key.pkcs8).unwrap().as_slice(), key.pkcs1);
    }
}

#[test]
fn openssl_keys_parse_with_rustcrypto() {
    for key in OPENSSL_KEYS {
        let info = pkcs8::PrivateKeyInfo::try_from(key.pkcs8).unwrap();
        assert_eq!(info.algorithm.oid, RSA_ENCRYPTION_OID);
        assert_eq!(info.private_key, key.pkcs1);

        let spki = spki::SubjectPublicKeyInfoRef::try_from(key.public).unwrap();
        assert_eq!(spki.algorithm.oid, RSA_ENCRYPTION_OID);
    }
}

#[test]
fn generated_keys_match_rsa_crate() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    for bits in [512, 768, 1024] {
        let rsa_key = rsa::RsaPrivateKey::new(&mut rng, bits).unwrap();
        let pkcs1 = rsa_key.to_pkcs1_der().unwrap();
        let pkcs8 = rsa_key.to_pkcs8_der().unwrap();
        let public = rsa_key.to_public_key().to_public_key_der().unwrap();

        let private_key = components_from_pkcs1_crate(pkcs1.as_bytes());
        assert_eq!(
            encode_private_key_pkcs1(&private_key).unwrap().as_slice(),
            pkcs1.as_bytes(),
            "{bits} bits"
        );
        assert_eq!(
            encode_private_key_pkcs8(&private_key).unwrap().as_slice(),
            pkcs8.as_bytes()
        );
        assert_eq!(
            encode_public_key(&private_key.to_public()).unwrap(),
            public.as_bytes()
        );
    }
}

#[test]
fn rsa_crate_accepts_our_encodings() {
    for key in OPENSSL_KEYS {
        let private_key = decode_private_key(key.pkcs8).unwrap();

        let pkcs1 = encode_private_key_pkcs1(&private_key).unwrap();
        let pkcs8 = encode_private_key_pkcs8(&private_key).unwrap();
        let public = encode_public_key(&private_key.to_public()).unwrap();

        let from_pkcs1 = rsa::RsaPrivateKey::from_pkcs1_der(&pkcs1).unwrap();
        let from_pkcs8 = rsa::RsaPrivateKey::from_pkcs8_der(&pkcs8).unwrap();
        assert_eq!(from_pkcs1, from_pkcs8);

        let public_key = rsa::RsaPublicKey::from_public_key_der(&public).unwrap();
        assert_eq!(public_key, from_pkcs1.to_public_key());
    }
}
