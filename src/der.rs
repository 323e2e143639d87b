//! Building blocks for reading and writing the DER subset used by RSA keys.
//!
//! Only the four universal tags that appear in SubjectPublicKeyInfo, PKCS#1
//! and PKCS#8 RSA keys are modelled, and only the short, `0x81` and `0x82`
//! length forms are understood. That covers keys up to roughly 16k bits.

use alloc::vec::Vec;

use crate::errors::{Error, Result};

pub const CONSTRUCTED: u8 = 1 << 5;

/// The ASN.1 universal tags this codec reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Sequence = CONSTRUCTED | 0x10, // 0x30
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as Self
    }
}

/// One tag-length-value record borrowed from an input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TlvRecord<'a> {
    pub tag: u8,
    pub content: &'a [u8],
}

/// Encodes `content` as a single TLV record.
///
/// A `0x00` byte is inserted ahead of any content whose first byte has the
/// high bit set, so that INTEGER values read back as non-negative. The rule is
/// applied to every tag; the constructed and string contents built by this
/// crate always start with a tag byte below `0x80`, so it only ever fires for
/// INTEGERs.
pub(crate) fn encode_tlv(tag: Tag, content: &[u8]) -> Result<Vec<u8>> {
    let pad = matches!(content.first(), Some(&first) if first & 0x80 != 0);
    let length: u16 = (content.len() + usize::from(pad))
        .try_into()
        .map_err(|_| Error::ContentTooLong { len: content.len() })?;

    let mut out = Vec::with_capacity(usize::from(length) + 4);
    out.push(tag.into());

    let [hi, lo] = length.to_be_bytes();
    if length >= 0x1_00 {
        out.push(0x82);
        out.push(hi);
    } else if length >= 0x80 {
        out.push(0x81);
    }
    out.push(lo);

    if pad {
        out.push(0x00); // Disambiguate negative number.
    }
    out.extend_from_slice(content);
    Ok(out)
}

/// Reads the record at the start of `buf`, returning it together with
/// whatever follows it.
///
/// The tag byte is returned as-is; checking it is up to the caller.
pub(crate) fn read_tlv(buf: &[u8]) -> Result<(TlvRecord<'_>, &[u8])> {
    let truncated = |needed| Error::TruncatedInput {
        needed,
        available: buf.len(),
    };

    let &tag = buf.first().ok_or_else(|| truncated(2))?;
    let &first = buf.get(1).ok_or_else(|| truncated(2))?;

    // If the high order bit of the first length byte is zero, the length is
    // the byte itself. Otherwise the low bits count the length bytes that
    // follow, and only one or two of them are supported.
    let (length, header_len) = match first {
        n if n & 0x80 == 0 => (usize::from(n), 2),
        0x81 => {
            let &n = buf.get(2).ok_or_else(|| truncated(3))?;
            (usize::from(n), 3)
        }
        0x82 => match buf.get(2..4) {
            Some(&[hi, lo]) => (usize::from(u16::from_be_bytes([hi, lo])), 4),
            _ => return Err(truncated(4)),
        },
        byte => return Err(Error::UnsupportedLengthEncoding { offset: 1, byte }),
    };

    let end = header_len + length;
    if buf.len() < end {
        return Err(truncated(end));
    }

    let (record, rest) = buf.split_at(end);
    Ok((
        TlvRecord {
            tag,
            content: &record[header_len..],
        },
        rest,
    ))
}

/// Returns the content region of the record at the start of `buf`.
pub(crate) fn read_tlv_content(buf: &[u8]) -> Result<&[u8]> {
    read_tlv(buf).map(|(record, _)| record.content)
}

/// Reads a record that must carry `tag`, returning its content and the bytes
/// after it.
pub(crate) fn expect_tlv<'a>(
    buf: &'a [u8],
    tag: Tag,
    position: &'static str,
) -> Result<(&'a [u8], &'a [u8])> {
    match buf.first() {
        None => {
            return Err(Error::TruncatedInput {
                needed: 2,
                available: 0,
            })
        }
        Some(&actual) if actual != u8::from(tag) => {
            return Err(Error::unexpected_tag(position, tag, actual))
        }
        Some(_) => {}
    }

    let (record, rest) = read_tlv(buf)?;
    Ok((record.content, rest))
}

/// Fails unless `rest` is empty.
pub(crate) fn expect_end(rest: &[u8], position: &'static str) -> Result<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::TrailingData {
            position,
            len: rest.len(),
        })
    }
}

/// Splits a buffer holding back-to-back records into those records.
pub(crate) fn split_tlv_records(buf: &[u8]) -> Result<Vec<TlvRecord<'_>>> {
    let mut records = Vec::new();
    let mut rest = buf;

    while !rest.is_empty() {
        let consumed = buf.len() - rest.len();
        let (record, tail) = read_tlv(rest).map_err(|err| match err {
            Error::UnsupportedLengthEncoding { offset, byte } => {
                Error::UnsupportedLengthEncoding {
                    offset: consumed + offset,
                    byte,
                }
            }
            other => other,
        })?;
        records.push(record);
        rest = tail;
    }

    Ok(records)
}

/// Removes the sign-disambiguation byte from INTEGER content.
///
/// Key components are positive, so the content must be non-empty, must not
/// read as negative, and may only start with `0x00` when the next byte has its
/// high bit set.
pub(crate) fn strip_integer_padding<'a>(content: &'a [u8], field: &'static str) -> Result<&'a [u8]> {
    match content {
        // Necessary leading zero.
        [0x00, rest @ ..] if matches!(rest.first(), Some(&second) if second & 0x80 != 0) => {
            Ok(rest)
        }
        // Unnecessary leading zero, zero itself, or an empty value.
        [0x00, ..] | [] => Err(Error::MalformedInteger { field }),
        // Negative value.
        [first, ..] if first & 0x80 != 0 => Err(Error::MalformedInteger { field }),
        _ => Ok(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hex_literal::hex;

    #[test]
    fn encode_short_form() {
        assert_eq!(encode_tlv(Tag::Integer, &[0x05]).unwrap(), hex!("020105"));
        assert_eq!(encode_tlv(Tag::Sequence, &[]).unwrap(), hex!("3000"));
    }

    #[test]
    fn encode_pads_high_bit() {
        assert_eq!(encode_tlv(Tag::Integer, &[0x85]).unwrap(), hex!("02020085"));
        // The pad byte counts toward the length form.
        let content = [0xff; 0x7f];
        let encoded = encode_tlv(Tag::Integer, &content).unwrap();
        assert_eq!(&encoded[..4], &hex!("02818000"));
        assert_eq!(encoded.len(), 4 + 0x7f);
    }

    #[test]
    fn encode_long_forms() {
        let content = [0x01; 200];
        let encoded = encode_tlv(Tag::Sequence, &content).unwrap();
        assert_eq!(&encoded[..3], &hex!("3081c8"));
        assert_eq!(&encoded[3..], &content[..]);

        let content = [0x01; 300];
        let encoded = encode_tlv(Tag::Sequence, &content).unwrap();
        assert_eq!(&encoded[..4], &hex!("3082012c"));
        assert_eq!(&encoded[4..], &content[..]);
    }

    #[test]
    fn encode_rejects_oversized_content() {
        let content = vec![0x01; 0x1_0000];
        assert_eq!(
            encode_tlv(Tag::OctetString, &content),
            Err(Error::ContentTooLong { len: 0x1_0000 })
        );

        // Fits on its own, but not once the pad byte is added.
        let content = vec![0x80; 0xffff];
        assert_eq!(
            encode_tlv(Tag::Integer, &content),
            Err(Error::ContentTooLong { len: 0xffff })
        );
    }

    #[test]
    fn read_all_length_forms() {
        assert_eq!(read_tlv_content(&hex!("020105")).unwrap(), &[0x05]);
        assert_eq!(read_tlv_content(&hex!("04810100")).unwrap(), &[0x00]);
        assert_eq!(read_tlv_content(&hex!("0482000201ff")).unwrap(), &[0x01, 0xff]);

        let (record, rest) = read_tlv(&hex!("0201050607")).unwrap();
        assert_eq!(record.tag, 0x02);
        assert_eq!(record.content.len(), 1);
        assert_eq!(rest, &[0x06, 0x07]);
    }

    #[test]
    fn read_rejects_unsupported_length() {
        assert_eq!(
            read_tlv_content(&hex!("3083000001")),
            Err(Error::UnsupportedLengthEncoding {
                offset: 1,
                byte: 0x83
            })
        );
        assert_eq!(
            read_tlv_content(&hex!("3080")),
            Err(Error::UnsupportedLengthEncoding {
                offset: 1,
                byte: 0x80
            })
        );
    }

    #[test]
    fn read_is_bounds_checked() {
        static TEST_CASES: &[(&[u8], usize)] = &[
            (&[], 2),
            (&[0x30], 2),
            (&[0x30, 0x81], 3),
            (&[0x30, 0x82, 0x01], 4),
            (&[0x30, 0x03, 0x02, 0x01], 5),
            (&[0x30, 0x81, 0x80, 0x00], 131),
            (&[0x30, 0x82, 0x01, 0x00, 0x00], 260),
        ];
        for &(input, needed) in TEST_CASES {
            assert_eq!(
                read_tlv_content(input),
                Err(Error::TruncatedInput {
                    needed,
                    available: input.len()
                }),
                "input {input:02x?}"
            );
        }
    }

    #[test]
    fn expect_checks_tag_first() {
        assert_eq!(
            expect_tlv(&hex!("0205"), Tag::Sequence, "test"),
            Err(Error::StructuralError {
                position: "test",
                expected: 0x30,
                actual: 0x02
            })
        );
        assert_eq!(
            expect_tlv(&hex!("3005"), Tag::Sequence, "test"),
            Err(Error::TruncatedInput {
                needed: 7,
                available: 2
            })
        );
        assert_eq!(
            expect_tlv(&hex!("300102ff"), Tag::Sequence, "test").unwrap(),
            (&[0x02][..], &[0xff][..])
        );
    }

    #[test]
    fn split_records() {
        let records = split_tlv_records(&hex!("020105 0203010001 04810100")).unwrap();
        assert_eq!(
            records,
            [
                TlvRecord {
                    tag: 0x02,
                    content: &[0x05]
                },
                TlvRecord {
                    tag: 0x02,
                    content: &[0x01, 0x00, 0x01]
                },
                TlvRecord {
                    tag: 0x04,
                    content: &[0x00]
                },
            ]
        );
        assert!(split_tlv_records(&[]).unwrap().is_empty());
    }

    #[test]
    fn split_reports_offsets_and_truncation() {
        assert_eq!(
            split_tlv_records(&hex!("020105 02850001")),
            Err(Error::UnsupportedLengthEncoding {
                offset: 4,
                byte: 0x85
            })
        );
        assert_eq!(
            split_tlv_records(&hex!("020105 020301")),
            Err(Error::TruncatedInput {
                needed: 5,
                available: 3
            })
        );
    }

    #[test]
    fn strip_padding() {
        static TEST_CASES: &[(&[u8], Option<&[u8]>)] = &[
            // An empty input isn't a number.
            (&[], None),
            // Zero is not a valid key component.
            (&[0x00], None),
            // Leading zero is only allowed ahead of a high byte.
            (&[0x00, 0x01], None),
            (&[0x00, 0x7f], None),
            (&[0x00, 0x80], Some(&[0x80])),
            (&[0x00, 0xff, 0x00], Some(&[0xff, 0x00])),
            // Negative values.
            (&[0x80], None),
            (&[0xff, 0x01], None),
            // The last byte can be zero.
            (&[0x01], Some(&[0x01])),
            (&[0x01, 0x00], Some(&[0x01, 0x00])),
            (&[0x7f, 0xff], Some(&[0x7f, 0xff])),
        ];
        for &(input, expected) in TEST_CASES {
            let result = strip_integer_padding(input, "n");
            match expected {
                Some(value) => assert_eq!(result, Ok(value), "input {input:02x?}"),
                None => assert_eq!(
                    result,
                    Err(Error::MalformedInteger { field: "n" }),
                    "input {input:02x?}"
                ),
            }
        }
    }

    #[test]
    fn integer_roundtrip() {
        for value in [&[0x01][..], &[0x7f], &[0x80], &[0xff; 130], &[0x01; 300]] {
            let encoded = encode_tlv(Tag::Integer, value).unwrap();
            let content = read_tlv_content(&encoded).unwrap();
            assert_eq!(strip_integer_padding(content, "x").unwrap(), value);
        }
    }
}
