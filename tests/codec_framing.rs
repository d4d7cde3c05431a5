//! Integration tests for the length-delimited stream codec
//!
//! These tests validate framing of whole messages over byte streams: exact
//! prefix layout, partial input handling, frame limits, and end-to-end
//! transfer through an in-memory Tokio pipe.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use protowire::core::varint::{encode_varint, varint_len};
use protowire::protocol::registry::MessageDescriptor;
use protowire::{CodecError, DelimitedCodec, Result, SizeMessage, WireMessage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::codec::{Decoder, Encoder, FramedRead, FramedWrite};

fn sample(size: i64, text: &str) -> SizeMessage {
    let mut msg = SizeMessage::new();
    msg.set_size(size).set_equal(size % 2 == 0).set_string(text);
    msg
}

#[test]
fn test_codec_prefix_matches_encoded_len() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let msg = sample(300, &"q".repeat(200));
    let len = msg.encoded_len();

    let mut buffer = BytesMut::new();
    codec.encode(msg.clone(), &mut buffer).expect("Failed to encode");

    assert_eq!(buffer.len(), varint_len(len as u64) + len);
    assert_eq!(&buffer[..varint_len(len as u64)], encode_varint(len as u64).as_slice());
    assert_eq!(&buffer[varint_len(len as u64)..], msg.marshal().unwrap().as_slice());
}

#[test]
fn test_codec_multiple_messages_in_buffer() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let first = sample(1, "one");
    let second = sample(2, "two");

    let mut buffer = BytesMut::new();
    codec.encode(first.clone(), &mut buffer).unwrap();
    codec.encode(second.clone(), &mut buffer).unwrap();

    let decoded1 = codec
        .decode(&mut buffer)
        .expect("Failed to decode")
        .expect("Should have message");
    assert_eq!(decoded1, first);

    let decoded2 = codec
        .decode(&mut buffer)
        .expect("Failed to decode")
        .expect("Should have message");
    assert_eq!(decoded2, second);

    assert_eq!(buffer.len(), 0);
    assert!(codec.decode(&mut buffer).unwrap().is_none());
}

#[test]
fn test_codec_byte_at_a_time() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let msg = sample(-7, &"w".repeat(150));

    let mut wire = BytesMut::new();
    codec.encode(msg.clone(), &mut wire).unwrap();

    let mut buffer = BytesMut::new();
    let mut decoded = None;
    for (i, &byte) in wire.iter().enumerate() {
        buffer.extend_from_slice(&[byte]);
        match codec.decode(&mut buffer).expect("Decode should not error") {
            Some(m) => {
                assert_eq!(i, wire.len() - 1, "message completed early");
                decoded = Some(m);
            }
            None => assert!(i < wire.len() - 1),
        }
    }
    assert_eq!(decoded, Some(msg));
    assert!(buffer.is_empty());
}

#[test]
fn test_codec_partial_body_preserves_buffer() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let mut buffer = BytesMut::from(&[0x09, 0x08, 0x05, 0x10][..]);

    let result = codec.decode(&mut buffer).expect("Decode should not error");
    assert!(result.is_none());
    assert_eq!(buffer.len(), 4);
}

#[test]
fn test_codec_preserves_unknown_fields() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let mut body = vec![0x08, 0x05];
    body.extend_from_slice(&[0x22, 0x02, 0xBE, 0xEF]);

    let mut buffer = BytesMut::new();
    buffer.extend_from_slice(&encode_varint(body.len() as u64));
    buffer.extend_from_slice(&body);

    let msg = codec.decode(&mut buffer).unwrap().unwrap();
    assert_eq!(msg.size, Some(5));
    assert_eq!(msg.unknown_fields, vec![0x22, 0x02, 0xBE, 0xEF]);
}

#[test]
fn test_codec_malformed_body_is_error() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    // Frame of 2 bytes holding a top-level end-group marker and a stray byte
    let mut buffer = BytesMut::from(&[0x02, 0x24, 0x00][..]);
    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::UnexpectedEndGroup)
    ));
}

#[test]
fn test_codec_overlong_prefix_is_error() {
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let mut buffer = BytesMut::from(&[0xFF; 11][..]);
    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::IntegerOverflow)
    ));
}

#[test]
fn test_codec_frame_limit() {
    let mut codec = DelimitedCodec::<SizeMessage>::with_max_frame_size(16);
    let fits = sample(1, "0123456789");
    let too_big = sample(1, "0123456789abcdef");

    let mut buffer = BytesMut::new();
    codec.encode(fits.clone(), &mut buffer).unwrap();
    assert!(matches!(
        codec.encode(too_big.clone(), &mut buffer),
        Err(CodecError::FrameTooLarge(n)) if n == too_big.encoded_len()
    ));
    assert_eq!(codec.decode(&mut buffer).unwrap(), Some(fits));

    let mut oversized = BytesMut::new();
    DelimitedCodec::<SizeMessage>::new()
        .encode(too_big, &mut oversized)
        .unwrap();
    assert!(matches!(
        codec.decode(&mut oversized),
        Err(CodecError::FrameTooLarge(_))
    ));
}

/// Message whose marshal either fails outright or writes fewer bytes than it claims
#[derive(Debug, Default)]
struct Faulty {
    claimed: usize,
    written: Option<usize>,
}

static FAULTY_DESCRIPTOR: MessageDescriptor = MessageDescriptor {
    full_name: "test.Faulty",
    fields: &[],
};

impl WireMessage for Faulty {
    fn descriptor() -> &'static MessageDescriptor {
        &FAULTY_DESCRIPTOR
    }

    fn encoded_len(&self) -> usize {
        self.claimed
    }

    fn marshal_to_sized_buffer(&self, buf: &mut [u8]) -> Result<usize> {
        match self.written {
            Some(n) => {
                let end = buf.len();
                buf[end - n..].fill(0x08);
                Ok(n)
            }
            None => Err(CodecError::BufferTooSmall {
                needed: self.claimed,
                available: 0,
            }),
        }
    }

    fn unmarshal(&mut self, _data: &[u8]) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[test]
fn test_failed_encode_leaves_buffer_untouched() {
    let mut codec = DelimitedCodec::<Faulty>::new();
    let mut buffer = BytesMut::from(&[0xAA, 0xBB][..]);

    let failing = Faulty {
        claimed: 3,
        written: None,
    };
    assert!(matches!(
        codec.encode(failing, &mut buffer),
        Err(CodecError::BufferTooSmall { .. })
    ));
    assert_eq!(&buffer[..], &[0xAA, 0xBB]);

    let short = Faulty {
        claimed: 3,
        written: Some(1),
    };
    assert!(matches!(
        codec.encode(short, &mut buffer),
        Err(CodecError::SizeMismatch {
            expected: 3,
            written: 1
        })
    ));
    assert_eq!(&buffer[..], &[0xAA, 0xBB]);
}

#[test]
fn test_stream_stays_decodable_after_failed_encode() {
    let mut faulty_codec = DelimitedCodec::<Faulty>::new();
    let mut codec = DelimitedCodec::<SizeMessage>::new();
    let msg = sample(4, "after");

    let mut buffer = BytesMut::new();
    let failing = Faulty {
        claimed: 3,
        written: None,
    };
    assert!(faulty_codec.encode(failing, &mut buffer).is_err());
    codec.encode(msg.clone(), &mut buffer).unwrap();

    assert_eq!(codec.decode(&mut buffer).unwrap(), Some(msg));
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn test_framed_stream_roundtrip() {
    let (client, server) = tokio::io::duplex(64);
    let mut rng = StdRng::seed_from_u64(42);
    let messages: Vec<SizeMessage> = (0..200)
        .map(|_| SizeMessage::new_populated(&mut rng, false))
        .collect();

    let expected = messages.clone();
    let writer = tokio::spawn(async move {
        let mut sink = FramedWrite::new(client, DelimitedCodec::<SizeMessage>::new());
        for msg in messages {
            sink.send(msg).await.expect("send");
        }
        sink.close().await.expect("close");
    });

    let mut stream = FramedRead::new(server, DelimitedCodec::<SizeMessage>::new());
    let mut received = Vec::new();
    while let Some(frame) = stream.next().await {
        received.push(frame.expect("frame"));
    }
    writer.await.expect("writer task");

    assert_eq!(received, expected);
}

#[tokio::test]
async fn test_framed_stream_truncated_tail() {
    use tokio::io::AsyncWriteExt;

    let (mut client, server) = tokio::io::duplex(64);
    // Prefix announces 9 bytes, only 4 arrive before the writer hangs up.
    client
        .write_all(&[0x09, 0x08, 0x05, 0x10, 0x01])
        .await
        .unwrap();
    drop(client);

    let mut stream = FramedRead::new(server, DelimitedCodec::<SizeMessage>::new());
    let result = stream.next().await.expect("stream yields an item");
    assert!(matches!(result, Err(CodecError::Io(_))));
}
