#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use protowire::{DelimitedCodec, SizeMessage};
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Drain frames until the decoder wants more input or rejects the stream
    let mut codec = DelimitedCodec::<SizeMessage>::with_max_frame_size(1 << 16);
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
