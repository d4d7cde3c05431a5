//! Example: Wire Encoding, Unknown Fields and Stream Framing
//!
//! This example walks a `SizeMessage` through the wire format: the reference
//! encoding, forward compatibility with fields an older reader does not know,
//! the JSON and text views, and length-delimited framing over a byte buffer.
//!
//! Run with: `cargo run --example wire_roundtrip`

#![allow(clippy::uninlined_format_args)]

use bytes::BytesMut;
use protowire::config::CodecConfig;
use protowire::utils::logging::init_logging;
use protowire::{DelimitedCodec, Registry, SizeMessage, WireMessage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::codec::{Decoder, Encoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CodecConfig::from_env()?;
    config.validate_strict()?;
    init_logging(&config.logging)?;

    println!("=== Wire Format Demo ===\n");

    // 1. Reference encoding
    println!("1. REFERENCE ENCODING");
    let mut message = SizeMessage::new();
    message.set_size(5).set_equal(true).set_string("abc");
    let bytes = message.marshal()?;
    println!("   - Message: {}", message);
    println!("   - Encoded size: {} bytes", message.encoded_len());
    println!("   - Hex: {:02X?}", bytes);
    println!();

    // 2. Unknown fields survive a round trip
    println!("2. UNKNOWN FIELDS");
    let mut newer = bytes.clone();
    newer.extend_from_slice(&[0x22, 0x03, 0x6E, 0x65, 0x77]); // field 4: "new"
    let decoded = SizeMessage::decode(&newer)?;
    println!("   - Decoded: {}", decoded);
    println!("   - Preserved bytes: {:02X?}", decoded.unknown_fields());
    let reencoded = decoded.marshal()?;
    println!(
        "   - Re-encode identical: {}",
        if reencoded == newer { "✓ Yes" } else { "✗ No" }
    );
    println!();

    // 3. JSON view (unknown bytes are not exported)
    println!("3. JSON");
    println!("   - {}", serde_json::to_string(&decoded)?);
    println!();

    // 4. Framed stream of random messages
    println!("4. DELIMITED FRAMING");
    let mut codec = DelimitedCodec::<SizeMessage>::from_config(&config.framing);
    let mut rng = StdRng::seed_from_u64(2024);
    let batch: Vec<SizeMessage> = (0..8)
        .map(|_| SizeMessage::new_populated(&mut rng, false))
        .collect();

    let mut stream = BytesMut::new();
    for msg in &batch {
        codec.encode(msg.clone(), &mut stream)?;
    }
    println!("   - {} messages in {} bytes", batch.len(), stream.len());

    let mut received = Vec::new();
    while let Some(msg) = codec.decode(&mut stream)? {
        received.push(msg);
    }
    println!(
        "   - Roundtrip: {}",
        if received == batch {
            "✓ Success"
        } else {
            "✗ Failed"
        }
    );
    println!();

    // 5. Registry
    println!("5. REGISTRY");
    let registry = Registry::with_builtin();
    for name in registry.names() {
        let descriptor = registry.get(name)?;
        println!("   - {}", name);
        for field in descriptor.fields {
            println!(
                "     {} = {} ({:?}, {})",
                field.name,
                field.number,
                field.kind,
                field.wire_type()
            );
        }
    }

    Ok(())
}
