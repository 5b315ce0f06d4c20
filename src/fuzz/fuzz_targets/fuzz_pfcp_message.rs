//! PFCP Message Fuzzer
//!
//! Feeds arbitrary datagrams to the message decoder and the IE walker.
//! Neither may panic; every malformed input must come back as an error.
//!
//! Run with: cargo +nightly fuzz run fuzz_pfcp_message

#![no_main]

use libfuzzer_sys::fuzz_target;
use pfcp_codec::ie::collect_ies;
use pfcp_codec::{build_message, decode_message, parse_message, CodecConfig, PfcpCodec};

fuzz_target!(|data: &[u8]| {
    if let Ok((header, message)) = parse_message(data) {
        let _ = build_message(&message, header.sequence_number, header.seid);
    }
    let _ = decode_message(data);

    let strict = PfcpCodec::new(CodecConfig {
        allow_trailing_bytes: false,
        ..Default::default()
    });
    let _ = strict.decode(data);

    // Raw IE stream, no header
    let _ = collect_ies(data);
});
