//! Fuzz testing for the record codec and blob loader.
//!
//! Arbitrary bytes are fed to the record decoder, the zero-copy view and the
//! blob loader. None of them may panic; every malformed input must come back
//! as an error. Inputs that do decode must survive a re-encode unchanged.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use iata_directory::records::{decode_record, encode_record, RecordView};
use iata_directory::Directory;

#[derive(Debug, Arbitrary)]
enum DecoderInput {
    Record(Vec<u8>),
    Blob(Vec<u8>),
    Lookup { blob: Vec<u8>, key: String },
}

fuzz_target!(|input: DecoderInput| {
    match input {
        DecoderInput::Record(data) => {
            let view_ok = RecordView::new(&data).is_ok();
            if let Ok(airport) = decode_record(&data) {
                assert!(view_ok);
                let mut encoded = Vec::new();
                encode_record(&airport, &mut encoded).unwrap();
                let again = decode_record(&encoded).unwrap();
                assert_eq!(again.code, airport.code);
                assert_eq!(again.time_zone, airport.time_zone);
            }
        }
        DecoderInput::Blob(blob) => {
            if let Ok(directory) = Directory::from_bytes(blob) {
                for code in directory.codes(false) {
                    assert!(directory.get2(code).1);
                }
            }
        }
        DecoderInput::Lookup { blob, key } => {
            if let Ok(directory) = Directory::from_bytes(blob) {
                let _ = directory.get2(&key);
                let _ = directory.resolve_to_code(&key);
            }
        }
    }
});
