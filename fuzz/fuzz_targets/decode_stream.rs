#![no_main]

use libfuzzer_sys::fuzz_target;
use berstream::decode::StreamParser;

fuzz_target!(|data: &[u8]| {
    // The limit only ever adds errors. Whatever decodes with it decodes
    // the same without it.
    let limited = StreamParser::from_slice(data).drain();
    let unlimited = StreamParser::new(data).drain();
    if let Ok(limited) = limited {
        assert_eq!(Ok(limited), unlimited.map_err(|err| err.to_string()));
    }
});
