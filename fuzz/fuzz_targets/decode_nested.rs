#![no_main]

use libfuzzer_sys::fuzz_target;
use berstream::decode::{
    Container, DecodeError, Object, Primitive, StreamParser
};

/// Walks over all objects by pulling and touches their values.
fn walk(mut container: Container) -> Result<(), DecodeError> {
    while let Some(object) = container.pull()? {
        match object {
            Object::Opaque(value) => {
                let _ = value.content().len();
            }
            Object::Primitive(value) => touch(value),
            Object::Container(Container::OctetString(mut inner)) => {
                inner.take_all()?;
            }
            Object::Container(inner) => walk(inner)?,
        }
    }
    Ok(())
}

fn touch(value: Primitive) {
    match value {
        Primitive::Integer(int) => {
            let _ = (int.to_i64(), int.to_u64());
        }
        Primitive::BitString(bits) => {
            assert!(bits.unused() < 8);
            assert!(bits.bit_len() <= bits.octet_len() * 8);
        }
        Primitive::Oid(oid) => {
            let _ = oid.to_string();
        }
        Primitive::BmpString(s) => {
            let _ = s.to_string_lossy();
        }
        Primitive::UniversalString(s) => {
            let _ = s.to_string_lossy();
        }
        _ => { }
    }
}

fuzz_target!(|data: &[u8]| {
    // Wrap the input into an indefinite length sequence.
    let mut wrapped = vec![0x30, 0x80];
    wrapped.extend_from_slice(data);
    wrapped.extend_from_slice(b"\0\0");

    let mut parser = StreamParser::from_slice(&wrapped);
    if let Ok(Some(Object::Container(container))) = parser.next() {
        let _ = walk(container);
    }
    let _ = StreamParser::from_slice(&wrapped).drain();
});
