#![no_main]
use libfuzzer_sys::fuzz_target;
use ttf_bytecode::{decode_all, parse};

fuzz_target!(|data: &[u8]| {
    match parse(data) {
        Ok(program) => {
            let mut end = 0;
            for ins in &program {
                assert_eq!(ins.pc, end);
                end += ins.byte_len();
            }
            assert_eq!(end, data.len());
        }
        Err(err) => {
            // The lazy decoder must stop at the same place.
            let last = decode_all(data, 0).last().and_then(|res| res.err());
            assert_eq!(last, Some(err));
        }
    }
});
