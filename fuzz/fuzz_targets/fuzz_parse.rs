#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Err(e) = podcheck::parse(&s) {
        assert!(e.line.is_some_and(|line| line >= 1));
    }
});
