#![no_main]

use libfuzzer_sys::fuzz_target;

// Validation must never panic, and positioned diagnostics must point inside
// the input.
fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(ctx) = podcheck::check(&s, "fuzz.yaml") {
        let max_line = s.lines().count().max(1) + 1;
        for d in ctx.diagnostics() {
            if let Some(line) = d.line {
                assert!(line >= 1 && line <= max_line, "line {} out of bounds", line);
            }
        }
    }
});
