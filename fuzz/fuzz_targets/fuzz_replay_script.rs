#![no_main]

use carousel_harness::script::parse_script;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    // Any input either parses or names a line inside the script.
    if let Err(carousel_harness::HarnessError::Script { line, .. }) = parse_script(source) {
        assert!(line >= 1 && line <= source.lines().count(), "bad line {line}");
    }
});
