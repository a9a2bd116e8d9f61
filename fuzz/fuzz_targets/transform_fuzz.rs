//! Transform fuzz target: feed arbitrary text to the full transform.
//! Must not panic; on success the output must be a fixed point of a second run.
//! Build with: cargo fuzz run transform_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(out) = proto_bitmap::transform(s) {
        let again = proto_bitmap::transform(&out);
        assert!(matches!(again, Ok(ref o) if *o == out));
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run transform_fuzz");
}
