#![no_main]

use libfuzzer_sys::fuzz_target;
use travelbook_editor::travel_file::polyline;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = polyline::decode(text, &[5, 5, 2, 2, 0]);
        let _ = polyline::decode(text, &[5, 5]);
    }
});
