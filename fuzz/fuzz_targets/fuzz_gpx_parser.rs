#![no_main]

use libfuzzer_sys::fuzz_target;
use travelbook_editor::shared::EditorOptions;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = travelbook_editor::parse_gpx(text, &EditorOptions::default());
    }
});
