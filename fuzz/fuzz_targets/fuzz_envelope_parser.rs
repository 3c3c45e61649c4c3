#![no_main]

use form_designer::{parse_envelope, parse_values, write_envelope, GlobalSettings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(canvas) = parse_envelope(content, &GlobalSettings::default()) {
        assert!(canvas.has_unique_ids());
        if let Ok(written) = write_envelope(&canvas) {
            let reparsed = parse_envelope(&written, &GlobalSettings::default())
                .expect("geschriebener Envelope muss lesbar sein");
            assert_eq!(reparsed.ids(), canvas.ids());
        }
    }
    let _ = parse_values(content);
});
