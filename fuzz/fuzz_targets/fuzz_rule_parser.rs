#![no_main]

use form_designer::bus::{parse_program, RuleContext};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    // Parsen und Auswerten dürfen nur Fehler liefern, nie abbrechen.
    if let Ok(program) = parse_program(source) {
        let values: HashMap<String, String> =
            HashMap::from([("a".to_string(), "1".to_string())]);
        let _ = program.evaluate(&RuleContext::new(Some("x"), &values));
    }
});
