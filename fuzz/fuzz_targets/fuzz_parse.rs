#![no_main]

use jsonlax::{CharReader, ParserOptions};
use libfuzzer_sys::fuzz_target;

// First byte selects the option switches, the rest is the document. The
// parser must never panic, whatever the switches; additionally, anything
// serde_json accepts must parse here too (the reverse does not hold: the
// loose number/string scanning deliberately accepts more).
fn parse(data: &[u8]) {
    let [flags, doc @ ..] = data else {
        return;
    };

    let options = ParserOptions {
        collect_comments: flags & 0x01 != 0,
        allow_comments: flags & 0x02 != 0,
        strict_root: flags & 0x04 != 0,
        allow_dropped_null_placeholders: flags & 0x08 != 0,
        allow_numeric_keys: flags & 0x10 != 0,
        allow_single_quotes: flags & 0x20 != 0,
        stack_limit: 64,
        fail_if_extra: flags & 0x40 != 0,
        reject_dup_keys: flags & 0x80 != 0,
        allow_special_floats: flags & 0x03 == 0x03,
    };
    let _ = CharReader::new(options).parse(doc);

    if serde_json::from_slice::<serde_json::Value>(doc).is_ok() {
        let lenient = CharReader::new(ParserOptions::default());
        assert!(
            lenient.parse(doc).is_ok(),
            "rejected a document serde_json accepts"
        );
    }
}

fuzz_target!(|data: &[u8]| parse(data));
