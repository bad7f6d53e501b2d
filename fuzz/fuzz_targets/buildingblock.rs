#![no_main]

use bbscope::{build_model_with, BuildConfig, Document};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = Document::from_mem(data) {
        let _ = build_model_with(doc.root(), &BuildConfig::lenient());
    }
});
