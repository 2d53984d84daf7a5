#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate vsversion;

use vsversion::{AnyLanguage, ParseOptions, VersionInfo};

fuzz_target!(|data: &[u8]| {
    let _ = vsversion::parse(data);
    let _ = VersionInfo::parse_with_opts(data, &AnyLanguage, &ParseOptions::permissive());
});
