#[macro_use]
extern crate afl;

use vsversion::block::Blocks;
use vsversion::window::Window;
use vsversion::{AnyLanguage, ParseOptions, VersionInfo};

fn main() {
    fuzz!(|data: &[u8]| {
        let _ = vsversion::parse(data);
        let opts = ParseOptions::permissive();
        if let Ok(info) = VersionInfo::parse_with_opts(data, &AnyLanguage, &opts) {
            for (_key, _value) in &info.properties {}
        }

        for block in Blocks::new(Window::new(data), &opts) {
            match block {
                Ok(block) => for _child in Blocks::new(block.body, &opts) {},
                Err(_) => break,
            }
        }
    });
}
