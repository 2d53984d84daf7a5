//! Dumps a raw `RT_VERSION` resource: `cargo run --example vsdump -- <resource.bin> [-v...]`

use std::env;
use std::fs;
use std::path::Path;
use vsversion::error;
use vsversion::{AnyLanguage, ParseOptions, VersionInfo};

fn run() -> error::Result<()> {
    let mut path = None;
    let mut verbosity: usize = 0;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            _ => path = Some(arg),
        }
    }
    // 0 is errors only, debug! output starts at 3
    if let Err(err) = stderrlog::new().verbosity(verbosity + 1).init() {
        eprintln!("cannot install the logger, continuing without it: {}", err);
    }

    let Some(path) = path else {
        println!("usage: vsdump <resource.bin> [-v] [-vv]");
        return Ok(());
    };
    let buffer = fs::read(Path::new(&path))?;
    let info = VersionInfo::parse_with_opts(&buffer, &AnyLanguage, &ParseOptions::permissive())?;
    match info.fixed_info {
        Some(fixed) => println!("{:#?}", fixed),
        None => println!("no fixed file info"),
    }
    for (key, value) in &info.properties {
        println!("{:>20}: {}", key, value);
    }
    Ok(())
}

pub fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => println!("{:#}", err),
    }
}
