//! Walking a whole `VS_VERSIONINFO` resource.
//!
//! The resource is a tree of [`VersionBlock`]s:
//!
//! ```text
//! VS_VERSION_INFO            VS_FIXEDFILEINFO value
//! ├── StringFileInfo
//! │   ├── 040904B0           one StringTable per language and codepage
//! │   │   ├── CompanyName    text value
//! │   │   └── ...
//! │   └── ...
//! └── VarFileInfo
//!     └── Translation
//! ```
//!
//! Only the string tables accepted by a [`LanguageFilter`] are read. Everything else is skipped
//! by jumping to the end of its block, so unknown blocks are harmless.

use log::debug;

use crate::block::{
    Blocks, STRING_FILE_INFO_KEY, VAR_FILE_INFO_KEY, VS_VERSION_INFO_KEY, VersionBlock,
};
use crate::error;
use crate::fixed::VsFixedFileInfo;
use crate::language::{LanguageFilter, Whitelist};
use crate::options::ParseOptions;
use crate::properties::VersionProperties;
use crate::utf16::to_utf16_string;
use crate::window::Window;

/// A parsed version resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// The fixed file information, if the resource has one with a valid signature
    pub fixed_info: Option<VsFixedFileInfo>,
    /// Strings of every whitelisted table
    pub properties: VersionProperties,
}

impl VersionInfo {
    /// Parses `bytes`, reading the tables of [`Whitelist::default`]
    pub fn parse(bytes: &[u8]) -> error::Result<Self> {
        Self::parse_with_opts(bytes, &Whitelist::default(), &ParseOptions::default())
    }

    /// Parses `bytes`, reading the tables accepted by `filter`.
    ///
    /// A resource without fixed file information, or with a fixed file information whose
    /// signature is wrong, is not an error: it yields no `fixed_info` and no properties.
    pub fn parse_with_opts<L>(
        bytes: &[u8],
        filter: &L,
        opts: &ParseOptions,
    ) -> error::Result<Self>
    where
        L: LanguageFilter + ?Sized,
    {
        let mut properties = VersionProperties::new();
        let fixed_info = walk(bytes, filter, opts, &mut properties)?;
        Ok(VersionInfo {
            fixed_info,
            properties,
        })
    }
}

/// Parses `bytes` and merges the strings of every table accepted by `filter` into `properties`.
///
/// Fields already in `properties` are overwritten when the resource has them too.
pub fn parse_properties_into<L>(
    bytes: &[u8],
    filter: &L,
    opts: &ParseOptions,
    properties: &mut VersionProperties,
) -> error::Result<()>
where
    L: LanguageFilter + ?Sized,
{
    walk(bytes, filter, opts, properties).map(|_| ())
}

fn walk<L>(
    bytes: &[u8],
    filter: &L,
    opts: &ParseOptions,
    properties: &mut VersionProperties,
) -> error::Result<Option<VsFixedFileInfo>>
where
    L: LanguageFilter + ?Sized,
{
    let mut window = Window::new(bytes);
    let mut root = VersionBlock::parse(&mut window, opts)?.ok_or_else(|| {
        error::Error::Malformed(format!(
            "no VS_VERSIONINFO header in {} bytes",
            bytes.len()
        ))
    })?;
    debug!("{:#x?}", root);

    let key = root.key_string();
    if key != VS_VERSION_INFO_KEY {
        debug!("root block is keyed {:?} instead of {:?}", key, VS_VERSION_INFO_KEY);
    }

    if root.value_len == 0 {
        debug!("no fixed file info, nothing to read");
        return Ok(None);
    }

    let fixed_info = VsFixedFileInfo::parse(&mut root.body)?;
    if !fixed_info.is_valid() {
        debug!(
            "invalid fixed file info signature {:#x}, not a version resource we understand",
            fixed_info.signature
        );
        return Ok(None);
    }
    root.body.skip_padding(root.start_offset);

    for child in Blocks::new(root.body, opts) {
        let child = child?;
        let key = child.key_string();
        match key.as_str() {
            STRING_FILE_INFO_KEY => read_string_file_info(&child, filter, opts, properties)?,
            VAR_FILE_INFO_KEY => {}
            _ => debug!("skipping unknown block {:?} at {:#x}", key, child.start_offset),
        }
    }

    Ok(Some(fixed_info))
}

fn read_string_file_info<L>(
    string_file_info: &VersionBlock,
    filter: &L,
    opts: &ParseOptions,
    properties: &mut VersionProperties,
) -> error::Result<()>
where
    L: LanguageFilter + ?Sized,
{
    for table in Blocks::new(string_file_info.body, opts) {
        let table = table?;
        let language = table.key_string();
        if filter.is_whitelisted(&language) {
            read_string_table(&table, opts, properties)?;
        } else {
            debug!("skipping string table {}", language);
        }
    }
    Ok(())
}

fn read_string_table(
    table: &VersionBlock,
    opts: &ParseOptions,
    properties: &mut VersionProperties,
) -> error::Result<()> {
    for string in Blocks::new(table.body, opts) {
        let mut string = string?;
        let key = string.key_string();
        let value = to_utf16_string(string.body.read_utf16_nul());
        let value = value.trim();
        debug!("{}: {}", key, value);
        properties.insert(key, value.into());
    }
    Ok(())
}
