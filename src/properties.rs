//! The string properties extracted from a version resource.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;

pub const COMMENTS: &str = "Comments";
pub const COMPANY_NAME: &str = "CompanyName";
pub const FILE_DESCRIPTION: &str = "FileDescription";
pub const FILE_VERSION: &str = "FileVersion";
pub const INTERNAL_NAME: &str = "InternalName";
pub const LEGAL_COPYRIGHT: &str = "LegalCopyright";
pub const LEGAL_TRADEMARKS: &str = "LegalTrademarks";
pub const ORIGINAL_FILENAME: &str = "OriginalFilename";
pub const PRIVATE_BUILD: &str = "PrivateBuild";
pub const PRODUCT_NAME: &str = "ProductName";
pub const PRODUCT_VERSION: &str = "ProductVersion";
pub const SPECIAL_BUILD: &str = "SpecialBuild";

/// Field name to value, merged over every string table that was read.
///
/// When two tables carry the same field, the one read last wins. Values are stored with
/// surrounding whitespace trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionProperties {
    map: BTreeMap<String, String>,
}

impl VersionProperties {
    /// An empty set of properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the value it replaces
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.map.insert(key, value)
    }

    /// The value of the field named `key`, if any table had one
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no field was read
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fields in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.map.iter()
    }

    /// The underlying field name to value map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.map
    }

    /// Additional information for diagnostic purposes
    pub fn comments(&self) -> Option<&str> {
        self.get(COMMENTS)
    }

    /// The company that produced the file, e.g. "Microsoft Corporation"
    pub fn company_name(&self) -> Option<&str> {
        self.get(COMPANY_NAME)
    }

    /// A description to show to users
    pub fn file_description(&self) -> Option<&str> {
        self.get(FILE_DESCRIPTION)
    }

    /// The file version as free text, e.g. "3.00A" or "5.00.RC2"
    pub fn file_version(&self) -> Option<&str> {
        self.get(FILE_VERSION)
    }

    /// The file's internal name, usually the original filename without extension
    pub fn internal_name(&self) -> Option<&str> {
        self.get(INTERNAL_NAME)
    }

    /// Copyright notices that apply to the file
    pub fn legal_copyright(&self) -> Option<&str> {
        self.get(LEGAL_COPYRIGHT)
    }

    /// Trademarks and registered trademarks that apply to the file
    pub fn legal_trademarks(&self) -> Option<&str> {
        self.get(LEGAL_TRADEMARKS)
    }

    /// The name the file was created with, without a path
    pub fn original_filename(&self) -> Option<&str> {
        self.get(ORIGINAL_FILENAME)
    }

    /// Only meaningful when the fixed info has `VS_FF_PRIVATEBUILD` set
    pub fn private_build(&self) -> Option<&str> {
        self.get(PRIVATE_BUILD)
    }

    /// The name of the product the file is distributed with
    pub fn product_name(&self) -> Option<&str> {
        self.get(PRODUCT_NAME)
    }

    /// The product version as free text
    pub fn product_version(&self) -> Option<&str> {
        self.get(PRODUCT_VERSION)
    }

    /// Only meaningful when the fixed info has `VS_FF_SPECIALBUILD` set
    pub fn special_build(&self) -> Option<&str> {
        self.get(SPECIAL_BUILD)
    }
}

impl IntoIterator for VersionProperties {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionProperties {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl From<VersionProperties> for BTreeMap<String, String> {
    fn from(properties: VersionProperties) -> Self {
        properties.map
    }
}
