//! The `VS_FIXEDFILEINFO` record at the head of a version resource.
//!
//! The record is 13 little-endian `u32`s in a fixed order; the field order is the on-disk
//! contract, so [`VsFixedFileInfo`] is read as a plain `scroll` record rather than field by field.

use core::fmt;
use scroll::{Pread, SizeWith};
use scroll::ctx::SizeWith as _;

use crate::error;
use crate::window::Window;

/// Expected value of [`VsFixedFileInfo::signature`].
pub const VS_FFI_SIGNATURE: u32 = 0xFEEF04BD;
/// The usual [`VsFixedFileInfo::struct_version`] (the SDK spells it `STRUCVERSION`).
pub const VS_FFI_STRUCVERSION: u32 = 0x00010000;
/// The usual [`VsFixedFileInfo::file_flags_mask`].
pub const VS_FFI_FILEFLAGSMASK: u32 = 0x0000003F;

// dwFileFlags

/// Debug build.
pub const VS_FF_DEBUG: u32 = 0x00000001;
/// Pre-release build.
pub const VS_FF_PRERELEASE: u32 = 0x00000002;
/// Patched after release.
pub const VS_FF_PATCHED: u32 = 0x00000004;
/// Private build; the `PrivateBuild` string describes it.
pub const VS_FF_PRIVATEBUILD: u32 = 0x00000008;
/// The version resource was generated rather than written by hand.
pub const VS_FF_INFOINFERRED: u32 = 0x00000010;
/// Special build; the `SpecialBuild` string describes it.
pub const VS_FF_SPECIALBUILD: u32 = 0x00000020;

// dwFileOS, high word

pub const VOS_UNKNOWN: u32 = 0x00000000;
pub const VOS_DOS: u32 = 0x00010000;
pub const VOS_OS216: u32 = 0x00020000;
pub const VOS_OS232: u32 = 0x00030000;
pub const VOS_NT: u32 = 0x00040000;
pub const VOS_WINCE: u32 = 0x00050000;

// dwFileOS, low word

#[doc(alias("VOS__BASE"))]
pub const VOS_BASE: u32 = 0x00000000;
#[doc(alias("VOS__WINDOWS16"))]
pub const VOS_WINDOWS16: u32 = 0x00000001;
#[doc(alias("VOS__PM16"))]
pub const VOS_PM16: u32 = 0x00000002;
#[doc(alias("VOS__PM32"))]
pub const VOS_PM32: u32 = 0x00000003;
#[doc(alias("VOS__WINDOWS32"))]
pub const VOS_WINDOWS32: u32 = 0x00000004;

// dwFileOS, combined

pub const VOS_DOS_WINDOWS16: u32 = VOS_DOS | VOS_WINDOWS16;
pub const VOS_DOS_WINDOWS32: u32 = VOS_DOS | VOS_WINDOWS32;
pub const VOS_OS216_PM16: u32 = VOS_OS216 | VOS_PM16;
pub const VOS_OS232_PM32: u32 = VOS_OS232 | VOS_PM32;
pub const VOS_NT_WINDOWS32: u32 = VOS_NT | VOS_WINDOWS32;

// dwFileType

pub const VFT_UNKNOWN: u32 = 0x00000000;
pub const VFT_APP: u32 = 0x00000001;
pub const VFT_DLL: u32 = 0x00000002;
pub const VFT_DRV: u32 = 0x00000003;
pub const VFT_FONT: u32 = 0x00000004;
pub const VFT_VXD: u32 = 0x00000005;
pub const VFT_STATIC_LIB: u32 = 0x00000007;

// dwFileSubtype when dwFileType is VFT_DRV

pub const VFT2_UNKNOWN: u32 = 0x00000000;
pub const VFT2_DRV_PRINTER: u32 = 0x00000001;
pub const VFT2_DRV_KEYBOARD: u32 = 0x00000002;
pub const VFT2_DRV_LANGUAGE: u32 = 0x00000003;
pub const VFT2_DRV_DISPLAY: u32 = 0x00000004;
pub const VFT2_DRV_MOUSE: u32 = 0x00000005;
pub const VFT2_DRV_NETWORK: u32 = 0x00000006;
pub const VFT2_DRV_SYSTEM: u32 = 0x00000007;
pub const VFT2_DRV_INSTALLABLE: u32 = 0x00000008;
pub const VFT2_DRV_SOUND: u32 = 0x00000009;
pub const VFT2_DRV_COMM: u32 = 0x0000000A;
pub const VFT2_DRV_INPUTMETHOD: u32 = 0x0000000B;
pub const VFT2_DRV_VERSIONED_PRINTER: u32 = 0x0000000C;

// dwFileSubtype when dwFileType is VFT_FONT

pub const VFT2_FONT_RASTER: u32 = 0x00000001;
pub const VFT2_FONT_VECTOR: u32 = 0x00000002;
pub const VFT2_FONT_TRUETYPE: u32 = 0x00000003;

/// A four-part `major.minor.build.revision` version, as packed into two `u32`s by
/// [`VsFixedFileInfo`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Default, Hash)]
pub struct VersionField {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl VersionField {
    /// Unpacks the most significant (`major << 16 | minor`) and least significant
    /// (`build << 16 | revision`) halves.
    pub fn from_ms_ls(ms: u32, ls: u32) -> Self {
        Self {
            major: (ms >> 16) as u16,
            minor: ms as u16,
            build: (ls >> 16) as u16,
            revision: ls as u16,
        }
    }

    /// Packs `major` and `minor` back into the most significant half.
    pub fn to_ms(&self) -> u32 {
        ((self.major as u32) << 16) | (self.minor as u32)
    }

    /// Packs `build` and `revision` back into the least significant half.
    pub fn to_ls(&self) -> u32 {
        ((self.build as u32) << 16) | (self.revision as u32)
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// The fixed file information of a version resource.
#[repr(C)]
#[derive(PartialEq, Eq, Copy, Clone, Default, Pread, SizeWith)]
pub struct VsFixedFileInfo {
    /// Must equal [`VS_FFI_SIGNATURE`] for the rest of the record to mean anything.
    pub signature: u32,
    pub struct_version: u32,
    pub file_version_ms: u32,
    pub file_version_ls: u32,
    pub product_version_ms: u32,
    pub product_version_ls: u32,
    /// Which bits of [`Self::file_flags`] are valid.
    pub file_flags_mask: u32,
    /// `VS_FF_*` bits.
    pub file_flags: u32,
    /// `VOS_*` value.
    pub file_os: u32,
    /// `VFT_*` value.
    pub file_type: u32,
    /// `VFT2_*` value, meaningful for drivers and fonts only.
    pub file_subtype: u32,
    pub file_date_ms: u32,
    pub file_date_ls: u32,
}

/// Size of [`VsFixedFileInfo`] on disk
pub const SIZEOF_VS_FIXED_FILE_INFO: usize = 13 * core::mem::size_of::<u32>();

impl fmt::Debug for VsFixedFileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VsFixedFileInfo")
            .field(
                "signature",
                &format_args!(
                    "{:#x} ({})",
                    self.signature,
                    if self.is_valid() { "Valid" } else { "Invalid" }
                ),
            )
            .field("struct_version", &format_args!("{:#x}", self.struct_version))
            .field("file_version", &format_args!("{}", self.file_version()))
            .field("product_version", &format_args!("{}", self.product_version()))
            .field(
                "file_flags_mask",
                &format_args!("{:#x}", self.file_flags_mask),
            )
            .field("file_flags", &format_args!("{:#x}", self.file_flags))
            .field("file_os", &format_args!("{:#x}", self.file_os))
            .field("file_type", &format_args!("{:#x}", self.file_type))
            .field("file_subtype", &format_args!("{:#x}", self.file_subtype))
            .field("file_date", &format_args!("{:#x}", self.file_date()))
            .finish()
    }
}

impl VsFixedFileInfo {
    /// Reads the record at the cursor of `window`.
    ///
    /// Fails if the window holds fewer than [`SIZEOF_VS_FIXED_FILE_INFO`] bytes; the signature
    /// is not checked here, see [`Self::is_valid`].
    pub fn parse(window: &mut Window) -> error::Result<Self> {
        debug_assert_eq!(
            Self::size_with(&scroll::LE),
            SIZEOF_VS_FIXED_FILE_INFO
        );
        window.pread::<VsFixedFileInfo>("VS_FIXEDFILEINFO")
    }

    /// Returns `true` if [`Self::signature`] equals [`VS_FFI_SIGNATURE`].
    pub fn is_valid(&self) -> bool {
        self.signature == VS_FFI_SIGNATURE
    }

    /// The binary version of the file.
    pub fn file_version(&self) -> VersionField {
        VersionField::from_ms_ls(self.file_version_ms, self.file_version_ls)
    }

    /// The binary version of the product the file ships with.
    pub fn product_version(&self) -> VersionField {
        VersionField::from_ms_ls(self.product_version_ms, self.product_version_ls)
    }

    /// The 64-bit creation timestamp; almost always zero in practice.
    pub fn file_date(&self) -> u64 {
        ((self.file_date_ms as u64) << 32) | (self.file_date_ls as u64)
    }

    /// [`Self::file_flags`] with [`Self::file_flags_mask`] applied.
    pub fn flags(&self) -> u32 {
        self.file_flags & self.file_flags_mask
    }

    pub fn is_debug(&self) -> bool {
        self.flags() & VS_FF_DEBUG != 0
    }

    pub fn is_prerelease(&self) -> bool {
        self.flags() & VS_FF_PRERELEASE != 0
    }
}
