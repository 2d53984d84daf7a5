//! UTF-16LE helpers for the text fields of a version resource.

use alloc::string::String;
use alloc::vec::Vec;

/// Size of `wchar_t` in C (aka [`u16`] in Rust)
pub const SIZE_OF_WCHAR: usize = core::mem::size_of::<u16>();

/// Converts a raw UTF-16LE [`u8`] slice into a [`String`].
///
/// Decoding stops at the first null code unit. Unpaired surrogates are replaced with
/// `U+FFFD` and a trailing odd byte is ignored, so this never fails.
pub fn to_utf16_string(bytes: &[u8]) -> String {
    let u16_slice = bytes
        .chunks_exact(SIZE_OF_WCHAR)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .take_while(|&wchar| wchar != 0)
        .collect::<Vec<_>>();
    String::from_utf16_lossy(&u16_slice)
}
