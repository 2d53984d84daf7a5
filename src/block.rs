//! The length-prefixed block every node of a version resource is made of.
//!
//! On disk each block looks like
//!
//! ```text
//! wLength       u16   total size of the block, header included
//! wValueLength  u16   size of the value (in words for text values)
//! wType         u16   1 for text, 0 for binary
//! szKey         null-terminated UTF-16LE
//! Padding       zeroes up to a 4-byte boundary
//! Value / Children
//! ```
//!
//! [`VersionBlock::parse`] reads the header and hands back a [`Window`] over the rest of the
//! block, which is then parsed again for nested blocks.

use alloc::string::String;
use core::fmt;

use crate::error;
use crate::options::{ParseOptions, Permissive};
use crate::utf16::{SIZE_OF_WCHAR, to_utf16_string};
use crate::window::{SeekFrom, Window};

/// Key of the root block of a version resource
pub const VS_VERSION_INFO_KEY: &str = "VS_VERSION_INFO";
/// Key of the block holding the localized string tables
pub const STRING_FILE_INFO_KEY: &str = "StringFileInfo";
/// Key of the block holding the translation table
pub const VAR_FILE_INFO_KEY: &str = "VarFileInfo";

/// `wLength` counts itself, so anything shorter cannot be a block.
pub const MIN_BLOCK_LEN: u16 = SIZE_OF_WCHAR as u16;

/// A single parsed block header together with a window over its payload.
#[derive(Copy, Clone)]
pub struct VersionBlock<'a> {
    /// `wLength`: size of the whole block in bytes.
    pub len: u16,
    /// `wValueLength`: size of the value. Counted in words for text values, in bytes otherwise;
    /// kept as read.
    pub value_len: u16,
    /// `wType`: `1` for text data, `0` for binary data, garbage from some resource compilers.
    pub r#type: u16,
    /// Raw UTF-16LE key, without the null terminator.
    pub key: &'a [u8],
    /// Absolute offset of `wLength`.
    pub start_offset: usize,
    /// Absolute offset one past the block's last byte.
    pub end_offset: usize,
    /// The payload: starts after the key's padding and ends at [`Self::end_offset`].
    pub body: Window<'a>,
}

impl fmt::Debug for VersionBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VersionBlock")
            .field("len", &format_args!("{:#x}", self.len))
            .field("value_len", &format_args!("{:#x}", self.value_len))
            .field(
                "type",
                &format_args!(
                    "{} ({})",
                    self.r#type,
                    match self.r#type {
                        0 => "Binary Data",
                        1 => "String Data",
                        _ => "Unknown",
                    }
                ),
            )
            .field("key", &self.key_string())
            .field("start_offset", &format_args!("{:#x}", self.start_offset))
            .field("end_offset", &format_args!("{:#x}", self.end_offset))
            .field("body", &self.body)
            .finish()
    }
}

impl<'a> VersionBlock<'a> {
    /// Parses the block header at the cursor of `parent`.
    ///
    /// Returns `Ok(None)` when `parent` runs out before a header field starts, which is how the
    /// end of a list of sibling blocks shows up. A header field that is only partially present,
    /// or a `wLength` that cannot be right, is an error.
    ///
    /// On success the cursor of `parent` is left somewhere inside the block; callers move on to
    /// the next sibling with [`Self::skip`].
    pub fn parse(parent: &mut Window<'a>, opts: &ParseOptions) -> error::Result<Option<Self>> {
        let start_offset = parent.offset();
        let len = match parent.try_read_u16("wLength")? {
            Some(len) => len,
            None => return Ok(None),
        };
        if len < MIN_BLOCK_LEN {
            return Err(error::Error::Malformed(format!(
                "block at {:#x} has wLength {:#x}, smaller than its own header",
                start_offset, len
            )));
        }

        let declared_end = start_offset + len as usize;
        let end_offset = if declared_end > parent.end() {
            Err(error::Error::Malformed(format!(
                "block at {:#x} ends at {:#x}, past its parent's end {:#x}",
                start_offset,
                declared_end,
                parent.end()
            )))
        } else {
            Ok(declared_end)
        }
        .or_permissive_and_value(
            opts.is_permissive(),
            "block overruns its parent",
            parent.end(),
        )?;

        let mut body = parent.carve(start_offset + SIZE_OF_WCHAR, end_offset)?;
        let value_len = match body.try_read_u16("wValueLength")? {
            Some(value_len) => value_len,
            None => return Ok(None),
        };
        let r#type = match body.try_read_u16("wType")? {
            Some(r#type) => r#type,
            None => return Ok(None),
        };
        let key = body.read_utf16_nul();
        body.skip_padding(start_offset);

        Ok(Some(VersionBlock {
            len,
            value_len,
            r#type,
            key,
            start_offset,
            end_offset,
            body,
        }))
    }

    /// Moves `parent`'s cursor past this block and its trailing padding, onto the next sibling.
    pub fn skip(&self, parent: &mut Window<'a>) -> error::Result<()> {
        parent.seek(SeekFrom::Start(self.end_offset))?;
        parent.skip_padding(self.start_offset);
        Ok(())
    }

    /// Decodes [`Self::key`]
    pub fn key_string(&self) -> String {
        to_utf16_string(self.key)
    }

    /// Returns `true` if the value is expected to be a null-terminated UTF-16 string
    pub fn is_text_data(&self) -> bool {
        self.r#type == 1
    }

    /// Returns `true` if the value is expected to be binary data
    pub fn is_binary_data(&self) -> bool {
        self.r#type == 0
    }
}

/// Iterates over the sibling blocks packed in a window.
///
/// Every block yielded is skipped over before the next one is parsed, whether or not its body
/// was looked at. The iterator stops at the first error.
pub struct Blocks<'a, 'o> {
    window: Window<'a>,
    opts: &'o ParseOptions,
    pending: Option<VersionBlock<'a>>,
    done: bool,
}

impl<'a, 'o> Blocks<'a, 'o> {
    /// Iterates over the blocks starting at the cursor of `window`
    pub fn new(window: Window<'a>, opts: &'o ParseOptions) -> Self {
        Blocks {
            window,
            opts,
            pending: None,
            done: false,
        }
    }

    fn advance(&mut self) -> error::Result<Option<VersionBlock<'a>>> {
        if let Some(previous) = self.pending.take() {
            previous.skip(&mut self.window)?;
        }
        let next = VersionBlock::parse(&mut self.window, self.opts)?;
        self.pending = next;
        Ok(next)
    }
}

impl<'a> Iterator for Blocks<'a, '_> {
    type Item = error::Result<VersionBlock<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Blocks, MIN_BLOCK_LEN, VersionBlock};
    use crate::error::Error;
    use crate::options::ParseOptions;
    use crate::window::Window;
    use alloc::vec::Vec;

    /// `"Translation"` block of a `VarFileInfo`
    const TRANSLATION: &[u8] = &[
        0x24, 0x00, 0x04, 0x00, 0x00, 0x00, 0x54, 0x00, 0x72, 0x00, 0x61, 0x00, 0x6E, 0x00, 0x73,
        0x00, 0x6C, 0x00, 0x61, 0x00, 0x74, 0x00, 0x69, 0x00, 0x6F, 0x00, 0x6E, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x09, 0x04, 0xB0, 0x04,
    ];

    #[test]
    fn parse_translation() {
        let mut window = Window::new(TRANSLATION);
        let block = VersionBlock::parse(&mut window, &ParseOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(block.len, 0x24);
        assert_eq!(block.value_len, 4);
        assert!(block.is_binary_data());
        assert_eq!(block.key_string(), "Translation");
        assert_eq!(block.start_offset, 0);
        assert_eq!(block.end_offset, 0x24);
        // header is 6 bytes, key 24 bytes with its terminator, 2 bytes of padding
        assert_eq!(block.body.offset(), 0x20);
        assert_eq!(block.body.offset() % 4, 0);
        assert_eq!(block.body.as_slice(), &[0x09, 0x04, 0xB0, 0x04]);

        block.skip(&mut window).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn empty_window_has_no_block() {
        let mut window = Window::new(&[]);
        assert!(
            VersionBlock::parse(&mut window, &ParseOptions::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn header_cut_inside_body_has_no_block() {
        // wLength says 4, so there is room for wValueLength but not for wType
        let data = [0x04, 0x00, 0x01, 0x00, 0xFF, 0xFF];
        let mut window = Window::new(&data);
        assert!(
            VersionBlock::parse(&mut window, &ParseOptions::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn partial_length_is_truncated() {
        let mut window = Window::new(&[0x24]);
        match VersionBlock::parse(&mut window, &ParseOptions::default()) {
            Err(Error::Truncated { what, .. }) => assert_eq!(what, "wLength"),
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn length_smaller_than_header_is_malformed() {
        for len in 0..MIN_BLOCK_LEN {
            let data = [len as u8, 0x00, 0x00, 0x00, 0x00, 0x00];
            let mut window = Window::new(&data);
            assert!(matches!(
                VersionBlock::parse(&mut window, &ParseOptions::default()),
                Err(Error::Malformed(_))
            ));
        }
    }

    #[test]
    fn overrun_strict_and_permissive() {
        let data = &TRANSLATION[..0x22];
        let mut window = Window::new(data);
        assert!(matches!(
            VersionBlock::parse(&mut window, &ParseOptions::strict()),
            Err(Error::Malformed(_))
        ));

        let mut window = Window::new(data);
        let block = VersionBlock::parse(&mut window, &ParseOptions::permissive())
            .unwrap()
            .unwrap();
        assert_eq!(block.len, 0x24);
        assert_eq!(block.end_offset, 0x22);
        assert_eq!(block.body.as_slice(), &[0x09, 0x04]);
    }

    #[test]
    fn siblings_partition_parent() {
        // a first block with a 2-byte value, padded up to the next boundary
        let mut data = TRANSLATION[..0x22].to_vec();
        data[0] = 0x22;
        data.extend_from_slice(&[0x00; 2]);
        data.extend_from_slice(TRANSLATION);
        let opts = ParseOptions::default();
        let blocks = Blocks::new(Window::new(&data), &opts)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_offset, 0);
        assert_eq!(blocks[0].end_offset, 0x22);
        assert_eq!(blocks[1].start_offset, 0x24);
        assert_eq!(blocks[1].end_offset, data.len());
    }

    #[test]
    fn value_starting_with_zero_is_not_padding() {
        let mut data = TRANSLATION.to_vec();
        data[0x20..].copy_from_slice(&[0x00, 0x00, 0xB0, 0x04]);
        let mut window = Window::new(&data);
        let block = VersionBlock::parse(&mut window, &ParseOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(block.body.offset(), 0x20);
        assert_eq!(block.body.as_slice(), &[0x00, 0x00, 0xB0, 0x04]);
    }

    #[test]
    fn zero_gap_between_siblings_is_not_skipped() {
        // padding only ever reaches the next boundary, a whole zero unit after it is a header
        let mut data = TRANSLATION.to_vec();
        data.extend_from_slice(&[0x00; 4]);
        data.extend_from_slice(TRANSLATION);
        let opts = ParseOptions::default();
        let mut blocks = Blocks::new(Window::new(&data), &opts);
        assert!(matches!(blocks.next(), Some(Ok(_))));
        assert!(matches!(blocks.next(), Some(Err(Error::Malformed(_)))));
        assert!(blocks.next().is_none());
    }

    #[test]
    fn blocks_stop_after_error() {
        let data = [0x01, 0x00, 0x00, 0x00];
        let opts = ParseOptions::default();
        let mut blocks = Blocks::new(Window::new(&data), &opts);
        assert!(matches!(blocks.next(), Some(Err(Error::Malformed(_)))));
        assert!(blocks.next().is_none());
    }
}
