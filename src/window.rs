//! A bounded, seekable view over a version resource.
//!
//! Every block of a `VS_VERSIONINFO` resource is parsed through a [`Window`]: a `[start, end)`
//! range of the resource with a cursor inside it. Offsets are always absolute (relative to the
//! first byte of the resource), so a child window carved out of its parent reports the same
//! positions as the parent would.

use core::fmt;
use scroll::Pread;
use scroll::ctx::{SizeWith, TryFromCtx};

use crate::error;
use crate::utf16::SIZE_OF_WCHAR;

/// Blocks, and the values inside them, start on 4-byte boundaries.
pub const BLOCK_ALIGNMENT: usize = 4;

/// Where to move a [`Window`]'s cursor to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeekFrom {
    /// An absolute offset in the resource
    Start(usize),
    /// A signed delta from the current position
    Current(isize),
}

/// A `[start, end)` window over a byte buffer with a cursor.
///
/// Reads never go past `end`, even if the underlying buffer continues.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Window<'a> {
    data: &'a [u8],
    start: usize,
    end: usize,
    offset: usize,
}

impl fmt::Debug for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Window")
            .field("start", &format_args!("{:#x}", self.start))
            .field("end", &format_args!("{:#x}", self.end))
            .field("offset", &format_args!("{:#x}", self.offset))
            .finish()
    }
}

impl<'a> Window<'a> {
    /// Creates a window spanning all of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Window {
            data,
            start: 0,
            end: data.len(),
            offset: 0,
        }
    }

    /// Carves the sub-window `[start, end)` out of this one, with its cursor at `start`.
    ///
    /// The sub-window must lie inside this window.
    pub fn carve(&self, start: usize, end: usize) -> error::Result<Window<'a>> {
        if start < self.start || start > end || end > self.end {
            return Err(error::Error::Malformed(format!(
                "window [{:#x}, {:#x}) is not inside [{:#x}, {:#x})",
                start, end, self.start, self.end
            )));
        }
        Ok(Window {
            data: self.data,
            start,
            end,
            offset: start,
        })
    }

    /// The absolute offset this window starts at
    pub fn start(&self) -> usize {
        self.start
    }

    /// The absolute offset this window ends at (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// The absolute offset of the cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes between the cursor and the end of the window
    pub fn remaining(&self) -> usize {
        self.end - self.offset
    }

    /// Returns `true` if the cursor sits at the end of the window
    pub fn is_empty(&self) -> bool {
        self.offset == self.end
    }

    /// The bytes between the cursor and the end of the window
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.offset..self.end]
    }

    fn truncated(&self, what: &'static str, need: usize) -> error::Error {
        error::Error::Truncated {
            what,
            offset: self.offset,
            need,
            have: self.remaining(),
        }
    }

    /// Reads exactly `len` bytes, failing if the window ends first
    pub fn read_bytes(&mut self, len: usize, what: &'static str) -> error::Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.truncated(what, len));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a fixed-size little-endian record
    pub fn pread<T>(&mut self, what: &'static str) -> error::Result<T>
    where
        T: TryFromCtx<'a, scroll::Endian, Error = scroll::Error> + SizeWith<scroll::Endian>,
    {
        let size = T::size_with(&scroll::LE);
        let bytes = self.read_bytes(size, what)?;
        Ok(bytes.pread_with::<T>(0, scroll::LE)?)
    }

    /// Reads a little-endian [`u16`]
    pub fn read_u16(&mut self, what: &'static str) -> error::Result<u16> {
        self.pread::<u16>(what)
    }

    /// Reads a little-endian [`u32`]
    pub fn read_u32(&mut self, what: &'static str) -> error::Result<u32> {
        self.pread::<u32>(what)
    }

    /// Reads a little-endian [`u16`] that may legitimately be absent.
    ///
    /// Returns `Ok(None)` if the cursor is exactly at the end of the window, and an error if
    /// only part of the field is there.
    pub fn try_read_u16(&mut self, what: &'static str) -> error::Result<Option<u16>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.read_u16(what).map(Some)
    }

    /// Moves the cursor, which must stay inside the window.
    ///
    /// Returns the new absolute offset.
    pub fn seek(&mut self, pos: SeekFrom) -> error::Result<usize> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.offset.checked_add_signed(delta),
        };
        match target {
            Some(target) if target >= self.start && target <= self.end => {
                self.offset = target;
                Ok(target)
            }
            _ => Err(error::Error::Malformed(format!(
                "cannot seek to {:?} from {:#x} in window [{:#x}, {:#x})",
                pos, self.offset, self.start, self.end
            ))),
        }
    }

    fn peek_unit(&self) -> Option<[u8; SIZE_OF_WCHAR]> {
        if self.remaining() < SIZE_OF_WCHAR {
            return None;
        }
        Some([self.data[self.offset], self.data[self.offset + 1]])
    }

    /// Consumes the zero padding between the cursor and the next 4-byte boundary, counted from
    /// `base`.
    ///
    /// `base` is the absolute offset of the block the padding belongs to. Padding is consumed
    /// in 2-byte units, after a single byte when the cursor is on an odd distance from `base`
    /// (a binary value of odd length). A non-zero byte is never padding: the cursor stops in
    /// front of it, as it does at the end of the window.
    pub fn skip_padding(&mut self, base: usize) {
        while !self.is_empty() {
            let misalignment = self.offset.wrapping_sub(base) % BLOCK_ALIGNMENT;
            if misalignment == 0 {
                return;
            }
            let step = if misalignment % SIZE_OF_WCHAR == 1 {
                1
            } else {
                SIZE_OF_WCHAR.min(self.remaining())
            };
            if self.data[self.offset..self.offset + step].iter().any(|&b| b != 0) {
                return;
            }
            self.offset += step;
        }
    }

    /// Reads a null-terminated UTF-16LE string and returns its raw bytes, without the terminator.
    ///
    /// The end of the window terminates the string as well; a trailing odd byte is left unread.
    pub fn read_utf16_nul(&mut self) -> &'a [u8] {
        let begin = self.offset;
        while let Some(unit) = self.peek_unit() {
            self.offset += SIZE_OF_WCHAR;
            if unit == [0, 0] {
                return &self.data[begin..self.offset - SIZE_OF_WCHAR];
            }
        }
        &self.data[begin..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::{SeekFrom, Window};
    use crate::error::Error;

    #[test]
    fn read_integers_little_endian() {
        let data = [0x5C, 0x00, 0xBD, 0x04, 0xEF, 0xFE];
        let mut window = Window::new(&data);
        assert_eq!(window.read_u16("wLength").unwrap(), 0x5C);
        assert_eq!(window.read_u32("dwSignature").unwrap(), 0xFEEF04BD);
        assert!(window.is_empty());
    }

    #[test]
    fn reads_stop_at_window_end() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00];
        let window = Window::new(&data);
        let mut sub = window.carve(0, 3).unwrap();
        assert_eq!(sub.read_u16("a").unwrap(), 1);
        match sub.read_u16("b") {
            Err(Error::Truncated {
                what,
                offset,
                need,
                have,
            }) => {
                assert_eq!(what, "b");
                assert_eq!(offset, 2);
                assert_eq!(need, 2);
                assert_eq!(have, 1);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        // a failed read leaves the cursor where it was
        assert_eq!(sub.offset(), 2);
    }

    #[test]
    fn try_read_distinguishes_end_from_partial() {
        let data = [0x01, 0x00, 0x02];
        let window = Window::new(&data);
        let mut even = window.carve(0, 2).unwrap();
        assert_eq!(even.try_read_u16("x").unwrap(), Some(1));
        assert_eq!(even.try_read_u16("x").unwrap(), None);

        let mut odd = window.carve(0, 3).unwrap();
        assert_eq!(odd.try_read_u16("x").unwrap(), Some(1));
        assert!(odd.try_read_u16("x").is_err());
    }

    #[test]
    fn carve_must_stay_inside() {
        let data = [0u8; 8];
        let window = Window::new(&data);
        let sub = window.carve(2, 6).unwrap();
        assert_eq!((sub.start(), sub.end(), sub.offset()), (2, 6, 2));
        assert!(sub.carve(1, 4).is_err());
        assert!(sub.carve(2, 7).is_err());
        assert!(sub.carve(5, 4).is_err());
        assert!(sub.carve(6, 6).unwrap().is_empty());
    }

    #[test]
    fn seek_is_bounded() {
        let data = [0u8; 8];
        let mut sub = Window::new(&data).carve(2, 6).unwrap();
        assert_eq!(sub.seek(SeekFrom::Start(6)).unwrap(), 6);
        assert_eq!(sub.seek(SeekFrom::Current(-4)).unwrap(), 2);
        assert!(sub.seek(SeekFrom::Current(-1)).is_err());
        assert!(sub.seek(SeekFrom::Start(7)).is_err());
        assert!(sub.seek(SeekFrom::Start(0)).is_err());
        assert_eq!(sub.offset(), 2);
    }

    #[test]
    fn skip_padding_stops_on_boundary() {
        let data = [0x41, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00];
        let mut window = Window::new(&data);
        window.seek(SeekFrom::Start(2)).unwrap();
        window.skip_padding(0);
        // the zero unit at 4 belongs to whatever comes next
        assert_eq!(window.offset(), 4);
        window.skip_padding(0);
        assert_eq!(window.offset(), 4);
        // counted from the block start, 4 is two bytes short of a boundary
        window.skip_padding(2);
        assert_eq!(window.offset(), 6);
    }

    #[test]
    fn skip_padding_stops_on_non_zero_byte() {
        let data = [0x41, 0x00, 0x42, 0x00, 0x10, 0x00];
        let mut window = Window::new(&data);
        window.seek(SeekFrom::Start(2)).unwrap();
        window.skip_padding(0);
        assert_eq!(window.offset(), 2);
    }

    #[test]
    fn skip_padding_realigns_odd_offset() {
        let data = [0x01, 0x02, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00];
        let mut window = Window::new(&data);
        window.seek(SeekFrom::Start(3)).unwrap();
        window.skip_padding(0);
        assert_eq!(window.offset(), 4);

        let mut window = Window::new(&data);
        window.seek(SeekFrom::Start(1)).unwrap();
        window.skip_padding(0);
        assert_eq!(window.offset(), 1);
    }

    #[test]
    fn skip_padding_runs_to_window_end() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x00];
        let mut window = Window::new(&data).carve(0, 3).unwrap();
        window.seek(SeekFrom::Start(1)).unwrap();
        window.skip_padding(0);
        assert!(window.is_empty());
    }

    #[test]
    fn utf16_nul_terminated() {
        let data = [0x41, 0x00, 0x42, 0x00, 0x00, 0x00, 0x43, 0x00];
        let mut window = Window::new(&data);
        assert_eq!(window.read_utf16_nul(), &[0x41, 0x00, 0x42, 0x00]);
        assert_eq!(window.offset(), 6);
        // end of window is an implicit terminator
        assert_eq!(window.read_utf16_nul(), &[0x43, 0x00]);
        assert!(window.is_empty());
        assert_eq!(window.read_utf16_nul(), &[] as &[u8]);
    }
}
