//! This module defines the `Tape` struct, the symbol buffer at the core of the
//! machine: an unbounded, auto-extending two-way sequence of symbols with a
//! logical-to-physical index mapping and an independent file-style cursor.
//!
//! Callers address the tape with *logical* indices, which may be negative and
//! are unbounded in both directions. Storage is a finite `Vec<Symbol>`
//! addressed by *physical* indices; `offset` is the single translation
//! invariant between the two (`logical + offset = physical`). Reading past
//! either end is never an error: the backing vector grows with [`BLANK`]s on
//! demand, and `offset` increases by exactly the deficit when growth happens
//! leftward.

use std::fmt;
use std::io::{self, Read, SeekFrom};
use std::ops::{Bound, Range, RangeBounds};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::types::{is_printable, Symbol, BLANK};

lazy_static! {
    static ref BLANK_RUNS: Regex = Regex::new(r" {8,}").unwrap();
}

/// An unbounded two-way tape of symbols.
///
/// `offset` only ever increases (the tape grows leftward); materialized cells
/// are never deallocated. The sequential `cursor` used by the file-style
/// operations is unrelated to `offset`.
#[derive(Clone, Default)]
pub struct Tape {
    content: Vec<Symbol>,
    offset: usize,
    cursor: usize,
}

impl Tape {
    /// Creates an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an entire stream onto a fresh tape.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(Self::from(buf))
    }

    /// Size of the materialized content, not of the conceptual infinite tape.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The logical-to-physical translation constant.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Resolves a logical range to concrete `(start, stop)` bounds.
    ///
    /// Unbounded ends fall back to the materialized extent: the lowest logical
    /// index currently backed by storage, and one past the highest.
    fn resolve<R: RangeBounds<i64>>(&self, range: &R) -> (i64, i64) {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => -(self.offset as i64),
        };
        let stop = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.content.len() as i64 - self.offset as i64,
        };
        (start, stop)
    }

    /// Grows the tape so the given logical range is materialized, returning
    /// the physical span it now occupies.
    ///
    /// Extends rightward first, then leftward; only the leftward branch moves
    /// `offset`. Each boundary needs at most one extension -- if the resolved
    /// span is still invalid afterwards the index-translation arithmetic is
    /// broken, and continuing would corrupt the tape.
    pub fn ensure<R: RangeBounds<i64>>(&mut self, range: R) -> Range<usize> {
        let (start, stop) = self.resolve(&range);
        let mut lo = start + self.offset as i64;
        let mut hi = stop + self.offset as i64;

        if hi > self.content.len() as i64 {
            self.content.resize(hi as usize, BLANK);
        }
        if lo < 0 {
            let deficit = lo.unsigned_abs() as usize;
            self.content
                .splice(0..0, std::iter::repeat(BLANK).take(deficit));
            self.offset += deficit;
            lo = 0;
            hi += deficit as i64;
        }
        if hi < lo {
            // inverted range: empty span, clamped into bounds
            lo = lo.min(self.content.len() as i64);
            hi = lo;
        }

        if lo < 0 || hi < lo || hi as usize > self.content.len() {
            panic!(
                "tape extension failed to converge: logical {}..{} resolved to physical {}..{} of {:?}",
                start, stop, lo, hi, self
            );
        }

        lo as usize..hi as usize
    }

    /// Pure read of a physical span previously returned by [`ensure`].
    ///
    /// [`ensure`]: Tape::ensure
    pub fn view(&self, span: Range<usize>) -> String {
        self.content[span].iter().collect()
    }

    /// Reads the symbol at a logical index, growing the tape if needed.
    pub fn get(&mut self, index: i64) -> Symbol {
        let span = self.ensure(index..index + 1);
        self.content[span.start]
    }

    /// Reads a logical range as a string, growing the tape if needed.
    /// Half-open bounds; unbounded ends cover the materialized extent.
    pub fn slice<R: RangeBounds<i64>>(&mut self, range: R) -> String {
        let span = self.ensure(range);
        self.view(span)
    }

    /// Stores a single symbol at a logical index.
    pub fn put(&mut self, index: i64, symbol: Symbol) {
        let span = self.ensure(index..index + 1);
        self.content[span.start] = symbol;
    }

    /// Writes a string at a single logical index.
    ///
    /// Exactly one cell is consumed, so a multi-symbol string *inserts*: the
    /// tape grows by `symbols.len() - 1`. An insert left of logical zero
    /// grows the tape leftward; cells at and beyond the write point keep
    /// their logical addresses.
    pub fn set(&mut self, index: i64, symbols: &str) {
        let span = self.ensure(index..index + 1);
        let inserted = symbols.chars().count();
        self.content.splice(span, symbols.chars());
        if index < 0 && inserted > 1 {
            self.offset += inserted - 1;
        }
    }

    /// Replaces a logical range with the given symbols.
    ///
    /// Exactly that span is consumed; a replacement of a different length
    /// changes the overall tape length.
    pub fn splice<R: RangeBounds<i64>>(&mut self, range: R, symbols: &str) {
        let span = self.ensure(range);
        self.content.splice(span, symbols.chars());
    }

    /// The sequential cursor position, as a file handle would report it.
    pub fn tell(&self) -> usize {
        self.cursor
    }

    /// Moves the sequential cursor, mirroring `io::Seek` semantics.
    /// Positions before the start clamp to zero.
    pub fn seek(&mut self, pos: SeekFrom) {
        self.cursor = match pos {
            SeekFrom::Start(n) => n as usize,
            SeekFrom::Current(d) => (self.cursor as i64 + d).max(0) as usize,
            SeekFrom::End(d) => (self.content.len() as i64 + d).max(0) as usize,
        };
    }

    /// Reads all remaining content from the cursor onward, advancing it.
    pub fn read(&mut self) -> String {
        self.read_to(self.content.len())
    }

    /// Reads up to `n` symbols from the cursor onward, advancing it by the
    /// amount actually returned.
    pub fn read_n(&mut self, n: usize) -> String {
        let end = self.cursor.saturating_add(n).min(self.content.len());
        self.read_to(end)
    }

    fn read_to(&mut self, end: usize) -> String {
        if end <= self.cursor {
            return String::new();
        }
        let ret: String = self.content[self.cursor..end].iter().collect();
        self.cursor = end;
        ret
    }

    /// Writes symbols at the cursor, *replacing* that many existing symbols
    /// (not insert-shift), then advances the cursor past them. A cursor
    /// beyond the current end blank-pads the gap first.
    pub fn write(&mut self, symbols: &str) {
        if self.cursor > self.content.len() {
            self.content.resize(self.cursor, BLANK);
        }
        let count = symbols.chars().count();
        let end = (self.cursor + count).min(self.content.len());
        self.content.splice(self.cursor..end, symbols.chars());
        self.cursor += count;
    }

    /// Compact one-line rendering: non-printables escaped, long blank runs
    /// collapsed to a count marker.
    fn compact(&self) -> String {
        let escaped: String = self
            .content
            .iter()
            .map(|&sym| {
                if is_printable(sym) {
                    sym.to_string()
                } else {
                    format!("\\x{:02x}", sym as u32)
                }
            })
            .collect();
        BLANK_RUNS
            .replace_all(&escaped, |caps: &Captures| format!("«{}»", caps[0].len()))
            .into_owned()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sym in &self.content {
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "##TAPE:{}##{}##", self.offset, self.compact())
    }
}

// Equality is over the visible string only; two tapes with different offsets
// or cursors but equal materialized content compare equal.
impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Tape {}

impl PartialEq<str> for Tape {
    fn eq(&self, other: &str) -> bool {
        self.content.iter().copied().eq(other.chars())
    }
}

impl PartialEq<&str> for Tape {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl From<&str> for Tape {
    fn from(symbols: &str) -> Self {
        Self {
            content: symbols.chars().collect(),
            offset: 0,
            cursor: 0,
        }
    }
}

impl From<String> for Tape {
    fn from(symbols: String) -> Self {
        Self::from(symbols.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn tape() -> Tape {
        Tape::from("test")
    }

    #[test]
    fn test_basic_get() {
        let mut t = tape();
        assert_eq!(t.len(), 4);
        assert_eq!(t.get(0), 't');
        assert_eq!(t.get(1), 'e');
        assert_eq!(t, "test");
    }

    #[test]
    fn test_get_extends_right() {
        let mut t = tape();
        for target in [27_i64, 50, 113] {
            assert_eq!(t.get(target), BLANK);
            assert_eq!(t.len(), target as usize + 1);
        }
        let expected = format!("test{}", " ".repeat(110));
        assert_eq!(t, expected.as_str());
    }

    #[test]
    fn test_get_extends_left() {
        let mut t = tape();
        assert_eq!(t.get(-1), BLANK);
        assert_eq!(t.get(0), 't');
        assert_eq!(t.offset(), 1);
        assert_eq!(t, " test");

        assert_eq!(t.get(-3), BLANK);
        assert_eq!(t.get(0), 't');
        assert_eq!(t.offset(), 3);
        assert_eq!(t, "   test");
    }

    #[test]
    fn test_get_idempotent() {
        let mut t = tape();
        let first = t.get(9);
        let len = t.len();
        assert_eq!(t.get(9), first);
        assert_eq!(t.len(), len);
    }

    #[test]
    fn test_slice_ranges() {
        assert_eq!(tape().slice(0..4), "test");
        assert_eq!(tape().slice(..4), "test");
        assert_eq!(tape().slice(0..), "test");
        assert_eq!(tape().slice(-20..), format!("{}test", " ".repeat(20)));
        assert_eq!(
            tape().slice(-20..20),
            format!("{}test{}", " ".repeat(20), " ".repeat(16))
        );
        assert_eq!(tape().slice(-12..-7), " ".repeat(5));
        assert_eq!(tape().slice(-1..), " test");
        assert_eq!(tape().slice(-2..2), "  te");
    }

    #[test]
    fn test_slice_negative_stop_after_growth() {
        let mut t = tape();
        assert_eq!(t.get(-20), BLANK);
        assert_eq!(t.slice(..-7), " ".repeat(13));
        assert_eq!(t.slice(..-1), " ".repeat(19));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let mut t = tape();
        assert_eq!(t.slice(10..5), "");
        assert_eq!(t.slice(..-7), "");
    }

    #[test]
    fn test_write_to_tape() {
        let mut t = tape();
        t.set(2, "X");
        assert_eq!(t, "teXt");

        t.set(2, "XX");
        assert_eq!(t, "teXXt");

        t.splice(1..3, "YY");
        assert_eq!(t, "tYYXt");
    }

    #[test]
    fn test_write_at_neg1() {
        let mut t = tape();
        t.set(-1, "Z");
        assert_eq!(t, "Ztest");
        assert_eq!(t.get(0), 't');
    }

    #[test]
    fn test_range_write_at_negative_range() {
        let mut t = tape();
        t.splice(-4..-1, "zoot suit");
        assert_eq!(t, "zoot suit test");
    }

    #[test]
    fn test_insert_left_of_zero_keeps_addresses() {
        let mut t = tape();
        t.set(-10, "GOOM");
        assert_eq!(t, format!("GOOM{}test", " ".repeat(9)).as_str());
        assert_eq!(t.get(0), 't');

        t.set(10, "GOOM");
        let expected = format!("GOOM{}test{}GOOM", " ".repeat(9), " ".repeat(6));
        assert_eq!(t, expected.as_str());
    }

    #[test]
    fn test_write_0123() {
        let mut t = tape();
        for i in 0..4 {
            t.set(i, &i.to_string());
        }
        assert_eq!(t, "0123");
    }

    #[test]
    fn test_put_round_trip() {
        for i in [-7_i64, -1, 0, 3, 12] {
            let mut t = tape();
            t.put(i, 'q');
            assert_eq!(t.get(i), 'q');
        }
    }

    #[test]
    fn test_read_write_cursor() {
        let mut t = tape();
        assert_eq!(t.read(), "test");
        assert_eq!(t.read(), "");

        t.seek(SeekFrom::Start(0));
        t.write("this is a test");
        assert_eq!(t.read(), "");

        t.seek(SeekFrom::Start(0));
        assert_eq!(t.read(), "this is a test");
    }

    #[test]
    fn test_read_n_and_tell() {
        let mut t = tape();
        assert_eq!(t.read_n(2), "te");
        assert_eq!(t.tell(), 2);
        assert_eq!(t.read_n(10), "st");
        assert_eq!(t.tell(), 4);
    }

    #[test]
    fn test_seek_whence() {
        let mut t = tape();
        t.seek(SeekFrom::End(-2));
        assert_eq!(t.read(), "st");
        t.seek(SeekFrom::Start(1));
        t.seek(SeekFrom::Current(2));
        assert_eq!(t.read(), "t");
        t.seek(SeekFrom::Current(-100));
        assert_eq!(t.tell(), 0);
    }

    #[test]
    fn test_write_past_end_blank_pads() {
        let mut t = tape();
        t.seek(SeekFrom::Start(6));
        t.write("!!");
        assert_eq!(t, "test  !!");
        assert_eq!(t.tell(), 8);
    }

    #[test]
    fn test_equality_ignores_offset_and_cursor() {
        let mut a = tape();
        a.get(-2);
        let b = Tape::from("  test");
        assert_eq!(a, b);
        assert_eq!(a, "  test");
        assert_ne!(a.offset(), b.offset());
    }

    #[test]
    fn test_compact_debug() {
        let mut t = tape();
        t.get(30);
        assert_eq!(format!("{:?}", t), "##TAPE:0##test«27»##");

        let framed = Tape::from("\x02hi\x03");
        assert_eq!(format!("{:?}", framed), "##TAPE:0##\\x02hi\\x03##");
    }

    #[test]
    fn test_from_reader() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"010011").unwrap();
        file.flush().unwrap();
        use std::io::Seek as _;
        file.seek(SeekFrom::Start(0)).unwrap();

        let t = Tape::from_reader(file).unwrap();
        assert_eq!(t, "010011");
    }
}
