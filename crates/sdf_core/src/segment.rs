//! Splitting multi-record text on the `$$$$` terminator.

/// Line that terminates every record in an SD file.
pub const RECORD_TERMINATOR: &str = "$$$$";

/// Iterate over the record blocks of `text`, in file order.
///
/// Each block is a borrowed slice with its terminator line removed. A
/// trailing segment that is empty or blank (text that ends on a terminator)
/// is not yielded. Apply a record limit with [`Iterator::take`]; blocks past
/// the limit are never scanned.
pub fn segment_records(text: &str) -> RecordBlocks<'_> {
    RecordBlocks { text, cursor: 0 }
}

/// Iterator returned by [`segment_records`].
#[derive(Clone, Debug)]
pub struct RecordBlocks<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for RecordBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor;
        let mut line_start = start;
        while line_start < self.text.len() {
            let rest = &self.text[line_start..];
            let line_end = rest.find('\n').map_or(self.text.len(), |i| line_start + i);
            let next_line = (line_end + 1).min(self.text.len());
            if self.text[line_start..line_end].trim_end() == RECORD_TERMINATOR {
                self.cursor = next_line;
                return Some(&self.text[start..line_start]);
            }
            line_start = next_line;
        }

        self.cursor = self.text.len();
        let tail = &self.text[start..];
        if tail.trim().is_empty() {
            None
        } else {
            Some(tail)
        }
    }
}
