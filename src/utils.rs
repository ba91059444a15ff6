/// Maps byte offsets in a source text to 0-based line and column numbers.
///
/// Built once per document; each lookup is a binary search over the line
/// start offsets. Columns are counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Returns the 0-based `(line, column)` of a byte offset. Offsets past the
    /// end of the text resolve to the end of the last line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp(offset);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = self.source[self.line_starts[line]..offset].chars().count();
        (line, column)
    }

    /// Number of characters in the byte range `offset..offset + len`.
    pub fn char_len(&self, offset: usize, len: usize) -> usize {
        let start = self.clamp(offset);
        let end = self.clamp(offset.saturating_add(len));
        self.source[start..end].chars().count()
    }

    /// The source text of the byte range `offset..offset + len`.
    pub fn slice(&self, offset: usize, len: usize) -> &'a str {
        let start = self.clamp(offset);
        let end = self.clamp(offset.saturating_add(len));
        &self.source[start..end]
    }

    /// Clamps an offset into the text and back onto a char boundary.
    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(2), (0, 2));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("{\n  \"a\": 1\n}");
        assert_eq!(index.line_col(1), (0, 1));
        assert_eq!(index.line_col(2), (1, 0));
        assert_eq!(index.line_col(4), (1, 2));
        assert_eq!(index.line_col(11), (2, 0));
    }

    #[test]
    fn test_columns_count_chars() {
        let source = "\"é€\": x";
        let index = LineIndex::new(source);
        let x = source.find('x').unwrap();
        assert_eq!(index.line_col(x), (0, 6));
        assert_eq!(index.char_len(0, x), 6);
    }

    #[test]
    fn test_offset_past_end() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_col(100), (1, 1));
    }
}
