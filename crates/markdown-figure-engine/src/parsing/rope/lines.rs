use xi_rope::Rope;

use super::span::Span;

/// One source line and its byte span in the rope.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line, including the newline if present.
    pub span: Span,
    pub text: String,
}

impl LineRef {
    /// The line without its trailing `\n` / `\r\n`.
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// `lines_raw` keeps the newline characters so consecutive spans tile the
/// rope without gaps.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_tile_the_rope() {
        let rope = Rope::from("one\ntwo\r\nthree");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].span, Span::new(0, 4));
        assert_eq!(lines[1].span, Span::new(4, 9));
        assert_eq!(lines[2].span, Span::new(9, 14));
        assert_eq!(lines[1].trimmed(), "two");
        assert_eq!(lines[2].trimmed(), "three");
    }
}
