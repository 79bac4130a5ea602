/// An opening code fence: marker byte, run length and info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    pub marker: u8,
    pub len: usize,
    pub info: String,
}

impl Fence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    /// Shortest run that opens a fence.
    pub const MIN_LEN: usize = 3;
    /// Up to three spaces of indentation are allowed before a fence.
    const MAX_INDENT: usize = 3;

    /// Recognises an opening fence on a line (newline already stripped).
    pub fn open(line: &str) -> Option<Fence> {
        let rest = strip_indent(line)?;
        let marker = *rest.as_bytes().first()?;
        if marker != Self::BACKTICK && marker != Self::TILDE {
            return None;
        }
        let len = rest.bytes().take_while(|&b| b == marker).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = rest[len..].trim();
        // A backtick fence's info string may not contain backticks,
        // otherwise the line is an inline code span.
        if marker == Self::BACKTICK && info.contains('`') {
            return None;
        }
        Some(Fence {
            marker,
            len,
            info: info.to_string(),
        })
    }

    /// True if `line` closes this fence: same marker, at least as long,
    /// nothing but whitespace after the run.
    pub fn is_closed_by(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let run = rest.bytes().take_while(|&b| b == self.marker).count();
        run >= self.len && rest[run..].trim().is_empty()
    }

    /// First word of the info string, used as the code language.
    pub fn language(&self) -> Option<&str> {
        self.info.split_whitespace().next()
    }
}

fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > Fence::MAX_INDENT {
        return None;
    }
    Some(&line[indent..])
}
