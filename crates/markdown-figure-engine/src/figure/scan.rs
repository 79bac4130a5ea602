use crate::parsing::{
    inline::{Cursor, LinkHelpers},
    rope::Span,
};

/// What to do when an alt segment opens with `[` but has no matching `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnclosedAlt {
    /// The whole figure fails to match.
    #[default]
    Reject,
    /// The figure matches without an alt; everything up to the next `)` is dropped.
    Ignore,
}

/// Pieces of a matched figure, before the caption is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureParts {
    pub identifier: Option<String>,
    /// Byte range of the caption text, brackets excluded.
    pub caption: Span,
    pub destination: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FigureMatch {
    /// The full grammar matched; `end` is the index just past the closing `)`.
    Matched { end: usize, parts: FigureParts },
    NotMatched,
}

/// Recognizes `#digits[caption](destination [alt] "title")`.
///
/// Scanning works on a private cursor over `(src, pos, max)` and reports the
/// result; nothing outside the scanner changes, so a failed scan needs no
/// restoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct FigureScanner {
    pub unclosed_alt: UnclosedAlt,
}

impl FigureScanner {
    pub const MARKER: u8 = b'#';
    pub const LABEL_OPEN: u8 = b'[';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';

    pub fn new(unclosed_alt: UnclosedAlt) -> Self {
        Self { unclosed_alt }
    }

    pub fn scan<H: LinkHelpers + ?Sized>(
        &self,
        helpers: &H,
        src: &str,
        pos: usize,
        max: usize,
    ) -> FigureMatch {
        match self.scan_parts(helpers, src, pos, max) {
            Some((end, parts)) => FigureMatch::Matched { end, parts },
            None => FigureMatch::NotMatched,
        }
    }

    fn scan_parts<H: LinkHelpers + ?Sized>(
        &self,
        helpers: &H,
        src: &str,
        pos: usize,
        max: usize,
    ) -> Option<(usize, FigureParts)> {
        let mut cur = Cursor::new(src, pos, max);
        let max = cur.max;
        if cur.bump()? != Self::MARKER {
            return None;
        }

        // #7[caption](...)
        //  ^ optional identifier
        let digits_start = cur.pos();
        cur.skip_while(|b| b.is_ascii_digit());
        let identifier =
            (cur.pos() > digits_start).then(|| cur.slice(digits_start, cur.pos()).to_string());

        // #7[caption](...)
        //   ^^^^^^^^^ caption
        if cur.peek() != Some(Self::LABEL_OPEN) {
            return None;
        }
        let label_end = helpers.match_label(src, cur.pos(), max)?;
        let caption = Span::new(cur.pos() + 1, label_end);
        cur.jump(label_end + 1);

        // Only the inline `(...)` form exists.
        if cur.bump()? != Self::DEST_OPEN {
            return None;
        }
        cur.skip_whitespace();
        if cur.eof() {
            return None;
        }

        // (  /cat.png  [alt]  )
        //    ^^^^^^^^ destination; a leading `[` means it was left out
        let mut destination = String::new();
        if cur.peek() != Some(Self::LABEL_OPEN)
            && let Some(dest) = helpers.parse_destination(src, cur.pos(), max)
        {
            let url = helpers.normalize_link(&dest.raw);
            if helpers.validate_link(&url) {
                destination = url;
            } else {
                log::debug!("figure destination {:?} failed validation", dest.raw);
            }
            cur.jump(dest.end);
        }
        cur.skip_whitespace();

        // (  /cat.png  [alt]  )
        //              ^^^^^ alt
        let mut alt = None;
        if cur.peek() == Some(Self::LABEL_OPEN) {
            match helpers.match_label(src, cur.pos(), max) {
                Some(alt_end) => {
                    alt = Some(cur.slice(cur.pos() + 1, alt_end).to_string());
                    cur.jump(alt_end + 1);
                }
                None => match self.unclosed_alt {
                    UnclosedAlt::Reject => {
                        log::trace!("figure at {pos}: unclosed alt, rejecting");
                        return None;
                    }
                    UnclosedAlt::Ignore => {
                        log::trace!("figure at {pos}: unclosed alt, dropping it");
                        cur.skip_while(|b| b != Self::DEST_CLOSE);
                    }
                },
            }
            cur.skip_whitespace();
        }

        // (  /cat.png  [alt]  "title"  )
        //                     ^^^^^^^ accepted and discarded
        if cur.peek() != Some(Self::DEST_CLOSE)
            && let Some(title) = helpers.parse_title(src, cur.pos(), max)
        {
            cur.jump(title.end);
            cur.skip_whitespace();
        }

        if cur.bump()? != Self::DEST_CLOSE {
            return None;
        }

        Some((
            cur.pos(),
            FigureParts {
                identifier,
                caption,
                destination,
                alt,
            },
        ))
    }
}
