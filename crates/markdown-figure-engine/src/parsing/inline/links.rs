//! Link helpers shared by the link and figure rules.
//!
//! Each helper is a free function over `(src, pos, max)`; [`LinkHelpers`]
//! bundles them so recognizers receive them as one capability instead of
//! reaching into parser state.

use std::sync::OnceLock;

use regex::Regex;

use super::{parser::InlineParser, rules::backticks::scan_code_span};

/// Parens nest at most this deep inside a bare destination.
const MAX_DESTINATION_PARENS: usize = 32;
/// Longest entity reference looked at when unescaping, `&` to `;` inclusive.
const MAX_ENTITY_LEN: usize = 32;
/// Bytes left as-is by [`normalize_link`] besides ASCII alphanumerics.
const URL_SAFE: &[u8] = b";/?:@&=+$,-_.!~*'()#";

/// A parsed link destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Destination text with escapes and entities decoded, not yet normalized.
    pub raw: String,
    /// Byte index just past the destination.
    pub end: usize,
}

/// A parsed link title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub text: String,
    /// Byte index just past the closing delimiter.
    pub end: usize,
}

/// Link-reference collaborators used by recognizers.
pub trait LinkHelpers {
    /// Given the index of a `[`, returns the index of its matching `]`.
    fn match_label(&self, src: &str, open: usize, max: usize) -> Option<usize>;

    fn parse_destination(&self, src: &str, pos: usize, max: usize) -> Option<Destination>;

    fn parse_title(&self, src: &str, pos: usize, max: usize) -> Option<Title>;

    fn normalize_link(&self, raw: &str) -> String;

    fn validate_link(&self, url: &str) -> bool;
}

impl LinkHelpers for InlineParser {
    fn match_label(&self, src: &str, open: usize, max: usize) -> Option<usize> {
        match_label(src, open, max)
    }

    fn parse_destination(&self, src: &str, pos: usize, max: usize) -> Option<Destination> {
        parse_link_destination(src, pos, max)
    }

    fn parse_title(&self, src: &str, pos: usize, max: usize) -> Option<Title> {
        parse_link_title(src, pos, max)
    }

    fn normalize_link(&self, raw: &str) -> String {
        normalize_link(raw)
    }

    fn validate_link(&self, url: &str) -> bool {
        validate_link(url)
    }
}

/// Finds the `]` closing the link label that opens at `open`.
///
/// Unlike [`match_label`], every position is first offered to the parser's
/// rules in silent mode and a match is stepped over whole, so a `]` inside a
/// figure, code span or escape does not end the label. Nested links are not
/// tried.
pub fn match_link_label(
    parser: &InlineParser,
    src: &str,
    open: usize,
    max: usize,
    depth: usize,
) -> Option<usize> {
    let bytes = src.as_bytes();
    let max = max.min(bytes.len());
    if open >= max || bytes[open] != b'[' {
        return None;
    }

    let mut level = 1usize;
    let mut i = open + 1;
    while i < max {
        match bytes[i] {
            b'[' => {
                level += 1;
                i += 1;
            }
            b']' => {
                level -= 1;
                if level == 0 {
                    return Some(i);
                }
                i += 1;
            }
            _ => {
                i = parser
                    .skip_token(src, i, max, depth, true)
                    .unwrap_or_else(|| next_char(src, i));
            }
        }
    }
    None
}

fn next_char(src: &str, i: usize) -> usize {
    src[i..].chars().next().map_or(i + 1, |c| i + c.len_utf8())
}

/// Finds the `]` matching the `[` at `open`.
///
/// Nested brackets are counted, `\` escapes the next byte and code spans are
/// skipped whole, so `` [a `]` b] `` is one label.
pub fn match_label(src: &str, open: usize, max: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let max = max.min(bytes.len());
    if open >= max || bytes[open] != b'[' {
        return None;
    }

    let mut level = 1usize;
    let mut i = open + 1;
    while i < max {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => {
                i = match scan_code_span(bytes, i, max) {
                    Some(span) => span.end,
                    None => i + run_length(bytes, i, max),
                }
            }
            b'[' => {
                level += 1;
                i += 1;
            }
            b']' => {
                level -= 1;
                if level == 0 {
                    return Some(i);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Parses a link destination at `pos`: either `<...>` or a bare run of
/// non-space bytes with balanced parentheses.
pub fn parse_link_destination(src: &str, pos: usize, max: usize) -> Option<Destination> {
    let bytes = src.as_bytes();
    let max = max.min(bytes.len());
    if pos >= max {
        return None;
    }

    let mut i = pos;
    if bytes[i] == b'<' {
        i += 1;
        while i < max {
            match bytes[i] {
                b'\n' | b'<' => return None,
                b'>' => {
                    return Some(Destination {
                        raw: unescape_all(&src[pos + 1..i]),
                        end: i + 1,
                    });
                }
                b'\\' if i + 1 < max => i += 2,
                _ => i += 1,
            }
        }
        return None;
    }

    let mut level = 0usize;
    while i < max {
        let b = bytes[i];
        if b == b' ' || b < 0x20 || b == 0x7f {
            break;
        }
        if b == b'\\' && i + 1 < max {
            if bytes[i + 1] == b' ' {
                break;
            }
            i += 2;
            continue;
        }
        if b == b'(' {
            level += 1;
            if level > MAX_DESTINATION_PARENS {
                return None;
            }
        }
        if b == b')' {
            if level == 0 {
                break;
            }
            level -= 1;
        }
        i += 1;
    }

    if i == pos || level != 0 {
        return None;
    }
    Some(Destination {
        raw: unescape_all(&src[pos..i]),
        end: i,
    })
}

/// Parses `"title"`, `'title'` or `(title)` at `pos`.
pub fn parse_link_title(src: &str, pos: usize, max: usize) -> Option<Title> {
    let bytes = src.as_bytes();
    let max = max.min(bytes.len());
    if pos >= max {
        return None;
    }

    let opener = bytes[pos];
    let closer = match opener {
        b'"' | b'\'' => opener,
        b'(' => b')',
        _ => return None,
    };

    let mut i = pos + 1;
    while i < max {
        let b = bytes[i];
        if b == closer {
            return Some(Title {
                text: unescape_all(&src[pos + 1..i]),
                end: i + 1,
            });
        }
        if b == b'(' && opener == b'(' {
            return None;
        }
        if b == b'\\' && i + 1 < max {
            i += 2;
        } else {
            i += 1;
        }
    }
    None
}

/// Percent-encodes everything outside the URL-safe set, keeping existing
/// `%XX` escapes intact.
///
/// `urlencoding::encode` also escapes `/`, `?` and friends, so it is only
/// applied to the runs of characters that need encoding.
pub fn normalize_link(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut run_start = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let keep = if b == b'%' {
            bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
        } else {
            b.is_ascii_alphanumeric() || URL_SAFE.contains(&b)
        };
        if keep {
            if let Some(start) = run_start.take() {
                out.push_str(&urlencoding::encode(&raw[start..i]));
            }
            out.push(b as char);
        } else {
            run_start.get_or_insert(i);
        }
        i += 1;
    }
    if let Some(start) = run_start {
        out.push_str(&urlencoding::encode(&raw[start..]));
    }
    out
}

/// Rejects script-capable protocols. `data:` is only allowed for common
/// raster image types.
pub fn validate_link(url: &str) -> bool {
    static BAD_PROTOCOL: OnceLock<Regex> = OnceLock::new();
    static GOOD_DATA: OnceLock<Regex> = OnceLock::new();
    let bad = BAD_PROTOCOL.get_or_init(|| {
        Regex::new(r"^(vbscript|javascript|file|data):").expect("Invalid protocol regex")
    });
    let good = GOOD_DATA.get_or_init(|| {
        Regex::new(r"^data:image/(gif|png|jpeg|webp);").expect("Invalid data URL regex")
    });

    let url = url.trim().to_ascii_lowercase();
    if bad.is_match(&url) {
        good.is_match(&url)
    } else {
        true
    }
}

/// Resolves backslash escapes of ASCII punctuation and HTML entity references.
pub fn unescape_all(s: &str) -> String {
    if !s.contains(['\\', '&']) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(idx) = rest.find(['\\', '&']) {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(escaped) = tail.strip_prefix('\\') {
            match escaped.chars().next() {
                Some(c) if c.is_ascii_punctuation() => {
                    out.push(c);
                    rest = &escaped[1..];
                }
                _ => {
                    out.push('\\');
                    rest = escaped;
                }
            }
            continue;
        }

        match entity_len(tail) {
            Some(len) => {
                let entity = &tail[..len];
                out.push_str(&html_escape::decode_html_entities(entity));
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of a well-formed `&name;` / `&#123;` reference at the start of `s`.
fn entity_len(s: &str) -> Option<usize> {
    let semi = s
        .bytes()
        .take(MAX_ENTITY_LEN)
        .position(|b| b == b';')?;
    let body = &s.as_bytes()[1..semi];
    if body.is_empty() || !body.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'#') {
        return None;
    }
    if html_escape::decode_html_entities(&s[..=semi]) == s[..=semi] {
        return None;
    }
    Some(semi + 1)
}

fn run_length(bytes: &[u8], start: usize, max: usize) -> usize {
    let marker = bytes[start];
    bytes[start..max].iter().take_while(|&&b| b == marker).count()
}
