use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    rope.slice_to_cow(sp.start..sp.end).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_to_string_full_span() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(0, 11)), "hello world");
    }

    #[test]
    fn slice_to_string_partial_span() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 11)), "world");
    }

    #[test]
    fn slice_to_string_empty_span() {
        let rope = Rope::from("hello");
        assert_eq!(slice_to_string(&rope, Span::new(3, 3)), "");
    }
}
