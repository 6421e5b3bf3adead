/// Horizontal advance provider used by the line breaker.
pub trait TextMeasure {
    /// Advance width of `text` in device pixels, trailing whitespace included.
    fn measure(&mut self, text: &str) -> f32;
}

impl<F: FnMut(&str) -> f32> TextMeasure for F {
    fn measure(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Greedily break one paragraph (no embedded `\n`) into visual lines.
///
/// Words are whitespace-delimited and re-joined with a single space. A word is appended while
/// the joined line still fits in `max_width`; a word that is wider than `max_width` on its own
/// is emitted alone on its line rather than split.
pub fn wrap_paragraph<M: TextMeasure + ?Sized>(
    paragraph: &str,
    max_width: f32,
    measure: &mut M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
