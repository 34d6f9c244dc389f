use super::font::text_width;

/// Splits `text` into lines no wider than `max_width` points in Helvetica at
/// `font_size`. Newlines start new paragraphs; words wider than a whole line
/// are broken by character.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut has_words = false;

        for word in paragraph.split_whitespace() {
            has_words = true;
            for piece in split_word(word, font_size, max_width) {
                if current.is_empty() {
                    current = piece;
                    continue;
                }
                let candidate = format!("{current} {piece}");
                if text_width(&candidate, font_size) <= max_width {
                    current = candidate;
                } else {
                    lines.push(std::mem::replace(&mut current, piece));
                }
            }
        }

        if has_words {
            lines.push(current);
        } else {
            lines.push(String::new());
        }
    }

    lines
}

fn split_word(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    if text_width(word, font_size) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if current.chars().count() > 1 && text_width(&current, font_size) > max_width {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
