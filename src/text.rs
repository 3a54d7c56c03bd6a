//! Small text helpers shared by the providers and the PDF exporter.

/// Keep at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Replace every character outside Latin-1 with `?`.
pub fn to_latin1_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

/// Greedy word wrap at `width` characters. Blank lines are kept.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            // Words longer than a line are hard-split.
            let mut rest = word;
            while rest.chars().count() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let head = truncate_chars(rest, width);
                rest = &rest[head.len()..];
                lines.push(head);
            }

            if !rest.is_empty() {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(rest);
                current_len += rest.chars().count();
            }
        }

        lines.push(current);
    }

    lines
}
