//! Column layout helpers. All widths are in characters, not bytes.

/// Characters per line on 58mm paper.
pub const PAPER_WIDTH: usize = 32;

/// `12500` → `"12.500"`.
pub fn money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text.trim(), width);
    let pad = (width - width_of(&text)) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

pub fn right(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    format!("{}{}", " ".repeat(width - width_of(&text)), text)
}

/// `left` and `right` on one line, `left` truncated when they collide.
pub fn columns(left: &str, right: &str, width: usize) -> String {
    let right = truncate(right, width);
    let room = width - width_of(&right);
    let left = truncate(left, room.saturating_sub(1));
    let gap = width - width_of(&left) - width_of(&right);
    format!("{left}{}{right}", " ".repeat(gap))
}

pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Word-wrap `text`; words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() { word.len() } else { width_of(&current) + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Minimal printable document sized for 58mm paper.
pub fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n@page {{ size: 58mm auto; margin: 0; }}\nbody {{ margin: 0; }}\npre {{ font-family: monospace; font-size: 9pt; margin: 0; }}\n</style>\n</head>\n<body>\n<pre>{}</pre>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_dot_thousands() {
        assert_eq!(money(0), "0");
        assert_eq!(money(950), "950");
        assert_eq!(money(12_500), "12.500");
        assert_eq!(money(1_250_000), "1.250.000");
        assert_eq!(money(-4_000), "-4.000");
    }

    #[test]
    fn columns_fill_the_line_exactly() {
        let line = columns("Total", "12.500", PAPER_WIDTH);
        assert_eq!(line.chars().count(), PAPER_WIDTH);
        assert!(line.starts_with("Total"));
        assert!(line.ends_with("12.500"));

        let long = columns(&"x".repeat(40), "1.000", PAPER_WIDTH);
        assert_eq!(long.chars().count(), PAPER_WIDTH);
        assert!(long.ends_with(" 1.000"));
    }

    #[test]
    fn center_and_right_pad_with_spaces() {
        assert_eq!(center("abc", 7), "  abc");
        assert_eq!(right("abc", 5), "  abc");
    }

    #[test]
    fn wrap_breaks_on_words_and_splits_long_ones() {
        assert_eq!(wrap("kopi susu gula aren", 10), vec!["kopi susu", "gula aren"]);
        assert_eq!(wrap("abcdefghijkl", 5), vec!["abcde", "fghij", "kl"]);
        assert!(wrap("   ", 5).is_empty());
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        let doc = html_document("Struk", "Teh <manis>");
        assert!(doc.contains("@page { size: 58mm auto"));
        assert!(doc.contains("<pre>Teh &lt;manis&gt;</pre>"));
    }
}
