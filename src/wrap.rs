// Greedy word wrapping against a measured width

/// Wrap `text` into lines no wider than `max_width`.
///
/// All runs of whitespace (including newlines) collapse to single spaces.
/// Words are appended to the current line while the measured width stays
/// within bounds; a word wider than `max_width` sits alone on its own line.
pub fn wrap_text<F>(text: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    fn check_properties(text: &str, max_width: f32) {
        let lines = wrap_text(text, chars, max_width);
        for line in &lines {
            let fits = chars(line) <= max_width;
            let single_word = !line.contains(' ');
            assert!(fits || single_word, "line {:?} overflows {}", line, max_width);
        }
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(lines.join(" "), collapsed);
    }

    #[test]
    fn test_exact_fit_stays_on_one_line() {
        assert_eq!(wrap_text("a b c", chars, 3.0), vec!["a b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(wrap_text("", chars, 10.0).is_empty());
        assert!(wrap_text("  \n\t ", chars, 10.0).is_empty());
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(
            wrap_text("one\n\ntwo   three", chars, 40.0),
            vec!["one two three"]
        );
    }

    #[test]
    fn test_long_word_sits_alone() {
        assert_eq!(
            wrap_text("to Gewurztraminer we go", chars, 6.0),
            vec!["to", "Gewurztraminer", "we go"]
        );
    }

    #[test]
    fn test_wrapping_properties() {
        let text = "I really enjoyed our chat about your celebration at the vineyard, \
                    and the idea of a long table dinner under the oaks.";
        for width in [1.0, 5.0, 12.0, 30.0, 80.0, 500.0] {
            check_properties(text, width);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Crisp, bright, and lively with notes of green apple";
        assert_eq!(wrap_text(text, chars, 17.0), wrap_text(text, chars, 17.0));
    }
}
