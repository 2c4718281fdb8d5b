//! JSON with comments
//!
//! tsconfig files are commonly written with `//` and `/* */` comments and
//! trailing commas. These are removed before the text reaches `serde_json`.

/// Remove comments and trailing commas outside of string literals
pub fn strip_comments(input: &str) -> String {
    let without_comments = remove_comments(input);
    remove_trailing_commas(&without_comments)
}

fn remove_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Line comment: keep the newline so line numbers survive.
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.get(i + 1) {
                    out.push(*escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_and_block_comments() {
        let input = r#"{
    // the target
    "target": "es5", /* inline */
    "strict": true
}"#;
        let value: serde_json::Value = serde_json::from_str(&strip_comments(input)).unwrap();
        assert_eq!(value["target"], "es5");
        assert_eq!(value["strict"], true);
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let input = r#"{"url": "http://example.com/*x*/", "quote": "a \"//\" b"}"#;
        let value: serde_json::Value = serde_json::from_str(&strip_comments(input)).unwrap();
        assert_eq!(value["url"], "http://example.com/*x*/");
        assert_eq!(value["quote"], "a \"//\" b");
    }

    #[test]
    fn test_trailing_commas_removed() {
        let input = "{\"lib\": [\"dom\", \"es6\",],\n \"a\": 1,\n}";
        let value: serde_json::Value = serde_json::from_str(&strip_comments(input)).unwrap();
        assert_eq!(value["lib"][1], "es6");
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_comma_in_string_kept() {
        let input = r#"{"a": "x,}"}"#;
        assert_eq!(strip_comments(input), input);
    }
}
