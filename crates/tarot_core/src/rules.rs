use tarot_logging::tarot_trace;

/// One tokenized stylesheet unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRule {
    /// `selector { body }`, both trimmed.
    Rule { selector: String, body: String },
    /// `@prelude { rules }`, such as a media query or keyframes block.
    AtRule { prelude: String, rules: Vec<StyleRule> },
}

/// Remove `/* ... */` spans. An unterminated comment runs to the end.
pub fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        rest = match rest[open + 2..].find("*/") {
            Some(close) => &rest[open + 2 + close + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Tokenize a stylesheet into ordered rules and at-rule blocks.
///
/// Comments are stripped first. Statement at-rules (`@import ...;`), stray
/// declarations and an unterminated trailing block are dropped.
pub fn parse_rules(css: &str) -> Vec<StyleRule> {
    let clean = strip_comments(css);
    let mut scanner = Scanner::new(&clean);
    let (rules, _) = scanner.rules(false);
    rules
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Reads rules until end of input or, when `nested`, the closing brace of
    /// the enclosing block. The flag reports whether that brace was found.
    fn rules(&mut self, nested: bool) -> (Vec<StyleRule>, bool) {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return (rules, false),
                Some(b'}') => {
                    self.pos += 1;
                    if nested {
                        return (rules, true);
                    }
                    continue;
                }
                Some(_) => {}
            }

            let start = self.pos;
            let Some(delimiter) = self.scan_prelude() else {
                tarot_trace!("Dropping trailing stylesheet text without a block");
                return (rules, false);
            };
            let prelude = self.src[start..self.pos].trim();
            match delimiter {
                b'}' => continue,
                b';' => {
                    self.pos += 1;
                    continue;
                }
                _ => self.pos += 1,
            }

            if prelude.starts_with('@') {
                let (inner, closed) = self.rules(true);
                if !closed {
                    return (rules, false);
                }
                rules.push(StyleRule::AtRule {
                    prelude: prelude.to_string(),
                    rules: inner,
                });
            } else {
                let Some(body) = self.block_body() else {
                    return (rules, false);
                };
                rules.push(StyleRule::Rule {
                    selector: prelude.to_string(),
                    body: body.trim().to_string(),
                });
            }
        }
    }

    /// Advances to the next `{`, `;` or `}` outside quotes without consuming it.
    fn scan_prelude(&mut self) -> Option<u8> {
        while let Some(byte) = self.peek() {
            match byte {
                b'{' | b';' | b'}' => return Some(byte),
                b'"' | b'\'' => self.skip_string(byte),
                _ => self.pos += 1,
            }
        }
        None
    }

    /// Consumes a declaration block whose opening brace was already read and
    /// returns its contents. Nested braces are kept verbatim.
    fn block_body(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Some(&self.src[start..self.pos - 1]);
                    }
                }
                b'"' | b'\'' => self.skip_string(byte),
                _ => self.pos += 1,
            }
        }
        None
    }

    fn skip_string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\\' {
                self.pos += 1;
            } else if byte == quote {
                return;
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_rules, strip_comments, StyleRule};
    use pretty_assertions::assert_eq;

    fn rule(selector: &str, body: &str) -> StyleRule {
        StyleRule::Rule {
            selector: selector.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(strip_comments(".a{}/* .b{} */.c{}"), ".a{}.c{}");
        assert_eq!(strip_comments(".a{} /* open"), ".a{} ");
    }

    #[test]
    fn splits_plain_rules_and_media_blocks() {
        let rules = parse_rules(".foo{color:red} .bar{color:blue} @media(max-width:10px){.foo{display:none}}");
        assert_eq!(
            rules,
            vec![
                rule(".foo", "color:red"),
                rule(".bar", "color:blue"),
                StyleRule::AtRule {
                    prelude: "@media(max-width:10px)".to_string(),
                    rules: vec![rule(".foo", "display:none")],
                },
            ]
        );
    }

    #[test]
    fn statement_at_rules_are_dropped() {
        let rules = parse_rules("@charset \"utf-8\"; @import url(a.css); .a { b: c; }");
        assert_eq!(rules, vec![rule(".a", "b: c;")]);
    }

    #[test]
    fn quoted_braces_do_not_close_blocks() {
        let rules = parse_rules(r#".q::after { content: "}"; } .r { x: y }"#);
        assert_eq!(
            rules,
            vec![rule(".q::after", r#"content: "}";"#), rule(".r", "x: y")]
        );
    }

    #[test]
    fn declaration_only_at_rules_have_no_inner_rules() {
        let rules = parse_rules("@font-face { font-family: x; src: url(a.woff) } .a{b:c}");
        assert_eq!(
            rules,
            vec![
                StyleRule::AtRule {
                    prelude: "@font-face".to_string(),
                    rules: Vec::new(),
                },
                rule(".a", "b:c"),
            ]
        );
    }

    #[test]
    fn nested_at_rules_are_tokenized_recursively() {
        let rules = parse_rules("@supports (display:grid){@media print{.a{b:c}}}");
        assert_eq!(
            rules,
            vec![StyleRule::AtRule {
                prelude: "@supports (display:grid)".to_string(),
                rules: vec![StyleRule::AtRule {
                    prelude: "@media print".to_string(),
                    rules: vec![rule(".a", "b:c")],
                }],
            }]
        );
    }

    #[test]
    fn unterminated_trailing_block_is_dropped() {
        assert_eq!(parse_rules(".a{b:c} .d{e:f"), vec![rule(".a", "b:c")]);
        assert_eq!(parse_rules(".a{b:c} @media x{.d{e:f}"), vec![rule(".a", "b:c")]);
    }
}
