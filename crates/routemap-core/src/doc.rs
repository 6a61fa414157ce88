//! Extracting documentation text from route handlers.

/// A cleaned documentation block attached to a handler or route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    raw: String,
}

impl Documentation {
    /// Build from a raw text block, stripping the standard indentation.
    pub fn new(text: &str) -> Self {
        Self {
            raw: cleandoc(text),
        }
    }

    /// Like [`Documentation::new`], but first runs a best-effort repair for
    /// text that was decoded with the wrong (single-byte) encoding.
    pub fn with_repair(text: &str) -> Self {
        Self::new(&repair_encoding(text))
    }

    /// The text up to (not including) the first line break.
    pub fn first(&self) -> &str {
        self.raw.split('\n').next().unwrap_or("")
    }

    /// The full text, line-folded: single line breaks become spaces,
    /// blank-line paragraph separators are preserved.
    pub fn full(&self) -> String {
        self.raw
            .replace("\n\n", "\u{0B}")
            .replace('\n', " ")
            .replace('\u{0B}', "\n\n")
    }
}

/// The most common case: just the first line, or `""` when undocumented.
pub fn doc(text: Option<&str>) -> String {
    Documentation::new(text.unwrap_or("")).first().to_string()
}

/// Strip a uniform indentation from a documentation block: the first line is
/// left-trimmed, every following line loses the minimum indentation found
/// among the non-blank lines, and leading/trailing blank lines are dropped.
fn cleandoc(text: &str) -> String {
    let expanded = text.replace('\t', "        ");
    let lines: Vec<&str> = expanded.split('\n').collect();

    let mut margin = usize::MAX;
    for line in lines.iter().skip(1) {
        let content = line.trim_start();
        if !content.is_empty() {
            margin = margin.min(line.len() - content.len());
        }
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        out.push(first.trim_start());
    }
    for line in lines.iter().skip(1) {
        if margin == usize::MAX {
            out.push(line);
        } else {
            out.push(line.get(margin..).unwrap_or(""));
        }
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    while out.first().is_some_and(|l| l.is_empty()) {
        out.remove(0);
    }
    out.join("\n")
}

/// Recover text that went through a bytes-as-Latin-1 round trip: when every
/// char maps back to a single byte and those bytes form valid UTF-8, return
/// the re-decoded text. Anything else is returned unchanged.
fn repair_encoding(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match byte_for(ch) {
            Some(b) => bytes.push(b),
            None => return text.to_string(),
        }
    }
    match String::from_utf8(bytes) {
        Ok(fixed) => fixed,
        Err(_) => text.to_string(),
    }
}

/// The byte a char came from under a sloppy Latin-1/Windows-1252 decode.
fn byte_for(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp <= 0xFF {
        return Some(cp as u8);
    }
    // chars the 0x80..0x9F byte range decodes to under Windows-1252
    Some(match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line() {
        let d = Documentation::new("Hello\n\nthere");
        assert_eq!(d.first(), "Hello");
    }

    #[test]
    fn doc_shorthand() {
        assert_eq!(doc(Some("Hello\n\nthere")), "Hello");
        assert_eq!(doc(None), "");
    }

    #[test]
    fn cleandoc_strips_indentation() {
        let text = "\n        Hello\n\n        there\n        ";
        assert_eq!(cleandoc(text), "Hello\n\nthere");
    }

    #[test]
    fn cleandoc_keeps_relative_indent() {
        let text = "Top\n    plain\n        nested\n    plain";
        assert_eq!(cleandoc(text), "Top\nplain\n    nested\nplain");
    }

    #[test]
    fn full_folds_lines() {
        let d = Documentation::new("This is an endpoint\nwith a wrapped line\n\nSecond paragraph");
        assert_eq!(
            d.full(),
            "This is an endpoint with a wrapped line\n\nSecond paragraph"
        );
    }

    #[test]
    fn empty_text() {
        let d = Documentation::new("");
        assert_eq!(d.first(), "");
        assert_eq!(d.full(), "");
    }

    #[test]
    fn repair_fixes_mojibake() {
        let d = Documentation::with_repair("donâ€™t panic");
        assert_eq!(d.first(), "don\u{2019}t panic");
    }

    #[test]
    fn repair_leaves_clean_text_alone() {
        let d = Documentation::with_repair("already fine\u{2019}");
        assert_eq!(d.first(), "already fine\u{2019}");
    }

    #[test]
    fn new_never_repairs() {
        let d = Documentation::new("donâ€™t panic");
        assert_eq!(d.first(), "donâ€™t panic");
    }
}
