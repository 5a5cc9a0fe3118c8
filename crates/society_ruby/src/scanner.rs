//! Line-oriented Ruby class scanner.
//!
//! This is not a parser. It tracks `class`/`module` nesting by counting block
//! openers against `end` lines, which is enough for conventionally formatted
//! code, and records what each class body declares and references.

use society_common::{AssociationDecl, ClassFact};

/// Association macros recognized in class bodies.
pub const ASSOCIATION_MACROS: &[&str] = &[
    "has_many",
    "has_one",
    "belongs_to",
    "has_and_belongs_to_many",
];

/// Keywords that open a block closed by `end` when they start a line.
const BLOCK_KEYWORDS: &[&str] = &[
    "def", "if", "unless", "while", "until", "case", "begin", "for",
];

enum Frame {
    /// A `module` or `class` scope. `class_index` is set for classes.
    Scope {
        name: String,
        class_index: Option<usize>,
    },
    /// Any other construct closed by `end`.
    Block,
}

/// Scans `source` and returns one fact per class declaration.
///
/// `label` is used as the file part of each fact's location.
pub fn scan_source(label: &str, source: &str) -> Vec<ClassFact> {
    let mut facts: Vec<ClassFact> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut in_doc_comment = false;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        if in_doc_comment {
            if raw.starts_with("=end") {
                in_doc_comment = false;
            }
            continue;
        }
        if raw.starts_with("=begin") {
            in_doc_comment = true;
            continue;
        }

        let code = strip_comment(raw);
        let line = code.trim();
        if line.is_empty() {
            continue;
        }

        let opened = if let Some(rest) = keyword_rest(line, "class") {
            let (name, superclass) = parse_class_header(rest);
            if rest.starts_with("<<") || name.is_empty() {
                stack.push(Frame::Block);
            } else {
                let qualified = qualify(&stack, &name);
                let mut fact = ClassFact::new(qualified.clone(), format!("{label}:{line_no}"));
                fact.superclass = superclass;
                facts.push(fact);
                stack.push(Frame::Scope {
                    name: qualified,
                    class_index: Some(facts.len() - 1),
                });
            }
            true
        } else if let Some(rest) = keyword_rest(line, "module") {
            let name = constant_prefix(rest).to_string();
            stack.push(Frame::Scope {
                name: qualify(&stack, &name),
                class_index: None,
            });
            true
        } else if opens_block(line) {
            stack.push(Frame::Block);
            true
        } else {
            false
        };

        if !opened {
            if let Some(i) = current_class(&stack) {
                record_body_line(&mut facts[i], line);
            }
        }

        if closes_block(line) {
            stack.pop();
        }
    }

    facts
}

/// Returns the text after `keyword` if the line starts with it as a word.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ';' || c == '(') {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn parse_class_header(rest: &str) -> (String, Option<String>) {
    let name = constant_prefix(rest).to_string();
    let after = rest[name.len()..].trim_start();
    let superclass = after
        .strip_prefix('<')
        .map(|s| constant_prefix(s.trim_start()).to_string())
        .filter(|s| !s.is_empty());
    (name, superclass)
}

/// The leading `Foo::Bar` style constant path of `s`.
fn constant_prefix(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_' || c == ':'))
        .map_or(s.len(), |(i, _)| i);
    s[..end].trim_end_matches(':')
}

fn qualify(stack: &[Frame], name: &str) -> String {
    let name = name.trim_start_matches("::");
    let parent = stack.iter().rev().find_map(|frame| match frame {
        Frame::Scope { name, .. } => Some(name.as_str()),
        Frame::Block => None,
    });
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}::{name}"),
        _ => name.to_string(),
    }
}

fn current_class(stack: &[Frame]) -> Option<usize> {
    stack.iter().rev().find_map(|frame| match frame {
        Frame::Scope { class_index, .. } => *class_index,
        Frame::Block => None,
    })
}

fn opens_block(line: &str) -> bool {
    if BLOCK_KEYWORDS.iter().any(|kw| keyword_rest(line, kw).is_some()) {
        return true;
    }
    if ["= if ", "= unless ", "= case ", "= begin"]
        .iter()
        .any(|pat| line.contains(pat))
    {
        return true;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let trailing_do = words.last() == Some(&"do");
    let do_with_params = line.contains('|') && words.iter().any(|w| *w == "do" || w.starts_with("do|"));
    trailing_do || do_with_params
}

fn closes_block(line: &str) -> bool {
    let last = line.rsplit(';').next().unwrap_or(line).trim();
    let closes_last = last == "end" || last.starts_with("end.") || last.starts_with("end)");
    closes_last || keyword_rest(line, "end").is_some()
}

fn record_body_line(fact: &mut ClassFact, line: &str) {
    if let Some(assoc) = parse_association(line) {
        fact.associations.push(assoc);
        return;
    }
    for constant in constants_in(line) {
        if constant != fact.name && !fact.references.iter().any(|r| *r == constant) {
            fact.references.push(constant);
        }
    }
}

fn parse_association(line: &str) -> Option<AssociationDecl> {
    let (kind, rest) = ASSOCIATION_MACROS.iter().find_map(|m| {
        let rest = line.strip_prefix(m)?;
        let rest = rest.strip_prefix('(').unwrap_or(rest);
        rest.starts_with(|c: char| c.is_whitespace() || c == ':')
            .then(|| (m.to_string(), rest.trim_start()))
    })?;
    let symbol = rest.strip_prefix(':')?;
    let name_end = symbol
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(symbol.len());
    let name = symbol[..name_end].to_string();
    if name.is_empty() {
        return None;
    }
    Some(AssociationDecl {
        kind,
        name,
        class_name: class_name_option(&symbol[name_end..]),
    })
}

fn class_name_option(options: &str) -> Option<String> {
    let at = options
        .find("class_name:")
        .map(|i| i + "class_name:".len())
        .or_else(|| {
            let i = options.find(":class_name")?;
            let arrow = options[i..].find("=>")?;
            Some(i + arrow + 2)
        })?;
    let value = options[at..].trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = &value[1..];
    let end = inner.find(quote)?;
    Some(inner[..end].trim_start_matches("::").to_string())
}

/// Constant paths appearing in code (outside string literals and symbols).
fn constants_in(line: &str) -> Vec<String> {
    let mut found = Vec::new();
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => {
                quote = Some(b);
                i += 1;
            }
            b'A'..=b'Z' if i == 0 || !is_ident_byte(bytes[i - 1]) && bytes[i - 1] != b':' => {
                let constant = constant_prefix(&line[i..]);
                if !constant.is_empty() && constant.chars().any(|c| c.is_ascii_lowercase()) {
                    found.push(constant.to_string());
                }
                i += constant.len().max(1);
            }
            b'A'..=b'Z' if i >= 2 && &bytes[i - 2..i] == b"::" && (i == 2 || !is_ident_byte(bytes[i - 3])) => {
                let constant = constant_prefix(&line[i..]);
                found.push(constant.to_string());
                i += constant.len().max(1);
            }
            _ => i += 1,
        }
    }
    found
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Drops a trailing `#` comment, ignoring `#` inside string literals.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => return &line[..i],
            (None, _) => {}
        }
    }
    line
}
