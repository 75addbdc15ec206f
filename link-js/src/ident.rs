//! Identifier helpers used when naming bindings and printing property keys.

use std::fmt::Write;

/// Words that may not appear as bare property keys in ES3 engines, and that
/// may never be used as binding names.
pub const RESERVED_WORDS: &[&str] = &[
  "break",
  "case",
  "class",
  "catch",
  "const",
  "continue",
  "debugger",
  "default",
  "delete",
  "do",
  "else",
  "export",
  "extends",
  "finally",
  "for",
  "function",
  "if",
  "import",
  "in",
  "instanceof",
  "let",
  "new",
  "return",
  "super",
  "switch",
  "this",
  "throw",
  "try",
  "typeof",
  "var",
  "void",
  "while",
  "with",
  "yield",
  "enum",
  "await",
  "implements",
  "package",
  "protected",
  "static",
  "interface",
  "private",
  "public",
];

// Globals a generated name must not shadow.
const BUILTINS: &[&str] = &[
  "Infinity",
  "NaN",
  "undefined",
  "null",
  "true",
  "false",
  "eval",
  "uneval",
  "isFinite",
  "isNaN",
  "parseFloat",
  "parseInt",
  "decodeURI",
  "decodeURIComponent",
  "encodeURI",
  "encodeURIComponent",
  "escape",
  "unescape",
  "Object",
  "Function",
  "Boolean",
  "Symbol",
  "Error",
  "EvalError",
  "InternalError",
  "RangeError",
  "ReferenceError",
  "SyntaxError",
  "TypeError",
  "URIError",
  "Number",
  "Math",
  "Date",
  "String",
  "RegExp",
  "Array",
  "Int8Array",
  "Uint8Array",
  "Uint8ClampedArray",
  "Int16Array",
  "Uint16Array",
  "Int32Array",
  "Uint32Array",
  "Float32Array",
  "Float64Array",
  "Map",
  "Set",
  "WeakMap",
  "WeakSet",
  "SIMD",
  "ArrayBuffer",
  "DataView",
  "JSON",
  "Promise",
  "Generator",
  "GeneratorFunction",
  "Reflect",
  "Proxy",
  "Intl",
];

pub fn is_reserved_word(name: &str) -> bool {
  RESERVED_WORDS.contains(&name)
}

fn is_builtin(name: &str) -> bool {
  BUILTINS.contains(&name)
}

// ID_Start / ID_Continue as ECMAScript defines them: the Unicode XID
// properties plus `$`, `_`, ZWNJ and ZWJ.
fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_id_continue(c: char) -> bool {
  c == '$' || c == '\u{200c}' || c == '\u{200d}' || unicode_ident::is_xid_continue(c)
}

/// Returns true when `name` can be printed as an unquoted `IdentifierName`
/// (which includes reserved words; ES5 allows them as property keys).
pub fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if is_id_start(c) => chars.all(is_id_continue),
    _ => false,
  }
}

/// Turns arbitrary text into a usable binding name: `-x` becomes `X`, other
/// illegal characters become `_`, and names that start with a digit or clash
/// with a reserved word or builtin get a `_` prefix.
pub fn make_legal(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(c) = chars.next() {
    if c == '-' {
      if let Some(&next) = chars.peek() {
        if next.is_ascii_alphanumeric() || next == '_' {
          chars.next();
          out.push(next.to_ascii_uppercase());
          continue;
        }
      }
    }
    if c.is_ascii_alphanumeric() || c == '$' || c == '_' {
      out.push(c);
    } else {
      out.push('_');
    }
  }
  let needs_prefix = match out.chars().next() {
    None => true,
    Some(first) => first.is_ascii_digit() || is_reserved_word(&out) || is_builtin(&out),
  };
  if needs_prefix {
    out.insert(0, '_');
  }
  out
}

fn last_segment(id: &str) -> &str {
  id.rsplit(['/', '\\']).next().unwrap_or(id)
}

/// Default display name of an in-graph module's namespace: the file name
/// without its extension.
pub fn module_basename(id: &str) -> String {
  let base = last_segment(id);
  let stem = match base.rfind('.') {
    Some(dot) if dot > 0 => &base[..dot],
    _ => base,
  };
  make_legal(stem)
}

/// Default display name of an external module: the last segment of its
/// specifier, extension included.
pub fn external_basename(id: &str) -> String {
  make_legal(last_segment(id))
}

/// Prints `value` as a single-quoted JS string literal. Non-ASCII text is kept
/// as is, except U+2028/U+2029, which are always escaped.
pub fn quote_string(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('\'');
  let mut chars = value.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        // `\0` followed by a digit would read as a legacy octal escape.
        if chars.peek().is_some_and(|next| next.is_ascii_digit()) {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      c if c < '\u{20}' => {
        let _ = write!(out, "\\x{:02X}", c as u32);
      }
      c => out.push(c),
    }
  }
  out.push('\'');
  out
}
