//! Index page templating.
//!
//! Index documents are rendered from a small `$name`-substitution template.
//! Three fields are provided by the synthesizer: `breadcrumb`, `indices`
//! and `repo`. A template referencing anything else fails the render; a
//! missing field means the override template is structurally broken, and
//! partial output would just hide that.
//!
//! Users can replace the built-in layout by placing `docdex.tmpl.md` at the
//! source root. The override is used verbatim, placeholders are only
//! checked when rendering.
//!
//! Placeholder syntax: `$name` or `${name}` where `name` is an identifier;
//! `$$` produces a literal dollar sign.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Template override file name, looked up in the source root.
pub const TEMPLATE_FILE_NAME: &str = "docdex.tmpl.md";

/// Built-in index page layout, used when no override file exists.
pub const DEFAULT_TEMPLATE: &str = "\
## $breadcrumb

$indices

***

### Page Information

- Source of this page is in this repository: $repo
- This index page is automatically generated with [docdex](https://github.com/sheeputech/docdex)
";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("the template field ${0} is not defined")]
    UndefinedField(String),
}

/// Read the override template from the source root, or fall back to the
/// built-in one.
pub fn load_template(source_root: &Path) -> io::Result<String> {
    let path = source_root.join(TEMPLATE_FILE_NAME);
    if path.is_file() {
        fs::read_to_string(&path)
    } else {
        Ok(DEFAULT_TEMPLATE.to_string())
    }
}

/// Substitute `fields` into `template`.
///
/// Every referenced field must be present; there is no partial rendering.
pub fn render(
    template: &str,
    fields: &BTreeMap<&str, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) if is_identifier(&braced[..end]) => {
                    out.push_str(lookup(fields, &braced[..end])?);
                    rest = &braced[end + 1..];
                }
                // Malformed braces render literally
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
        } else {
            let len = identifier_len(after);
            if len == 0 {
                // A lone dollar sign is ordinary text
                out.push('$');
                rest = after;
            } else {
                out.push_str(lookup(fields, &after[..len])?);
                rest = &after[len..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn lookup<'a>(
    fields: &'a BTreeMap<&str, String>,
    name: &str,
) -> Result<&'a str, TemplateError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| TemplateError::UndefinedField(name.to_string()))
}

fn identifier_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    for (i, c) in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return i;
        }
    }
    s.len()
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_len(s) == s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("breadcrumb", "root / a".to_string()),
            ("indices", "- [x](http://x)".to_string()),
            ("repo", "[o/n](https://github.com/o/n)".to_string()),
        ])
    }

    #[test]
    fn default_template_renders_all_fields() {
        let out = render(DEFAULT_TEMPLATE, &fields()).unwrap();
        assert!(out.contains("## root / a"));
        assert!(out.contains("- [x](http://x)"));
        assert!(out.contains("[o/n](https://github.com/o/n)"));
        assert!(!out.contains('$'));
    }

    #[test]
    fn braced_placeholder() {
        let out = render("a ${breadcrumb} b", &fields()).unwrap();
        assert_eq!(out, "a root / a b");
    }

    #[test]
    fn placeholder_followed_by_text() {
        let out = render("$breadcrumb!", &fields()).unwrap();
        assert_eq!(out, "root / a!");
    }

    #[test]
    fn double_dollar_escapes() {
        let out = render("price: $$5", &fields()).unwrap();
        assert_eq!(out, "price: $5");
    }

    #[test]
    fn lone_dollar_is_literal() {
        let out = render("cost in $ (USD)", &fields()).unwrap();
        assert_eq!(out, "cost in $ (USD)");
    }

    #[test]
    fn malformed_braces_are_literal() {
        let out = render("${not closed", &fields()).unwrap();
        assert_eq!(out, "${not closed");
    }

    #[test]
    fn undefined_field_is_fatal() {
        let err = render("$breadcrumb $nosuchfield", &fields()).unwrap_err();
        assert_eq!(err, TemplateError::UndefinedField("nosuchfield".to_string()));
    }

    #[test]
    fn undefined_braced_field_is_fatal() {
        let err = render("${missing}", &fields()).unwrap_err();
        assert_eq!(err, TemplateError::UndefinedField("missing".to_string()));
    }

    #[test]
    fn override_file_is_loaded_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(TEMPLATE_FILE_NAME),
            "# Custom\n$indices\n",
        )
        .unwrap();

        let template = load_template(tmp.path()).unwrap();
        assert_eq!(template, "# Custom\n$indices\n");
    }

    #[test]
    fn missing_override_falls_back_to_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(load_template(tmp.path()).unwrap(), DEFAULT_TEMPLATE);
    }
}
