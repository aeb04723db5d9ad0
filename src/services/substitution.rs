use std::collections::HashMap;

/// Replace every `{key}` token in `template` with the matching value from
/// `vars`, in a single left-to-right pass.
///
/// Tokens whose key is absent from `vars` are emitted verbatim so callers
/// can layer substitutions (template variables first, per-recipient values
/// later). An unmatched `{` is treated as literal text.
pub fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        match tail.find(|c| c == '{' || c == '}') {
            Some(pos) if tail[pos..].starts_with('}') => {
                let key = &tail[..pos];
                match vars.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &tail[pos + 1..];
            }
            _ => {
                // No closing brace before the next opening one; the brace
                // is literal text.
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
