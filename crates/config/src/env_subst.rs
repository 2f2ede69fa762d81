/// Replace `${ENV_VAR}` placeholders with values from the process environment.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup.
pub(crate) fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated placeholder, keep the remainder literally.
            result.push_str(&rest[start..]);
            return result;
        };
        let name = &after[..end];
        let value = if name.is_empty() { None } else { lookup(name) };
        match value {
            Some(value) => result.push_str(&value),
            None => result.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "LINE_CHANNEL_SECRET" => Some("s3cret".into()),
            "PORT" => Some("9000".into()),
            _ => None,
        }
    }

    #[test]
    fn replaces_every_known_placeholder() {
        let out = substitute_env_with(
            "secret = \"${LINE_CHANNEL_SECRET}\"\nport = ${PORT}",
            lookup,
        );
        assert_eq!(out, "secret = \"s3cret\"\nport = 9000");
    }

    #[test]
    fn keeps_unknown_and_empty_placeholders() {
        assert_eq!(substitute_env_with("${NOPE} ${}", lookup), "${NOPE} ${}");
    }

    #[test]
    fn keeps_unterminated_placeholder() {
        assert_eq!(substitute_env_with("a ${PORT", lookup), "a ${PORT");
    }

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(substitute_env("channel = \"line\""), "channel = \"line\"");
    }
}
