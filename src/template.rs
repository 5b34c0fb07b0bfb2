//! Template Rendering
//!
//! Client-side preview of `{{n}}` placeholder templates. Substitution is pure
//! string replacement; the backend performs the authoritative rendering when a
//! campaign actually sends.

/// Substitute positional placeholders: `{{1}}` takes `values[0]`, `{{2}}`
/// takes `values[1]`, and so on. Placeholders without a matching value are
/// left literal in the output.
pub fn render_template(content: &str, values: &[String]) -> String {
    let mut rendered = content.to_string();
    for (i, value) in values.iter().enumerate() {
        let placeholder = format!("{{{{{}}}}}", i + 1);
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

/// Highest `{{n}}` index referenced by the template body, 0 when none.
pub fn placeholder_count(content: &str) -> usize {
    let mut max = 0;
    let mut rest = content;
    while let Some(start) = rest.find("{{") {
        rest = &rest[start + 2..];
        if let Some(end) = rest.find("}}") {
            if let Ok(n) = rest[..end].trim().parse::<usize>() {
                max = max.max(n);
            }
            rest = &rest[end + 2..];
        } else {
            break;
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_placeholders() {
        let out = render_template(
            "Hi {{1}}! Don't miss our offer - {{2}} off!",
            &["Arjun".to_string(), "25%".to_string()],
        );
        assert_eq!(out, "Hi Arjun! Don't miss our offer - 25% off!");
    }

    #[test]
    fn unmatched_placeholders_stay_literal() {
        let out = render_template("Dear {{1}}, order #{{2}} confirmed", &["Priya".to_string()]);
        assert_eq!(out, "Dear Priya, order #{{2}} confirmed");
    }

    #[test]
    fn rendering_is_idempotent() {
        let values = vec!["Arjun".to_string(), "25%".to_string()];
        let once = render_template("Hello {{1}}, {{2}} off today", &values);
        let twice = render_template(&once, &values);
        assert_eq!(once, twice);
    }

    #[test]
    fn replaces_repeated_placeholders() {
        let out = render_template("{{1}} and {{1}} again", &["x".to_string()]);
        assert_eq!(out, "x and x again");
    }

    #[test]
    fn counts_highest_placeholder_index() {
        assert_eq!(placeholder_count("no placeholders"), 0);
        assert_eq!(placeholder_count("Hi {{1}}"), 1);
        assert_eq!(placeholder_count("{{2}} before {{1}}"), 2);
        assert_eq!(placeholder_count("broken {{x}} ignored {{3}}"), 3);
    }
}
