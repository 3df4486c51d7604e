//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", cut, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_all_keys() {
    let out = fill_template("Q: {question} / A: {answer}", &[("question", "α"), ("answer", "β")]);
    assert_eq!(out, "Q: α / A: β");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let out = trunc_for_log("αβγδε", 3);
    assert!(out.starts_with("αβγ"));
  }
}
