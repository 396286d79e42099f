//! Component props parsing.
//!
//! A raw props string is turned into a structured map by trying, in order:
//!
//! 1. blank input, which yields an empty map
//! 2. a strict JSON object (`{"theme":"dark"}`)
//! 3. `key=value` pairs (`type=info title="Heads up"`)
//! 4. a single scalar stored under `value` (`42`)
//!
//! Values from steps 3 and 4 are coerced: `true`, `false`, `null` and plain
//! decimal numbers become JSON scalars, everything else stays a string.
//!
//! ```
//! use mdtree::{ComponentSyntax, PropsContext, PropsParser};
//!
//! let ctx = PropsContext { name: "Alert", syntax: ComponentSyntax::Container };
//! let props = PropsParser::default().parse("type=info level=2", &ctx);
//! assert_eq!(props["type"], "info");
//! assert_eq!(props["level"], 2);
//! ```
use std::{
  fmt,
  sync::{Arc, LazyLock},
};

use log::trace;
use regex::Regex;
use serde_json::{Number, Value};

use crate::{
  error::{PropsError, PropsResult},
  types::{ComponentSyntax, Props},
  utils,
};

/// What a props parser knows about the component it parses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropsContext<'a> {
  pub name:   &'a str,
  pub syntax: ComponentSyntax,
}

type ParseFn = dyn Fn(&str, &PropsContext<'_>) -> Props + Send + Sync;

/// A props parsing strategy; the heuristic one by default, or a caller
/// supplied function that fully replaces it.
#[derive(Clone, Default)]
pub struct PropsParser {
  custom: Option<Arc<ParseFn>>,
}

impl PropsParser {
  /// Wrap a custom parsing function.
  pub fn new<F>(parse: F) -> Self
  where
    F: Fn(&str, &PropsContext<'_>) -> Props + Send + Sync + 'static,
  {
    Self {
      custom: Some(Arc::new(parse)),
    }
  }

  /// Whether this is the built-in heuristic parser.
  #[must_use]
  pub const fn is_default(&self) -> bool {
    self.custom.is_none()
  }

  /// Parse a raw props string.
  #[must_use]
  pub fn parse(&self, raw: &str, context: &PropsContext<'_>) -> Props {
    match &self.custom {
      Some(parse) => parse(raw, context),
      None => parse_props(raw),
    }
  }
}

impl fmt::Debug for PropsParser {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = if self.custom.is_some() {
      "custom"
    } else {
      "default"
    };
    f.debug_tuple("PropsParser").field(&kind).finish()
  }
}

/// The default props heuristic.
#[must_use]
pub fn parse_props(raw: &str) -> Props {
  let source = raw.trim();
  if source.is_empty() {
    return Props::new();
  }

  match parse_json_props(source) {
    Ok(props) => return props,
    Err(PropsError::NotJsonShaped) => {},
    Err(err) => trace!("Falling back from JSON props `{source}`: {err}"),
  }

  let props = parse_key_value_props(source);
  if !props.is_empty() {
    return props;
  }

  let mut props = Props::new();
  props.insert("value".to_string(), coerce_primitive(source));
  props
}

/// Strictly parse a brace-wrapped JSON object.
///
/// # Errors
///
/// Returns [`PropsError`] when the source is not brace-wrapped, is not valid
/// JSON, or is valid JSON but not an object.
pub fn parse_json_props(source: &str) -> PropsResult<Props> {
  if !(source.starts_with('{') && source.ends_with('}')) {
    return Err(PropsError::NotJsonShaped);
  }

  match serde_json::from_str::<Value>(source)? {
    Value::Object(map) => Ok(map),
    _ => Err(PropsError::NotAnObject),
  }
}

/// Collect every `key=value` pair in `source`.
#[must_use]
pub fn parse_key_value_props(source: &str) -> Props {
  static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
      r#"([A-Za-z_][A-Za-z0-9_-]*)=(?:"([^"]*)"|'([^']*)'|([^\s]+))"#,
    )
    .unwrap_or_else(|e| {
      log::error!("Failed to compile KEY_VALUE_RE regex: {e}");
      utils::never_matching_regex()
    })
  });

  let mut props = Props::new();
  for caps in KEY_VALUE_RE.captures_iter(source) {
    let value = caps
      .get(2)
      .or_else(|| caps.get(3))
      .or_else(|| caps.get(4))
      .map_or("", |m| m.as_str());
    props.insert(caps[1].to_string(), coerce_primitive(value));
  }
  props
}

/// Coerce a scalar string into a JSON value.
#[must_use]
pub fn coerce_primitive(value: &str) -> Value {
  let trimmed = value.trim();
  match trimmed {
    "true" => return Value::Bool(true),
    "false" => return Value::Bool(false),
    "null" => return Value::Null,
    _ => {},
  }

  parse_number(trimmed)
    .map_or_else(|| Value::String(trimmed.to_string()), Value::Number)
}

/// Parse `-?digits(.digits)?`. Integers stay integral when they fit in an
/// `i64`.
fn parse_number(text: &str) -> Option<Number> {
  let unsigned = text.strip_prefix('-').unwrap_or(text);
  let (int_part, frac_part) = match unsigned.split_once('.') {
    Some((int_part, frac_part)) => (int_part, Some(frac_part)),
    None => (unsigned, None),
  };

  let all_digits =
    |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
  if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
    return None;
  }

  if frac_part.is_none() {
    if let Ok(int) = text.parse::<i64>() {
      return Some(Number::from(int));
    }
  }

  text.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn props(raw: &str) -> Value {
    Value::Object(parse_props(raw))
  }

  #[test]
  fn test_json_object() {
    assert_eq!(props(r#"{"a":1,"b":"x"}"#), json!({"a": 1, "b": "x"}));
  }

  #[test]
  fn test_json_preserves_nesting_and_order() {
    let parsed = parse_props(r#"{"z":[1,{"y":null}],"a":true}"#);
    let keys = parsed.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, ["z", "a"]);
    assert_eq!(parsed["z"], json!([1, {"y": null}]));
  }

  #[test]
  fn test_key_value_pairs() {
    assert_eq!(
      props(r#"type=info title="Heads up""#),
      json!({"type": "info", "title": "Heads up"})
    );
    assert_eq!(
      props("label='single quoted' count=3 on=false"),
      json!({"label": "single quoted", "count": 3, "on": false})
    );
  }

  #[test]
  fn test_scalar_fallback() {
    assert_eq!(props("42"), json!({"value": 42}));
    assert_eq!(props("true"), json!({"value": true}));
    assert_eq!(props("null"), json!({"value": null}));
    assert_eq!(props("just some words"), json!({"value": "just some words"}));
    assert_eq!(props("-1.5"), json!({"value": -1.5}));
  }

  #[test]
  fn test_blank_is_empty() {
    assert_eq!(props(""), json!({}));
    assert_eq!(props("   \t"), json!({}));
  }

  #[test]
  fn test_invalid_json_falls_through_to_key_value() {
    assert_eq!(props("{ broken=yes }"), json!({"broken": "yes"}));
    assert_eq!(props("{not json}"), json!({"value": "{not json}"}));
  }

  #[test]
  fn test_json_array_is_not_props() {
    assert!(matches!(
      parse_json_props("[1,2]"),
      Err(PropsError::NotJsonShaped)
    ));
    assert_eq!(props("[1,2]"), json!({"value": "[1,2]"}));
  }

  #[test]
  fn test_coercion_is_lossy_for_versions() {
    assert_eq!(coerce_primitive("1.0"), json!(1.0));
    assert_eq!(coerce_primitive("1.0.0"), json!("1.0.0"));
    assert_eq!(coerce_primitive("007"), json!(7));
    assert_eq!(coerce_primitive("1."), json!("1."));
    assert_eq!(coerce_primitive("-"), json!("-"));
  }

  #[test]
  fn test_custom_parser_receives_context() {
    let parser = PropsParser::new(|raw, ctx| {
      let mut props = Props::new();
      props.insert("raw".into(), json!(raw));
      props.insert("name".into(), json!(ctx.name));
      props.insert("syntax".into(), json!(ctx.syntax.as_str()));
      props
    });
    let ctx = PropsContext {
      name:   "Chart",
      syntax: ComponentSyntax::Fence,
    };

    assert!(!parser.is_default());
    assert_eq!(
      Value::Object(parser.parse("a=1", &ctx)),
      json!({"raw": "a=1", "name": "Chart", "syntax": "fence"})
    );
  }
}
