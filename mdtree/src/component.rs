//! Recognition of component references in fence and container info strings.

use crate::registry::ComponentRegistry;

/// Default prefix marking a code fence as a component reference.
pub const FENCE_COMPONENT_PREFIX: &str = "component:";

/// A component name together with its unparsed props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSpec<'a> {
  pub name:      &'a str,
  pub props_raw: &'a str,
}

/// Split `Name rest of line` at the first whitespace run.
#[must_use]
pub fn split_component_spec(spec: &str) -> ComponentSpec<'_> {
  match spec.find(char::is_whitespace) {
    Some(split) => {
      ComponentSpec {
        name:      spec[..split].trim(),
        props_raw: spec[split..].trim(),
      }
    },
    None => {
      ComponentSpec {
        name:      spec.trim(),
        props_raw: "",
      }
    },
  }
}

/// Parse a fence info string such as `component:Chart {"theme":"dark"}`.
///
/// Returns `None` when the info string doesn't carry `prefix`, names no
/// component, or names a component whose fence syntax is disabled. Names
/// missing from the registry are still accepted.
#[must_use]
pub fn parse_fence_spec<'a>(
  info: &'a str,
  prefix: &str,
  registry: &ComponentRegistry,
) -> Option<ComponentSpec<'a>> {
  let spec = info.trim().strip_prefix(prefix)?.trim();
  if spec.is_empty() {
    return None;
  }

  let parsed = split_component_spec(spec);
  if parsed.name.is_empty() {
    return None;
  }

  if registry.get(parsed.name).is_some_and(|block| !block.fence) {
    return None;
  }

  Some(parsed)
}

/// Raw props of a `:::` container: the trimmed info string without its
/// leading component name.
#[must_use]
pub fn container_props_raw<'a>(name: &str, info: &'a str) -> &'a str {
  let trimmed = info.trim();
  trimmed
    .strip_prefix(name)
    .map_or(trimmed, str::trim)
}
