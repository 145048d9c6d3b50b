//! Simple variable substitution renderer.

use brikr_core::{application::ports::TemplateRenderer, error::BrikrResult};
use serde_json::Value;
use tracing::instrument;

/// Simple renderer using `{{dotted.path}}` variable substitution.
///
/// Placeholders resolve against the data context; dots descend into
/// nested objects. Strings substitute verbatim, other scalars as their
/// JSON form. An unresolved placeholder is left untouched so it stays
/// visible in the output.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all)]
    fn render(&self, template: &str, context: &Value) -> BrikrResult<String> {
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            rendered.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                rendered.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let key = after_open[..close].trim();
            match lookup(context, key) {
                Some(value) => rendered.push_str(&substitution(value)),
                None => rendered.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after_open[close + 2..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

fn lookup<'a>(context: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in key.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn substitution(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
