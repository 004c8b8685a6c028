use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Text a browser-side template literal would produce for `value`.
fn js_text(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::String(s) => s.clone(),
    Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
      (Some(i), _, _) => i.to_string(),
      (_, Some(u), _) => u.to_string(),
      (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
      _ => n.to_string(),
    },
    Value::Array(items) => items.iter().map(js_text).collect::<Vec<_>>().join(","),
    Value::Object(_) => "[object Object]".to_string(),
  }
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::String(s) => !s.is_empty(),
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Reads a form field the way a browser-side form would have meant it.
///
/// Falsy values (`null`, `false`, `0`, `""`) count as absent. Anything else
/// is kept in its template-literal text form, so `["a","b"]` reads as `a,b`
/// and an object as `[object Object]`.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  Ok(value.filter(is_truthy).map(|value| js_text(&value)))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
  #[validate(required)]
  #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
  pub full_name: Option<String>,
  #[validate(required)]
  #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
  pub company: Option<String>,
  #[validate(required)]
  #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[validate(required)]
  #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
  pub referral_source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationResponse {
  pub success: bool,
  pub message: String,
}

impl RegistrationResponse {
  pub fn registered() -> Self {
    Self {
      success: true,
      message: "Registration successful and emails sent".to_string(),
    }
  }
}
