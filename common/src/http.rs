use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::error::Res;

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}

/// The uniform response envelope of the divination endpoints:
/// `{ success, response?, cached?, isTeaser?, ...feature extras }`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(rename = "isTeaser", skip_serializing_if = "Option::is_none")]
    pub is_teaser: Option<bool>,
    #[serde(flatten)]
    pub extra: Option<serde_json::Value>,
}

impl Envelope {
    pub fn text(response: impl Into<String>) -> Self {
        Envelope {
            success: true,
            response: Some(response.into()),
            cached: None,
            is_teaser: None,
            extra: None,
        }
    }

    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = Some(cached);
        self
    }

    pub fn teaser(mut self) -> Self {
        self.is_teaser = Some(true);
        self
    }

    /// Feature-specific extra fields, merged into the top-level object.
    /// `extra` must serialize to a JSON object.
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_envelope_omits_optional_fields() {
        let value = serde_json::to_value(Envelope::text("the cards speak")).unwrap();
        assert_eq!(value, json!({ "success": true, "response": "the cards speak" }));
    }

    #[test]
    fn teaser_field_uses_client_casing() {
        let value = serde_json::to_value(Envelope::text("x").teaser()).unwrap();
        assert_eq!(value["isTeaser"], json!(true));
    }

    #[test]
    fn extra_fields_flatten_to_top_level() {
        let value = serde_json::to_value(
            Envelope::text("x")
                .cached(true)
                .with_extra(json!({ "luckyNumber": 7 })),
        )
        .unwrap();
        assert_eq!(value["cached"], json!(true));
        assert_eq!(value["luckyNumber"], json!(7));
    }
}
