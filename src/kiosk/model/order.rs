use crate::kiosk::error::KioskError;
use crate::kiosk::util::time;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderLine {
    pub item: String,
    pub qty: u32,
    pub price: f64,
}

/// one-shot order payload posted to the remote order service
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostOrderRequest {
    pub name: String,
    pub number: String,
    pub table_id: String,
    pub items: Vec<OrderLine>,
}

/// Raw service response. Everything is optional at the wire boundary so a
/// sparse or malformed body surfaces as a typed error instead of a panic.
#[derive(Debug, Deserialize)]
pub(crate) struct PostOrderResponse {
    pub order_id: Option<String>,
    pub message: Option<String>,
    pub table_id: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub timestamp: Option<String>,
    pub total_price: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Server-issued record acknowledging a submitted order, held only while the
/// receipt is shown.
#[derive(Debug, Clone)]
pub(crate) struct OrderConfirmation {
    pub order_id: String,
    pub table_id: String,
    pub name: String,
    pub number: String,
    pub timestamp: String,
    pub total_price: String,
    pub items: Vec<OrderLine>,
}

impl OrderConfirmation {
    /// Promote a raw response into a confirmation. The order id is mandatory;
    /// fields the server omitted are filled from the submitted payload and a
    /// local timestamp so the receipt never renders holes.
    pub fn from_response(
        res: PostOrderResponse,
        req: &PostOrderRequest,
        local_total: f64,
    ) -> Result<Self, KioskError> {
        let Some(order_id) = res.order_id.filter(|id| !id.is_empty()) else {
            warn!("service response carried no order id, message={:?}", res.message);
            return Err(KioskError::MalformedResponse);
        };
        Ok(Self {
            order_id,
            table_id: res.table_id.unwrap_or_else(|| req.table_id.clone()),
            name: res.name.unwrap_or_else(|| req.name.clone()),
            number: res.number.unwrap_or_else(|| req.number.clone()),
            timestamp: res.timestamp.unwrap_or_else(|| {
                time::helper::get_utc_now()
                    .format(time::TIMESTAMP_FORMAT)
                    .to_string()
            }),
            total_price: res.total_price.unwrap_or_else(|| format!("{:.2}", local_total)),
            items: if res.items.is_empty() { req.items.clone() } else { res.items },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PostOrderRequest {
        PostOrderRequest {
            name: "Asha".to_string(),
            number: "9000000000".to_string(),
            table_id: "1".to_string(),
            items: vec![OrderLine {
                item: "Butter Croissant".to_string(),
                qty: 2,
                price: 20.0,
            }],
        }
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["table_id"], "1");
        assert_eq!(json["items"][0]["item"], "Butter Croissant");
        assert_eq!(json["items"][0]["qty"], 2);
        assert_eq!(json["items"][0]["price"], 20.0);
    }

    #[test]
    fn missing_order_id_is_rejected() {
        let res: PostOrderResponse =
            serde_json::from_value(serde_json::json!({ "message": "out of stock" })).unwrap();
        assert!(matches!(
            OrderConfirmation::from_response(res, &request(), 40.0),
            Err(KioskError::MalformedResponse)
        ));
    }

    #[test]
    fn sparse_response_falls_back_to_submitted_fields() {
        let res: PostOrderResponse =
            serde_json::from_value(serde_json::json!({ "order_id": "X1" })).unwrap();
        let conf = OrderConfirmation::from_response(res, &request(), 40.0).unwrap();
        assert_eq!(conf.order_id, "X1");
        assert_eq!(conf.table_id, "1");
        assert_eq!(conf.name, "Asha");
        assert_eq!(conf.total_price, "40.00");
        assert_eq!(conf.items, request().items);
        assert!(!conf.timestamp.is_empty());
    }

    #[test]
    fn server_fields_win_over_fallbacks() {
        let res: PostOrderResponse = serde_json::from_value(serde_json::json!({
            "order_id": "X1",
            "timestamp": "2024-01-01T10:00:00",
            "total_price": "40.00",
        }))
        .unwrap();
        let conf = OrderConfirmation::from_response(res, &request(), 39.5).unwrap();
        assert_eq!(conf.timestamp, "2024-01-01T10:00:00");
        assert_eq!(conf.total_price, "40.00");
    }
}
