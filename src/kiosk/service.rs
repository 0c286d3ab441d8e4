//! remote order service client

use crate::kiosk::error::KioskError;
use crate::kiosk::model::order::{PostOrderRequest, PostOrderResponse};
use log::warn;
use reqwest::Client;
use url::Url;

pub(crate) trait OrderService {
    async fn submit_order(&self, req: &PostOrderRequest) -> Result<PostOrderResponse, KioskError>;
}

pub(crate) struct HttpOrderService {
    client: Client,
    endpoint: Url,
}

impl HttpOrderService {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

impl OrderService for HttpOrderService {
    async fn submit_order(&self, req: &PostOrderRequest) -> Result<PostOrderResponse, KioskError> {
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(req)
            .send()
            .await
            .map_err(|e| {
                warn!("submit_order transport failure, {}", e);
                KioskError::Transport
            })?;
        let status = res.status();
        if !status.is_success() {
            warn!("submit_order got non-success status, {}", status);
            return Err(KioskError::ServiceRejected);
        }
        res.json::<PostOrderResponse>().await.map_err(|e| {
            warn!("submit_order returned an undecodable body, {}", e);
            KioskError::MalformedResponse
        })
    }
}

/// for test
#[cfg(test)]
pub(crate) struct MockOrderService {
    reply: MockReply,
    pub calls: std::sync::Mutex<Vec<PostOrderRequest>>,
}

#[cfg(test)]
pub(crate) enum MockReply {
    Body(serde_json::Value),
    Transport,
}

#[cfg(test)]
impl MockOrderService {
    pub fn replying(body: serde_json::Value) -> Self {
        Self {
            reply: MockReply::Body(body),
            calls: std::sync::Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: MockReply::Transport,
            calls: std::sync::Mutex::new(vec![]),
        }
    }
}

#[cfg(test)]
impl OrderService for MockOrderService {
    async fn submit_order(&self, req: &PostOrderRequest) -> Result<PostOrderResponse, KioskError> {
        self.calls.lock().unwrap().push(req.clone());
        match &self.reply {
            MockReply::Transport => Err(KioskError::Transport),
            MockReply::Body(body) => serde_json::from_value::<PostOrderResponse>(body.clone())
                .map_err(|_| KioskError::MalformedResponse),
        }
    }
}
