//! staff notification over a whatsapp deep link
//!
//! Fire-and-forget: the link is opened in the system browser and no delivery
//! confirmation exists. A failure here must never fail the submission.

use crate::kiosk::model::order::OrderConfirmation;
use log::{info, warn};
use url::Url;

/// Format the order summary carried inside the deep link.
pub(crate) fn staff_message(conf: &OrderConfirmation) -> String {
    let item_lines = conf
        .items
        .iter()
        .map(|l| format!("• {} × {}", l.item, l.qty))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "🧾 New Order Received\n\nOrder ID: {}\nTable: {}\nName: {}\nPhone: {}\n\nItems:\n{}\n\nTotal: ₹{}",
        conf.order_id, conf.table_id, conf.name, conf.number, item_lines, conf.total_price,
    )
}

/// Build `https://wa.me/<phone>?text=<summary>` with the summary url-encoded.
pub(crate) fn whatsapp_link(staff_phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("https://wa.me/{}", staff_phone))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

pub(crate) trait StaffNotifier {
    fn notify_new_order(&self, conf: &OrderConfirmation);
}

pub(crate) struct WhatsAppNotifier {
    staff_phone: String,
}

impl WhatsAppNotifier {
    pub fn new(staff_phone: String) -> Self {
        Self { staff_phone }
    }
}

impl StaffNotifier for WhatsAppNotifier {
    fn notify_new_order(&self, conf: &OrderConfirmation) {
        let link = match whatsapp_link(&self.staff_phone, &staff_message(conf)) {
            Ok(link) => link,
            Err(e) => {
                warn!("failed to build staff notification link, {}", e);
                return;
            }
        };
        info!("notifying staff about order {}", conf.order_id);
        if let Err(e) = webbrowser::open(link.as_str()) {
            warn!("failed to open staff notification link, {}", e);
        }
    }
}

/// for test
#[cfg(test)]
pub(crate) struct MockNotifier {
    pub notified: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockNotifier {
    pub fn new() -> Self {
        Self {
            notified: std::sync::Mutex::new(vec![]),
        }
    }
}

#[cfg(test)]
impl StaffNotifier for MockNotifier {
    fn notify_new_order(&self, conf: &OrderConfirmation) {
        self.notified.lock().unwrap().push(conf.order_id.clone());
    }
}
