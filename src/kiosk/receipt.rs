//! receipt rendering and the delayed, cancellable file export

use crate::kiosk::model::order::OrderConfirmation;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// delay letting the receipt view settle before it is captured
pub(crate) const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(300);

pub(crate) trait ReceiptRenderer {
    /// Produce the downloadable receipt bytes and their file extension.
    fn render(&self, conf: &OrderConfirmation) -> (Vec<u8>, &'static str);
}

/// Renders the on-screen summary as plain text.
#[derive(Clone)]
pub(crate) struct TextRenderer;

impl ReceiptRenderer for TextRenderer {
    fn render(&self, conf: &OrderConfirmation) -> (Vec<u8>, &'static str) {
        (receipt_text(conf).into_bytes(), "txt")
    }
}

pub(crate) fn receipt_text(conf: &OrderConfirmation) -> String {
    let mut out = String::new();
    out.push_str("Thank You for Your Order!\n\n");
    out.push_str(&format!("Order ID: {}\n", conf.order_id));
    out.push_str(&format!("Table: {}\n", conf.table_id));
    out.push_str(&format!("Time: {}\n", conf.timestamp));
    out.push_str(&format!("Name: {}\n", conf.name));
    out.push_str(&format!("Phone: {}\n", conf.number));
    out.push_str(&format!("Total: Rs:{}\n", conf.total_price));
    out.push_str("Items:\n");
    for line in &conf.items {
        out.push_str(&format!("- {} × {}\n", line.item, line.qty));
    }
    out.push_str("\nPay at Counter! Visit Again!\n");
    out
}

/// A scheduled export, cancellable until the settle delay elapses.
pub(crate) struct ReceiptExport {
    pub(crate) cancel: CancellationToken,
    pub(crate) handle: JoinHandle<()>,
}

impl ReceiptExport {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Schedule a best-effort export of the receipt as `Order_<id>.<ext>` in
/// `dir`. Failures are logged and never affect the on-screen receipt.
pub(crate) fn schedule_export<R>(
    renderer: R,
    conf: OrderConfirmation,
    dir: PathBuf,
    delay: Duration,
) -> ReceiptExport
where
    R: ReceiptRenderer + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = time::sleep(delay) => {
                let (bytes, ext) = renderer.render(&conf);
                let path = dir.join(format!("Order_{}.{}", conf.order_id, ext));
                match tokio::fs::write(&path, bytes).await {
                    Ok(_) => info!("exported receipt to {}", path.display()),
                    Err(e) => warn!("failed to export receipt, {}", e),
                }
            }
        }
    });
    ReceiptExport { cancel, handle }
}
