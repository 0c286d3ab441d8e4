//! order session state machine
//!
//! One session per process, created at start and reset after a successful
//! submission. States: Browsing → CartOpen → Submitting → ReceiptShown, with
//! any submission failure returning to CartOpen so the customer can retry.

use crate::kiosk::error::KioskError;
use crate::kiosk::model::cart::Cart;
use crate::kiosk::model::menu::MenuItem;
use crate::kiosk::model::order::{OrderConfirmation, PostOrderRequest};
use crate::kiosk::notify::StaffNotifier;
use crate::kiosk::receipt::{schedule_export, ReceiptExport, ReceiptRenderer};
use crate::kiosk::service::OrderService;
use crate::kiosk::table::TableContext;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SessionState {
    Browsing,
    CartOpen,
    Submitting,
    ReceiptShown,
}

/// customer form, cleared after a successful submission
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CustomerForm {
    pub name: String,
    pub number: String,
}

impl CustomerForm {
    fn clear(&mut self) {
        self.name.clear();
        self.number.clear();
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.number.trim().is_empty()
    }
}

pub(crate) struct OrderSession<S, N, R> {
    state: SessionState,
    cart: Cart,
    form: CustomerForm,
    table: Option<TableContext>,
    pub(crate) service: S,
    pub(crate) notifier: N,
    renderer: R,
    export_dir: PathBuf,
    export_delay: Duration,
    pub(crate) export: Option<ReceiptExport>,
    confirmation: Option<OrderConfirmation>,
}

impl<S, N, R> OrderSession<S, N, R>
where
    S: OrderService,
    N: StaffNotifier,
    R: ReceiptRenderer + Clone + Send + 'static,
{
    pub fn new(
        service: S,
        notifier: N,
        renderer: R,
        table: Option<TableContext>,
        export_dir: PathBuf,
        export_delay: Duration,
    ) -> Self {
        Self {
            state: SessionState::Browsing,
            cart: Cart::new(),
            form: CustomerForm::default(),
            table,
            service,
            notifier,
            renderer,
            export_dir,
            export_delay,
            export: None,
            confirmation: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn table(&self) -> Option<&TableContext> {
        self.table.as_ref()
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn add_item(&mut self, item: &MenuItem) {
        self.cart.add_item(item);
    }

    pub fn remove_item(&mut self, id: u32) {
        self.cart.remove_item(id);
    }

    pub fn change_qty(&mut self, id: u32, delta: i32) {
        self.cart.change_qty(id, delta);
    }

    pub fn set_name(&mut self, name: &str) {
        self.form.name = name.to_string();
    }

    pub fn set_number(&mut self, number: &str) {
        self.form.number = number.to_string();
    }

    /// Enter the cart view; requires a non-empty cart. Idempotent when the
    /// cart is already open.
    pub fn open_cart(&mut self) -> Result<(), KioskError> {
        if self.state == SessionState::Submitting {
            return Err(KioskError::SubmissionInFlight);
        }
        if self.cart.is_empty() {
            return Err(KioskError::EmptyCart);
        }
        self.state = SessionState::CartOpen;
        Ok(())
    }

    pub fn close_cart(&mut self) {
        if self.state == SessionState::CartOpen {
            self.state = SessionState::Browsing;
        }
    }

    /// Validate, post the order, and on success notify staff, schedule the
    /// receipt export and reset cart and form. Any failure leaves cart and
    /// form untouched and the state back at CartOpen.
    pub async fn submit(&mut self) -> Result<&OrderConfirmation, KioskError> {
        if self.state == SessionState::Submitting {
            return Err(KioskError::SubmissionInFlight);
        }
        if self.state != SessionState::CartOpen {
            return Err(KioskError::CartNotOpen);
        }
        if self.cart.is_empty() {
            return Err(KioskError::EmptyCart);
        }
        if !self.form.is_complete() {
            return Err(KioskError::MissingCustomerField);
        }
        let Some(table) = &self.table else {
            return Err(KioskError::MissingTable);
        };

        let req = PostOrderRequest {
            name: self.form.name.trim().to_string(),
            number: self.form.number.trim().to_string(),
            table_id: table.id.clone(),
            items: self.cart.order_lines(),
        };
        let local_total = self.cart.total();

        self.state = SessionState::Submitting;
        info!("submitting order for table {}", req.table_id);
        let conf = match self.service.submit_order(&req).await {
            Ok(raw) => OrderConfirmation::from_response(raw, &req, local_total),
            Err(e) => Err(e),
        };
        let conf = match conf {
            Ok(conf) => conf,
            Err(e) => {
                warn!("order submission failed, {}", e);
                self.state = SessionState::CartOpen; // cart and form kept for retry
                return Err(e);
            }
        };

        self.notifier.notify_new_order(&conf);
        if let Some(stale) = self.export.take() {
            stale.cancel();
        }
        self.export = Some(schedule_export(
            self.renderer.clone(),
            conf.clone(),
            self.export_dir.clone(),
            self.export_delay,
        ));
        self.cart.clear();
        self.form.clear();
        self.state = SessionState::ReceiptShown;
        info!("order {} confirmed", conf.order_id);
        Ok(&*self.confirmation.insert(conf))
    }

    /// Leave the receipt view, cancelling a still-pending export.
    pub fn dismiss_receipt(&mut self) {
        if let Some(export) = self.export.take() {
            export.cancel();
        }
        self.confirmation = None;
        if self.state == SessionState::ReceiptShown {
            self.state = SessionState::Browsing;
        }
    }
}

impl<S, N, R> Drop for OrderSession<S, N, R> {
    fn drop(&mut self) {
        if let Some(export) = self.export.take() {
            export.cancel();
        }
    }
}
