use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub(crate) enum KioskError {
    #[display("cart is empty")]
    EmptyCart,
    #[display("cart is not open")]
    CartNotOpen,
    #[display("please fill all fields")]
    MissingCustomerField,
    #[display("table number missing, please scan a valid QR code")]
    MissingTable,
    #[display("an order is already being submitted")]
    SubmissionInFlight,
    #[display("could not reach the order service")]
    Transport,
    #[display("the order service rejected the order")]
    ServiceRejected,
    #[display("unexpected response from the order service")]
    MalformedResponse,
}

impl KioskError {
    /// Submission failures are surfaced to the customer as one generic
    /// message; validation errors print verbatim.
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport | Self::ServiceRejected | Self::MalformedResponse
        )
    }
}
