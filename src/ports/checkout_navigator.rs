//! CheckoutNavigator port - the one-way hand-off to the payment page.

/// Port for leaving the funnel.
///
/// The redirect is the flow's only externally visible terminal action. It
/// is one-way: there is no response to wait for and nothing to retry.
pub trait CheckoutNavigator: Send + Sync {
    fn redirect(&self, url: &str);
}
