pub mod checkout;
pub mod comparison;
pub mod dashboard;
pub mod testimonials;

pub use checkout::{CheckoutSummary, OfferCountdown, DEFAULT_OFFER_WINDOW};
pub use comparison::{ComparisonView, Scenario, DELAY_MONTHS};
pub use dashboard::ResultsSummary;
pub use testimonials::{transformations, GalleryCursor, Transformation};
