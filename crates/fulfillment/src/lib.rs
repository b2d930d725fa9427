//! Fulfillment collaborators (shipping + email delivery).
//!
//! Book variants call out to these when a purchase succeeds. Nothing here talks to a
//! real carrier or mail server: the stubs log the dispatch and the recording doubles
//! capture it for assertions.

pub mod dispatch;
pub mod logging;
pub mod recording;

pub use dispatch::{
    Channel, Dispatch, DispatchId, EmailDelivery, EmailDispatch, Shipment, ShippingDispatch,
};
pub use logging::{LoggingMailer, LoggingShipping};
pub use recording::{RecordingMailer, RecordingShipping};
