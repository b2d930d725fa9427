//! Stub collaborators: log the dispatch, deliver nothing.

use crate::dispatch::{Channel, Dispatch, EmailDelivery, EmailDispatch, Shipment, ShippingDispatch};

/// Shipping stub backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingShipping;

impl ShippingDispatch for LoggingShipping {
    fn ship(&self, shipment: Shipment) -> Dispatch {
        let dispatch = Dispatch::now(Channel::Shipping);
        tracing::info!(
            dispatch_id = %dispatch.id,
            isbn = %shipment.isbn,
            quantity = shipment.quantity,
            address = %shipment.address,
            "sending {} x '{}'",
            shipment.quantity,
            shipment.title
        );
        dispatch
    }
}

/// Email stub backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMailer;

impl EmailDispatch for LoggingMailer {
    fn send(&self, delivery: EmailDelivery) -> Dispatch {
        let dispatch = Dispatch::now(Channel::Email);
        tracing::info!(
            dispatch_id = %dispatch.id,
            isbn = %delivery.isbn,
            quantity = delivery.quantity,
            email = %delivery.email,
            "emailing copy of '{}'",
            delivery.title
        );
        dispatch
    }
}
