//! Recording doubles that capture every dispatch (tests/dev).

use std::sync::RwLock;

use crate::dispatch::{Channel, Dispatch, EmailDelivery, EmailDispatch, Shipment, ShippingDispatch};

/// Shipping double: remembers every shipment it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingShipping {
    inner: RwLock<Vec<(Shipment, Dispatch)>>,
}

impl RecordingShipping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shipments(&self) -> Vec<Shipment> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn dispatches(&self) -> Vec<Dispatch> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.iter().map(|(_, d)| d.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl ShippingDispatch for RecordingShipping {
    fn ship(&self, shipment: Shipment) -> Dispatch {
        let dispatch = Dispatch::now(Channel::Shipping);
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.push((shipment, dispatch.clone()));
        dispatch
    }
}

/// Email double: remembers every delivery it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    inner: RwLock<Vec<(EmailDelivery, Dispatch)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<EmailDelivery> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn dispatches(&self) -> Vec<Dispatch> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.iter().map(|(_, d)| d.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl EmailDispatch for RecordingMailer {
    fn send(&self, delivery: EmailDelivery) -> Dispatch {
        let dispatch = Dispatch::now(Channel::Email);
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.push((delivery, dispatch.clone()));
        dispatch
    }
}
