//! Collaborator contracts consumed by the catalog.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_core::Isbn;

/// Identifier handed back for every dispatched shipment or email.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(Uuid);

impl DispatchId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How a purchase left the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Shipping,
    Email,
}

/// Proof that a collaborator accepted a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    pub id: DispatchId,
    pub channel: Channel,
    pub dispatched_at: DateTime<Utc>,
}

impl Dispatch {
    pub fn now(channel: Channel) -> Self {
        Self {
            id: DispatchId::new(),
            channel,
            dispatched_at: Utc::now(),
        }
    }
}

/// Physical copies to be sent to a postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub isbn: Isbn,
    pub title: String,
    pub address: String,
    pub quantity: u32,
}

/// Digital copies to be mailed to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDelivery {
    pub isbn: Isbn,
    pub title: String,
    pub email: String,
    pub quantity: u32,
}

/// Physical delivery capability.
pub trait ShippingDispatch {
    fn ship(&self, shipment: Shipment) -> Dispatch;
}

/// Digital delivery capability.
pub trait EmailDispatch {
    fn send(&self, delivery: EmailDelivery) -> Dispatch;
}

impl<S> ShippingDispatch for Arc<S>
where
    S: ShippingDispatch + ?Sized,
{
    fn ship(&self, shipment: Shipment) -> Dispatch {
        (**self).ship(shipment)
    }
}

impl<S> ShippingDispatch for &S
where
    S: ShippingDispatch + ?Sized,
{
    fn ship(&self, shipment: Shipment) -> Dispatch {
        (**self).ship(shipment)
    }
}

impl<M> EmailDispatch for Arc<M>
where
    M: EmailDispatch + ?Sized,
{
    fn send(&self, delivery: EmailDelivery) -> Dispatch {
        (**self).send(delivery)
    }
}

impl<M> EmailDispatch for &M
where
    M: EmailDispatch + ?Sized,
{
    fn send(&self, delivery: EmailDelivery) -> Dispatch {
        (**self).send(delivery)
    }
}
