//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `Money::from_major(200)` is a value object; a `Book` keyed by its isbn is not.
///
/// Implementors are immutable: "changing" one means building a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
