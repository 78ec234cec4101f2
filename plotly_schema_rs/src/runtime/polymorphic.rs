use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::fmt;

/// A value that knows how to encode itself. Containers holding trait objects
/// call this instead of matching on the concrete type.
pub trait Encode: fmt::Debug {
    /// # Errors
    ///
    /// Returns the serializer's error when the value cannot be represented as JSON.
    fn encode_self(&self) -> serde_json::Result<serde_json::Value>;
}

/// A generated trace type (`Scatter`, `Bar`, ...).
pub trait Trace: Encode {
    /// The `type` tag written first in the trace's encoding.
    fn trace_type(&self) -> &'static str;

    fn animatable(&self) -> bool;
}

/// A generated transform type (`Filter`, `Groupby`, ...).
pub trait Transform: Encode {
    fn transform_type(&self) -> &'static str;
}

fn encode_with<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Encode + ?Sized,
    S: Serializer,
{
    value
        .encode_self()
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

impl Serialize for dyn Trace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_with(self, serializer)
    }
}

impl Serialize for dyn Transform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_with(self, serializer)
    }
}

/// Encodes one polymorphic value through its own [`Encode`] routine.
pub struct Delegated<'a, T: ?Sized>(pub &'a T);

impl<T: Encode + ?Sized> Serialize for Delegated<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode_with(self.0, serializer)
    }
}

/// Encodes a list of polymorphic values as a nested sequence, each element
/// through its own [`Encode`] routine.
pub struct DelegatedSeq<'a, T: ?Sized>(pub &'a [Box<T>]);

impl<T: Encode + ?Sized> Serialize for DelegatedSeq<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter().map(|item| Delegated(&**item)))
    }
}
