//! Wire wrapper around a single resource: `{"<envelope key>": { ... }}`.

use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Resource;

/// A resource wrapped under its [`Resource::ENVELOPE_KEY`].
///
/// Other top level keys are ignored when decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<R>(pub R);

impl<R> Envelope<R> {
    /// Unwraps the resource.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Resource> Serialize for Envelope<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(R::ENVELOPE_KEY, &self.0)?;
        map.end()
    }
}

/// Also serializes a borrowed resource, so requests don't need to clone it.
pub(crate) struct EnvelopeRef<'a, R>(pub(crate) &'a R);

impl<R: Resource> Serialize for EnvelopeRef<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(R::ENVELOPE_KEY, self.0)?;
        map.end()
    }
}

impl<'de, R: Resource> Deserialize<'de> for Envelope<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EnvelopeVisitor(PhantomData))
    }
}

struct EnvelopeVisitor<R>(PhantomData<R>);

impl<'de, R: Resource> Visitor<'de> for EnvelopeVisitor<R> {
    type Value = Envelope<R>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a `{}` key", R::ENVELOPE_KEY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut resource = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == R::ENVELOPE_KEY {
                if resource.is_some() {
                    return Err(de::Error::duplicate_field(R::ENVELOPE_KEY));
                }
                resource = Some(map.next_value::<R>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        resource
            .map(Envelope)
            .ok_or_else(|| de::Error::missing_field(R::ENVELOPE_KEY))
    }
}
