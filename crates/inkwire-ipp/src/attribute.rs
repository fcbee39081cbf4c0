// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attributes and attribute groups.
//
// A multi-valued attribute (`1setOf`) is a run of successive attributes that
// share a name, exactly as on the wire.  On encode, a repeated name is written
// with name-length 0 (RFC 8010 §3.1.5); on decode, name-length 0 reuses the
// previous name.

use inkwire_core::error::{BuildError, MalformedKind, MalformedResponse};

use crate::tag::GroupTag;
use crate::value::Value;
use crate::wire::Reader;

/// A name bound to one typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// One attribute per value, all sharing `name`.
    pub fn multi(name: &str, values: impl IntoIterator<Item = Value>) -> Vec<Self> {
        values.into_iter().map(|v| Self::new(name, v)).collect()
    }

    /// Append the wire form of this attribute.  `continuation` writes an
    /// empty name (additional value of the preceding attribute).  An
    /// attribute whose own name is empty is rejected: on the wire it would
    /// silently become a value of its neighbour.
    pub fn encode(&self, out: &mut Vec<u8>, continuation: bool) -> Result<(), BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        let name: &[u8] = if continuation { &[] } else { self.name.as_bytes() };
        let name_len = u16::try_from(name.len()).map_err(|_| BuildError::NameTooLong {
            name: self.name.clone(),
            len: name.len(),
        })?;
        let body = self.value.to_bytes()?;
        let value_len = u16::try_from(body.len()).map_err(|_| BuildError::ValueTooLong {
            name: self.name.clone(),
            len: body.len(),
        })?;

        out.push(self.value.tag());
        out.extend_from_slice(&name_len.to_be_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(&value_len.to_be_bytes());
        out.extend_from_slice(&body);
        Ok(())
    }

    /// Decode the attribute whose value tag starts at `offset`.
    ///
    /// Returns the attribute (its name resolved against `previous_name` for
    /// additional values) and the offset just past its value.
    pub fn decode_at(
        buf: &[u8],
        offset: usize,
        previous_name: Option<&str>,
    ) -> Result<(Self, usize), MalformedResponse> {
        let mut reader = Reader::at(buf, offset);
        let tag = reader.read_u8("value tag")?;
        let attribute = Self::read(&mut reader, tag, previous_name)?;
        Ok((attribute, reader.position()))
    }

    /// Read name and value after the value tag has been consumed.
    ///
    /// Names are decoded lossily: invalid UTF-8 in a name becomes U+FFFD, so
    /// such an attribute does not re-encode byte-for-byte.  Values keep
    /// invalid UTF-8 intact as `Value::Opaque`.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        tag: u8,
        previous_name: Option<&str>,
    ) -> Result<Self, MalformedResponse> {
        let name_pos = reader.position();
        let name_len = reader.read_u16("name-length")? as usize;
        let raw_name = reader.take(name_len, "attribute name")?;
        let name = if name_len == 0 {
            previous_name
                .ok_or_else(|| MalformedResponse::new(name_pos, MalformedKind::OrphanContinuation))?
                .to_owned()
        } else {
            String::from_utf8_lossy(raw_name).into_owned()
        };

        let value_len = reader.read_u16("value-length")? as usize;
        let value_pos = reader.position();
        let raw_value = reader.take(value_len, "attribute value")?;
        let value =
            Value::decode(tag, &name, raw_value).map_err(|kind| MalformedResponse::new(value_pos, kind))?;

        Ok(Self { name, value })
    }
}

/// An ordered, tagged collection of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroup {
    tag: GroupTag,
    attributes: Vec<Attribute>,
}

impl AttributeGroup {
    pub fn new(tag: GroupTag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
        }
    }

    pub fn tag(&self) -> GroupTag {
        self.tag
    }

    pub fn push(&mut self, attribute: Attribute) -> &mut Self {
        self.attributes.push(attribute);
        self
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn extend(&mut self, attributes: impl IntoIterator<Item = Attribute>) {
        self.attributes.extend(attributes);
    }

    /// First value with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    /// Every value with the given name, in order.  The values borrow from
    /// the group only; `name` is needed just while iterating.
    pub fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> {
        self.attributes
            .iter()
            .filter(move |a| a.name == name)
            .map(|a| &a.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Remove every attribute with the given name; returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        before - self.attributes.len()
    }

    /// Drop every existing attribute that shares a name with `incoming`, then
    /// append `incoming` in order.
    pub fn replace_all(&mut self, incoming: impl IntoIterator<Item = Attribute>) {
        let incoming: Vec<Attribute> = incoming.into_iter().collect();
        self.attributes
            .retain(|existing| !incoming.iter().any(|a| a.name == existing.name));
        self.attributes.extend(incoming);
    }

    /// Insert at a position (used for the charset/language pair).
    pub(crate) fn insert(&mut self, index: usize, attribute: Attribute) {
        self.attributes.insert(index, attribute);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Append the delimiter tag and every attribute.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), BuildError> {
        if self.tag == GroupTag::EndOfAttributes {
            return Err(BuildError::ReservedGroup);
        }
        out.push(self.tag.code());
        let mut previous: Option<&str> = None;
        for attribute in &self.attributes {
            let continuation = previous == Some(attribute.name.as_str());
            attribute.encode(out, continuation)?;
            previous = Some(attribute.name.as_str());
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AttributeGroup {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
