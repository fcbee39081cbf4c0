// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed IPP attribute values.
//
// One variant per value tag the client understands.  Each variant knows its
// tag and how to write/read its value bytes (RFC 8010 §3.9).  Tags outside
// the table are carried as `Opaque` so servers can add attributes without
// breaking the parser, and so a decoded message re-encodes byte-for-byte.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use inkwire_core::error::{BuildError, MalformedKind};

use crate::tag;

/// A single decoded IPP value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Unsupported,
    Unknown,
    NoValue,
    Integer(i32),
    Boolean(bool),
    Enum(i32),
    OctetString(Vec<u8>),
    DateTime(DateTime<FixedOffset>),
    Resolution {
        cross_feed: i32,
        feed: i32,
        /// 3 = dots per inch, 4 = dots per centimetre.
        units: u8,
    },
    /// Inclusive bounds.
    RangeOfInteger {
        lower: i32,
        upper: i32,
    },
    TextWithLanguage {
        language: String,
        text: String,
    },
    NameWithLanguage {
        language: String,
        name: String,
    },
    Text(String),
    Name(String),
    Keyword(String),
    Uri(String),
    UriScheme(String),
    Charset(String),
    NaturalLanguage(String),
    MimeMediaType(String),
    MemberAttrName(String),
    /// A value tag outside the table above, an empty fixed-width value, or
    /// string bytes that are not UTF-8.
    Opaque {
        tag: u8,
        data: Vec<u8>,
    },
}

impl Value {
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn charset(value: impl Into<String>) -> Self {
        Self::Charset(value.into())
    }

    pub fn natural_language(value: impl Into<String>) -> Self {
        Self::NaturalLanguage(value.into())
    }

    pub fn mime_media_type(value: impl Into<String>) -> Self {
        Self::MimeMediaType(value.into())
    }

    /// A nameWithoutLanguage restricted to US-ASCII, e.g. `requesting-user-name`.
    pub fn ascii_name(value: &str) -> Self {
        Self::Name(crate::translit::to_ascii(value))
    }

    /// The value tag written in front of this value.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Unsupported => tag::UNSUPPORTED,
            Self::Unknown => tag::UNKNOWN,
            Self::NoValue => tag::NO_VALUE,
            Self::Integer(_) => tag::INTEGER,
            Self::Boolean(_) => tag::BOOLEAN,
            Self::Enum(_) => tag::ENUM,
            Self::OctetString(_) => tag::OCTET_STRING,
            Self::DateTime(_) => tag::DATE_TIME,
            Self::Resolution { .. } => tag::RESOLUTION,
            Self::RangeOfInteger { .. } => tag::RANGE_OF_INTEGER,
            Self::TextWithLanguage { .. } => tag::TEXT_WITH_LANGUAGE,
            Self::NameWithLanguage { .. } => tag::NAME_WITH_LANGUAGE,
            Self::Text(_) => tag::TEXT_WITHOUT_LANGUAGE,
            Self::Name(_) => tag::NAME_WITHOUT_LANGUAGE,
            Self::Keyword(_) => tag::KEYWORD,
            Self::Uri(_) => tag::URI,
            Self::UriScheme(_) => tag::URI_SCHEME,
            Self::Charset(_) => tag::CHARSET,
            Self::NaturalLanguage(_) => tag::NATURAL_LANGUAGE,
            Self::MimeMediaType(_) => tag::MIME_MEDIA_TYPE,
            Self::MemberAttrName(_) => tag::MEMBER_ATTR_NAME,
            Self::Opaque { tag, .. } => *tag,
        }
    }

    /// The value bytes, without the 2-byte length prefix.
    ///
    /// Fails only for a dateTime the 11-byte wire form cannot hold.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BuildError> {
        let bytes = match self {
            Self::Unsupported | Self::Unknown | Self::NoValue => Vec::new(),
            Self::Integer(v) | Self::Enum(v) => v.to_be_bytes().to_vec(),
            Self::Boolean(v) => vec![u8::from(*v)],
            Self::OctetString(data) | Self::Opaque { data, .. } => data.clone(),
            Self::DateTime(dt) => encode_date_time(dt)?.to_vec(),
            Self::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                let mut buf = Vec::with_capacity(9);
                buf.extend_from_slice(&cross_feed.to_be_bytes());
                buf.extend_from_slice(&feed.to_be_bytes());
                buf.push(*units);
                buf
            }
            Self::RangeOfInteger { lower, upper } => {
                let mut buf = Vec::with_capacity(8);
                buf.extend_from_slice(&lower.to_be_bytes());
                buf.extend_from_slice(&upper.to_be_bytes());
                buf
            }
            Self::TextWithLanguage { language, text: s }
            | Self::NameWithLanguage { language, name: s } => {
                let mut buf = Vec::with_capacity(4 + language.len() + s.len());
                buf.extend_from_slice(&(language.len() as u16).to_be_bytes());
                buf.extend_from_slice(language.as_bytes());
                buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
                buf.extend_from_slice(s.as_bytes());
                buf
            }
            Self::Text(s)
            | Self::Name(s)
            | Self::Keyword(s)
            | Self::Uri(s)
            | Self::UriScheme(s)
            | Self::Charset(s)
            | Self::NaturalLanguage(s)
            | Self::MimeMediaType(s)
            | Self::MemberAttrName(s) => s.as_bytes().to_vec(),
        };
        Ok(bytes)
    }

    /// Decode the value bytes of an attribute carrying `tag`.
    ///
    /// `bytes` is exactly the declared value length; `name` is only used in
    /// error reports.
    pub fn decode(tag: u8, name: &str, bytes: &[u8]) -> Result<Self, MalformedKind> {
        let opaque = || Self::Opaque {
            tag,
            data: bytes.to_vec(),
        };

        let value = match tag {
            tag::UNSUPPORTED | tag::UNKNOWN | tag::NO_VALUE if !bytes.is_empty() => opaque(),
            tag::UNSUPPORTED => Self::Unsupported,
            tag::UNKNOWN => Self::Unknown,
            tag::NO_VALUE => Self::NoValue,

            tag::INTEGER | tag::ENUM => match fixed(name, bytes, 4)? {
                None => opaque(),
                Some(b) => {
                    let v = i32::from_be_bytes([b[0], b[1], b[2], b[3]]);
                    if tag == tag::INTEGER {
                        Self::Integer(v)
                    } else {
                        Self::Enum(v)
                    }
                }
            },
            tag::BOOLEAN => match fixed(name, bytes, 1)? {
                None => opaque(),
                Some(b) => Self::Boolean(b[0] != 0),
            },
            tag::OCTET_STRING => Self::OctetString(bytes.to_vec()),
            tag::DATE_TIME => match fixed(name, bytes, 11)? {
                None => opaque(),
                Some(b) => Self::DateTime(decode_date_time(name, b)?),
            },
            tag::RESOLUTION => match fixed(name, bytes, 9)? {
                None => opaque(),
                Some(b) => Self::Resolution {
                    cross_feed: i32::from_be_bytes([b[0], b[1], b[2], b[3]]),
                    feed: i32::from_be_bytes([b[4], b[5], b[6], b[7]]),
                    units: b[8],
                },
            },
            tag::RANGE_OF_INTEGER => match fixed(name, bytes, 8)? {
                None => opaque(),
                Some(b) => Self::RangeOfInteger {
                    lower: i32::from_be_bytes([b[0], b[1], b[2], b[3]]),
                    upper: i32::from_be_bytes([b[4], b[5], b[6], b[7]]),
                },
            },
            tag::TEXT_WITH_LANGUAGE | tag::NAME_WITH_LANGUAGE => {
                match decode_with_language(name, bytes)? {
                    None => opaque(),
                    Some((language, s)) if tag == tag::TEXT_WITH_LANGUAGE => {
                        Self::TextWithLanguage { language, text: s }
                    }
                    Some((language, s)) => Self::NameWithLanguage { language, name: s },
                }
            }
            tag::TEXT_WITHOUT_LANGUAGE
            | tag::NAME_WITHOUT_LANGUAGE
            | tag::KEYWORD
            | tag::URI
            | tag::URI_SCHEME
            | tag::CHARSET
            | tag::NATURAL_LANGUAGE
            | tag::MIME_MEDIA_TYPE
            | tag::MEMBER_ATTR_NAME => match std::str::from_utf8(bytes) {
                Err(_) => opaque(),
                Ok(s) => {
                    let s = s.to_owned();
                    match tag {
                        tag::TEXT_WITHOUT_LANGUAGE => Self::Text(s),
                        tag::NAME_WITHOUT_LANGUAGE => Self::Name(s),
                        tag::KEYWORD => Self::Keyword(s),
                        tag::URI => Self::Uri(s),
                        tag::URI_SCHEME => Self::UriScheme(s),
                        tag::CHARSET => Self::Charset(s),
                        tag::NATURAL_LANGUAGE => Self::NaturalLanguage(s),
                        tag::MIME_MEDIA_TYPE => Self::MimeMediaType(s),
                        _ => Self::MemberAttrName(s),
                    }
                }
            },
            _ => opaque(),
        };

        if let Self::Opaque { tag, data } = &value {
            debug!(attribute = name, tag = *tag, len = data.len(), "opaque value");
        }
        Ok(value)
    }

    /// Any string-typed value, including the with-language forms.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s)
            | Self::Name(s)
            | Self::Keyword(s)
            | Self::Uri(s)
            | Self::UriScheme(s)
            | Self::Charset(s)
            | Self::NaturalLanguage(s)
            | Self::MimeMediaType(s)
            | Self::MemberAttrName(s) => Some(s),
            Self::TextWithLanguage { text, .. } => Some(text),
            Self::NameWithLanguage { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Integer or enum value.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(v) | Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<(i32, i32)> {
        match self {
            Self::RangeOfInteger { lower, upper } => Some((*lower, *upper)),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Out-of-band values and empty opaque values carry no data.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Unsupported | Self::Unknown | Self::NoValue => true,
            Self::Opaque { data, .. } => data.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("unsupported"),
            Self::Unknown => f.write_str("unknown"),
            Self::NoValue => f.write_str("no-value"),
            Self::Integer(v) | Self::Enum(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::OctetString(data) => write!(f, "<{} bytes>", data.len()),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Self::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                let unit = if *units == 4 { "dpcm" } else { "dpi" };
                write!(f, "{cross_feed}x{feed}{unit}")
            }
            Self::RangeOfInteger { lower, upper } => write!(f, "{lower}-{upper}"),
            Self::Opaque { tag, data } => write!(f, "<tag 0x{tag:02X}, {} bytes>", data.len()),
            other => f.write_str(other.as_str().unwrap_or_default()),
        }
    }
}

/// `Ok(None)` for an empty (absent) value; an error for any other length
/// that differs from the fixed width.
fn fixed<'b>(name: &str, bytes: &'b [u8], width: usize) -> Result<Option<&'b [u8]>, MalformedKind> {
    match bytes.len() {
        0 => Ok(None),
        len if len == width => Ok(Some(bytes)),
        len => Err(MalformedKind::BadValueLength {
            name: name.to_owned(),
            len,
            expected: width,
        }),
    }
}

fn decode_with_language(name: &str, bytes: &[u8]) -> Result<Option<(String, String)>, MalformedKind> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let invalid = |reason: &str| MalformedKind::InvalidValue {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    let mut pos = 0;
    let mut part = |what: &str| -> Result<Option<String>, MalformedKind> {
        let len_bytes = bytes
            .get(pos..pos + 2)
            .ok_or_else(|| invalid(&format!("truncated {what} length")))?;
        let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
        pos += 2;
        let raw = bytes
            .get(pos..pos + len)
            .ok_or_else(|| invalid(&format!("{what} overruns value")))?;
        pos += len;
        Ok(std::str::from_utf8(raw).ok().map(str::to_owned))
    };

    let language = part("language")?;
    let text = part("text")?;
    if pos != bytes.len() {
        return Err(invalid("trailing bytes after text"));
    }
    Ok(language.zip(text))
}

/// RFC 2579 DateAndTime, 11-byte form with UTC offset.
/// RFC 2579 DateAndTime: 2-byte year, UTC offset in whole minutes.
fn encode_date_time(dt: &DateTime<FixedOffset>) -> Result<[u8; 11], BuildError> {
    let year = u16::try_from(dt.year())
        .map_err(|_| BuildError::ValueOutOfRange(format!("dateTime year {} outside 0..=65535", dt.year())))?
        .to_be_bytes();
    let nanos = dt.nanosecond();
    let (second, nanos) = if nanos >= 1_000_000_000 {
        (60, nanos - 1_000_000_000)
    } else {
        (dt.second() as u8, nanos)
    };
    let offset = dt.offset().local_minus_utc();
    let direction = if offset < 0 { b'-' } else { b'+' };
    let offset = offset.unsigned_abs();
    if offset % 60 != 0 {
        return Err(BuildError::ValueOutOfRange(format!(
            "dateTime UTC offset {offset}s is not a whole number of minutes"
        )));
    }

    Ok([
        year[0],
        year[1],
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        second,
        (nanos / 100_000_000) as u8,
        direction,
        (offset / 3600) as u8,
        ((offset % 3600) / 60) as u8,
    ])
}

fn decode_date_time(name: &str, b: &[u8]) -> Result<DateTime<FixedOffset>, MalformedKind> {
    let invalid = |reason: &str| MalformedKind::InvalidValue {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    let year = i32::from(u16::from_be_bytes([b[0], b[1]]));
    let date = NaiveDate::from_ymd_opt(year, u32::from(b[2]), u32::from(b[3]))
        .ok_or_else(|| invalid("date out of range"))?;

    // A leap second is second 60; chrono encodes it as 59 plus an extra second
    // of fractional time.
    let (second, leap_millis) = if b[6] == 60 { (59, 1000) } else { (u32::from(b[6]), 0) };
    let time = NaiveTime::from_hms_milli_opt(
        u32::from(b[4]),
        u32::from(b[5]),
        second,
        u32::from(b[7]) * 100 + leap_millis,
    )
    .ok_or_else(|| invalid("time out of range"))?;

    let offset_secs = i32::from(b[9]) * 3600 + i32::from(b[10]) * 60;
    let offset = match b[8] {
        b'+' => FixedOffset::east_opt(offset_secs),
        b'-' => FixedOffset::west_opt(offset_secs),
        _ => None,
    }
    .ok_or_else(|| invalid("bad UTC offset"))?;

    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| invalid("ambiguous local time"))
}
