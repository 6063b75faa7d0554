use std::borrow::Cow;

/// A decoded or to-be-encoded AMF0 value.
///
/// Borrows from the input buffer where possible (`String`, object keys); call
/// [`Amf0Value::into_owned`] to detach from that buffer's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum Amf0Value<'a> {
    Number(f64),
    Boolean(bool),
    String(Cow<'a, str>),
    Object(Vec<(Cow<'a, str>, Amf0Value<'a>)>),
    Null,
    Undefined,
    EcmaArray(Vec<(Cow<'a, str>, Amf0Value<'a>)>),
    StrictArray(Vec<Amf0Value<'a>>),
}

impl<'a> Amf0Value<'a> {
    /// Clone all borrowed data so the value no longer depends on `'a`.
    pub fn into_owned(self) -> Amf0Value<'static> {
        match self {
            Amf0Value::Number(n) => Amf0Value::Number(n),
            Amf0Value::Boolean(b) => Amf0Value::Boolean(b),
            Amf0Value::String(s) => Amf0Value::String(Cow::Owned(s.into_owned())),
            Amf0Value::Object(entries) => {
                Amf0Value::Object(entries.into_iter().map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned())).collect())
            }
            Amf0Value::Null => Amf0Value::Null,
            Amf0Value::Undefined => Amf0Value::Undefined,
            Amf0Value::EcmaArray(entries) => {
                Amf0Value::EcmaArray(entries.into_iter().map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned())).collect())
            }
            Amf0Value::StrictArray(values) => Amf0Value::StrictArray(values.into_iter().map(Amf0Value::into_owned).collect()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Amf0Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Amf0Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key inside an `Object`/`EcmaArray` value.
    pub fn get(&self, key: &str) -> Option<&Amf0Value<'a>> {
        match self {
            Amf0Value::Object(entries) | Amf0Value::EcmaArray(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}
