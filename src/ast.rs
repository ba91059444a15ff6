use miette::SourceSpan;

/// A parsed JSON value together with the byte range it covers in the source.
#[derive(Debug, PartialEq, Clone)]
pub struct JsonValue {
    pub kind: JsonValueKind,
    pub pos_start: usize,
    pub pos_end: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub enum JsonValueKind {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Object(Vec<Member>),
    Array(Vec<JsonValue>),
}

/// One `key: value` property of an object, in source order.
///
/// Later duplicates of a key are kept in the tree so that callers can
/// report them, but lookups through [`JsonValue::get`] always return the
/// first occurrence.
#[derive(Debug, PartialEq, Clone)]
pub struct Member {
    pub key: String,
    pub key_start: usize,
    pub key_end: usize,
    pub value: JsonValue,
    pub duplicate: bool,
}

impl Member {
    pub fn key_span(&self) -> SourceSpan {
        (self.key_start, self.key_end - self.key_start).into()
    }
}

impl JsonValue {
    pub fn get_source_span(&self) -> SourceSpan {
        (self.pos_start, self.pos_end - self.pos_start).into()
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            JsonValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Member]> {
        match &self.kind {
            JsonValueKind::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match &self.kind {
            JsonValueKind::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Looks up a property of an object. The first occurrence of a key wins.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .find(|member| member.key == key)
            .map(|member| &member.value)
    }

    /// Iterates the properties of an object that are not shadowed by an
    /// earlier property with the same key.
    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .filter(|member| !member.duplicate)
    }

    /// A short name for the kind of value, used in diagnostic messages.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            JsonValueKind::String(_) => "string",
            JsonValueKind::Number(_) => "number",
            JsonValueKind::Boolean(_) => "boolean",
            JsonValueKind::Null => "null",
            JsonValueKind::Object(_) => "object",
            JsonValueKind::Array(_) => "array",
        }
    }
}
