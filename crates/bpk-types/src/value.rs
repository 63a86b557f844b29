/// One decoded BlazorPack value.
///
/// This is the protocol-agnostic shape of everything that can appear
/// inside a message: scalars, text, raw bytes, and containers. Every
/// MessagePack integer width collapses into [`GenericValue::Integer`],
/// and `float32` is promoted to `f64`.
///
/// Maps are an ordered list of pairs rather than a dictionary: the
/// wire order is kept and duplicate keys are not merged.
///
/// ```text
/// ┌───────────┬─────────────────────────────────────────┐
/// │ Variant   │ Wire formats                            │
/// ├───────────┼─────────────────────────────────────────┤
/// │ Null      │ nil                                     │
/// │ Boolean   │ true, false                             │
/// │ Integer   │ fixint, uint8-64, int8-64               │
/// │ Float     │ float32, float64                        │
/// │ String    │ fixstr, str8-32                         │
/// │ Binary    │ bin8-32                                 │
/// │ Array     │ fixarray, array16, array32              │
/// │ Map       │ fixmap, map16, map32                    │
/// └───────────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum GenericValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<GenericValue>),
    Map(Vec<(GenericValue, GenericValue)>),
}

impl GenericValue {
    /// Short lowercase name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[GenericValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Nesting depth: 0 for scalars, 1 + deepest child for containers.
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Map(pairs) => {
                1 + pairs
                    .iter()
                    .map(|(k, v)| k.depth().max(v.depth()))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl From<bool> for GenericValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for GenericValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for GenericValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for GenericValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&[u8]> for GenericValue {
    fn from(value: &[u8]) -> Self {
        Self::Binary(value.to_vec())
    }
}

impl From<Vec<GenericValue>> for GenericValue {
    fn from(value: Vec<GenericValue>) -> Self {
        Self::Array(value)
    }
}

impl<T: Into<GenericValue>> From<Option<T>> for GenericValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
