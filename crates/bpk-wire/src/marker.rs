/// MessagePack format bytes used by BlazorPack.
///
/// Fixed-range families (fixint, fixstr, fixarray, fixmap) are
/// identified by masks rather than single bytes; see [`Marker::from_byte`].
pub mod tag {
    pub const NIL: u8 = 0xC0;
    pub const NEVER_USED: u8 = 0xC1;
    pub const FALSE: u8 = 0xC2;
    pub const TRUE: u8 = 0xC3;
    pub const BIN8: u8 = 0xC4;
    pub const BIN16: u8 = 0xC5;
    pub const BIN32: u8 = 0xC6;
    pub const FLOAT32: u8 = 0xCA;
    pub const FLOAT64: u8 = 0xCB;
    pub const UINT8: u8 = 0xCC;
    pub const UINT16: u8 = 0xCD;
    pub const UINT32: u8 = 0xCE;
    pub const UINT64: u8 = 0xCF;
    pub const INT8: u8 = 0xD0;
    pub const INT16: u8 = 0xD1;
    pub const INT32: u8 = 0xD2;
    pub const INT64: u8 = 0xD3;
    pub const STR8: u8 = 0xD9;
    pub const STR16: u8 = 0xDA;
    pub const STR32: u8 = 0xDB;
    pub const ARRAY16: u8 = 0xDC;
    pub const ARRAY32: u8 = 0xDD;
    pub const MAP16: u8 = 0xDE;
    pub const MAP32: u8 = 0xDF;

    pub const FIXMAP: u8 = 0x80;
    pub const FIXARRAY: u8 = 0x90;
    pub const FIXSTR: u8 = 0xA0;
    pub const NEGATIVE_FIXINT: u8 = 0xE0;

    /// Largest element count a fixarray/fixmap header can carry.
    pub const FIX_CONTAINER_MAX: usize = 15;
    /// Largest byte length a fixstr header can carry.
    pub const FIXSTR_MAX: usize = 31;
}

/// A classified MessagePack type byte.
///
/// The `Fix*` variants carry the length or value packed into the
/// marker byte itself. Everything BlazorPack never emits (the ext
/// families and `0xC1`) lands in [`Marker::Unsupported`].
///
/// ```text
/// ┌───────────┬──────────────────────────────┐
/// │ Byte      │ Marker                       │
/// ├───────────┼──────────────────────────────┤
/// │ 0x00-0x7F │ PositiveFixInt(value)        │
/// │ 0x80-0x8F │ FixMap(pairs)                │
/// │ 0x90-0x9F │ FixArray(elements)           │
/// │ 0xA0-0xBF │ FixStr(bytes)                │
/// │ 0xC0-0xDF │ Nil, Bool, Bin*, Float*, ... │
/// │ 0xE0-0xFF │ NegativeFixInt(value)        │
/// └───────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    PositiveFixInt(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
    NegativeFixInt(i8),
    Unsupported(u8),
}

impl Marker {
    /// Classify a raw type byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00..=0x7F => Self::PositiveFixInt(byte),
            0x80..=0x8F => Self::FixMap(byte & 0x0F),
            0x90..=0x9F => Self::FixArray(byte & 0x0F),
            0xA0..=0xBF => Self::FixStr(byte & 0x1F),
            tag::NIL => Self::Nil,
            tag::FALSE => Self::False,
            tag::TRUE => Self::True,
            tag::BIN8 => Self::Bin8,
            tag::BIN16 => Self::Bin16,
            tag::BIN32 => Self::Bin32,
            tag::FLOAT32 => Self::Float32,
            tag::FLOAT64 => Self::Float64,
            tag::UINT8 => Self::Uint8,
            tag::UINT16 => Self::Uint16,
            tag::UINT32 => Self::Uint32,
            tag::UINT64 => Self::Uint64,
            tag::INT8 => Self::Int8,
            tag::INT16 => Self::Int16,
            tag::INT32 => Self::Int32,
            tag::INT64 => Self::Int64,
            tag::STR8 => Self::Str8,
            tag::STR16 => Self::Str16,
            tag::STR32 => Self::Str32,
            tag::ARRAY16 => Self::Array16,
            tag::ARRAY32 => Self::Array32,
            tag::MAP16 => Self::Map16,
            tag::MAP32 => Self::Map32,
            0xE0..=0xFF => Self::NegativeFixInt(byte as i8),
            other => Self::Unsupported(other),
        }
    }

    /// Short format name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::PositiveFixInt(_) => "positive fixint",
            Self::FixMap(_) => "fixmap",
            Self::FixArray(_) => "fixarray",
            Self::FixStr(_) => "fixstr",
            Self::Nil => "nil",
            Self::False => "false",
            Self::True => "true",
            Self::Bin8 => "bin8",
            Self::Bin16 => "bin16",
            Self::Bin32 => "bin32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Str8 => "str8",
            Self::Str16 => "str16",
            Self::Str32 => "str32",
            Self::Array16 => "array16",
            Self::Array32 => "array32",
            Self::Map16 => "map16",
            Self::Map32 => "map32",
            Self::NegativeFixInt(_) => "negative fixint",
            Self::Unsupported(_) => "unsupported",
        }
    }
}
