// Path: crates/types/src/field/mod.rs
//! Field specifications and the two-level (mode, variant) generation strategy.
//!
//! Modes and variants are parsed from their display labels only at the table
//! boundary; everything downstream matches on the enums.

use std::fmt;
use std::str::FromStr;

/// Generates a fieldless enum with a fixed display label per variant, plus
/// `as_str`, `ALL`, `Display` and `FromStr`.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The display label of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

labelled_enum! {
    /// Sub-strategies for literal form input.
    FormVariant {
        /// Parse by declared type and emit.
        AsIs => "as is",
        /// Parse a decimal FIO amount and convert to SUF.
        FioToSuf => "FIO -> suf",
        /// Pass a JSON fragment through unchanged.
        JsonToStruct => "json -> struct",
        /// Decode base64 into bytes.
        Base64ToBytes => "base64 -> byte[]",
        /// SHA-256 hex digest of the input.
        Checksum256 => "checksum256",
        /// An invalid address at the domain given as input.
        InvalidAddress => "fio address@ (invalid)",
        /// A valid random address at the domain given as input.
        ValidAddress => "fio address@ (valid)",
        /// A maximum-length address at the domain given as input.
        MaxAddress => "fio address@ (valid, max size)",
        /// Decode hex into bytes.
        HexToBytes => "hex -> byte[]",
        /// Sign the SHA-256 digest of the input with the signer's key.
        Signature => "signature",
    }
}

labelled_enum! {
    /// Sub-strategies for actor and public-key derived fields.
    IdentityVariant {
        /// The signer's own value.
        Mine => "mine",
        /// A freshly generated value.
        Random => "random",
    }
}

labelled_enum! {
    /// Sub-strategies for numeric generators.
    NumericVariant {
        /// A process-wide float counter.
        IncrementingFloat => "incrementing float",
        /// A process-wide integer counter.
        IncrementingInt => "incrementing int",
        /// A random float of the selected width.
        RandomFloat => "random float",
        /// A random integer of the selected width.
        RandomInt => "random int",
        /// The smallest value overflowing the selected width.
        OverflowInt => "overflow int",
        /// A random width, signedness and kind.
        Mixed => "random number (mixed)",
        /// The maximum value of a named integer type.
        MaxInt => "max int",
    }
}

labelled_enum! {
    /// Sub-strategies for random strings and byte buffers.
    BytesVariant {
        /// Raw random bytes.
        Raw => "bytes",
        /// Random bytes, base64 encoded.
        Base64 => "bytes: base64 encoded",
        /// Random bytes, hex encoded.
        Hex => "bytes: hex encoded",
        /// The checksum of a random string.
        Checksum => "random checksum",
        /// A random lowercase string.
        Text => "string",
    }
}

labelled_enum! {
    /// Sub-strategies for FIO-specific boundary values.
    FioVariant {
        /// A domain with one injected bad character.
        InvalidDomain => "invalid fio domain",
        /// A valid random domain.
        ValidDomain => "valid fio domain",
        /// A domain of exactly the maximum length.
        MaxDomain => "valid fio domain (max size)",
        /// Maximum-size content for `newfundsreq`.
        MaxNewFundsContent => "max length: newfundsreq.content",
        /// Maximum-size content for `recordobt`.
        MaxRecordObtContent => "max length: recordobt.content",
        /// Maximum-size URL for `regproducer`.
        MaxProducerUrl => "max length: regproducer.url",
        /// Maximum producer list for `voteproducer`.
        MaxVoteProducers => "max length: voteproducer.producers",
        /// Maximum address list for `addaddress`.
        MaxAddAddress => "max length: addaddress.public_addresses",
        /// An address list whose length is the length selector.
        VariableAddAddress => "variable length: addaddress.public_addresses",
        /// A random address already registered on chain.
        ExistingAddress => "random existing fio address",
    }
}

labelled_enum! {
    /// Named integer wire types.
    IntType {
        /// Signed 8-bit.
        Int8 => "int8",
        /// Signed 16-bit.
        Int16 => "int16",
        /// Signed 32-bit.
        Int32 => "int32",
        /// Signed 64-bit.
        Int64 => "int64",
        /// Unsigned 8-bit.
        Uint8 => "uint8",
        /// Unsigned 16-bit.
        Uint16 => "uint16",
        /// Unsigned 32-bit.
        Uint32 => "uint32",
        /// Unsigned 64-bit.
        Uint64 => "uint64",
    }
}

impl IntType {
    /// Builds the type from a width and signedness, if the width is supported.
    pub fn from_width(bits: u32, signed: bool) -> Option<Self> {
        Some(match (bits, signed) {
            (8, true) => Self::Int8,
            (16, true) => Self::Int16,
            (32, true) => Self::Int32,
            (64, true) => Self::Int64,
            (8, false) => Self::Uint8,
            (16, false) => Self::Uint16,
            (32, false) => Self::Uint32,
            (64, false) => Self::Uint64,
            _ => return None,
        })
    }

    /// Bit width.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Int8 | Self::Uint8 => 8,
            Self::Int16 | Self::Uint16 => 16,
            Self::Int32 | Self::Uint32 => 32,
            Self::Int64 | Self::Uint64 => 64,
        }
    }

    /// Whether the type is signed.
    pub fn signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// The maximum representable value, as decimal text.
    pub fn max_value(&self) -> String {
        match self {
            Self::Int8 => i8::MAX.to_string(),
            Self::Int16 => i16::MAX.to_string(),
            Self::Int32 => i32::MAX.to_string(),
            Self::Int64 => i64::MAX.to_string(),
            Self::Uint8 => u8::MAX.to_string(),
            Self::Uint16 => u16::MAX.to_string(),
            Self::Uint32 => u32::MAX.to_string(),
            Self::Uint64 => u64::MAX.to_string(),
        }
    }
}

/// Label used for the random-length byte selector.
pub const RANDOM_LENGTH_LABEL: &str = "random length";

/// Size or width parameter for a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthSelector {
    /// A byte length, bit width or element count.
    Count(usize),
    /// A random byte length chosen at resolution time.
    Random,
    /// A named integer type, used by the max-int variant.
    IntType(IntType),
}

impl FromStr for LengthSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == RANDOM_LENGTH_LABEL {
            return Ok(Self::Random);
        }
        if let Ok(t) = s.parse::<IntType>() {
            return Ok(Self::IntType(t));
        }
        s.replace(',', "")
            .parse::<usize>()
            .map(Self::Count)
            .map_err(|_| format!("invalid length selector '{s}'"))
    }
}

impl fmt::Display for LengthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Random => f.write_str(RANDOM_LENGTH_LABEL),
            Self::IntType(t) => f.write_str(t.as_str()),
        }
    }
}

/// How a field's value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Literal input from the operator.
    FormValue(FormVariant),
    /// The signer's actor, or a random one.
    ActorDerived(IdentityVariant),
    /// The signer's public key, or a random one.
    PubKeyDerived(IdentityVariant),
    /// A numeric generator.
    NumericGenerator(NumericVariant),
    /// A random string or byte buffer.
    BytesGenerator(BytesVariant),
    /// A FIO-specific boundary value.
    FioTypeGenerator(FioVariant),
}

impl Default for GenerationMode {
    fn default() -> Self {
        Self::FormValue(FormVariant::AsIs)
    }
}

impl GenerationMode {
    /// Display labels of the modes, in menu order.
    pub const MODE_LABELS: &'static [&'static str] = &[
        "form value",
        "actor",
        "pub key",
        "fio types",
        "number",
        "bytes/string",
    ];

    /// Parses a (mode, variant) label pair.
    pub fn from_labels(mode: &str, variant: &str) -> Result<Self, String> {
        Ok(match mode {
            "form value" => Self::FormValue(variant.parse()?),
            "actor" => Self::ActorDerived(variant.parse()?),
            "pub key" => Self::PubKeyDerived(variant.parse()?),
            "fio types" => Self::FioTypeGenerator(variant.parse()?),
            "number" => Self::NumericGenerator(variant.parse()?),
            "bytes/string" => Self::BytesGenerator(variant.parse()?),
            other => return Err(format!("unknown generation mode '{other}'")),
        })
    }

    /// The display label of the mode.
    pub fn mode_label(&self) -> &'static str {
        match self {
            Self::FormValue(_) => "form value",
            Self::ActorDerived(_) => "actor",
            Self::PubKeyDerived(_) => "pub key",
            Self::FioTypeGenerator(_) => "fio types",
            Self::NumericGenerator(_) => "number",
            Self::BytesGenerator(_) => "bytes/string",
        }
    }

    /// The display label of the variant.
    pub fn variant_label(&self) -> &'static str {
        match self {
            Self::FormValue(v) => v.as_str(),
            Self::ActorDerived(v) | Self::PubKeyDerived(v) => v.as_str(),
            Self::NumericGenerator(v) => v.as_str(),
            Self::BytesGenerator(v) => v.as_str(),
            Self::FioTypeGenerator(v) => v.as_str(),
        }
    }
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A float.
    Float(f64),
    /// Text, escaped on output unless the field is emitted raw.
    Text(String),
    /// Binary data, rendered as lowercase hex.
    Bytes(Vec<u8>),
    /// A JSON fragment emitted verbatim.
    Raw(String),
    /// A list of strings rendered as a JSON array.
    List(Vec<String>),
}

impl FieldValue {
    /// Renders the value as a JSON fragment.
    ///
    /// Numbers are bare when `emit_raw` is set and quoted otherwise, which is
    /// how a numeric generator targets a `string` field.
    pub fn to_json_fragment(&self, emit_raw: bool) -> String {
        let quoted = |s: &str| serde_json::Value::String(s.to_string()).to_string();
        match self {
            Self::Int(i) if emit_raw => i.to_string(),
            Self::Int(i) => quoted(&i.to_string()),
            Self::Uint(u) if emit_raw => u.to_string(),
            Self::Uint(u) => quoted(&u.to_string()),
            Self::Float(f) => {
                let text = render_float(*f);
                if emit_raw {
                    text
                } else {
                    quoted(&text)
                }
            }
            Self::Text(s) if emit_raw => s.clone(),
            Self::Text(s) => quoted(s),
            Self::Bytes(b) => quoted(&hex::encode(b)),
            Self::Raw(s) => s.clone(),
            Self::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            )
            .to_string(),
        }
    }

    /// A short human-readable form used in previews and logs.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Raw(s) => s.clone(),
            Self::Bytes(b) => hex::encode(b),
            other => other.to_json_fragment(true),
        }
    }
}

/// Renders a float as a valid JSON number; non-finite values become zero.
fn render_float(f: f64) -> String {
    if f.is_finite() {
        format!("{f}")
    } else {
        "0".to_string()
    }
}

/// Returns true for declared types that name an array.
pub fn is_slice_type(declared_type: &str) -> bool {
    declared_type.ends_with("[]")
}

/// Per-field generation configuration and resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// The field name, unique within its table.
    pub name: String,
    /// The declared wire type, used as the display label.
    pub declared_type: String,
    /// An encoding type that wins over `declared_type` when set.
    pub type_override: Option<String>,
    /// The generation strategy.
    pub mode: GenerationMode,
    /// Optional size, width or integer type.
    pub length: Option<LengthSelector>,
    /// Literal input for form values, and the domain for address variants.
    pub raw_input: String,
    /// The resolved value; `None` until resolution has run.
    pub value: Option<FieldValue>,
    /// Resolved elements for slice fields.
    pub values: Vec<String>,
    /// Whether the declared type is an array.
    pub is_slice: bool,
    /// Emit the value unescaped.
    pub emit_raw: bool,
    /// Position within the action's field list.
    pub order: usize,
}

impl FieldSpec {
    /// Creates an unresolved form-value field.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, order: usize) -> Self {
        let declared_type = declared_type.into();
        Self {
            name: name.into(),
            is_slice: is_slice_type(&declared_type),
            declared_type,
            type_override: None,
            mode: GenerationMode::default(),
            length: None,
            raw_input: String::new(),
            value: None,
            values: Vec::new(),
            emit_raw: false,
            order,
        }
    }

    /// The type used for encoding.
    pub fn effective_type(&self) -> &str {
        self.type_override.as_deref().unwrap_or(&self.declared_type)
    }
}
