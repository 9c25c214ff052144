// crates/iec61850-coder/src/config.rs

//! Names and constants baked into the generated C text.

/// What a framed decoder does when the expected tag byte is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingMismatchPolicy {
    /// Emit `else { return <code>; }` after the tagged block.
    ReturnCode(i32),
    /// Skip the block and return the unchanged offset.
    FallThrough,
}

impl Default for FramingMismatchPolicy {
    fn default() -> Self {
        FramingMismatchPolicy::ReturnCode(-1)
    }
}

/// Configuration of the emitted code.
///
/// The defaults match the C support library the generated routines link
/// against (`CTYPE_*` typedefs, `encodeLength`, `getLengthFieldSize`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoderConfig {
    /// Pointer type every enumerated value is cast to.
    pub enum_cast_type: String,
    /// Type of the sample-count parameter of SV dataset decoders.
    pub sample_count_type: String,
    /// Name of the sample-count parameter of SV dataset decoders.
    pub sample_count_name: String,
    /// BER tag written before a framed composite.
    pub framing_tag: u8,
    /// Routine writing a BER length field: `int f(unsigned char *buf, int len)`.
    pub length_encoder: String,
    /// Routine returning the size of a BER length field from its first byte.
    pub length_field_size: String,
    /// Routine returning the full framed size (tag, length field and content)
    /// of a nested composite from its content length.
    pub framed_length: String,
    pub mismatch_policy: FramingMismatchPolicy,
    /// Return type of every generated coder.
    pub return_type: String,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            enum_cast_type: "CTYPE_ENUM".into(),
            sample_count_type: "CTYPE_INT16U".into(),
            sample_count_name: "smpCnt".into(),
            framing_tag: 0xA2,
            length_encoder: "encodeLength".into(),
            length_field_size: "getLengthFieldSize".into(),
            framed_length: "getFramedLength".into(),
            mismatch_policy: FramingMismatchPolicy::default(),
            return_type: "int".into(),
        }
    }
}

impl CoderConfig {
    pub fn with_enum_cast_type(mut self, ty: impl Into<String>) -> Self {
        self.enum_cast_type = ty.into();
        self
    }

    pub fn with_sample_count(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.sample_count_type = ty.into();
        self.sample_count_name = name.into();
        self
    }

    pub fn with_framing_tag(mut self, tag: u8) -> Self {
        self.framing_tag = tag;
        self
    }

    pub fn with_length_routines(
        mut self,
        encoder: impl Into<String>,
        field_size: impl Into<String>,
    ) -> Self {
        self.length_encoder = encoder.into();
        self.length_field_size = field_size.into();
        self
    }

    pub fn with_framed_length(mut self, name: impl Into<String>) -> Self {
        self.framed_length = name.into();
        self
    }

    pub fn with_mismatch_policy(mut self, policy: FramingMismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    pub fn with_return_type(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    /// The cast placed before the address of an enumerated value.
    pub fn enum_cast(&self) -> String {
        format!("({} *) ", self.enum_cast_type)
    }
}
