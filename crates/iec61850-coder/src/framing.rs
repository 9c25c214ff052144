// crates/iec61850-coder/src/framing.rs

//! BER tag/length framing of composite types on the GSE transport.
//!
//! An encoder writes the tag byte followed by a BER length field; the decoder
//! checks the tag and skips the length field. The helpers at the bottom model
//! the length-field byte layout so both sides can be checked against each
//! other, and emit the C routines the generated code calls.

use crate::assembler::GeneratedFunction;
use crate::coder::{CoderDirective, Direction, TransportKind};
use crate::config::{CoderConfig, FramingMismatchPolicy};
use crate::node::Entity;

/// The framing applied around a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// SV transport, or a dataset on any transport.
    None,
    Encode,
    Decode,
}

impl Framing {
    pub fn for_entity(directive: CoderDirective, entity: &Entity<'_>) -> Self {
        if !directive.transport.is_framed() || entity.is_dataset() {
            return Framing::None;
        }
        match directive.direction {
            Direction::Encode => Framing::Encode,
            Direction::Decode => Framing::Decode,
        }
    }

    /// Text placed after the `offset` declaration.
    pub fn prologue(&self, name: &str, config: &CoderConfig) -> String {
        match self {
            Framing::None => String::new(),
            Framing::Encode => format!(
                "\tbuf[offset++] = 0x{:02X};\n\toffset += {}(&buf[offset], {}{}({}));\n\n",
                config.framing_tag,
                config.length_encoder,
                TransportKind::FramedEvent.length_prefix(),
                name,
                name
            ),
            Framing::Decode => format!(
                "\tif (buf[offset++] == 0x{:02X}) {{\n\t\toffset += {}(buf[offset]);\n\n",
                config.framing_tag, config.length_field_size
            ),
        }
    }

    /// Extra indentation of each item line.
    pub fn item_indent(&self) -> &'static str {
        match self {
            Framing::Decode => "\t",
            _ => "",
        }
    }

    /// Text placed after the last item line.
    pub fn epilogue(&self, config: &CoderConfig) -> String {
        match (self, config.mismatch_policy) {
            (Framing::Decode, FramingMismatchPolicy::ReturnCode(code)) => {
                format!("\t}}\n\telse {{\n\t\treturn {};\n\t}}\n", code)
            }
            (Framing::Decode, FramingMismatchPolicy::FallThrough) => "\t}\n".to_string(),
            _ => String::new(),
        }
    }
}

// --- BER length fields ---

/// Encodes a BER definite length: one byte below 128, otherwise `0x80 | n`
/// followed by `n` big-endian bytes.
pub fn ber_length_encode(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let mut out = Vec::with_capacity(1 + bytes.len() - skip);
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

/// Size of a BER length field, known from its first byte.
pub fn ber_length_field_size(first: u8) -> usize {
    if first & 0x80 != 0 {
        1 + (first & 0x7F) as usize
    } else {
        1
    }
}

/// Bytes an encoder writes before content of `content_len` bytes.
pub fn encoded_prologue(tag: u8, content_len: usize) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(ber_length_encode(content_len));
    out
}

/// Total size of a framed composite whose content is `content_len` bytes:
/// tag byte, length field, content.
pub fn framed_length(content_len: usize) -> usize {
    1 + ber_length_encode(content_len).len() + content_len
}

/// Bytes a decoder consumes before the content, or `None` if the tag does
/// not match or the input is truncated.
pub fn decoded_prologue_size(tag: u8, bytes: &[u8]) -> Option<usize> {
    match bytes {
        [t, first, ..] if *t == tag => {
            let size = 1 + ber_length_field_size(*first);
            (size <= bytes.len()).then_some(size)
        }
        _ => None,
    }
}

// --- C support routines ---

/// The C definitions of the length routines the framed coders call.
pub fn support_routines(config: &CoderConfig) -> Vec<GeneratedFunction> {
    let encoder = GeneratedFunction {
        name: config.length_encoder.clone(),
        arguments: "unsigned char *buf, int len".into(),
        body: concat!(
            "\tint size = 0;\n",
            "\tint tmp = len;\n",
            "\tint i;\n\n",
            "\tif (len < 0x80) {\n",
            "\t\tbuf[0] = (unsigned char) len;\n",
            "\t\treturn 1;\n",
            "\t}\n\n",
            "\twhile (tmp > 0) {\n",
            "\t\tsize++;\n",
            "\t\ttmp >>= 8;\n",
            "\t}\n\n",
            "\tbuf[0] = (unsigned char) (0x80 | size);\n",
            "\tfor (i = 0; i < size; i++) {\n",
            "\t\tbuf[size - i] = (unsigned char) (len >> (8 * i));\n",
            "\t}\n\n",
            "\treturn size + 1;\n",
        )
        .into(),
        return_type: "int".into(),
    };
    let field_size = GeneratedFunction {
        name: config.length_field_size.clone(),
        arguments: "unsigned char firstByte".into(),
        body: concat!(
            "\tif (firstByte & 0x80) {\n",
            "\t\treturn (firstByte & 0x7F) + 1;\n",
            "\t}\n\n",
            "\treturn 1;\n",
        )
        .into(),
        return_type: "int".into(),
    };
    let framed = GeneratedFunction {
        name: config.framed_length.clone(),
        arguments: "int len".into(),
        body: concat!(
            "\tint size = 1;\n",
            "\tint tmp = len;\n\n",
            "\tif (len >= 0x80) {\n",
            "\t\twhile (tmp > 0) {\n",
            "\t\t\tsize++;\n",
            "\t\t\ttmp >>= 8;\n",
            "\t\t}\n",
            "\t}\n\n",
            "\treturn 1 + size + len;\n",
        )
        .into(),
        return_type: "int".into(),
    };
    vec![encoder, field_size, framed]
}
