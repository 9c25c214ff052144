// crates/iec61850-coder/src/coder.rs

//! The fixed vocabulary of the generator: which wire encoding, which direction,
//! and which function-name prefix the pair selects.

use core::fmt;

/// Selects flat or BER-framed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransportKind {
    /// Sampled Values: fixed-order, unframed.
    FlatMeasurement,
    /// GSE/GOOSE: BER tag-length-value framed.
    FramedEvent,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::FlatMeasurement, TransportKind::FramedEvent];

    /// Prefix of the length-computation function for this transport.
    pub fn length_prefix(self) -> &'static str {
        match self {
            TransportKind::FlatMeasurement => "get_length_",
            TransportKind::FramedEvent => "ber_get_length_",
        }
    }

    pub fn is_framed(self) -> bool {
        self == TransportKind::FramedEvent
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::FlatMeasurement => write!(f, "SV"),
            TransportKind::FramedEvent => write!(f, "GSE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Encode,
    Decode,
}

/// A (transport, direction) pair. Determines the generated function prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoderDirective {
    pub transport: TransportKind,
    pub direction: Direction,
}

impl CoderDirective {
    /// Every combination, decoders before encoders within each transport.
    pub const ALL: [CoderDirective; 4] = [
        CoderDirective::new(TransportKind::FlatMeasurement, Direction::Decode),
        CoderDirective::new(TransportKind::FlatMeasurement, Direction::Encode),
        CoderDirective::new(TransportKind::FramedEvent, Direction::Decode),
        CoderDirective::new(TransportKind::FramedEvent, Direction::Encode),
    ];

    pub const fn new(transport: TransportKind, direction: Direction) -> Self {
        Self {
            transport,
            direction,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match (self.transport, self.direction) {
            (TransportKind::FlatMeasurement, Direction::Decode) => "decode_",
            (TransportKind::FlatMeasurement, Direction::Encode) => "encode_",
            (TransportKind::FramedEvent, Direction::Decode) => "ber_decode_",
            (TransportKind::FramedEvent, Direction::Encode) => "ber_encode_",
        }
    }

    pub fn is_encode(&self) -> bool {
        self.direction == Direction::Encode
    }
}

/// Whether item lines write the payload or only sum its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// Writes through `&buf[offset]` and advances `offset`.
    Normal,
    /// Sums the serialized size into `len`. No buffer is passed.
    LengthOnly,
}

impl EmitMode {
    /// Name of the local variable the item lines accumulate into.
    pub fn accumulator(self) -> &'static str {
        match self {
            EmitMode::Normal => "offset",
            EmitMode::LengthOnly => "len",
        }
    }

    /// The buffer-slice argument that precedes the value pointer.
    pub fn buffer_argument(self) -> &'static str {
        match self {
            EmitMode::Normal => "&buf[offset], ",
            EmitMode::LengthOnly => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_prefixes() {
        let prefixes: Vec<&str> = CoderDirective::ALL.iter().map(|d| d.prefix()).collect();
        assert_eq!(
            prefixes,
            vec!["decode_", "encode_", "ber_decode_", "ber_encode_"]
        );
    }

    #[test]
    fn test_length_prefix_and_framing() {
        assert_eq!(TransportKind::FramedEvent.length_prefix(), "ber_get_length_");
        assert_eq!(TransportKind::FlatMeasurement.length_prefix(), "get_length_");
        assert!(TransportKind::FramedEvent.is_framed());
        assert!(!TransportKind::FlatMeasurement.is_framed());
    }
}
