// crates/iec61850-coder/src/emit.rs

//! Emits one line of C per attribute: a call to the matching coder routine
//! that advances the accumulator.

use crate::classify::{Classification, classify, classify_member};
use crate::coder::{CoderDirective, Direction, EmitMode};
use crate::config::{CoderConfig, FramingMismatchPolicy};
use crate::containment::ContainmentIndex;
use crate::error::CoderError;
use crate::mapping::TypeMapping;
use crate::node::AttributeNode;
use crate::path::resolve_source_path;
use iec61850_scl::Fcda;

/// A child of the entity being generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'a> {
    /// An SDO, DA or BDA of a composite type.
    Attribute(AttributeNode<'a>),
    /// A member of a dataset.
    Member(&'a Fcda),
}

/// Everything an item line depends on besides the item itself.
pub struct EmitContext<'c> {
    pub directive: CoderDirective,
    pub mode: EmitMode,
    /// The identifier of the enclosing struct argument.
    pub source: &'c str,
    pub mapping: &'c dyn TypeMapping,
    pub index: &'c ContainmentIndex<'c>,
    pub config: &'c CoderConfig,
}

impl EmitContext<'_> {
    /// The coder prefix before case adjustment.
    fn coder_prefix(&self) -> &'static str {
        match self.mode {
            EmitMode::Normal => self.directive.prefix(),
            EmitMode::LengthOnly => self.directive.transport.length_prefix(),
        }
    }
}

/// The parts of an item line that depend on what the item is.
struct Operand {
    classification: Classification,
    token: String,
    source: String,
    linker: &'static str,
    member: String,
}

impl Item<'_> {
    fn operand(&self, ctx: &EmitContext<'_>) -> Result<Operand, CoderError> {
        match self {
            Item::Attribute(node) => Ok(Operand {
                classification: classify(node)?,
                token: ctx.mapping.coder_type_of(node)?,
                source: ctx.source.to_string(),
                linker: "->",
                member: ctx.mapping.variable_name_of(node)?,
            }),
            Item::Member(fcda) => {
                let classification = classify_member(fcda, ctx.mapping)?;
                let token = ctx.mapping.member_coder_type_of(fcda)?;
                if ctx.directive.is_encode() {
                    // Encoders read the value from the data model itself.
                    let path = resolve_source_path(fcda, ctx.index, ctx.mapping)?;
                    Ok(Operand {
                        classification,
                        token,
                        source: path.source,
                        linker: ".",
                        member: path.member,
                    })
                } else {
                    Ok(Operand {
                        classification,
                        token,
                        source: ctx.source.to_string(),
                        linker: "->",
                        member: ctx.mapping.member_variable_name_of(fcda)?,
                    })
                }
            }
        }
    }
}

/// Emits the line for one item, terminated by a newline and indented by one tab.
///
/// The coder case rule is the same on every transport: scalar and enumerated
/// values call the upper-case family (`DECODE_CTYPE_BOOLEAN`,
/// `BER_ENCODE_CTYPE_BOOLEAN`), structured values the lower-case generated
/// coder (`ber_encode_Vector`).
///
/// On the framed transport a structured value carries its own tag and length
/// field. Its length is therefore counted through the configured framed-length
/// routine, and under [`FramingMismatchPolicy::ReturnCode`] a negative result
/// of its decoder is returned to the caller instead of being added to `offset`.
pub fn emit_item(item: &Item<'_>, ctx: &EmitContext<'_>) -> Result<String, CoderError> {
    let operand = item.operand(ctx)?;

    // Scalars select the upper-case coder family.
    let coder = if operand.classification.is_basic() {
        ctx.coder_prefix().to_uppercase()
    } else {
        ctx.coder_prefix().to_string()
    };
    let cast = if operand.classification.is_enumerated() {
        ctx.config.enum_cast()
    } else {
        String::new()
    };

    let call = format!(
        "{}{}({}{}&{}{}{})",
        coder,
        operand.token,
        ctx.mode.buffer_argument(),
        cast,
        operand.source,
        operand.linker,
        operand.member
    );
    let acc = ctx.mode.accumulator();

    let nested_frame = ctx.directive.transport.is_framed() && !operand.classification.is_basic();
    if nested_frame {
        match (ctx.mode, ctx.directive.direction, ctx.config.mismatch_policy) {
            (EmitMode::LengthOnly, _, _) => {
                return Ok(format!("\t{} += {}({});\n", acc, ctx.config.framed_length, call));
            }
            (EmitMode::Normal, Direction::Decode, FramingMismatchPolicy::ReturnCode(_)) => {
                return Ok(format!(
                    "\t{{ int r = {}; if (r < 0) return r; {} += r; }}\n",
                    call, acc
                ));
            }
            _ => {}
        }
    }

    Ok(format!("\t{} += {};\n", acc, call))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::{Direction, TransportKind};
    use crate::mapping::StandardTypeMapping;
    use iec61850_scl::{BasicDataAttribute, BasicType, SclFile, load_scl_from_str};

    fn context<'c>(
        directive: CoderDirective,
        mode: EmitMode,
        mapping: &'c dyn TypeMapping,
        index: &'c ContainmentIndex<'c>,
        config: &'c CoderConfig,
    ) -> EmitContext<'c> {
        EmitContext {
            directive,
            mode,
            source: "Vector",
            mapping,
            index,
            config,
        }
    }

    #[test]
    fn test_struct_and_scalar_lines() {
        let scl = SclFile::default();
        let index = ContainmentIndex::new();
        let mapping = StandardTypeMapping::new(&scl, &index);
        let config = CoderConfig::default();
        let mag = BasicDataAttribute {
            name: "mag".into(),
            b_type: BasicType::Struct,
            type_id: Some("AnalogueValue".into()),
            count: 0,
        };
        let f = BasicDataAttribute {
            name: "f".into(),
            b_type: BasicType::Float32,
            ..Default::default()
        };
        let ctx = context(
            CoderDirective::new(TransportKind::FramedEvent, Direction::Encode),
            EmitMode::Normal,
            &mapping,
            &index,
            &config,
        );

        let line = emit_item(&Item::Attribute(AttributeNode::BasicDataAttribute(&mag)), &ctx).unwrap();
        assert_eq!(
            line,
            "\toffset += ber_encode_AnalogueValue(&buf[offset], &Vector->mag);\n"
        );
        let line = emit_item(&Item::Attribute(AttributeNode::BasicDataAttribute(&f)), &ctx).unwrap();
        assert_eq!(
            line,
            "\toffset += BER_ENCODE_CTYPE_FLOAT32(&buf[offset], &Vector->f);\n"
        );
    }

    #[test]
    fn test_length_only_line() {
        let scl = SclFile::default();
        let index = ContainmentIndex::new();
        let mapping = StandardTypeMapping::new(&scl, &index);
        let config = CoderConfig::default();
        let mag = BasicDataAttribute {
            name: "mag".into(),
            b_type: BasicType::Struct,
            type_id: Some("AnalogueValue".into()),
            count: 0,
        };
        let ctx = context(
            CoderDirective::new(TransportKind::FramedEvent, Direction::Encode),
            EmitMode::LengthOnly,
            &mapping,
            &index,
            &config,
        );
        // A nested composite brings its own tag and length field.
        let line = emit_item(&Item::Attribute(AttributeNode::BasicDataAttribute(&mag)), &ctx).unwrap();
        assert_eq!(
            line,
            "\tlen += getFramedLength(ber_get_length_AnalogueValue(&Vector->mag));\n"
        );

        let f = BasicDataAttribute {
            name: "f".into(),
            b_type: BasicType::Float32,
            ..Default::default()
        };
        let line = emit_item(&Item::Attribute(AttributeNode::BasicDataAttribute(&f)), &ctx).unwrap();
        assert_eq!(line, "\tlen += BER_GET_LENGTH_CTYPE_FLOAT32(&Vector->f);\n");
    }

    #[test]
    fn test_framed_struct_decode_propagates_errors() {
        let scl = SclFile::default();
        let index = ContainmentIndex::new();
        let mapping = StandardTypeMapping::new(&scl, &index);
        let mag = BasicDataAttribute {
            name: "mag".into(),
            b_type: BasicType::Struct,
            type_id: Some("AnalogueValue".into()),
            count: 0,
        };
        let item = Item::Attribute(AttributeNode::BasicDataAttribute(&mag));
        let framed = CoderDirective::new(TransportKind::FramedEvent, Direction::Decode);

        let config = CoderConfig::default();
        let ctx = context(framed, EmitMode::Normal, &mapping, &index, &config);
        assert_eq!(
            emit_item(&item, &ctx).unwrap(),
            "\t{ int r = ber_decode_AnalogueValue(&buf[offset], &Vector->mag); if (r < 0) return r; offset += r; }\n"
        );

        let config = CoderConfig::default().with_mismatch_policy(FramingMismatchPolicy::FallThrough);
        let ctx = context(framed, EmitMode::Normal, &mapping, &index, &config);
        assert_eq!(
            emit_item(&item, &ctx).unwrap(),
            "\toffset += ber_decode_AnalogueValue(&buf[offset], &Vector->mag);\n"
        );

        // Flat decoders have no framing to fail on.
        let config = CoderConfig::default();
        let flat = CoderDirective::new(TransportKind::FlatMeasurement, Direction::Decode);
        let ctx = context(flat, EmitMode::Normal, &mapping, &index, &config);
        assert_eq!(
            emit_item(&item, &ctx).unwrap(),
            "\toffset += decode_AnalogueValue(&buf[offset], &Vector->mag);\n"
        );
    }

    #[test]
    fn test_enumerated_cast() {
        let scl = SclFile::default();
        let index = ContainmentIndex::new();
        let mapping = StandardTypeMapping::new(&scl, &index);
        let config = CoderConfig::default();
        let beh = BasicDataAttribute {
            name: "stVal".into(),
            b_type: BasicType::Enum,
            type_id: Some("Beh".into()),
            count: 0,
        };
        let ctx = context(
            CoderDirective::new(TransportKind::FlatMeasurement, Direction::Decode),
            EmitMode::Normal,
            &mapping,
            &index,
            &config,
        );
        let line = emit_item(&Item::Attribute(AttributeNode::BasicDataAttribute(&beh)), &ctx).unwrap();
        assert_eq!(
            line,
            "\toffset += DECODE_CTYPE_ENUM(&buf[offset], (CTYPE_ENUM *) &Vector->stVal);\n"
        );
    }

    #[test]
    fn test_dataset_member_lines() {
        let scl = load_scl_from_str(include_str!("../tests/data/protection.scd")).unwrap();
        let index = ContainmentIndex::build(&scl);
        let mapping = StandardTypeMapping::new(&scl, &index);
        let config = CoderConfig::default();
        let positions = scl.ieds[0].access_points[0].server.as_ref().unwrap().logical_devices[0]
            .ln0
            .as_ref()
            .unwrap()
            .data_set("Positions")
            .unwrap();
        let stval = Item::Member(&positions.members[0]);
        let whole_do = Item::Member(&positions.members[2]);

        let mut ctx = context(
            CoderDirective::new(TransportKind::FramedEvent, Direction::Encode),
            EmitMode::Normal,
            &mapping,
            &index,
            &config,
        );
        ctx.source = "Positions";
        assert_eq!(
            emit_item(&stval, &ctx).unwrap(),
            "\toffset += BER_ENCODE_CTYPE_DBPOS(&buf[offset], &IED1.AP1.C1.XCBR_T_1.Pos.stVal);\n"
        );
        assert_eq!(
            emit_item(&whole_do, &ctx).unwrap(),
            "\toffset += ber_encode_MV_T(&buf[offset], &IED1.AP1.C1.MMXU_T_1.TotW);\n"
        );

        ctx.directive = CoderDirective::new(TransportKind::FramedEvent, Direction::Decode);
        assert_eq!(
            emit_item(&stval, &ctx).unwrap(),
            "\toffset += BER_DECODE_CTYPE_DBPOS(&buf[offset], &Positions->C1_XCBR1_Pos_stVal);\n"
        );
    }
}
