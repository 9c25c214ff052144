// crates/iec61850-coder/src/assembler.rs

//! Assembles complete generated functions: name, argument list and body.

use crate::coder::{CoderDirective, Direction, EmitMode, TransportKind};
use crate::config::CoderConfig;
use crate::containment::ContainmentIndex;
use crate::emit::{EmitContext, Item, emit_item};
use crate::error::CoderError;
use crate::framing::Framing;
use crate::mapping::TypeMapping;
use crate::naming::NamingContext;
use crate::node::Entity;
use core::fmt::Write;
use iec61850_scl::DataSet;

/// One generated C function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    pub name: String,
    /// The parameter list without parentheses.
    pub arguments: String,
    /// The statements between the braces, each line ending in `\n`.
    pub body: String,
    pub return_type: String,
}

impl GeneratedFunction {
    /// `int name(args);`
    pub fn prototype(&self) -> String {
        format!("{} {}({});", self.return_type, self.name, self.arguments)
    }

    pub fn definition(&self) -> String {
        format!(
            "{} {}({}) {{\n{}}}\n",
            self.return_type, self.name, self.arguments, self.body
        )
    }
}

/// Builds functions for composite types and datasets.
pub struct FunctionAssembler<'c> {
    mapping: &'c dyn TypeMapping,
    index: &'c ContainmentIndex<'c>,
    naming: &'c NamingContext,
    config: &'c CoderConfig,
}

impl<'c> FunctionAssembler<'c> {
    pub fn new(
        mapping: &'c dyn TypeMapping,
        index: &'c ContainmentIndex<'c>,
        naming: &'c NamingContext,
        config: &'c CoderConfig,
    ) -> Self {
        Self {
            mapping,
            index,
            naming,
            config,
        }
    }

    /// The type id of a composite, or the canonical name of a dataset.
    pub fn name_of(&self, entity: &Entity<'_>) -> Result<String, CoderError> {
        match entity {
            Entity::Composite(c) => Ok(c.id().to_string()),
            Entity::Dataset(ds) => self.naming.canonical_name(ds),
        }
    }

    pub fn function_name_of(
        &self,
        entity: &Entity<'_>,
        directive: CoderDirective,
    ) -> Result<String, CoderError> {
        Ok(format!("{}{}", directive.prefix(), self.name_of(entity)?))
    }

    pub fn arguments_of(
        &self,
        entity: &Entity<'_>,
        directive: CoderDirective,
    ) -> Result<String, CoderError> {
        let name = self.name_of(entity)?;
        let args = match (entity, directive.transport, directive.direction) {
            (Entity::Composite(_), _, _) => format!("unsigned char *buf, struct {} *{}", name, name),
            (Entity::Dataset(_), TransportKind::FlatMeasurement, Direction::Decode) => format!(
                "unsigned char *buf, {} {}, struct {} *{}",
                self.config.sample_count_type, self.config.sample_count_name, name, name
            ),
            (Entity::Dataset(_), TransportKind::FramedEvent, Direction::Decode) => {
                format!("unsigned char *buf, struct {} *{}", name, name)
            }
            (Entity::Dataset(_), _, Direction::Encode) => "unsigned char *buf".to_string(),
        };
        Ok(args)
    }

    fn items<'e>(entity: &Entity<'e>) -> Vec<Item<'e>> {
        match entity {
            Entity::Composite(c) => c.children().into_iter().map(Item::Attribute).collect(),
            Entity::Dataset(ds) => ds.members.iter().map(Item::Member).collect(),
        }
    }

    fn context<'s>(&'s self, directive: CoderDirective, mode: EmitMode, source: &'s str) -> EmitContext<'s> {
        EmitContext {
            directive,
            mode,
            source,
            mapping: self.mapping,
            index: self.index,
            config: self.config,
        }
    }

    /// The body of the coder for `entity` under `directive`.
    pub fn body_of(&self, entity: &Entity<'_>, directive: CoderDirective) -> Result<String, CoderError> {
        let name = self.name_of(entity)?;
        let framing = Framing::for_entity(directive, entity);
        let ctx = self.context(directive, EmitMode::Normal, &name);

        let mut body = String::from("\tint offset = 0;\n\n");
        body.push_str(&framing.prologue(&name, self.config));
        for item in Self::items(entity) {
            body.push_str(framing.item_indent());
            body.push_str(&emit_item(&item, &ctx)?);
        }
        body.push_str(&framing.epilogue(self.config));
        body.push_str("\n\treturn offset;\n");
        Ok(body)
    }

    pub fn assemble(
        &self,
        entity: &Entity<'_>,
        directive: CoderDirective,
    ) -> Result<GeneratedFunction, CoderError> {
        Ok(GeneratedFunction {
            name: self.function_name_of(entity, directive)?,
            arguments: self.arguments_of(entity, directive)?,
            body: self.body_of(entity, directive)?,
            return_type: self.config.return_type.clone(),
        })
    }

    /// The sibling function returning the serialized content size of `entity`,
    /// called by the framed encoder's length field. Only the framed transport
    /// has length fields, so only it gets length functions.
    pub fn assemble_length(&self, entity: &Entity<'_>) -> Result<GeneratedFunction, CoderError> {
        let name = self.name_of(entity)?;
        let transport = TransportKind::FramedEvent;
        // Sizes are taken on the encoding side.
        let directive = CoderDirective::new(transport, Direction::Encode);
        let ctx = self.context(directive, EmitMode::LengthOnly, &name);

        let mut body = String::from("\tint len = 0;\n\n");
        for item in Self::items(entity) {
            body.push_str(&emit_item(&item, &ctx)?);
        }
        body.push_str("\n\treturn len;\n");

        let arguments = match entity {
            Entity::Composite(_) => format!("struct {} *{}", name, name),
            Entity::Dataset(_) => "void".to_string(),
        };

        Ok(GeneratedFunction {
            name: format!("{}{}", transport.length_prefix(), name),
            arguments,
            body,
            return_type: self.config.return_type.clone(),
        })
    }

    /// The C struct a dataset decodes into: one member per FCDA, in order.
    pub fn dataset_struct(&self, ds: &DataSet) -> Result<String, CoderError> {
        let name = self.naming.canonical_name(ds)?;
        let mut out = String::new();
        writeln!(out, "struct {} {{", name)?;
        for fcda in &ds.members {
            writeln!(
                out,
                "\t{} {};",
                self.mapping.printed_type_of(fcda)?,
                self.mapping.member_variable_name_of(fcda)?
            )?;
        }
        writeln!(out, "}};")?;
        Ok(out)
    }
}
