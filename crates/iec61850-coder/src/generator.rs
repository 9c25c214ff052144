// crates/iec61850-coder/src/generator.rs

//! Batch generation over a whole SCL file.
//!
//! Every `DOType` and `DAType` gets its four coders plus the framed length
//! function. Datasets get coders only for the transports whose control blocks
//! publish them. A failure stops the function being generated and nothing
//! else.

use crate::assembler::{FunctionAssembler, GeneratedFunction};
use crate::coder::{CoderDirective, Direction, TransportKind};
use crate::config::CoderConfig;
use crate::containment::ContainmentIndex;
use crate::error::CoderError;
use crate::framing::support_routines;
use crate::log::{GenerationContext, my_debug, my_error, my_info, my_trace, my_warn};
use crate::mapping::{ScalarType, StandardTypeMapping, TypeMapping};
use crate::naming::NamingContext;
use crate::node::Entity;
use iec61850_scl::{ControlBlock, DataSet, LogicalNode, SclFile};
use std::collections::{BTreeMap, HashSet};

/// A function that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// The type id or dataset name.
    pub entity: String,
    /// The function name, or `struct <name>` for a dataset struct.
    pub function: String,
    pub error: CoderError,
}

/// Everything produced by one run.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub functions: Vec<GeneratedFunction>,
    /// One declaration per canonical dataset name.
    pub structs: Vec<String>,
    /// The BER length routines the framed coders call.
    pub support: Vec<GeneratedFunction>,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationOutput {
    pub fn function(&self, name: &str) -> Option<&GeneratedFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Struct declarations followed by every prototype.
    pub fn render_header(&self) -> String {
        let mut out = String::new();
        for s in &self.structs {
            out.push_str(s);
            out.push('\n');
        }
        for f in self.support.iter().chain(&self.functions) {
            out.push_str(&f.prototype());
            out.push('\n');
        }
        out
    }

    /// Every function definition, support routines first.
    pub fn render_source(&self) -> String {
        self.support
            .iter()
            .chain(&self.functions)
            .map(GeneratedFunction::definition)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drives generation for one SCL file.
pub struct Generator<'a> {
    scl: &'a SclFile,
    config: CoderConfig,
    overrides: BTreeMap<String, ScalarType>,
}

impl<'a> Generator<'a> {
    pub fn new(scl: &'a SclFile) -> Self {
        Self {
            scl,
            config: CoderConfig::default(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_config(mut self, config: CoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Maps a `bType` to a custom scalar in the standard mapping.
    pub fn with_override(mut self, b_type: impl Into<String>, scalar: ScalarType) -> Self {
        self.overrides.insert(b_type.into(), scalar);
        self
    }

    /// Generates with the standard type mapping.
    pub fn generate(&self) -> GenerationOutput {
        let index = ContainmentIndex::build(self.scl);
        let mapping = StandardTypeMapping::new(self.scl, &index).with_overrides(self.overrides.clone());
        self.generate_with(&index, &mapping)
    }

    /// Generates with a caller-supplied mapping. `index` must have been built
    /// from the same SCL file.
    pub fn generate_with(
        &self,
        index: &ContainmentIndex<'_>,
        mapping: &dyn TypeMapping,
    ) -> GenerationOutput {
        let naming = NamingContext::new();
        let assembler = FunctionAssembler::new(mapping, index, &naming, &self.config);
        let mut run = Run {
            assembler: &assembler,
            output: GenerationOutput {
                support: support_routines(&self.config),
                ..Default::default()
            },
            emitted: HashSet::new(),
            declared: HashSet::new(),
        };

        let templates = &self.scl.templates;
        for do_type in &templates.do_types {
            run.composite(Entity::from(do_type));
        }
        for da_type in &templates.da_types {
            run.composite(Entity::from(da_type));
        }

        for ied in &self.scl.ieds {
            let servers = ied.access_points.iter().filter_map(|ap| ap.server.as_ref());
            for ld in servers.flat_map(|s| s.logical_devices.iter()) {
                for ln in ld.all_logical_nodes() {
                    run.logical_node(ln);
                }
            }
        }

        let output = run.output;
        my_info!(
            "Generated {} functions and {} dataset structs, {} failures.",
            output.functions.len(),
            output.structs.len(),
            output.failures.len()
        );
        output
    }
}

/// State of one generation run.
struct Run<'r> {
    assembler: &'r FunctionAssembler<'r>,
    output: GenerationOutput,
    /// (canonical name, transport) pairs whose dataset coders were attempted.
    emitted: HashSet<(String, TransportKind)>,
    /// Canonical names whose struct was attempted.
    declared: HashSet<String>,
}

impl Run<'_> {
    fn record(&mut self, entity: &str, function: &str, result: Result<GeneratedFunction, CoderError>) {
        let ctx = GenerationContext { entity, function };
        match result {
            Ok(f) => {
                my_debug!(ctx, "Generated ({} body bytes).", f.body.len());
                self.output.functions.push(f);
            }
            Err(error) => self.fail(entity, function, error),
        }
    }

    fn fail(&mut self, entity: &str, function: &str, error: CoderError) {
        let ctx = GenerationContext { entity, function };
        my_error!(ctx, "Generation failed: {}", error);
        self.output.failures.push(GenerationFailure {
            entity: entity.to_string(),
            function: function.to_string(),
            error,
        });
    }

    fn composite(&mut self, entity: Entity<'_>) {
        let id = entity.declared_name();
        for directive in CoderDirective::ALL {
            let function = format!("{}{}", directive.prefix(), id);
            my_trace!(GenerationContext { entity: id, function: &function }, "Generating.");
            let result = self.assembler.assemble(&entity, directive);
            self.record(id, &function, result);
        }
        let function = format!("{}{}", TransportKind::FramedEvent.length_prefix(), id);
        let result = self.assembler.assemble_length(&entity);
        self.record(id, &function, result);
    }

    fn logical_node(&mut self, ln: &LogicalNode) {
        let published = ln
            .sampled_value_controls
            .iter()
            .map(|cb| (cb, TransportKind::FlatMeasurement))
            .chain(ln.gse_controls.iter().map(|cb| (cb, TransportKind::FramedEvent)));

        let mut referenced = HashSet::new();
        for (cb, transport) in published {
            let Some(ds) = Self::data_set_of(ln, cb, transport) else {
                continue;
            };
            referenced.insert(ds.name.as_str());
            self.data_set(ds, transport);
        }

        for ds in ln.data_sets.iter().filter(|ds| !referenced.contains(ds.name.as_str())) {
            my_debug!(
                "Dataset '{}' in {} is not published by any control block, skipped.",
                ds.name,
                ln.reference()
            );
        }
    }

    fn data_set_of<'l>(
        ln: &'l LogicalNode,
        cb: &ControlBlock,
        transport: TransportKind,
    ) -> Option<&'l DataSet> {
        let Some(name) = cb.data_set.as_deref() else {
            my_debug!("{} control block '{}' has no dataset.", transport, cb.name);
            return None;
        };
        let ds = ln.data_set(name);
        if ds.is_none() {
            my_warn!(
                "{} control block '{}' references missing dataset '{}' in {}.",
                transport,
                cb.name,
                name,
                ln.reference()
            );
        }
        ds
    }

    fn data_set(&mut self, ds: &DataSet, transport: TransportKind) {
        let name = match self.assembler.name_of(&Entity::from(ds)) {
            Ok(name) => name,
            Err(error) => return self.fail(&ds.name, &ds.name, error),
        };
        if !self.emitted.insert((name.clone(), transport)) {
            my_trace!("Dataset '{}' shares the {} coders of '{}'.", ds.name, transport, name);
            return;
        }

        if self.declared.insert(name.clone()) {
            match self.assembler.dataset_struct(ds) {
                Ok(s) => self.output.structs.push(s),
                Err(error) => self.fail(&name, &format!("struct {}", name), error),
            }
        }

        let entity = Entity::from(ds);
        for direction in [Direction::Decode, Direction::Encode] {
            let directive = CoderDirective::new(transport, direction);
            let function = format!("{}{}", directive.prefix(), name);
            let result = self.assembler.assemble(&entity, directive);
            self.record(&name, &function, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iec61850_scl::{BasicDataAttribute, BasicType, DaType, DataTypeTemplates};

    fn vector_only() -> SclFile {
        let f = |name: &str| BasicDataAttribute {
            name: name.into(),
            b_type: BasicType::Float32,
            ..Default::default()
        };
        SclFile {
            templates: DataTypeTemplates {
                da_types: vec![DaType {
                    id: "Vector".into(),
                    attributes: vec![f("mag"), f("ang")],
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_composite_gets_five_functions() {
        let scl = vector_only();
        let output = Generator::new(&scl).generate();
        let names: Vec<&str> = output.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "decode_Vector",
                "encode_Vector",
                "ber_decode_Vector",
                "ber_encode_Vector",
                "ber_get_length_Vector"
            ]
        );
        assert!(output.is_complete());
        assert_eq!(output.support.len(), 3);
    }

    #[test]
    fn test_render_header_lists_prototypes() {
        let scl = vector_only();
        let output = Generator::new(&scl).generate();
        let header = output.render_header();
        assert!(header.contains("int encodeLength(unsigned char *buf, int len);\n"));
        assert!(header.contains("int ber_get_length_Vector(struct Vector *Vector);\n"));
        assert!(output
            .render_source()
            .contains("int decode_Vector(unsigned char *buf, struct Vector *Vector) {\n"));
    }

    #[test]
    fn test_failures_do_not_stop_other_functions() {
        let mut scl = vector_only();
        scl.templates.da_types.insert(
            0,
            DaType {
                id: "Wide".into(),
                attributes: vec![BasicDataAttribute {
                    name: "v".into(),
                    b_type: BasicType::Int128,
                    ..Default::default()
                }],
            },
        );
        let output = Generator::new(&scl).generate();
        assert_eq!(output.failures.len(), 5);
        assert!(output.failures.iter().all(|f| f.entity == "Wide"));
        assert_eq!(output.failures[4].function, "ber_get_length_Wide");
        assert_eq!(output.functions.len(), 5);

        // An override makes the type generable.
        let output = Generator::new(&scl)
            .with_override("INT128", ScalarType::new("CTYPE_INT128", "int128_t"))
            .generate();
        assert!(output.is_complete());
        assert_eq!(output.functions.len(), 10);
    }
}
