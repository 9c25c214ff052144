// crates/iec61850-coder/src/node.rs

//! Borrowed views over the SCL model that the generator walks.

use iec61850_scl::{
    BasicDataAttribute, BasicType, DaType, DataAttribute, DataObject, DataSet, DoType,
    DoTypeChild, ExtRef, SubDataObject,
};

/// One node of the attribute tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeNode<'a> {
    /// A `<DO>` of a logical node type.
    DataObject(&'a DataObject),
    /// An `<SDO>` of a `DOType`.
    SubDataObject(&'a SubDataObject),
    /// A `<DA>` of a `DOType`.
    DataAttribute(&'a DataAttribute),
    /// A `<BDA>` of a `DAType`.
    BasicDataAttribute(&'a BasicDataAttribute),
    /// An `<ExtRef>` input binding.
    ExternalReference(&'a ExtRef),
}

impl<'a> AttributeNode<'a> {
    /// The member name in the generated struct.
    pub fn name(&self) -> &'a str {
        match self {
            AttributeNode::DataObject(d) => &d.name,
            AttributeNode::SubDataObject(s) => &s.name,
            AttributeNode::DataAttribute(d) => &d.name,
            AttributeNode::BasicDataAttribute(b) => &b.name,
            AttributeNode::ExternalReference(e) => e.int_addr.as_deref().unwrap_or(&e.do_name),
        }
    }

    /// The referenced `DOType`, `DAType` or `EnumType` id.
    pub fn type_id(&self) -> Option<&'a str> {
        match self {
            AttributeNode::DataObject(d) => Some(&d.type_id),
            AttributeNode::SubDataObject(s) => Some(&s.type_id),
            AttributeNode::DataAttribute(d) => d.type_id.as_deref(),
            AttributeNode::BasicDataAttribute(b) => b.type_id.as_deref(),
            AttributeNode::ExternalReference(_) => None,
        }
    }

    /// The `bType` of a leaf attribute. Data objects have none.
    pub fn b_type(&self) -> Option<&'a BasicType> {
        match self {
            AttributeNode::DataAttribute(d) => Some(&d.b_type),
            AttributeNode::BasicDataAttribute(b) => Some(&b.b_type),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeNode::DataObject(_) => "DO",
            AttributeNode::SubDataObject(_) => "SDO",
            AttributeNode::DataAttribute(_) => "DA",
            AttributeNode::BasicDataAttribute(_) => "BDA",
            AttributeNode::ExternalReference(_) => "ExtRef",
        }
    }
}

impl<'a> From<&'a DoTypeChild> for AttributeNode<'a> {
    fn from(child: &'a DoTypeChild) -> Self {
        match child {
            DoTypeChild::SubDataObject(s) => AttributeNode::SubDataObject(s),
            DoTypeChild::DataAttribute(d) => AttributeNode::DataAttribute(d),
        }
    }
}

/// A type that gets its own coder functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositeType<'a> {
    DoType(&'a DoType),
    DaType(&'a DaType),
}

impl<'a> CompositeType<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            CompositeType::DoType(t) => &t.id,
            CompositeType::DaType(t) => &t.id,
        }
    }

    /// Children in declaration order.
    pub fn children(&self) -> Vec<AttributeNode<'a>> {
        match self {
            CompositeType::DoType(t) => t.children.iter().map(AttributeNode::from).collect(),
            CompositeType::DaType(t) => t
                .attributes
                .iter()
                .map(AttributeNode::BasicDataAttribute)
                .collect(),
        }
    }
}

/// Anything a coder function is generated for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Composite(CompositeType<'a>),
    Dataset(&'a DataSet),
}

impl<'a> Entity<'a> {
    /// The declared name: the type id, or the dataset's own (not canonical) name.
    pub fn declared_name(&self) -> &'a str {
        match self {
            Entity::Composite(c) => c.id(),
            Entity::Dataset(ds) => &ds.name,
        }
    }

    pub fn is_dataset(&self) -> bool {
        matches!(self, Entity::Dataset(_))
    }
}

impl<'a> From<&'a DoType> for Entity<'a> {
    fn from(t: &'a DoType) -> Self {
        Entity::Composite(CompositeType::DoType(t))
    }
}

impl<'a> From<&'a DaType> for Entity<'a> {
    fn from(t: &'a DaType) -> Self {
        Entity::Composite(CompositeType::DaType(t))
    }
}

impl<'a> From<&'a DataSet> for Entity<'a> {
    fn from(ds: &'a DataSet) -> Self {
        Entity::Dataset(ds)
    }
}
