// crates/iec61850-scl/src/resolver/templates.rs

use crate::error::{SclError, invalid_int};
use crate::model::templates as raw;
use crate::parser::parse_opt_u32;
use crate::types::{self, BasicType};
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use log::{trace, warn};

/// Parses the `<DataTypeTemplates>` section into its public form.
///
/// Template ids are unique per kind; a repeated id makes every type lookup
/// ambiguous, so it is rejected here rather than resolved first-wins.
pub(super) fn resolve_templates(
    model: &raw::DataTypeTemplates,
) -> Result<types::DataTypeTemplates, SclError> {
    check_unique_ids("LNodeType", model.lnode_type.iter().map(|t| &t.id))?;
    check_unique_ids("DOType", model.do_type.iter().map(|t| &t.id))?;
    check_unique_ids("DAType", model.da_type.iter().map(|t| &t.id))?;
    check_unique_ids("EnumType", model.enum_type.iter().map(|t| &t.id))?;

    let ln_types = model.lnode_type.iter().map(resolve_ln_type).collect();
    let do_types = model
        .do_type
        .iter()
        .map(resolve_do_type)
        .collect::<Result<Vec<_>, _>>()?;
    let da_types = model
        .da_type
        .iter()
        .map(resolve_da_type)
        .collect::<Result<Vec<_>, _>>()?;
    let enum_types = model
        .enum_type
        .iter()
        .map(resolve_enum_type)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(types::DataTypeTemplates {
        ln_types,
        do_types,
        da_types,
        enum_types,
    })
}

fn check_unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<(), SclError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(SclError::DuplicateTemplate {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_ln_type(model: &raw::LNodeType) -> types::LNodeType {
    types::LNodeType {
        id: model.id.clone(),
        ln_class: model.ln_class.clone(),
        data_objects: model
            .data_object
            .iter()
            .map(|d| types::DataObject {
                name: d.name.clone(),
                type_id: d.do_type.clone(),
            })
            .collect(),
    }
}

fn resolve_do_type(model: &raw::DoType) -> Result<types::DoType, SclError> {
    let mut children = Vec::with_capacity(model.items.len());
    for item in &model.items {
        match item {
            raw::DoTypeItem::Sdo(sdo) => {
                children.push(types::DoTypeChild::SubDataObject(types::SubDataObject {
                    name: sdo.name.clone(),
                    type_id: sdo.sdo_type.clone(),
                }));
            }
            raw::DoTypeItem::Da(da) => {
                let b_type = parse_b_type(&model.id, da);
                children.push(types::DoTypeChild::DataAttribute(types::DataAttribute {
                    name: da.name.clone(),
                    b_type,
                    type_id: da.attr_type.clone().filter(|s| !s.is_empty()),
                    fc: da.fc.clone().unwrap_or_default(),
                    count: parse_opt_u32("DA@count", da.count.as_ref())?.unwrap_or(0),
                }));
            }
            // Documentation elements carry no data.
            raw::DoTypeItem::Private(_) | raw::DoTypeItem::Text(_) => {}
        }
    }

    trace!("DOType '{}' resolved with {} children.", model.id, children.len());
    Ok(types::DoType {
        id: model.id.clone(),
        cdc: model.cdc.clone(),
        children,
    })
}

fn resolve_da_type(model: &raw::DaType) -> Result<types::DaType, SclError> {
    let attributes = model
        .bda
        .iter()
        .map(|bda| {
            Ok(types::BasicDataAttribute {
                name: bda.name.clone(),
                b_type: parse_b_type(&model.id, bda),
                type_id: bda.attr_type.clone().filter(|s| !s.is_empty()),
                count: parse_opt_u32("BDA@count", bda.count.as_ref())?.unwrap_or(0),
            })
        })
        .collect::<Result<Vec<_>, SclError>>()?;

    Ok(types::DaType {
        id: model.id.clone(),
        attributes,
    })
}

fn resolve_enum_type(model: &raw::EnumType) -> Result<types::EnumType, SclError> {
    let values = model
        .enum_val
        .iter()
        .map(|v| {
            let ord = v
                .ord
                .trim()
                .parse::<i32>()
                .map_err(|e| invalid_int("EnumVal@ord", &v.ord, e))?;
            Ok(types::EnumValue {
                ord,
                name: v.value.trim().into(),
            })
        })
        .collect::<Result<Vec<_>, SclError>>()?;

    Ok(types::EnumType {
        id: model.id.clone(),
        values,
    })
}

/// Parses a `bType`, logging values outside the known set. They are kept so
/// that a custom type mapping may still handle them.
fn parse_b_type(owner: &str, attr: &raw::AttributeElement) -> BasicType {
    let b_type = BasicType::parse(&attr.b_type);
    if let BasicType::Other(ref s) = b_type {
        warn!(
            "Unknown bType '{}' on attribute '{}' of type '{}'.",
            s, attr.name, owner
        );
    }
    b_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn da(name: &str, b_type: &str, attr_type: Option<&str>) -> raw::AttributeElement {
        raw::AttributeElement {
            name: name.to_string(),
            b_type: b_type.to_string(),
            attr_type: attr_type.map(|s| s.to_string()),
            fc: Some("ST".to_string()),
            count: None,
        }
    }

    #[test]
    fn test_resolve_do_type_keeps_interleaved_order() {
        let model = raw::DoType {
            id: "WYE_T".to_string(),
            cdc: "WYE".to_string(),
            items: vec![
                raw::DoTypeItem::Sdo(raw::Sdo {
                    name: "phsA".to_string(),
                    sdo_type: "CMV_T".to_string(),
                }),
                raw::DoTypeItem::Da(da("q", "Quality", None)),
                raw::DoTypeItem::Sdo(raw::Sdo {
                    name: "phsB".to_string(),
                    sdo_type: "CMV_T".to_string(),
                }),
            ],
        };

        let resolved = resolve_do_type(&model).unwrap();
        let names: Vec<&str> = resolved.children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["phsA", "q", "phsB"]);
        assert!(matches!(
            resolved.child("q"),
            Some(types::DoTypeChild::DataAttribute(d)) if d.b_type == BasicType::Quality && d.fc == "ST"
        ));
    }

    #[test]
    fn test_resolve_enum_type_invalid_ord() {
        let model = raw::EnumType {
            id: "Beh".to_string(),
            enum_val: vec![raw::EnumVal {
                ord: "one".to_string(),
                value: "on".to_string(),
            }],
        };
        assert!(matches!(
            resolve_enum_type(&model),
            Err(SclError::InvalidAttributeFormat {
                attribute: "EnumVal@ord",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_template_id_is_rejected() {
        let model = raw::DataTypeTemplates {
            da_type: vec![
                raw::DaType {
                    id: "Vector".to_string(),
                    bda: vec![],
                },
                raw::DaType {
                    id: "Vector".to_string(),
                    bda: vec![],
                },
            ],
            ..Default::default()
        };
        match resolve_templates(&model) {
            Err(SclError::DuplicateTemplate { kind, id }) => {
                assert_eq!(kind, "DAType");
                assert_eq!(id, "Vector");
            }
            other => panic!("expected DuplicateTemplate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_type_reference_is_none() {
        let model = raw::DaType {
            id: "Vector".to_string(),
            bda: vec![da("mag", "Struct", Some("AnalogueValue")), da("ang", "FLOAT32", Some(""))],
        };
        let resolved = resolve_da_type(&model).unwrap();
        assert_eq!(resolved.attributes[0].type_id.as_deref(), Some("AnalogueValue"));
        assert_eq!(resolved.attributes[1].type_id, None);
    }
}
