//! Enumeration rendering
//!
//! Two body skeletons share one context shape: the mapped variant carries a
//! wire string per value, the simple variant uses the identifier itself.
//! Declaration order is reproduced as given.

use serde_json::{json, Value};

use crate::doc;
use crate::error::Result;
use crate::generators::java::skeletons;
use crate::generators::GeneratorConfig;
use crate::ir::{EnumDescriptor, EnumStyle};
use crate::template::Skeleton;

pub fn render(desc: &EnumDescriptor, config: &GeneratorConfig) -> Result<String> {
    let body = match desc.style {
        EnumStyle::Mapped => skeletons::ENUM_MAPPED_BODY,
        EnumStyle::Simple => skeletons::ENUM_SIMPLE_BODY,
    };
    let ctx = build_context(desc, config);
    Skeleton::new(skeletons::BASE)?.block("body", body)?.render(&ctx)
}

fn build_context(desc: &EnumDescriptor, config: &GeneratorConfig) -> Value {
    let values: Vec<Value> = desc
        .values
        .iter()
        .map(|v| {
            json!({
                "iname": v.iname,
                "origin": v.origin,
                "member_doc": doc::member_doc(
                    v.deprecated,
                    &v.description,
                    v.since.as_deref(),
                    None,
                    &config.since_prefix,
                ),
            })
        })
        .collect();

    let mut imports = desc.imports.clone();
    if desc.style == EnumStyle::Mapped && !imports.iter().any(|i| i == "java.util.EnumSet") {
        imports.push("java.util.EnumSet".to_string());
    }

    let class_description = doc::wrap_description(&desc.class_description, doc::PROSE_WIDTH);
    let has_class_doc =
        !class_description.is_empty() || desc.since.is_some() || desc.see.is_some();

    json!({
        "copyright": config.copyright_header,
        "package_name": desc.package_name,
        "imports": imports,
        "class_name": desc.name,
        "class_description": class_description,
        "has_class_doc": has_class_doc,
        "has_param_table": false,
        "see": desc.see,
        "since": desc.since,
        "since_tag": desc
            .since
            .as_deref()
            .map(|v| format!("{} {}", config.since_prefix, v)),
        "values": values,
    })
}
