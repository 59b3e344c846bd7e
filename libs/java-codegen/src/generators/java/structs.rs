//! Structure-class rendering
//!
//! Builds the resolved context for one struct descriptor and evaluates the
//! struct skeleton against it. Field order from the descriptor is preserved
//! in declarations, accessors, and the convenience constructor so that
//! regeneration stays diff-stable.

use serde_json::{json, Map, Value};

use crate::doc;
use crate::error::Result;
use crate::generators::java::skeletons;
use crate::generators::GeneratorConfig;
use crate::ir::{FieldDescriptor, StructDescriptor};
use crate::resolve::{self, ReturnType};
use crate::template::Skeleton;

pub fn render(desc: &StructDescriptor, config: &GeneratorConfig) -> Result<String> {
    let ctx = build_context(desc, config)?;
    Skeleton::new(skeletons::BASE)?
        .block("body", skeletons::STRUCT_BODY)?
        .render(&ctx)
}

fn build_context(desc: &StructDescriptor, config: &GeneratorConfig) -> Result<Value> {
    let mut params = Vec::with_capacity(desc.fields.len());
    let mut ctor_args = Vec::new();
    let mut needs_list_import = false;
    let mut has_defaults = false;

    for field in &desc.fields {
        field.validate()?;
        params.push(field_context(field, config)?);

        if let Some(data) = field.instance_data() {
            has_defaults |= data.value.is_some();
            let return_type = ReturnType::parse(&field.origin, &data.return_type)?;
            if matches!(return_type, ReturnType::List { .. }) {
                needs_list_import = true;
            }
            if data.mandatory {
                ctor_args.push(format!("@NonNull {} {}", data.return_type, data.last));
            }
        }
    }

    let mut imports = desc.imports.clone();
    for required in ["java.util.Hashtable"]
        .into_iter()
        .chain(needs_list_import.then_some("java.util.List"))
    {
        if !imports.iter().any(|i| i == required) {
            imports.push(required.to_string());
        }
    }

    let class_description = doc::wrap_description(&desc.class_description, doc::PROSE_WIDTH);
    let has_param_table = desc.fields.iter().any(|f| f.instance_data().is_some());
    let has_class_doc = !class_description.is_empty()
        || desc.since.is_some()
        || desc.see.is_some()
        || has_param_table;

    Ok(json!({
        "copyright": config.copyright_header,
        "package_name": desc.package_name,
        "imports": imports,
        "class_name": desc.name,
        "extends_class": desc.extends_class,
        "class_description": class_description,
        "has_class_doc": has_class_doc,
        "has_param_table": has_param_table,
        "see": desc.see,
        "since": desc.since,
        "since_tag": desc
            .since
            .as_deref()
            .map(|v| format!("{} {}", config.since_prefix, v)),
        "params": params,
        "has_defaults": has_defaults,
        "has_mandatory": !ctor_args.is_empty(),
        "ctor_args": ctor_args,
        "scripts": desc.scripts,
    }))
}

fn field_context(field: &FieldDescriptor, config: &GeneratorConfig) -> Result<Value> {
    let mut ctx = Map::new();
    ctx.insert("origin".into(), json!(field.origin));
    ctx.insert("key".into(), json!(field.key));
    ctx.insert(
        "member_doc".into(),
        json!(doc::member_doc(
            field.deprecated,
            &field.description,
            field.since.as_deref(),
            field.see.as_deref(),
            &config.since_prefix,
        )),
    );
    ctx.insert("since".into(), json!(field.since.as_deref().unwrap_or("")));

    let Some(data) = field.instance_data() else {
        ctx.insert("is_instance".into(), json!(false));
        ctx.insert("mandatory".into(), json!(false));
        return Ok(Value::Object(ctx));
    };

    let return_type = ReturnType::parse(&field.origin, &data.return_type)?;
    let accessor = resolve::accessor(&field.key, &data.last, &return_type);
    let tag_doc = doc::tag_doc(data, &field.description);

    ctx.insert("is_instance".into(), json!(true));
    ctx.insert("name".into(), json!(data.name));
    ctx.insert("last".into(), json!(data.last));
    ctx.insert("title".into(), json!(data.title));
    ctx.insert("return_type".into(), json!(data.return_type));
    ctx.insert("mandatory".into(), json!(data.mandatory));
    ctx.insert("value".into(), json!(data.value));
    ctx.insert("has_default".into(), json!(data.value.is_some()));
    ctx.insert("modifier".into(), json!(data.modifier));
    ctx.insert("suppress_warnings".into(), json!(data.suppress_warnings));
    ctx.insert("summary".into(), json!(doc::normalize_description(&field.description)));
    ctx.insert("tag_doc".into(), json!(tag_doc));
    ctx.insert(
        "return_indent".into(),
        json!(doc::return_indent(&data.return_type)),
    );
    ctx.insert("param_indent".into(), json!(doc::param_indent(&data.last)));
    ctx.insert("getter_body".into(), json!(accessor.getter_body));
    ctx.insert("setter_body".into(), json!(accessor.setter_body));
    Ok(Value::Object(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_fields_pull_in_the_list_import() {
        let desc = StructDescriptor {
            name: "TTSChunkList".to_string(),
            extends_class: "RpcStruct".to_string(),
            package_name: "com.example.rpc".to_string(),
            imports: Vec::new(),
            class_description: Vec::new(),
            since: None,
            see: None,
            fields: vec![FieldDescriptor::instance("ttsChunks", "List<TTSChunk>", true)],
            scripts: Vec::new(),
        };
        let out = render(&desc, &GeneratorConfig::default()).unwrap();
        assert!(out.contains("import java.util.List;"));
        assert!(out.contains("import java.util.Hashtable;"));
    }

    #[test]
    fn malformed_list_type_aborts_the_whole_type() {
        let desc = StructDescriptor {
            name: "Broken".to_string(),
            extends_class: "RpcStruct".to_string(),
            package_name: "com.example.rpc".to_string(),
            imports: Vec::new(),
            class_description: Vec::new(),
            since: None,
            see: None,
            fields: vec![FieldDescriptor::instance("items", "List<>", false)],
            scripts: Vec::new(),
        };
        let err = render(&desc, &GeneratorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("items"));
    }
}
