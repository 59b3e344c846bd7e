//! Naming and accessor resolution
//!
//! Pure functions mapping a descriptor field to the identifiers and accessor
//! shapes used in generated code. All semantic decisions about accessor bodies
//! are made here, before any template is evaluated.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static SHOUTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_\d]+$").expect("static pattern"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]|[A-Z]{2,})([A-Z]|\d$)").expect("static pattern"));
static LAST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w*([A-Z][a-z]\w*|[A-Z]{2,})$").expect("static pattern"));
static ID_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+[a-z]+([A-Z]{2,})?ID$").expect("static pattern"));

/// Storage-key constant for a schema name: `syncMsgVersion` becomes
/// `KEY_SYNC_MSG_VERSION`. Names that are already upper-snake pass through
/// under the same prefix.
pub fn storage_key(origin: &str) -> String {
    if origin.is_empty() {
        return String::new();
    }
    if SHOUTY.is_match(origin) {
        return format!("KEY_{origin}");
    }
    let spaced = CAMEL_BOUNDARY.replace_all(origin, "${1}_${2}");
    format!("KEY_{}", spaced.to_uppercase())
}

/// Trailing camel-case word of a schema name, lowercased. Used as the setter
/// and constructor parameter name: `syncMsgVersion` yields `version`.
pub fn last_word(origin: &str) -> String {
    match LAST_WORD.captures(origin) {
        Some(caps) => caps[1].to_lowercase(),
        None => origin.to_lowercase(),
    }
}

/// Capitalized form used in accessor names: `appName` yields `AppName`.
pub fn title(origin: &str) -> String {
    let mut chars = origin.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Instance-field identifier for a schema name, escaped when it collides with
/// a reserved word of the target language.
pub fn identifier(origin: &str) -> String {
    if is_java_keyword(origin) {
        format!("{origin}_")
    } else {
        origin.to_string()
    }
}

/// Drop a trailing `ID` from mixed-case names (`fullAppID` -> `fullApp`).
/// All-caps names are left alone.
pub fn cut_id_suffix(name: &str) -> String {
    if ID_SUFFIX.is_match(name) {
        name[..name.len() - 2].to_string()
    } else {
        name.to_string()
    }
}

fn is_java_keyword(s: &str) -> bool {
    matches!(
        s,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
    )
}

/// Semantic shape of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Primitive(Primitive),
    List { element: String },
    Object(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Boolean,
    Integer,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Integer",
        }
    }
}

impl ReturnType {
    /// Parse a declared type string. A list-shaped type whose element cannot
    /// be recovered is a configuration error, reported against the owning
    /// field's origin name.
    pub fn parse(origin: &str, declared: &str) -> Result<ReturnType> {
        match declared {
            "String" => return Ok(ReturnType::Primitive(Primitive::String)),
            "Boolean" => return Ok(ReturnType::Primitive(Primitive::Boolean)),
            "Integer" => return Ok(ReturnType::Primitive(Primitive::Integer)),
            _ => {}
        }
        if declared == "List" || declared.starts_with("List<") {
            let element = declared
                .strip_prefix("List<")
                .and_then(|rest| rest.strip_suffix('>'))
                .map(str::trim)
                .filter(|e| !e.is_empty() && !e.contains('<') && !e.contains('>'));
            return match element {
                Some(element) => Ok(ReturnType::List {
                    element: element.to_string(),
                }),
                None => Err(Error::ListElementType {
                    origin: origin.to_string(),
                    return_type: declared.to_string(),
                }),
            };
        }
        if declared.is_empty() {
            return Err(Error::MalformedField {
                origin: origin.to_string(),
                reason: "empty return type".to_string(),
            });
        }
        Ok(ReturnType::Object(declared.to_string()))
    }

    /// The declared Java type text.
    pub fn render(&self) -> String {
        match self {
            ReturnType::Primitive(p) => p.as_str().to_string(),
            ReturnType::List { element } => format!("List<{element}>"),
            ReturnType::Object(name) => name.clone(),
        }
    }

    /// Class token handed to the generic object retrieval; the element type
    /// for lists, the type itself otherwise.
    pub fn class_token(&self) -> &str {
        match self {
            ReturnType::Primitive(p) => p.as_str(),
            ReturnType::List { element } => element,
            ReturnType::Object(name) => name,
        }
    }
}

/// Accessor bodies for one field, keyed by its storage constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub getter_body: String,
    pub setter_body: String,
}

/// Resolve accessor bodies. Primitive wrappers delegate to the typed
/// retrieval; everything else goes through the generic object retrieval with
/// a class token. Storing is uniform regardless of type.
pub fn accessor(key: &str, last: &str, return_type: &ReturnType) -> Accessor {
    let getter_body = match return_type {
        ReturnType::Primitive(p) => format!("return get{}({key});", p.as_str()),
        other => format!(
            "return ({}) getObject({}.class, {key});",
            other.render(),
            other.class_token()
        ),
    };
    Accessor {
        getter_body,
        setter_body: format!("setValue({key}, {last});"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_insert_underscores_at_camel_boundaries() {
        assert_eq!(storage_key("image"), "KEY_IMAGE");
        assert_eq!(storage_key("syncMsgVersion"), "KEY_SYNC_MSG_VERSION");
        assert_eq!(storage_key("ttsChunks"), "KEY_TTS_CHUNKS");
    }

    #[test]
    fn shouty_names_keep_their_shape() {
        assert_eq!(storage_key("VR_HELP"), "KEY_VR_HELP");
    }

    #[test]
    fn last_word_takes_the_trailing_camel_word() {
        assert_eq!(last_word("syncMsgVersion"), "version");
        assert_eq!(last_word("appName"), "name");
        assert_eq!(last_word("image"), "image");
        assert_eq!(last_word("vrHelpTitle"), "title");
    }

    #[test]
    fn titles_capitalize_the_first_letter_only() {
        assert_eq!(title("appName"), "AppName");
        assert_eq!(title("image"), "Image");
    }

    #[test]
    fn reserved_words_are_escaped() {
        assert_eq!(identifier("package"), "package_");
        assert_eq!(identifier("appName"), "appName");
    }

    #[test]
    fn id_suffix_is_cut_from_mixed_case_names() {
        assert_eq!(cut_id_suffix("fullAppID"), "fullApp");
        assert_eq!(cut_id_suffix("hmiID"), "hmi");
        assert_eq!(cut_id_suffix("vehicleDataID"), "vehicleData");
        // All-caps names keep their trailing letters.
        assert_eq!(cut_id_suffix("RESERVED"), "RESERVED");
        assert_eq!(cut_id_suffix("PRE_RECORDED"), "PRE_RECORDED");
    }

    #[test]
    fn primitive_types_use_typed_retrieval() {
        let ty = ReturnType::parse("appName", "String").unwrap();
        let acc = accessor("KEY_APP_NAME", "name", &ty);
        assert_eq!(acc.getter_body, "return getString(KEY_APP_NAME);");
        assert_eq!(acc.setter_body, "setValue(KEY_APP_NAME, name);");
    }

    #[test]
    fn object_types_use_generic_retrieval() {
        let ty = ReturnType::parse("image", "Image").unwrap();
        let acc = accessor("KEY_IMAGE", "image", &ty);
        assert_eq!(
            acc.getter_body,
            "return (Image) getObject(Image.class, KEY_IMAGE);"
        );
    }

    #[test]
    fn list_types_retrieve_by_element_class() {
        let ty = ReturnType::parse("ttsChunks", "List<TTSChunk>").unwrap();
        assert_eq!(
            ty,
            ReturnType::List {
                element: "TTSChunk".to_string()
            }
        );
        let acc = accessor("KEY_TTS_CHUNKS", "chunks", &ty);
        assert_eq!(
            acc.getter_body,
            "return (List<TTSChunk>) getObject(TTSChunk.class, KEY_TTS_CHUNKS);"
        );
    }

    #[test]
    fn unparseable_list_element_fails_fast_with_the_field_name() {
        for bad in ["List<>", "List<", "List", "List<List<String>"] {
            let err = ReturnType::parse("ttsChunks", bad).unwrap_err();
            assert!(err.to_string().contains("ttsChunks"), "{bad}");
        }
    }
}
