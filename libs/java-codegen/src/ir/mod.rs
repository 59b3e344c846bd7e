//! Descriptor model
//!
//! In-memory representation of the types to generate, produced by an external
//! schema parser (or deserialized from descriptor JSON) and held immutable for
//! the duration of a generation run. The core keeps no state between types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolve;

/// One generation unit: a struct class or a wire enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Struct(StructDescriptor),
    Enum(EnumDescriptor),
}

impl TypeDescriptor {
    /// Class name of the generated type.
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Struct(s) => &s.name,
            TypeDescriptor::Enum(e) => &e.name,
        }
    }
}

/// A record-like structure with named, typed, optionally-mandatory fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDescriptor {
    pub name: String,
    /// Common base class all generated structures derive from.
    pub extends_class: String,
    pub package_name: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub class_description: Vec<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub see: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Verbatim source fragments appended to the class body.
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// A single struct member: either an instance field with accessors or a pure
/// storage-key constant. The split is decided once at construction, never
/// re-checked per render site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name as it appears in the upstream schema and on the wire.
    pub origin: String,
    /// Generated constant naming the backing storage slot.
    pub key: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub see: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "lowercase")]
pub enum FieldKind {
    Instance(InstanceField),
    Constant,
}

/// Accessor-owning field data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceField {
    /// Derived Java identifier, reserved-word-safe.
    pub name: String,
    /// Trailing camel-case word of the origin, lowercased; used as the setter
    /// and constructor parameter name.
    pub last: String,
    /// Capitalized origin, used in accessor names (`get{Title}`).
    pub title: String,
    /// Semantic type: `String`/`Boolean`/`Integer`, `List<X>`, or another
    /// generated type.
    pub return_type: String,
    #[serde(default)]
    pub mandatory: bool,
    /// Default initializer literal for the declaration.
    #[serde(default)]
    pub value: Option<String>,
    /// Access/static qualifier for the declaration.
    #[serde(default)]
    pub modifier: Option<String>,
    /// Pre-rendered doc lines; when present they override auto-synthesis of
    /// the `@return`/`@param` prose.
    #[serde(default)]
    pub param_doc: Option<Vec<String>>,
    #[serde(default)]
    pub suppress_warnings: Option<String>,
}

impl FieldDescriptor {
    /// Build an instance field, deriving `key`, `name`, `last`, and `title`
    /// from the schema name.
    pub fn instance(origin: &str, return_type: &str, mandatory: bool) -> Self {
        FieldDescriptor {
            origin: origin.to_string(),
            key: resolve::storage_key(origin),
            kind: FieldKind::Instance(InstanceField {
                name: resolve::identifier(origin),
                last: resolve::last_word(origin),
                title: resolve::title(origin),
                return_type: return_type.to_string(),
                mandatory,
                value: None,
                modifier: None,
                param_doc: None,
                suppress_warnings: None,
            }),
            description: Vec::new(),
            since: None,
            see: None,
            deprecated: false,
        }
    }

    /// Build a pure key constant with no accessors.
    pub fn constant(origin: &str) -> Self {
        FieldDescriptor {
            origin: origin.to_string(),
            key: resolve::storage_key(origin),
            kind: FieldKind::Constant,
            description: Vec::new(),
            since: None,
            see: None,
            deprecated: false,
        }
    }

    pub fn instance_data(&self) -> Option<&InstanceField> {
        match &self.kind {
            FieldKind::Instance(data) => Some(data),
            FieldKind::Constant => None,
        }
    }

    /// Reject descriptors that cannot be rendered. Reported with the field's
    /// origin name so the driver can point at the offending schema entry.
    pub fn validate(&self) -> Result<()> {
        if self.origin.is_empty() {
            return Err(Error::MalformedField {
                origin: self.origin.clone(),
                reason: "missing origin name".to_string(),
            });
        }
        if self.key.is_empty() {
            return Err(Error::MalformedField {
                origin: self.origin.clone(),
                reason: "missing storage key".to_string(),
            });
        }
        if let FieldKind::Instance(data) = &self.kind {
            if data.name.is_empty() {
                return Err(Error::MalformedField {
                    origin: self.origin.clone(),
                    reason: "instance field without a name".to_string(),
                });
            }
            if data.return_type.is_empty() {
                return Err(Error::MalformedField {
                    origin: self.origin.clone(),
                    reason: "instance field without a return type".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// An enumeration type with a string wire representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    pub package_name: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub class_description: Vec<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub see: Option<String>,
    pub style: EnumStyle,
    pub values: Vec<EnumValueDescriptor>,
}

/// Wire-representation style. Always stated explicitly per type; the core
/// never infers it from the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumStyle {
    /// Each value owns an internal wire string distinct from its identifier.
    Mapped,
    /// The identifier itself is the wire representation.
    Simple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    /// Java identifier of the declared value.
    pub iname: String,
    /// Wire string. Equal to `iname` for simple enums.
    pub origin: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl EnumValueDescriptor {
    pub fn new(iname: &str, origin: &str) -> Self {
        EnumValueDescriptor {
            iname: iname.to_string(),
            origin: origin.to_string(),
            description: Vec::new(),
            since: None,
            deprecated: false,
        }
    }

    /// Build a value whose identifier is derived from the wire name: a
    /// trailing `ID` is cut from mixed-case names, the wire string is kept
    /// untouched.
    pub fn from_origin(origin: &str) -> Self {
        Self::new(&resolve::cut_id_suffix(origin), origin)
    }
}

impl EnumDescriptor {
    /// String-to-value resolution with the same contract as the generated
    /// `valueForString`: a miss or a missing input is an absent result, never
    /// an error. Unknown wire values must stay survivable for forward
    /// compatibility.
    pub fn lookup(&self, wire: Option<&str>) -> Option<&EnumValueDescriptor> {
        let wire = wire?;
        match self.style {
            EnumStyle::Mapped => self.values.iter().find(|v| v.origin == wire),
            EnumStyle::Simple => self.values.iter().find(|v| v.iname == wire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech_capabilities() -> EnumDescriptor {
        EnumDescriptor {
            name: "SpeechCapabilities".to_string(),
            package_name: "com.example.rpc.enums".to_string(),
            imports: Vec::new(),
            class_description: Vec::new(),
            since: None,
            see: None,
            style: EnumStyle::Mapped,
            values: vec![
                EnumValueDescriptor::new("TEXT", "TEXT"),
                EnumValueDescriptor::new("SAPI_PHONEMES", "SAPI_PHONEMES"),
                EnumValueDescriptor::new("PRE_RECORDED", "PRE_RECORDED"),
            ],
        }
    }

    #[test]
    fn mapped_lookup_round_trips_every_declared_value() {
        let desc = speech_capabilities();
        for value in &desc.values {
            let found = desc.lookup(Some(&value.origin)).expect("declared value");
            assert_eq!(found.iname, value.iname);
        }
    }

    #[test]
    fn mapped_lookup_miss_and_null_are_absent_not_errors() {
        let desc = speech_capabilities();
        assert!(desc.lookup(Some("__unknown__")).is_none());
        assert!(desc.lookup(None).is_none());
    }

    #[test]
    fn simple_lookup_resolves_by_identifier_only() {
        let mut desc = speech_capabilities();
        desc.style = EnumStyle::Simple;
        desc.values.push(EnumValueDescriptor::new("KEYBOARD", "KBD"));
        assert_eq!(desc.lookup(Some("KEYBOARD")).unwrap().iname, "KEYBOARD");
        // In simple style the wire string is not consulted.
        assert!(desc.lookup(Some("KBD")).is_none());
    }

    #[test]
    fn value_identifiers_cut_the_trailing_id_marker() {
        let value = EnumValueDescriptor::from_origin("fullAppID");
        assert_eq!(value.iname, "fullApp");
        assert_eq!(value.origin, "fullAppID");

        let shouty = EnumValueDescriptor::from_origin("PRE_RECORDED");
        assert_eq!(shouty.iname, "PRE_RECORDED");
    }

    #[test]
    fn instance_field_without_name_is_malformed() {
        let mut field = FieldDescriptor::instance("appName", "String", true);
        if let FieldKind::Instance(data) = &mut field.kind {
            data.name.clear();
        }
        let err = field.validate().unwrap_err();
        assert!(err.to_string().contains("appName"));
    }

    #[test]
    fn descriptor_json_round_trip() {
        let field = FieldDescriptor::instance("syncMsgVersion", "SyncMsgVersion", true);
        let json = serde_json::to_string(&field).unwrap();
        let back: FieldDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.key, "KEY_SYNC_MSG_VERSION");
        assert_eq!(back.instance_data().unwrap().last, "version");
    }
}
