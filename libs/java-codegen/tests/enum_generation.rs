//! Enum rendering tests: both body variants plus the string round-trip
//! contract of the generated lookup.

use javelin_codegen::generators::java::enums;
use javelin_codegen::generators::GeneratorConfig;
use javelin_codegen::ir::{EnumDescriptor, EnumStyle, EnumValueDescriptor};

fn result_enum(style: EnumStyle) -> EnumDescriptor {
    EnumDescriptor {
        name: "Result".to_string(),
        package_name: "com.example.rpc.enums".to_string(),
        imports: Vec::new(),
        class_description: Vec::new(),
        since: None,
        see: None,
        style,
        values: vec![
            EnumValueDescriptor::new("SUCCESS", "SUCCESS"),
            EnumValueDescriptor::new("INVALID_DATA", "INVALID_DATA"),
        ],
    }
}

#[test]
fn mapped_enum_renders_the_full_class() {
    let out = enums::render(&result_enum(EnumStyle::Mapped), &GeneratorConfig::default()).unwrap();
    let expected = r#"package com.example.rpc.enums;

import java.util.EnumSet;

public enum Result {
    SUCCESS("SUCCESS"),
    INVALID_DATA("INVALID_DATA");

    private final String INTERNAL_NAME;

    private Result(String internalName) {
        this.INTERNAL_NAME = internalName;
    }

    @Override
    public String toString() {
        return this.INTERNAL_NAME;
    }

    /**
     * Convert String to Result
     *
     * @param value String
     * @return Result
     */
    public static Result valueForString(String value) {
        if (value == null) {
            return null;
        }

        for (Result anEnum : EnumSet.allOf(Result.class)) {
            if (anEnum.toString().equals(value)) {
                return anEnum;
            }
        }
        return null;
    }
}
"#;
    assert_eq!(out, expected);
}

#[test]
fn simple_enum_renders_the_full_class() {
    let out = enums::render(&result_enum(EnumStyle::Simple), &GeneratorConfig::default()).unwrap();
    let expected = r#"package com.example.rpc.enums;

public enum Result {
    SUCCESS,
    INVALID_DATA;

    /**
     * Convert String to Result
     *
     * @param value String
     * @return Result
     */
    public static Result valueForString(String value) {
        try {
            return valueOf(value);
        } catch (Exception e) {
            return null;
        }
    }
}
"#;
    assert_eq!(out, expected);
}

#[test]
fn mapped_values_keep_distinct_wire_strings() {
    let mut desc = result_enum(EnumStyle::Mapped);
    desc.values = vec![
        EnumValueDescriptor::new("NAVIGATION", "NAV_FULLSCREEN_MAP"),
        EnumValueDescriptor::new("VOICE_COMMAND", "VRSESSION"),
    ];
    let out = enums::render(&desc, &GeneratorConfig::default()).unwrap();
    assert!(out.contains("    NAVIGATION(\"NAV_FULLSCREEN_MAP\"),"));
    assert!(out.contains("    VOICE_COMMAND(\"VRSESSION\");"));
}

#[test]
fn value_descriptions_become_javadoc() {
    let mut desc = result_enum(EnumStyle::Mapped);
    desc.values[0].description = vec!["The request succeeded".to_string()];
    let out = enums::render(&desc, &GeneratorConfig::default()).unwrap();
    assert!(out.contains(
        "    /**\n     * The request succeeded\n     */\n    SUCCESS(\"SUCCESS\"),"
    ));
}

#[test]
fn declaration_order_is_reproduced() {
    let desc = result_enum(EnumStyle::Mapped);
    let out = enums::render(&desc, &GeneratorConfig::default()).unwrap();
    assert!(out.find("SUCCESS").unwrap() < out.find("INVALID_DATA").unwrap());

    let mut reversed = result_enum(EnumStyle::Mapped);
    reversed.values.reverse();
    let out = enums::render(&reversed, &GeneratorConfig::default()).unwrap();
    assert!(out.find("INVALID_DATA").unwrap() < out.find("SUCCESS(").unwrap());
}

#[test]
fn mapped_lookup_round_trips_and_misses_are_absent() {
    let desc = result_enum(EnumStyle::Mapped);
    for value in &desc.values {
        assert_eq!(
            desc.lookup(Some(&value.origin)).unwrap().iname,
            value.iname
        );
    }
    assert!(desc.lookup(Some("__unknown__")).is_none());
    assert!(desc.lookup(None).is_none());
}

#[test]
fn simple_lookup_never_raises_on_unknown_names() {
    let desc = result_enum(EnumStyle::Simple);
    for value in &desc.values {
        assert_eq!(desc.lookup(Some(&value.iname)).unwrap().iname, value.iname);
    }
    assert!(desc.lookup(Some("NOT_DECLARED")).is_none());
    assert!(desc.lookup(None).is_none());
}
