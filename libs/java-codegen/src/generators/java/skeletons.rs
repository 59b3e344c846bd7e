//! Java source skeletons
//!
//! The base skeleton carries everything shared between generated modules
//! (header, package, imports, class-level javadoc); the body skeletons extend
//! it through the `body` block. Loaded once as consts, immutable across
//! renders.

/// Shared outer skeleton: header, package, imports, class documentation.
pub const BASE: &str = r#"{% if copyright %}
{{ copyright }}
{% endif %}
package {{ package_name }};
{% if imports %}

{% for i in imports %}
{% if i %}
import {{ i }};
{% else %}

{% endif %}
{% endfor %}
{% endif %}

{% if has_class_doc %}
/**
{% for d in class_description %}
 * {{ d }}
{% endfor %}
{% if has_param_table %}
 *
 * <p><b>Parameter List</b></p>
 *
 * <table border="1" rules="all">
 *  <tr>
 *      <th>Param Name</th>
 *      <th>Type</th>
 *      <th>Description</th>
 *      <th>Req.</th>
 *      <th>Version Available</th>
 *  </tr>
{% for p in params | select("is_instance") %}
 *  <tr>
 *      <td>{{ p.origin }}</td>
 *      <td>{{ p.return_type }}</td>
 *      <td>{{ p.summary }}</td>
 *      <td>{{ p.mandatory }}</td>
 *      <td>{{ p.since }}</td>
 *  </tr>
{% endfor %}
 * </table>
{% endif %}
{% if see %}
 *
 * @see {{ see }}
{% endif %}
{% if since %}
 *
 * @since {{ since_tag }}
{% endif %}
 */
{% endif %}
{% block body %}
{% endblock %}
"#;

/// Structure-class body: declarations, constructors, accessors, scripts.
pub const STRUCT_BODY: &str = r#"public class {{ class_name }} extends {{ extends_class }} {
{% for p in params %}
{% if p.member_doc %}
    /**
{% for d in p.member_doc %}
     {{ d }}
{% endfor %}
     */
{% endif %}
{% if p.is_instance %}
    private {% if p.modifier %}{{ p.modifier }} {% endif %}{{ p.return_type }} {{ p.name }}{% if p.value %} = {{ p.value }}{% endif %};
{% endif %}
    public static final String {{ p.key }} = "{{ p.origin }}";
{% endfor %}

    /**
     * Constructs a newly allocated {{ class_name }} object
     */
{% if has_defaults %}
    public {{ class_name }}() {
{% for p in params | select("has_default") %}
        setValue({{ p.key }}, {{ p.value }});
{% endfor %}
    }
{% else %}
    public {{ class_name }}() { }
{% endif %}

    /**
     * Constructs a newly allocated {{ class_name }} object indicated by the Hashtable parameter
     *
     * @param hash The Hashtable to use
     */
    public {{ class_name }}(Hashtable<String, Object> hash) {
        super(hash);
    }
{% if has_mandatory %}

    /**
     * Constructs a newly allocated {{ class_name }} object
     *
{% for p in params | select("mandatory") %}
{% if p.tag_doc %}
{% for v in p.tag_doc %}
{% if loop.first %}
     * @param {{ p.last }} {{ v }}
{% else %}
     * {{ v | indent(p.param_indent) }}
{% endif %}
{% endfor %}
{% else %}
     * @param {{ p.last }}
{% endif %}
{% endfor %}
     */
    public {{ class_name }}({{ ctor_args | join(", ") }}) {
        this();
{% for p in params | select("mandatory") %}
        set{{ p.title }}({{ p.last }});
{% endfor %}
    }
{% endif %}
{% for p in params | select("is_instance") %}

    /**
     * Gets the {{ p.origin }}.
     *
{% if p.tag_doc %}
{% for v in p.tag_doc %}
{% if loop.first %}
     * @return {{ p.return_type }} {{ v }}
{% else %}
     * {{ v | indent(p.return_indent) }}
{% endif %}
{% endfor %}
{% else %}
     * @return {{ p.return_type }}
{% endif %}
     */
{% if p.suppress_warnings %}
    @SuppressWarnings("{{ p.suppress_warnings }}")
{% endif %}
    public {{ p.return_type }} get{{ p.title }}() {
        {{ p.getter_body }}
    }

    /**
     * Sets the {{ p.origin }}.
     *
{% if p.tag_doc %}
{% for v in p.tag_doc %}
{% if loop.first %}
     * @param {{ p.last }} {{ v }}
{% else %}
     * {{ v | indent(p.param_indent) }}
{% endif %}
{% endfor %}
{% else %}
     * @param {{ p.last }}
{% endif %}
     */
    public void set{{ p.title }}({% if p.mandatory %}@NonNull {% endif %}{{ p.return_type }} {{ p.last }}) {
        {{ p.setter_body }}
    }
{% endfor %}
{% for s in scripts %}

{{ s }}
{% endfor %}
}
"#;

/// Mapped enum body: wire strings distinct from identifiers, with an exact,
/// null-safe string lookup.
pub const ENUM_MAPPED_BODY: &str = r#"public enum {{ class_name }} {
{% for v in values %}
{% if v.member_doc %}
    /**
{% for d in v.member_doc %}
     {{ d }}
{% endfor %}
     */
{% endif %}
    {{ v.iname }}("{{ v.origin }}"){% if loop.last %};{% else %},{% endif %}
{% endfor %}

    private final String INTERNAL_NAME;

    private {{ class_name }}(String internalName) {
        this.INTERNAL_NAME = internalName;
    }

    @Override
    public String toString() {
        return this.INTERNAL_NAME;
    }

    /**
     * Convert String to {{ class_name }}
     *
     * @param value String
     * @return {{ class_name }}
     */
    public static {{ class_name }} valueForString(String value) {
        if (value == null) {
            return null;
        }

        for ({{ class_name }} anEnum : EnumSet.allOf({{ class_name }}.class)) {
            if (anEnum.toString().equals(value)) {
                return anEnum;
            }
        }
        return null;
    }
}
"#;

/// Simple enum body: the identifier is the wire representation.
pub const ENUM_SIMPLE_BODY: &str = r#"public enum {{ class_name }} {
{% for v in values %}
{% if v.member_doc %}
    /**
{% for d in v.member_doc %}
     {{ d }}
{% endfor %}
     */
{% endif %}
    {{ v.iname }}{% if loop.last %};{% else %},{% endif %}
{% endfor %}

    /**
     * Convert String to {{ class_name }}
     *
     * @param value String
     * @return {{ class_name }}
     */
    public static {{ class_name }} valueForString(String value) {
        try {
            return valueOf(value);
        } catch (Exception e) {
            return null;
        }
    }
}
"#;
