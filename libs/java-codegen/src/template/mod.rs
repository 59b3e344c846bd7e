//! Minimal text-template engine
//!
//! Evaluates the skeletons the renderers are written in: `{{ expr }}`
//! substitution, `{% if %}`/`{% for %}` control flow with loop-position
//! awareness, selection of sequence elements by a boolean attribute, an
//! `indent` filter for continuation lines, and base-skeleton extension through
//! named blocks. The engine has no knowledge of the target type system; every
//! semantic decision is resolved into the context before substitution.
//!
//! Whitespace rules: explicit `{%-`/`-%}` (and `{{-`/`-}}`) markers trim all
//! adjacent whitespace; a control tag standing alone on its line consumes the
//! whole line.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// A parsed template, reusable across renders. Immutable after parse.
#[derive(Debug)]
pub struct Template {
    nodes: Vec<Node>,
}

/// A base skeleton plus overrides for its named extension points. Rendering is
/// two-phase: the base evaluates normally, and at each `{% block name %}` the
/// override template (or the block's inline default) is evaluated against the
/// same context.
#[derive(Debug)]
pub struct Skeleton {
    base: Template,
    blocks: HashMap<String, Template>,
}

impl Skeleton {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Skeleton {
            base: Template::parse(base)?,
            blocks: HashMap::new(),
        })
    }

    pub fn block(mut self, name: &str, src: &str) -> Result<Self> {
        self.blocks.insert(name.to_string(), Template::parse(src)?);
        Ok(self)
    }

    pub fn render(&self, ctx: &Value) -> Result<String> {
        let mut out = String::new();
        let mut scope = Scope::new(ctx);
        render_nodes(&self.base.nodes, &mut scope, &self.blocks, &mut out)?;
        Ok(out)
    }
}

#[derive(Debug)]
enum Node {
    Text(String),
    Output { expr: ExprNode, line: usize },
    If {
        cond: Path,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    For {
        var: String,
        seq: Path,
        select: Option<String>,
        body: Vec<Node>,
    },
    Block { name: String, default: Vec<Node> },
}

type Path = Vec<String>;

#[derive(Debug)]
struct ExprNode {
    path: Path,
    filters: Vec<Filter>,
}

#[derive(Debug)]
enum Filter {
    Indent(IndentArg),
    Join(String),
}

#[derive(Debug)]
enum IndentArg {
    Literal(usize),
    Path(Path),
}

impl Template {
    pub fn parse(src: &str) -> Result<Template> {
        let segments = lex(src)?;
        let mut iter = segments.into_iter().peekable();
        let (nodes, terminator) = parse_nodes(&mut iter, &[])?;
        if let Some(tag) = terminator {
            return Err(Error::TemplateParse {
                line: tag.line,
                message: format!("unexpected '{}'", tag.inner),
            });
        }
        Ok(Template { nodes })
    }

    pub fn render(&self, ctx: &Value) -> Result<String> {
        let mut out = String::new();
        let mut scope = Scope::new(ctx);
        render_nodes(&self.nodes, &mut scope, &HashMap::new(), &mut out)?;
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Segment {
    Text(String),
    Expr(TagToken),
    Tag(TagToken),
}

#[derive(Debug)]
struct TagToken {
    inner: String,
    line: usize,
    trim_left: bool,
    trim_right: bool,
    // Set when standalone-line stripping consumed the trailing newline, so a
    // following tag still sees a line start through the now-empty text.
    stripped: bool,
}

fn lex(src: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = src;
    let mut line = 1;

    loop {
        let next_expr = rest.find("{{");
        let next_tag = rest.find("{%");
        let (pos, is_tag) = match (next_expr, next_tag) {
            (Some(e), Some(t)) if t < e => (t, true),
            (Some(e), _) => (e, false),
            (None, Some(t)) => (t, true),
            (None, None) => {
                if !rest.is_empty() {
                    segments.push(Segment::Text(rest.to_string()));
                }
                break;
            }
        };

        if pos > 0 {
            let text = &rest[..pos];
            line += text.matches('\n').count();
            segments.push(Segment::Text(text.to_string()));
        }
        rest = &rest[pos + 2..];

        let close = if is_tag { "%}" } else { "}}" };
        let end = rest.find(close).ok_or(Error::TemplateParse {
            line,
            message: format!("unclosed '{}'", if is_tag { "{%" } else { "{{" }),
        })?;
        let mut inner = &rest[..end];
        let start_line = line;
        line += inner.matches('\n').count();
        rest = &rest[end + 2..];

        let trim_left = inner.starts_with('-');
        if trim_left {
            inner = &inner[1..];
        }
        let trim_right = inner.ends_with('-');
        if trim_right {
            inner = &inner[..inner.len() - 1];
        }

        let token = TagToken {
            inner: inner.trim().to_string(),
            line: start_line,
            trim_left,
            trim_right,
            stripped: false,
        };
        if token.inner.is_empty() {
            return Err(Error::TemplateParse {
                line: start_line,
                message: "empty tag".to_string(),
            });
        }
        segments.push(if is_tag {
            Segment::Tag(token)
        } else {
            Segment::Expr(token)
        });
    }

    apply_trim(&mut segments);
    Ok(segments)
}

/// Apply explicit trim markers, then standalone-line stripping for control
/// tags that own their whole line.
fn apply_trim(segments: &mut [Segment]) {
    // Explicit markers first.
    for i in 0..segments.len() {
        let (trim_left, trim_right) = match &segments[i] {
            Segment::Expr(t) | Segment::Tag(t) => (t.trim_left, t.trim_right),
            Segment::Text(_) => continue,
        };
        if trim_left && i > 0 {
            if let Segment::Text(text) = &mut segments[i - 1] {
                text.truncate(text.trim_end().len());
            }
        }
        if trim_right && i + 1 < segments.len() {
            if let Segment::Text(text) = &mut segments[i + 1] {
                *text = text.trim_start().to_string();
            }
        }
    }

    for i in 0..segments.len() {
        match &segments[i] {
            Segment::Tag(t) if !t.trim_left && !t.trim_right => {}
            _ => continue,
        }
        if !at_line_start(segments, i) {
            continue;
        }
        // The rest of the line must be blank up to a newline or end of input.
        let strip_next = match segments.get(i + 1) {
            None => true,
            Some(Segment::Text(text)) => {
                let without_blanks = text.trim_start_matches([' ', '\t']);
                without_blanks.starts_with('\n')
                    || (without_blanks.is_empty() && i + 2 == segments.len())
            }
            Some(_) => false,
        };
        if !strip_next {
            continue;
        }

        // Drop the indentation before the tag.
        if i > 0 {
            if let Segment::Text(text) = &mut segments[i - 1] {
                let keep = match text.rfind('\n') {
                    Some(nl) => nl + 1,
                    None => 0,
                };
                text.truncate(keep);
            }
        }
        // Drop the blanks and line break after the tag.
        if let Some(Segment::Text(text)) = segments.get_mut(i + 1) {
            let trimmed = text.trim_start_matches([' ', '\t']);
            *text = match trimmed.strip_prefix('\n') {
                Some(after) => after.to_string(),
                None => trimmed.to_string(),
            };
        }
        if let Segment::Tag(t) = &mut segments[i] {
            t.stripped = true;
        }
    }
}

/// Whether segment `i` begins at the start of a line, looking back through
/// empty text and previously stripped tags.
fn at_line_start(segments: &[Segment], i: usize) -> bool {
    let mut j = i;
    while j > 0 {
        match &segments[j - 1] {
            Segment::Text(text) => {
                if text.is_empty() {
                    j -= 1;
                    continue;
                }
                let tail = match text.rfind('\n') {
                    Some(nl) => &text[nl + 1..],
                    None => return false,
                };
                return tail.chars().all(|c| c == ' ' || c == '\t');
            }
            Segment::Tag(t) if t.stripped || t.trim_right => return true,
            _ => return false,
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

type SegmentIter = std::iter::Peekable<std::vec::IntoIter<Segment>>;

fn parse_nodes(
    iter: &mut SegmentIter,
    stop: &[&str],
) -> Result<(Vec<Node>, Option<TagToken>)> {
    let mut nodes = Vec::new();

    while let Some(segment) = iter.next() {
        match segment {
            Segment::Text(text) => {
                if !text.is_empty() {
                    nodes.push(Node::Text(text));
                }
            }
            Segment::Expr(token) => {
                let line = token.line;
                nodes.push(Node::Output {
                    expr: parse_expr(&token)?,
                    line,
                });
            }
            Segment::Tag(token) => {
                let keyword = token.inner.split_whitespace().next().unwrap_or("");
                if stop.contains(&keyword) {
                    return Ok((nodes, Some(token)));
                }
                nodes.push(parse_tag(token, iter)?);
            }
        }
    }

    Ok((nodes, None))
}

fn parse_tag(token: TagToken, iter: &mut SegmentIter) -> Result<Node> {
    let line = token.line;
    let mut words = token.inner.split_whitespace();
    let keyword = words.next().unwrap_or("");

    match keyword {
        "if" => {
            let cond = parse_path(token.inner["if".len()..].trim(), line)?;
            let (then, terminator) = parse_nodes(iter, &["else", "endif"])?;
            let terminator = terminator.ok_or(Error::TemplateParse {
                line,
                message: "unterminated 'if'".to_string(),
            })?;
            let otherwise = if terminator.inner == "else" {
                let (otherwise, terminator) = parse_nodes(iter, &["endif"])?;
                if terminator.is_none() {
                    return Err(Error::TemplateParse {
                        line,
                        message: "unterminated 'else'".to_string(),
                    });
                }
                otherwise
            } else {
                Vec::new()
            };
            Ok(Node::If {
                cond,
                then,
                otherwise,
            })
        }
        "for" => {
            let var = words
                .next()
                .ok_or_else(|| bad_tag(line, "'for' needs a variable"))?
                .to_string();
            if words.next() != Some("in") {
                return Err(bad_tag(line, "'for' needs 'in'"));
            }
            let rest: String = words.collect::<Vec<_>>().join(" ");
            let (seq_text, select) = match rest.split_once('|') {
                Some((seq, filter)) => (seq.trim().to_string(), Some(parse_select(filter, line)?)),
                None => (rest.trim().to_string(), None),
            };
            let seq = parse_path(&seq_text, line)?;
            let (body, terminator) = parse_nodes(iter, &["endfor"])?;
            if terminator.is_none() {
                return Err(Error::TemplateParse {
                    line,
                    message: "unterminated 'for'".to_string(),
                });
            }
            Ok(Node::For {
                var,
                seq,
                select,
                body,
            })
        }
        "block" => {
            let name = words
                .next()
                .ok_or_else(|| bad_tag(line, "'block' needs a name"))?
                .to_string();
            let (default, terminator) = parse_nodes(iter, &["endblock"])?;
            if terminator.is_none() {
                return Err(Error::TemplateParse {
                    line,
                    message: "unterminated 'block'".to_string(),
                });
            }
            Ok(Node::Block { name, default })
        }
        other => Err(bad_tag(line, &format!("unknown tag '{other}'"))),
    }
}

fn bad_tag(line: usize, message: &str) -> Error {
    Error::TemplateParse {
        line,
        message: message.to_string(),
    }
}

fn parse_select(filter: &str, line: usize) -> Result<String> {
    let filter = filter.trim();
    let inner = filter
        .strip_prefix("select(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| bad_tag(line, "only 'select(\"attr\")' may filter a sequence"))?;
    parse_string_literal(inner, line)
}

fn parse_expr(token: &TagToken) -> Result<ExprNode> {
    let line = token.line;
    let mut parts = split_pipes(&token.inner);
    let path_text = parts.remove(0);
    let path = parse_path(path_text.trim(), line)?;

    let mut filters = Vec::new();
    for part in parts {
        let part = part.trim();
        if let Some(arg) = part
            .strip_prefix("indent(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let arg = arg.trim();
            let arg = match arg.parse::<usize>() {
                Ok(n) => IndentArg::Literal(n),
                Err(_) => IndentArg::Path(parse_path(arg, line)?),
            };
            filters.push(Filter::Indent(arg));
        } else if let Some(arg) = part
            .strip_prefix("join(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            filters.push(Filter::Join(parse_string_literal(arg.trim(), line)?));
        } else {
            return Err(bad_tag(line, &format!("unknown filter '{part}'")));
        }
    }

    Ok(ExprNode { path, filters })
}

/// Split on `|` outside of string literals.
fn split_pipes(text: &str) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut in_string = false;
    for c in text.chars() {
        match c {
            '"' => {
                in_string = !in_string;
                parts.last_mut().unwrap().push(c);
            }
            '|' if !in_string => parts.push(String::new()),
            _ => parts.last_mut().unwrap().push(c),
        }
    }
    parts
}

fn parse_string_literal(text: &str, line: usize) -> Result<String> {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| bad_tag(line, "expected a double-quoted string"))
}

fn parse_path(text: &str, line: usize) -> Result<Path> {
    if text.is_empty() {
        return Err(bad_tag(line, "expected a variable path"));
    }
    let path: Vec<String> = text.split('.').map(str::to_string).collect();
    for part in &path {
        if part.is_empty()
            || !part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(bad_tag(line, &format!("invalid path '{text}'")));
        }
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

struct Scope<'a> {
    root: &'a Value,
    vars: Vec<(String, Value)>,
}

impl<'a> Scope<'a> {
    fn new(root: &'a Value) -> Self {
        Scope {
            root,
            vars: Vec::new(),
        }
    }

    /// Resolve a dotted path; absent names resolve to `Null` rather than an
    /// error so optional descriptor attributes can drive conditionals.
    fn lookup(&self, path: &Path) -> Value {
        let head = &path[0];
        let mut current = match self.vars.iter().rev().find(|(name, _)| name == head) {
            Some((_, value)) => value.clone(),
            None => self.root.get(head).cloned().unwrap_or(Value::Null),
        };
        for part in &path[1..] {
            current = current.get(part).cloned().unwrap_or(Value::Null);
        }
        current
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn stringify(value: &Value, path: &Path, line: usize) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(Error::Template(format!(
            "cannot render non-scalar value '{}' (line {line})",
            path.join(".")
        ))),
    }
}

fn render_nodes(
    nodes: &[Node],
    scope: &mut Scope,
    blocks: &HashMap<String, Template>,
    out: &mut String,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Output { expr, line } => {
                out.push_str(&evaluate(expr, scope, *line)?);
            }
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                let branch = if truthy(&scope.lookup(cond)) {
                    then
                } else {
                    otherwise
                };
                render_nodes(branch, scope, blocks, out)?;
            }
            Node::For {
                var,
                seq,
                select,
                body,
            } => {
                let items = match scope.lookup(seq) {
                    Value::Array(items) => items,
                    Value::Null => Vec::new(),
                    other => {
                        return Err(Error::Template(format!(
                            "cannot iterate over '{}' ({})",
                            seq.join("."),
                            kind_name(&other)
                        )))
                    }
                };
                let items: Vec<Value> = match select {
                    Some(attr) => items
                        .into_iter()
                        .filter(|item| truthy(item.get(attr.as_str()).unwrap_or(&Value::Null)))
                        .collect(),
                    None => items,
                };
                let len = items.len();
                for (index, item) in items.into_iter().enumerate() {
                    scope.vars.push((var.clone(), item));
                    scope.vars.push((
                        "loop".to_string(),
                        serde_json::json!({
                            "first": index == 0,
                            "last": index + 1 == len,
                            "index": index + 1,
                        }),
                    ));
                    let result = render_nodes(body, scope, blocks, out);
                    scope.vars.pop();
                    scope.vars.pop();
                    result?;
                }
            }
            Node::Block { name, default } => match blocks.get(name) {
                Some(template) => render_nodes(&template.nodes, scope, blocks, out)?,
                None => render_nodes(default, scope, blocks, out)?,
            },
        }
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn evaluate(expr: &ExprNode, scope: &Scope, line: usize) -> Result<String> {
    let mut value = scope.lookup(&expr.path);

    for filter in &expr.filters {
        match filter {
            Filter::Join(sep) => {
                let items = match value {
                    Value::Array(items) => items,
                    other => {
                        return Err(Error::Template(format!(
                            "join expects a sequence, got {} (line {line})",
                            kind_name(&other)
                        )))
                    }
                };
                let mut rendered = Vec::with_capacity(items.len());
                for item in &items {
                    rendered.push(stringify(item, &expr.path, line)?);
                }
                value = Value::String(rendered.join(sep));
            }
            Filter::Indent(arg) => {
                let width = match arg {
                    IndentArg::Literal(n) => *n,
                    IndentArg::Path(path) => match scope.lookup(path) {
                        Value::Number(n) => n.as_u64().unwrap_or(0) as usize,
                        other => {
                            return Err(Error::Template(format!(
                                "indent width '{}' is not a number ({}, line {line})",
                                path.join("."),
                                kind_name(&other)
                            )))
                        }
                    },
                };
                let text = stringify(&value, &expr.path, line)?;
                let pad = " ".repeat(width);
                let indented: Vec<String> =
                    text.lines().map(|l| format!("{pad}{l}")).collect();
                value = Value::String(indented.join("\n"));
            }
        }
    }

    stringify(&value, &expr.path, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(src: &str, ctx: &Value) -> String {
        Template::parse(src).unwrap().render(ctx).unwrap()
    }

    #[test]
    fn substitutes_dotted_paths() {
        let ctx = json!({"p": {"name": "appName"}});
        assert_eq!(render("field {{ p.name }};", &ctx), "field appName;");
    }

    #[test]
    fn missing_variables_render_empty() {
        let ctx = json!({});
        assert_eq!(render("[{{ nothing.here }}]", &ctx), "[]");
    }

    #[test]
    fn conditionals_follow_truthiness() {
        let ctx = json!({"a": "x", "b": "", "c": [], "d": [1]});
        assert_eq!(render("{% if a %}1{% else %}0{% endif %}", &ctx), "1");
        assert_eq!(render("{% if b %}1{% else %}0{% endif %}", &ctx), "0");
        assert_eq!(render("{% if c %}1{% else %}0{% endif %}", &ctx), "0");
        assert_eq!(render("{% if d %}1{% else %}0{% endif %}", &ctx), "1");
        assert_eq!(render("{% if missing %}1{% else %}0{% endif %}", &ctx), "0");
    }

    #[test]
    fn loops_expose_first_last_and_index() {
        let ctx = json!({"items": ["a", "b", "c"]});
        let out = render(
            "{% for i in items %}{{ loop.index }}{{ i }}{% if loop.last %}.{% else %},{% endif %}{% endfor %}",
            &ctx,
        );
        assert_eq!(out, "1a,2b,3c.");
    }

    #[test]
    fn select_filters_by_boolean_attribute() {
        let ctx = json!({"params": [
            {"last": "a", "mandatory": true},
            {"last": "b", "mandatory": false},
            {"last": "c", "mandatory": true},
        ]});
        let out = render(
            "{% for p in params | select(\"mandatory\") %}{{ p.last }}{% endfor %}",
            &ctx,
        );
        assert_eq!(out, "ac");
    }

    #[test]
    fn join_concatenates_scalars() {
        let ctx = json!({"args": ["@NonNull String appName", "Boolean isMediaApplication"]});
        assert_eq!(
            render("({{ args | join(\", \") }})", &ctx),
            "(@NonNull String appName, Boolean isMediaApplication)"
        );
    }

    #[test]
    fn indent_prefixes_every_line() {
        let ctx = json!({"v": "one\ntwo"});
        assert_eq!(render("{{ v | indent(4) }}", &ctx), "    one\n    two");
    }

    #[test]
    fn indent_width_may_come_from_the_context() {
        let ctx = json!({"v": "text", "w": 3});
        assert_eq!(render("{{ v | indent(w) }}", &ctx), "   text");
    }

    #[test]
    fn standalone_control_lines_are_consumed() {
        let ctx = json!({"items": ["a", "b"]});
        let src = "start\n{% for i in items %}\n- {{ i }}\n{% endfor %}\nend\n";
        assert_eq!(render(src, &ctx), "start\n- a\n- b\nend\n");
    }

    #[test]
    fn consecutive_standalone_tags_strip_cleanly() {
        let ctx = json!({"x": false});
        let src = "a\n{% if x %}\nyes\n{% else %}\nno\n{% endif %}\nb\n";
        assert_eq!(render(src, &ctx), "a\nno\nb\n");
    }

    #[test]
    fn inline_tags_preserve_surrounding_text() {
        let ctx = json!({"p": {"modifier": "static"}});
        let src = "private {% if p.modifier %}{{ p.modifier }} {% endif %}String name;";
        assert_eq!(render(src, &ctx), "private static String name;");
    }

    #[test]
    fn explicit_trim_markers_eat_whitespace() {
        let ctx = json!({"x": "v"});
        assert_eq!(render("a   {{- x }}", &ctx), "av");
        assert_eq!(render("{{ x -}}   b", &ctx), "vb");
    }

    #[test]
    fn skeleton_blocks_are_overridden_in_two_phases() {
        let base = "header\n{% block body %}\n{% endblock %}\nfooter\n";
        let body = "hello {{ name }}\n";
        let out = Skeleton::new(base)
            .unwrap()
            .block("body", body)
            .unwrap()
            .render(&json!({"name": "world"}))
            .unwrap();
        assert_eq!(out, "header\nhello world\nfooter\n");
    }

    #[test]
    fn block_default_renders_without_an_override() {
        let base = "a{% block body %}default{% endblock %}b";
        assert_eq!(render(base, &json!({})), "adefaultb");
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = Template::parse("ok\nok\n{% bogus %}").unwrap_err();
        match err {
            Error::TemplateParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("bogus"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unterminated_blocks_are_rejected() {
        assert!(Template::parse("{% if x %}no end").is_err());
        assert!(Template::parse("{% for i in xs %}no end").is_err());
        assert!(Template::parse("text {{ open").is_err());
    }

    #[test]
    fn non_scalar_output_is_a_render_error() {
        let ctx = json!({"items": [1, 2]});
        let err = Template::parse("{{ items }}").unwrap().render(&ctx).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
