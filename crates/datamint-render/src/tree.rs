use std::collections::HashSet;

use serde_json::Value;

/// Expansion key of the top-level value.
pub const ROOT_KEY: &str = "root";

/// Set of expansion keys whose nodes are open.
///
/// Keys are structural paths (`root[0].name`); keys left over from data of
/// a different shape never match a node and are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn expand(&mut self, key: impl Into<String>) {
        self.expanded.insert(key.into());
    }

    pub fn collapse(&mut self, key: &str) {
        self.expanded.remove(key);
    }

    /// Flip `key`; returns whether it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    /// Open every non-empty compound node of `value`.
    pub fn expand_all(&mut self, value: &Value) {
        let mut stack = vec![(ROOT_KEY.to_string(), value)];
        while let Some((key, node)) = stack.pop() {
            match node {
                Value::Array(items) if !items.is_empty() => {
                    for (index, item) in items.iter().enumerate() {
                        stack.push((array_child_key(&key, index), item));
                    }
                    self.expanded.insert(key);
                }
                Value::Object(map) if !map.is_empty() => {
                    for (name, item) in map {
                        stack.push((object_child_key(&key, name), item));
                    }
                    self.expanded.insert(key);
                }
                _ => {}
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }
}

/// Toggle control shown in front of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Scalars and empty compounds have nothing to expand.
    None,
    Collapsed,
    Expanded,
}

/// One visible line of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub key: String,
    /// `N:` for array elements, `"name":` for object properties.
    pub label: Option<String>,
    pub kind: NodeKind,
    pub text: String,
    pub toggle: Toggle,
}

impl TreeLine {
    pub fn is_toggleable(&self) -> bool {
        self.toggle != Toggle::None
    }

    /// Plain-text rendering with two-space indentation per level.
    pub fn render(&self) -> String {
        let marker = match self.toggle {
            Toggle::None => "  ",
            Toggle::Collapsed => "▸ ",
            Toggle::Expanded => "▾ ",
        };
        let indent = "  ".repeat(self.depth);
        match &self.label {
            Some(label) => format!("{indent}{marker}{label} {}", self.text),
            None => format!("{indent}{marker}{}", self.text),
        }
    }
}

struct Frame<'a> {
    key: String,
    label: Option<String>,
    value: &'a Value,
    depth: usize,
}

/// Flatten `value` into the lines visible under `state`.
///
/// Traversal uses an explicit stack so arbitrarily deep values render
/// without recursion. Object properties keep their source order.
pub fn render_tree(value: &Value, state: &ExpansionState) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    let mut stack = vec![Frame {
        key: ROOT_KEY.to_string(),
        label: None,
        value,
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        let toggle = match compound_len(frame.value) {
            None | Some(0) => Toggle::None,
            Some(_) if state.is_expanded(&frame.key) => Toggle::Expanded,
            Some(_) => Toggle::Collapsed,
        };

        if toggle == Toggle::Expanded {
            let depth = frame.depth + 1;
            match frame.value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate().rev() {
                        stack.push(Frame {
                            key: array_child_key(&frame.key, index),
                            label: Some(format!("{index}:")),
                            value: item,
                            depth,
                        });
                    }
                }
                Value::Object(map) => {
                    for (name, item) in map.iter().rev() {
                        stack.push(Frame {
                            key: object_child_key(&frame.key, name),
                            label: Some(format!("{}:", quote(name))),
                            value: item,
                            depth,
                        });
                    }
                }
                _ => {}
            }
        }

        lines.push(TreeLine {
            depth: frame.depth,
            kind: NodeKind::of(frame.value),
            text: node_text(frame.value),
            key: frame.key,
            label: frame.label,
            toggle,
        });
    }

    lines
}

fn compound_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

fn node_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote(text),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
    }
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn array_child_key(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// `K.name` for plain names; names holding path syntax are bracket-quoted
/// (`K["a.b"]`) so no two properties share a key.
fn object_child_key(parent: &str, name: &str) -> String {
    if name.contains(['.', '[', ']', '"']) {
        format!("{parent}[{}]", quote(name))
    } else {
        format!("{parent}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_keys_follow_structure() {
        assert_eq!(array_child_key("root", 3), "root[3]");
        assert_eq!(object_child_key("root[3]", "name"), "root[3].name");
        assert_eq!(object_child_key("root", "a.b"), r#"root["a.b"]"#);
        assert_eq!(object_child_key("root", r#"x"[0]"#), r#"root["x\"[0]"]"#);
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(node_text(&json!("say \"hi\"")), r#""say \"hi\"""#);
        assert_eq!(node_text(&json!({"a": 1, "b": 2})), "{2}");
        assert_eq!(node_text(&json!([])), "[]");
    }
}
