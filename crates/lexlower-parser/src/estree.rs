//! ESTree JSON export.
//!
//! Converts the arena tree into the ESTree object shape used by JavaScript
//! tooling. Every node carries `type`, `range` and `loc`. Identifiers that
//! were renamed carry `originalName` next to their new `name`.

use lexlower_common::LineMap;
use lexlower_scanner::SyntaxKind;
use serde_json::{Map, Value, json};

use crate::parser::{NodeArena, NodeIndex, NodeList, node::Node, node_flags, syntax_kind_ext::*};

/// Serialize the tree rooted at `root` (normally the source file).
pub fn to_estree(arena: &NodeArena, root: NodeIndex, line_map: &LineMap) -> Value {
    let source = arena
        .get(root)
        .and_then(|node| arena.get_source_file(node))
        .map(|data| data.text.clone());
    let exporter = EstreeExporter {
        arena,
        source: source.as_deref().unwrap_or(""),
        line_map,
    };
    exporter.node(root)
}

struct EstreeExporter<'a> {
    arena: &'a NodeArena,
    source: &'a str,
    line_map: &'a LineMap,
}

impl EstreeExporter<'_> {
    fn node(&self, index: NodeIndex) -> Value {
        let Some(node) = self.arena.get(index) else {
            return Value::Null;
        };
        let body = self.node_body(index, node);
        if node.kind == PARENTHESIZED_EXPRESSION {
            return body;
        }
        match body {
            Value::Object(fields) => self.finish(node, fields),
            other => other,
        }
    }

    fn nodes(&self, list: &NodeList) -> Value {
        Value::Array(list.iter().map(|index| self.node(index)).collect())
    }

    /// Attach `range` and `loc` to a converted node.
    fn finish(&self, node: &Node, mut fields: Map<String, Value>) -> Value {
        let (start_line, start_column) = self.line_map.line_and_column(node.pos);
        let (end_line, end_column) = self.line_map.line_and_column(node.end);
        fields.insert("range".to_string(), json!([node.pos, node.end]));
        fields.insert(
            "loc".to_string(),
            json!({
                "start": { "line": start_line, "column": start_column },
                "end": { "line": end_line, "column": end_column },
            }),
        );
        Value::Object(fields)
    }

    fn raw(&self, node: &Node) -> &str {
        self.source
            .get(node.pos as usize..node.end as usize)
            .unwrap_or_default()
    }

    fn node_body(&self, index: NodeIndex, node: &Node) -> Value {
        let arena = self.arena;
        let kind = node.kind;

        if node.is_identifier() {
            let Some(data) = arena.get_identifier(node) else {
                return Value::Null;
            };
            let mut value = json!({ "type": "Identifier", "name": data.escaped_text });
            if let Some(original) = &data.original_name {
                value["originalName"] = json!(original);
            }
            return value;
        }

        if kind < FIRST_NODE {
            return self.token_body(node);
        }

        match kind {
            SOURCE_FILE => arena.get_source_file(node).map_or(Value::Null, |data| {
                json!({
                    "type": "Program",
                    "sourceType": "script",
                    "body": self.nodes(&data.statements),
                })
            }),

            // Patterns
            OBJECT_BINDING_PATTERN => arena.get_binding_pattern(node).map_or(Value::Null, |data| {
                let properties: Vec<Value> = data
                    .elements
                    .iter()
                    .map(|element| self.object_pattern_property(element))
                    .collect();
                json!({ "type": "ObjectPattern", "properties": properties })
            }),
            ARRAY_BINDING_PATTERN => arena.get_binding_pattern(node).map_or(Value::Null, |data| {
                json!({ "type": "ArrayPattern", "elements": self.nodes(&data.elements) })
            }),
            BINDING_ELEMENT => arena.get_binding_element(node).map_or(Value::Null, |data| {
                self.binding_target(data.dot_dot_dot_token, data.name, data.initializer)
            }),
            PARAMETER => arena.get_parameter(node).map_or(Value::Null, |data| {
                self.binding_target(data.dot_dot_dot_token, data.name, data.initializer)
            }),

            // Expressions
            ARRAY_LITERAL_EXPRESSION => arena.get_literal_expr(node).map_or(Value::Null, |data| {
                json!({ "type": "ArrayExpression", "elements": self.nodes(&data.elements) })
            }),
            OBJECT_LITERAL_EXPRESSION => arena.get_literal_expr(node).map_or(Value::Null, |data| {
                json!({ "type": "ObjectExpression", "properties": self.nodes(&data.elements) })
            }),
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                arena.get_access_expr(node).map_or(Value::Null, |data| {
                    json!({
                        "type": "MemberExpression",
                        "object": self.node(data.expression),
                        "property": self.node(data.name_or_argument),
                        "computed": kind == ELEMENT_ACCESS_EXPRESSION,
                    })
                })
            }
            CALL_EXPRESSION | NEW_EXPRESSION => arena.get_call_expr(node).map_or(Value::Null, |data| {
                let arguments = data
                    .arguments
                    .as_ref()
                    .map_or_else(|| json!([]), |list| self.nodes(list));
                json!({
                    "type": if kind == CALL_EXPRESSION { "CallExpression" } else { "NewExpression" },
                    "callee": self.node(data.expression),
                    "arguments": arguments,
                })
            }),
            // ESTree has no parenthesized node.
            PARENTHESIZED_EXPRESSION => arena
                .get_parenthesized(node)
                .map_or(Value::Null, |data| self.node(data.expression)),
            FUNCTION_EXPRESSION | FUNCTION_DECLARATION => arena.get_function(node).map_or(Value::Null, |data| {
                json!({
                    "type": if kind == FUNCTION_DECLARATION { "FunctionDeclaration" } else { "FunctionExpression" },
                    "id": self.node(data.name),
                    "params": self.nodes(&data.parameters),
                    "body": self.node(data.body),
                    "generator": false,
                    "async": false,
                })
            }),
            PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
                arena.get_unary_expr(node).map_or(Value::Null, |data| {
                    let operator = operator_text(data.operator);
                    let is_update = operator == "++" || operator == "--";
                    json!({
                        "type": if is_update { "UpdateExpression" } else { "UnaryExpression" },
                        "operator": operator,
                        "prefix": kind == PREFIX_UNARY_EXPRESSION,
                        "argument": self.node(data.operand),
                    })
                })
            }
            BINARY_EXPRESSION => self.binary_body(index, node),
            CONDITIONAL_EXPRESSION => arena.get_conditional_expr(node).map_or(Value::Null, |data| {
                json!({
                    "type": "ConditionalExpression",
                    "test": self.node(data.condition),
                    "consequent": self.node(data.when_true),
                    "alternate": self.node(data.when_false),
                })
            }),
            SPREAD_ELEMENT => arena.get_spread(node).map_or(Value::Null, |data| {
                json!({ "type": "SpreadElement", "argument": self.node(data.expression) })
            }),
            OMITTED_EXPRESSION => Value::Null,

            // Object literal members
            PROPERTY_ASSIGNMENT => arena.get_property_assignment(node).map_or(Value::Null, |data| {
                let property_kind = if node.has_flag(node_flags::GETTER) {
                    "get"
                } else if node.has_flag(node_flags::SETTER) {
                    "set"
                } else {
                    "init"
                };
                let (key, computed) = self.property_key(data.name);
                json!({
                    "type": "Property",
                    "key": key,
                    "value": self.node(data.initializer),
                    "kind": property_kind,
                    "method": node.has_flag(node_flags::METHOD),
                    "shorthand": false,
                    "computed": computed,
                })
            }),
            SHORTHAND_PROPERTY_ASSIGNMENT => arena.get_shorthand_property(node).map_or(Value::Null, |data| {
                let value = if data.object_assignment_initializer.is_some() {
                    json!({
                        "type": "AssignmentPattern",
                        "left": self.node(data.name),
                        "right": self.node(data.object_assignment_initializer),
                    })
                } else {
                    self.node(data.name)
                };
                let (key, shorthand) = self.shorthand_key(data.name);
                json!({
                    "type": "Property",
                    "key": key,
                    "value": value,
                    "kind": "init",
                    "method": false,
                    "shorthand": shorthand,
                    "computed": false,
                })
            }),

            // Statements
            BLOCK => arena.get_block(node).map_or(Value::Null, |data| {
                json!({ "type": "BlockStatement", "body": self.nodes(&data.statements) })
            }),
            EMPTY_STATEMENT => json!({ "type": "EmptyStatement" }),
            DEBUGGER_STATEMENT => json!({ "type": "DebuggerStatement" }),
            VARIABLE_DECLARATION_LIST => arena.get_variable(node).map_or(Value::Null, |data| {
                json!({
                    "type": "VariableDeclaration",
                    "declarations": self.nodes(&data.declarations),
                    "kind": node.declaration_keyword(),
                })
            }),
            VARIABLE_DECLARATION => arena.get_variable_declaration(node).map_or(Value::Null, |data| {
                json!({
                    "type": "VariableDeclarator",
                    "id": self.node(data.name),
                    "init": self.node(data.initializer),
                })
            }),
            EXPRESSION_STATEMENT => arena.get_expression_statement(node).map_or(Value::Null, |data| {
                json!({ "type": "ExpressionStatement", "expression": self.node(data.expression) })
            }),
            IF_STATEMENT => arena.get_if_statement(node).map_or(Value::Null, |data| {
                json!({
                    "type": "IfStatement",
                    "test": self.node(data.expression),
                    "consequent": self.node(data.then_statement),
                    "alternate": self.node(data.else_statement),
                })
            }),
            DO_STATEMENT | WHILE_STATEMENT => arena.get_loop(node).map_or(Value::Null, |data| {
                json!({
                    "type": if kind == DO_STATEMENT { "DoWhileStatement" } else { "WhileStatement" },
                    "test": self.node(data.condition),
                    "body": self.node(data.statement),
                })
            }),
            FOR_STATEMENT => arena.get_loop(node).map_or(Value::Null, |data| {
                json!({
                    "type": "ForStatement",
                    "init": self.node(data.initializer),
                    "test": self.node(data.condition),
                    "update": self.node(data.incrementor),
                    "body": self.node(data.statement),
                })
            }),
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => arena.get_for_in_of(node).map_or(Value::Null, |data| {
                json!({
                    "type": if kind == FOR_IN_STATEMENT { "ForInStatement" } else { "ForOfStatement" },
                    "left": self.node(data.initializer),
                    "right": self.node(data.expression),
                    "body": self.node(data.statement),
                })
            }),
            CONTINUE_STATEMENT | BREAK_STATEMENT => arena.get_jump_data(node).map_or(Value::Null, |data| {
                json!({
                    "type": if kind == BREAK_STATEMENT { "BreakStatement" } else { "ContinueStatement" },
                    "label": self.node(data.label),
                })
            }),
            RETURN_STATEMENT | THROW_STATEMENT => arena.get_return_statement(node).map_or(Value::Null, |data| {
                json!({
                    "type": if kind == RETURN_STATEMENT { "ReturnStatement" } else { "ThrowStatement" },
                    "argument": self.node(data.expression),
                })
            }),
            WITH_STATEMENT => arena.get_with_statement(node).map_or(Value::Null, |data| {
                json!({
                    "type": "WithStatement",
                    "object": self.node(data.expression),
                    "body": self.node(data.statement),
                })
            }),
            SWITCH_STATEMENT => arena.get_switch(node).map_or(Value::Null, |data| {
                json!({
                    "type": "SwitchStatement",
                    "discriminant": self.node(data.expression),
                    "cases": self.nodes(&data.clauses),
                })
            }),
            CASE_CLAUSE | DEFAULT_CLAUSE => arena.get_case_clause(node).map_or(Value::Null, |data| {
                json!({
                    "type": "SwitchCase",
                    "test": self.node(data.expression),
                    "consequent": self.nodes(&data.statements),
                })
            }),
            LABELED_STATEMENT => arena.get_labeled_statement(node).map_or(Value::Null, |data| {
                json!({
                    "type": "LabeledStatement",
                    "label": self.node(data.label),
                    "body": self.node(data.statement),
                })
            }),
            TRY_STATEMENT => arena.get_try(node).map_or(Value::Null, |data| {
                json!({
                    "type": "TryStatement",
                    "block": self.node(data.try_block),
                    "handler": self.node(data.catch_clause),
                    "finalizer": self.node(data.finally_block),
                })
            }),
            CATCH_CLAUSE => arena.get_catch_clause(node).map_or(Value::Null, |data| {
                json!({
                    "type": "CatchClause",
                    "param": self.node(data.variable_declaration),
                    "body": self.node(data.block),
                })
            }),
            _ => json!({ "type": kind_name(kind) }),
        }
    }

    /// Literals and keyword tokens.
    fn token_body(&self, node: &Node) -> Value {
        let raw = self.raw(node);
        match SyntaxKind::try_from_u16(node.kind) {
            Some(SyntaxKind::ThisKeyword) => json!({ "type": "ThisExpression" }),
            Some(SyntaxKind::SuperKeyword) => json!({ "type": "Super" }),
            Some(SyntaxKind::NullKeyword) => json!({ "type": "Literal", "value": null, "raw": raw }),
            Some(SyntaxKind::TrueKeyword) => json!({ "type": "Literal", "value": true, "raw": raw }),
            Some(SyntaxKind::FalseKeyword) => json!({ "type": "Literal", "value": false, "raw": raw }),
            Some(SyntaxKind::NumericLiteral) => {
                let value = self.arena.get_literal(node).and_then(|data| data.value);
                json!({ "type": "Literal", "value": value, "raw": raw })
            }
            Some(SyntaxKind::StringLiteral) => {
                let value = self.arena.get_literal(node).map(|data| data.text.as_str());
                json!({ "type": "Literal", "value": value, "raw": raw })
            }
            Some(SyntaxKind::RegularExpressionLiteral) => {
                let (pattern, flags) = raw
                    .rfind('/')
                    .filter(|&slash| slash > 0)
                    .map_or((raw, ""), |slash| (&raw[1..slash], &raw[slash + 1..]));
                json!({
                    "type": "Literal",
                    "value": null,
                    "raw": raw,
                    "regex": { "pattern": pattern, "flags": flags },
                })
            }
            Some(SyntaxKind::NoSubstitutionTemplateLiteral) => {
                let cooked = self.arena.get_literal(node).map(|data| data.text.as_str());
                let raw_inner = raw
                    .strip_prefix('`')
                    .and_then(|s| s.strip_suffix('`'))
                    .unwrap_or(raw);
                json!({
                    "type": "TemplateLiteral",
                    "quasis": [{
                        "type": "TemplateElement",
                        "value": { "raw": raw_inner, "cooked": cooked },
                        "tail": true,
                    }],
                    "expressions": [],
                })
            }
            _ => json!({ "type": "Unknown", "raw": raw }),
        }
    }

    fn binary_body(&self, index: NodeIndex, node: &Node) -> Value {
        let Some(data) = self.arena.get_binary_expr(node) else {
            return Value::Null;
        };
        let operator = operator_text(data.operator_token);

        if data.operator_token == SyntaxKind::CommaToken as u16 {
            let mut expressions = Vec::new();
            self.flatten_sequence(index, &mut expressions);
            return json!({ "type": "SequenceExpression", "expressions": expressions });
        }

        let node_type = match SyntaxKind::try_from_u16(data.operator_token) {
            Some(kind) if kind.is_assignment_operator() => "AssignmentExpression",
            Some(
                SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::QuestionQuestionToken,
            ) => "LogicalExpression",
            _ => "BinaryExpression",
        };
        json!({
            "type": node_type,
            "operator": operator,
            "left": self.node(data.left),
            "right": self.node(data.right),
        })
    }

    /// `a, b, c` parses left-nested; ESTree wants a flat list.
    fn flatten_sequence(&self, index: NodeIndex, out: &mut Vec<Value>) {
        let comma = SyntaxKind::CommaToken as u16;
        let sequence = self
            .arena
            .get(index)
            .filter(|node| node.kind == BINARY_EXPRESSION)
            .and_then(|node| self.arena.get_binary_expr(node))
            .filter(|data| data.operator_token == comma);
        match sequence {
            Some(data) => {
                self.flatten_sequence(data.left, out);
                out.push(self.node(data.right));
            }
            None => out.push(self.node(index)),
        }
    }

    /// Property key and whether it is computed.
    fn property_key(&self, name: NodeIndex) -> (Value, bool) {
        let computed = self
            .arena
            .get(name)
            .filter(|node| node.kind == COMPUTED_PROPERTY_NAME)
            .and_then(|node| self.arena.get_computed_property(node));
        match computed {
            Some(data) => (self.node(data.expression), true),
            None => (self.node(name), false),
        }
    }

    /// Parameter or array-pattern element: the bare target, an
    /// `AssignmentPattern` for defaults, or a `RestElement`.
    fn binding_target(&self, rest: bool, name: NodeIndex, initializer: NodeIndex) -> Value {
        if rest {
            return json!({ "type": "RestElement", "argument": self.node(name) });
        }
        if initializer.is_some() {
            return json!({
                "type": "AssignmentPattern",
                "left": self.node(name),
                "right": self.node(initializer),
            });
        }
        self.node(name)
    }

    fn object_pattern_property(&self, element: NodeIndex) -> Value {
        let Some(node) = self.arena.get(element) else {
            return Value::Null;
        };
        let Some(data) = self.arena.get_binding_element(node) else {
            return self.node(element);
        };
        if data.dot_dot_dot_token {
            let rest = json!({ "type": "RestElement", "argument": self.node(data.name) });
            return self.finish_value(node, rest);
        }
        let (key, computed, shorthand) = if data.property_name.is_none() {
            let (key, shorthand) = self.shorthand_key(data.name);
            (key, false, shorthand)
        } else {
            let (key, computed) = self.property_key(data.property_name);
            (key, computed, false)
        };
        let value = self.binding_target(false, data.name, data.initializer);
        let property = json!({
            "type": "Property",
            "key": key,
            "value": value,
            "kind": "init",
            "method": false,
            "shorthand": shorthand,
            "computed": computed,
        });
        self.finish_value(node, property)
    }

    /// Key of a shorthand property. A renamed shorthand keeps its original
    /// name as the key and stops being shorthand.
    fn shorthand_key(&self, name: NodeIndex) -> (Value, bool) {
        let original = self
            .arena
            .get(name)
            .and_then(|node| Some((node, self.arena.get_identifier(node)?.original_name.as_ref()?)));
        match original {
            Some((node, original)) => {
                let key = json!({ "type": "Identifier", "name": original });
                (self.finish_value(node, key), false)
            }
            None => (self.node(name), true),
        }
    }

    fn finish_value(&self, node: &Node, value: Value) -> Value {
        match value {
            Value::Object(fields) => self.finish(node, fields),
            other => other,
        }
    }
}

fn operator_text(operator: u16) -> &'static str {
    SyntaxKind::try_from_u16(operator).map_or("", SyntaxKind::text)
}
