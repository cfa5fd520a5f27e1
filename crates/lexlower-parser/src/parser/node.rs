//! Thin node headers and typed data pools.
//!
//! Each node is a 16-byte [`Node`] header (kind, flags, byte range, data
//! index). Kind-specific fields live in one typed `Vec` per node category on
//! the [`NodeArena`], and `data_index` points into the pool selected by
//! `kind`. Parent links live in the `extended_info` side table so that the
//! headers stay small.

use super::base::{NodeIndex, NodeList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Token kind (`SyntaxKind as u16`) or a `syntax_kind_ext` constant
    pub kind: u16,
    /// See [`node_flags`]
    pub flags: u16,
    /// Start byte offset of the first token
    pub pos: u32,
    /// End byte offset of the last token
    pub end: u32,
    /// Index into the kind's data pool (`u32::MAX` = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

/// Packed node flags.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// `let` declaration list
    pub const LET: u16 = 1 << 0;
    /// `const` declaration list
    pub const CONST: u16 = 1 << 1;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
    /// Object literal method (`{ f() {} }`)
    pub const METHOD: u16 = 1 << 2;
    /// Object literal getter
    pub const GETTER: u16 = 1 << 3;
    /// Object literal setter
    pub const SETTER: u16 = 1 << 4;
    /// Node was created during error recovery
    pub const MISSING: u16 = 1 << 5;
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    /// Identifier name with escapes resolved. Lowering overwrites this when
    /// the binding is renamed.
    pub escaped_text: String,
    /// Name before lowering renamed it.
    pub original_name: Option<String>,
}

/// Data for string, numeric, regex and template literals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    /// Cooked text for strings and templates, raw text otherwise
    pub text: String,
    /// For numeric literals only
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

/// Data for call/new expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    /// `None` for `new Foo` without an argument list
    pub arguments: Option<NodeList>,
}

/// Data for property/element access
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// Data for array and object literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    /// `{ a = 1 }`, only meaningful as an assignment target
    pub object_assignment_initializer: NodeIndex,
}

/// Data for spread elements (`...expr`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

/// Data for function declarations and expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

/// Data for binding elements.
///
/// In object patterns `property_name` is the key (`NONE` for shorthand
/// `{ a }`); in array patterns it is always `NONE`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for `var`/`let`/`const` lists. The keyword is in `node.flags`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

/// Data for one declarator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// Data for for/while/do loops
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for for-in/for-of statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInOfData {
    /// Variable declaration list or assignment target expression
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for return/throw statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// Data for break/continue statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithData {
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

/// Data for case/default clauses (`expression` is `NONE` for default)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClauseData {
    /// Caught identifier, `NONE` for `catch {}`
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
    #[serde(
        serialize_with = "serialize_arc_str",
        deserialize_with = "deserialize_arc_str"
    )]
    pub text: Arc<str>,
}

fn serialize_arc_str<S>(arc: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(arc)
}

fn deserialize_arc_str<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Arc::from(s))
}

// =============================================================================
// Node Arena
// =============================================================================

/// Arena for thin nodes with typed data pools.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub computed_properties: Vec<ComputedPropertyData>,

    // Expressions
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub spread_data: Vec<SpreadData>,

    // Object literal members
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub shorthand_properties: Vec<ShorthandPropertyData>,

    // Functions
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,

    // Binding patterns
    pub binding_patterns: Vec<BindingPatternData>,
    pub binding_elements: Vec<BindingElementData>,

    // Statements
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub return_data: Vec<ReturnData>,
    pub jump_data: Vec<JumpData>,
    pub labeled_data: Vec<LabeledData>,
    pub with_data: Vec<WithData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,

    // Source file
    pub source_files: Vec<SourceFileData>,

    /// Per-node side table, indexed like `nodes`
    pub extended_info: Vec<ExtendedNodeInfo>,
}

/// Node info that does not fit in the 16-byte header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

/// Generates an `add_*` constructor that pushes `data` into `$pool`.
macro_rules! add_with_data {
    ($(#[$meta:meta])* $fn_name:ident, $pool:ident, $data:ty) => {
        $(#[$meta])*
        pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
            let data_index = self.$pool.len() as u32;
            self.$pool.push(data);
            self.push_node(Node::with_data(kind, pos, end, data_index))
        }
    };
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity for the hottest pools.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 3);
        arena.literals = Vec::with_capacity(safe_capacity / 8);
        arena.binary_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.call_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.access_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (no additional data): `this`, `true`, omitted
    /// expressions, empty statements and the like.
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: String) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: text,
            original_name: None,
        });
        self.push_node(Node::with_data(
            lexlower_scanner::SyntaxKind::Identifier as u16,
            pos,
            end,
            data_index,
        ))
    }

    add_with_data!(add_literal, literals, LiteralData);
    add_with_data!(add_computed_property, computed_properties, ComputedPropertyData);
    add_with_data!(add_binary_expr, binary_exprs, BinaryExprData);
    add_with_data!(
        /// Prefix or postfix unary expression
        add_unary_expr,
        unary_exprs,
        UnaryExprData
    );
    add_with_data!(add_call_expr, call_exprs, CallExprData);
    add_with_data!(add_access_expr, access_exprs, AccessExprData);
    add_with_data!(add_conditional_expr, conditional_exprs, ConditionalExprData);
    add_with_data!(add_parenthesized, parenthesized, ParenthesizedData);
    add_with_data!(
        /// Array or object literal
        add_literal_expr,
        literal_exprs,
        LiteralExprData
    );
    add_with_data!(add_spread, spread_data, SpreadData);
    add_with_data!(add_property_assignment, property_assignments, PropertyAssignmentData);
    add_with_data!(add_shorthand_property, shorthand_properties, ShorthandPropertyData);
    add_with_data!(add_function, functions, FunctionData);
    add_with_data!(add_parameter, parameters, ParameterData);
    add_with_data!(add_binding_pattern, binding_patterns, BindingPatternData);
    add_with_data!(add_binding_element, binding_elements, BindingElementData);
    add_with_data!(add_block, blocks, BlockData);
    add_with_data!(add_variable, variables, VariableData);
    add_with_data!(
        add_variable_declaration,
        variable_declarations,
        VariableDeclarationData
    );
    add_with_data!(add_expr_statement, expr_statements, ExprStatementData);
    add_with_data!(add_if_statement, if_statements, IfStatementData);
    add_with_data!(
        /// for, while and do-while
        add_loop,
        loops,
        LoopData
    );
    add_with_data!(add_for_in_of, for_in_of, ForInOfData);
    add_with_data!(
        /// return and throw
        add_return,
        return_data,
        ReturnData
    );
    add_with_data!(
        /// break and continue
        add_jump,
        jump_data,
        JumpData
    );
    add_with_data!(add_labeled, labeled_data, LabeledData);
    add_with_data!(add_with_statement, with_data, WithData);
    add_with_data!(add_switch, switch_data, SwitchData);
    add_with_data!(add_case_clause, case_clauses, CaseClauseData);
    add_with_data!(add_try, try_data, TryData);
    add_with_data!(add_catch_clause, catch_clauses, CatchClauseData);

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        self.push_node(Node::with_data(
            super::syntax_kind_ext::SOURCE_FILE,
            pos,
            end,
            data_index,
        ))
    }

    // ============================================================================
    // Mutation
    // ============================================================================

    /// Rename an identifier node in place, remembering its first name.
    pub fn rename_identifier(&mut self, index: NodeIndex, new_name: &str) -> bool {
        let Some(node) = self.get(index) else {
            return false;
        };
        if node.kind != lexlower_scanner::SyntaxKind::Identifier as u16 || !node.has_data() {
            return false;
        }
        let data_index = node.data_index as usize;
        let Some(data) = self.identifiers.get_mut(data_index) else {
            return false;
        };
        if data.original_name.is_none() {
            data.original_name = Some(std::mem::take(&mut data.escaped_text));
        }
        data.escaped_text = new_name.to_string();
        true
    }

    pub fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.get_extended_mut(child) {
            info.parent = parent;
        }
    }
}
