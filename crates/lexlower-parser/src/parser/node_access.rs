//! NodeArena access methods and node kind utilities.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use lexlower_scanner::SyntaxKind;

impl Node {
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == SyntaxKind::Identifier as u16
    }

    #[inline]
    pub fn is_function_like(&self) -> bool {
        self.kind == FUNCTION_DECLARATION || self.kind == FUNCTION_EXPRESSION
    }

    /// `for`, `for-in`, `for-of`, `while` and `do-while`.
    #[inline]
    pub fn is_loop(&self) -> bool {
        matches!(
            self.kind,
            FOR_STATEMENT | FOR_IN_STATEMENT | FOR_OF_STATEMENT | WHILE_STATEMENT | DO_STATEMENT
        )
    }

    #[inline]
    pub fn is_binding_pattern(&self) -> bool {
        self.kind == OBJECT_BINDING_PATTERN || self.kind == ARRAY_BINDING_PATTERN
    }

    /// `let` or `const` declaration list.
    #[inline]
    pub fn is_block_scoped_declaration_list(&self) -> bool {
        self.kind == VARIABLE_DECLARATION_LIST && self.flags & node_flags::BLOCK_SCOPED != 0
    }

    /// The declaration keyword of a `VARIABLE_DECLARATION_LIST`.
    pub fn declaration_keyword(&self) -> &'static str {
        if self.has_flag(node_flags::CONST) {
            "const"
        } else if self.has_flag(node_flags::LET) {
            "let"
        } else {
            "var"
        }
    }
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Parent of a node, `NONE` for the root or unknown indices.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    // ============================================================================
    // Typed data accessors
    // ============================================================================

    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.is_identifier() {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Current name of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|d| d.escaped_text.as_str())
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && (node.kind == SyntaxKind::StringLiteral as u16
                || node.kind == SyntaxKind::NumericLiteral as u16
                || node.kind == SyntaxKind::RegularExpressionLiteral as u16
                || node.kind == SyntaxKind::NoSubstitutionTemplateLiteral as u16)
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_computed_property(&self, node: &Node) -> Option<&ComputedPropertyData> {
        if node.has_data() && node.kind == COMPUTED_PROPERTY_NAME {
            self.computed_properties.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_unary_expr(&self, node: &Node) -> Option<&UnaryExprData> {
        if node.has_data()
            && (node.kind == PREFIX_UNARY_EXPRESSION || node.kind == POSTFIX_UNARY_EXPRESSION)
        {
            self.unary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && (node.kind == CALL_EXPRESSION || node.kind == NEW_EXPRESSION) {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data()
            && (node.kind == PROPERTY_ACCESS_EXPRESSION || node.kind == ELEMENT_ACCESS_EXPRESSION)
        {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_conditional_expr(&self, node: &Node) -> Option<&ConditionalExprData> {
        if node.has_data() && node.kind == CONDITIONAL_EXPRESSION {
            self.conditional_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Array or object literal elements.
    #[inline]
    pub fn get_literal_expr(&self, node: &Node) -> Option<&LiteralExprData> {
        if node.has_data()
            && (node.kind == ARRAY_LITERAL_EXPRESSION || node.kind == OBJECT_LITERAL_EXPRESSION)
        {
            self.literal_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_spread(&self, node: &Node) -> Option<&SpreadData> {
        if node.has_data() && node.kind == SPREAD_ELEMENT {
            self.spread_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_property_assignment(&self, node: &Node) -> Option<&PropertyAssignmentData> {
        if node.has_data() && node.kind == PROPERTY_ASSIGNMENT {
            self.property_assignments.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_shorthand_property(&self, node: &Node) -> Option<&ShorthandPropertyData> {
        if node.has_data() && node.kind == SHORTHAND_PROPERTY_ASSIGNMENT {
            self.shorthand_properties.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data() && node.is_function_like() {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binding_pattern(&self, node: &Node) -> Option<&BindingPatternData> {
        if node.has_data() && node.is_binding_pattern() {
            self.binding_patterns.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binding_element(&self, node: &Node) -> Option<&BindingElementData> {
        if node.has_data() && node.kind == BINDING_ELEMENT {
            self.binding_elements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION_LIST {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_expression_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data() && node.kind == EXPRESSION_STATEMENT {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_if_statement(&self, node: &Node) -> Option<&IfStatementData> {
        if node.has_data() && node.kind == IF_STATEMENT {
            self.if_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// for, while and do-while.
    #[inline]
    pub fn get_loop(&self, node: &Node) -> Option<&LoopData> {
        if node.has_data()
            && (node.kind == FOR_STATEMENT || node.kind == WHILE_STATEMENT || node.kind == DO_STATEMENT)
        {
            self.loops.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_for_in_of(&self, node: &Node) -> Option<&ForInOfData> {
        if node.has_data() && (node.kind == FOR_IN_STATEMENT || node.kind == FOR_OF_STATEMENT) {
            self.for_in_of.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// return and throw.
    #[inline]
    pub fn get_return_statement(&self, node: &Node) -> Option<&ReturnData> {
        if node.has_data() && (node.kind == RETURN_STATEMENT || node.kind == THROW_STATEMENT) {
            self.return_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_jump_data(&self, node: &Node) -> Option<&JumpData> {
        if node.has_data() && (node.kind == BREAK_STATEMENT || node.kind == CONTINUE_STATEMENT) {
            self.jump_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_labeled_statement(&self, node: &Node) -> Option<&LabeledData> {
        if node.has_data() && node.kind == LABELED_STATEMENT {
            self.labeled_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_with_statement(&self, node: &Node) -> Option<&WithData> {
        if node.has_data() && node.kind == WITH_STATEMENT {
            self.with_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_switch(&self, node: &Node) -> Option<&SwitchData> {
        if node.has_data() && node.kind == SWITCH_STATEMENT {
            self.switch_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_case_clause(&self, node: &Node) -> Option<&CaseClauseData> {
        if node.has_data() && (node.kind == CASE_CLAUSE || node.kind == DEFAULT_CLAUSE) {
            self.case_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_try(&self, node: &Node) -> Option<&TryData> {
        if node.has_data() && node.kind == TRY_STATEMENT {
            self.try_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_catch_clause(&self, node: &Node) -> Option<&CatchClauseData> {
        if node.has_data() && node.kind == CATCH_CLAUSE {
            self.catch_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    // ============================================================================
    // Traversal
    // ============================================================================

    /// Direct children of a node in source order. Absent optional children
    /// (`NONE`) are skipped.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };

        let add_opt = |children: &mut Vec<NodeIndex>, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };
        let add_list = |children: &mut Vec<NodeIndex>, list: &NodeList| {
            children.extend(list.nodes.iter().copied().filter(|n| n.is_some()));
        };

        let mut children = Vec::new();
        match node.kind {
            SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    add_list(&mut children, &data.statements);
                }
            }
            COMPUTED_PROPERTY_NAME => {
                if let Some(data) = self.get_computed_property(node) {
                    add_opt(&mut children, data.expression);
                }
            }

            // Binding patterns
            OBJECT_BINDING_PATTERN | ARRAY_BINDING_PATTERN => {
                if let Some(data) = self.get_binding_pattern(node) {
                    add_list(&mut children, &data.elements);
                }
            }
            BINDING_ELEMENT => {
                if let Some(data) = self.get_binding_element(node) {
                    add_opt(&mut children, data.property_name);
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }

            // Expressions
            ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
                if let Some(data) = self.get_literal_expr(node) {
                    add_list(&mut children, &data.elements);
                }
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                if let Some(data) = self.get_access_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.name_or_argument);
                }
            }
            CALL_EXPRESSION | NEW_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    add_opt(&mut children, data.expression);
                    if let Some(arguments) = &data.arguments {
                        add_list(&mut children, arguments);
                    }
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(data) = self.get_parenthesized(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            FUNCTION_EXPRESSION | FUNCTION_DECLARATION => {
                if let Some(data) = self.get_function(node) {
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.parameters);
                    add_opt(&mut children, data.body);
                }
            }
            PARAMETER => {
                if let Some(data) = self.get_parameter(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }
            PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
                if let Some(data) = self.get_unary_expr(node) {
                    add_opt(&mut children, data.operand);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    add_opt(&mut children, data.left);
                    add_opt(&mut children, data.right);
                }
            }
            CONDITIONAL_EXPRESSION => {
                if let Some(data) = self.get_conditional_expr(node) {
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.when_true);
                    add_opt(&mut children, data.when_false);
                }
            }
            SPREAD_ELEMENT => {
                if let Some(data) = self.get_spread(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            PROPERTY_ASSIGNMENT => {
                if let Some(data) = self.get_property_assignment(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }
            SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(data) = self.get_shorthand_property(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.object_assignment_initializer);
                }
            }

            // Statements
            BLOCK => {
                if let Some(data) = self.get_block(node) {
                    add_list(&mut children, &data.statements);
                }
            }
            VARIABLE_DECLARATION_LIST => {
                if let Some(data) = self.get_variable(node) {
                    add_list(&mut children, &data.declarations);
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(data) = self.get_variable_declaration(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }
            EXPRESSION_STATEMENT => {
                if let Some(data) = self.get_expression_statement(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.then_statement);
                    add_opt(&mut children, data.else_statement);
                }
            }
            FOR_STATEMENT | WHILE_STATEMENT => {
                if let Some(data) = self.get_loop(node) {
                    add_opt(&mut children, data.initializer);
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.incrementor);
                    add_opt(&mut children, data.statement);
                }
            }
            DO_STATEMENT => {
                // Body comes first in source order.
                if let Some(data) = self.get_loop(node) {
                    add_opt(&mut children, data.statement);
                    add_opt(&mut children, data.condition);
                }
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                if let Some(data) = self.get_for_in_of(node) {
                    add_opt(&mut children, data.initializer);
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.statement);
                }
            }
            RETURN_STATEMENT | THROW_STATEMENT => {
                if let Some(data) = self.get_return_statement(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            BREAK_STATEMENT | CONTINUE_STATEMENT => {
                if let Some(data) = self.get_jump_data(node) {
                    add_opt(&mut children, data.label);
                }
            }
            LABELED_STATEMENT => {
                if let Some(data) = self.get_labeled_statement(node) {
                    add_opt(&mut children, data.label);
                    add_opt(&mut children, data.statement);
                }
            }
            WITH_STATEMENT => {
                if let Some(data) = self.get_with_statement(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.statement);
                }
            }
            SWITCH_STATEMENT => {
                if let Some(data) = self.get_switch(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.clauses);
                }
            }
            CASE_CLAUSE | DEFAULT_CLAUSE => {
                if let Some(data) = self.get_case_clause(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.statements);
                }
            }
            TRY_STATEMENT => {
                if let Some(data) = self.get_try(node) {
                    add_opt(&mut children, data.try_block);
                    add_opt(&mut children, data.catch_clause);
                    add_opt(&mut children, data.finally_block);
                }
            }
            CATCH_CLAUSE => {
                if let Some(data) = self.get_catch_clause(node) {
                    add_opt(&mut children, data.variable_declaration);
                    add_opt(&mut children, data.block);
                }
            }

            // Tokens, identifiers and literals have no children.
            _ => {}
        }
        children
    }

    /// Nearest ancestor (excluding `index` itself) matching `predicate`.
    pub fn find_ancestor(&self, index: NodeIndex, predicate: impl Fn(&Node) -> bool) -> NodeIndex {
        let mut current = self.parent_of(index);
        while let Some(node) = self.get(current) {
            if predicate(node) {
                return current;
            }
            current = self.parent_of(current);
        }
        NodeIndex::NONE
    }
}
