//! Parser state - statement and declaration parsing methods

use lexlower_common::messages;
use lexlower_scanner::SyntaxKind;
use tracing::debug;

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        BindingElementData, BindingPatternData, BlockData, CaseClauseData, CatchClauseData,
        ExprStatementData, ForInOfData, FunctionData, IfStatementData, JumpData, LabeledData,
        LoopData, ParameterData, ReturnData, SourceFileData, SwitchData, TryData, VariableData,
        VariableDeclarationData, WithData, node_flags,
    },
    syntax_kind_ext,
};

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole source text. Parent links are assigned before this
    /// returns.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.file_name))]
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let statements = self.parse_statement_list(0);
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            self.error_unexpected_token();
        }
        self.collect_scanner_diagnostics();

        let end_pos = self.get_source_text().len() as u32;
        let root = self.arena.add_source_file(
            0,
            end_pos,
            SourceFileData {
                statements,
                file_name: self.file_name.clone(),
                text: self.scanner.text_arc(),
            },
        );
        crate::walker::link_parents(&mut self.arena, root);

        debug!(
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Statements up to a closing `}` or the end of input.
    pub(crate) fn parse_statement_list(&mut self, pos: u32) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress: skip the offending token.
                self.error_unexpected_token();
                self.next_token();
            }
        }
        self.make_node_list(statements, pos)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }

        let statement = match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(),
            SyntaxKind::FunctionKeyword => {
                self.parse_function_like(syntax_kind_ext::FUNCTION_DECLARATION)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_jump_statement(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::ImportKeyword | SyntaxKind::ExportKeyword => self.parse_module_statement(),
            SyntaxKind::ClassKeyword => {
                self.skip_class();
                NodeIndex::NONE
            }
            _ if self.is_identifier() && self.look_ahead(|p| p.next_token() == SyntaxKind::ColonToken) => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        };

        self.exit_recursion();
        statement
    }

    /// `let` starts a declaration only when a binding follows it; otherwise
    /// it is an ordinary identifier.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(start_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.token_end();
        self.arena
            .add_block(syntax_kind_ext::BLOCK, start_pos, end_pos, BlockData { statements })
    }

    fn parse_empty_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.arena
            .add_token(syntax_kind_ext::EMPTY_STATEMENT, start_pos, self.token_end())
    }

    fn parse_debugger_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        self.parse_semicolon();
        self.arena
            .add_token(syntax_kind_ext::DEBUGGER_STATEMENT, start_pos, self.token_end())
    }

    /// `var`/`let`/`const` statement. The declaration list node doubles as the
    /// statement and its range includes the trailing semicolon.
    fn parse_variable_statement(&mut self) -> NodeIndex {
        let list = self.parse_variable_declaration_list(false);
        self.parse_semicolon();
        let end_pos = self.token_end();
        if let Some(node) = self.arena.get_mut(list) {
            node.end = end_pos;
        }
        list
    }

    pub(crate) fn parse_variable_declaration_list(&mut self, no_in: bool) -> NodeIndex {
        let start_pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let list_pos = self.token_pos();
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration(no_in));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        let declarations = self.make_node_list(declarations, list_pos);
        let end_pos = self.token_end();
        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            start_pos,
            end_pos,
            VariableData { declarations },
        );
        if let Some(node) = self.arena.get_mut(list) {
            node.flags = flags;
        }
        list
    }

    fn parse_variable_declaration(&mut self, no_in: bool) -> NodeIndex {
        let start_pos = self.token_pos();
        let name = self.parse_binding_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression(no_in)
        } else {
            NodeIndex::NONE
        };
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start_pos,
            self.token_end(),
            VariableDeclarationData { name, initializer },
        )
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Identifier or destructuring pattern in a declaration position.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_binding_identifier(),
        }
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.error_at_current_token(&messages::IDENTIFIER_EXPECTED, &[]);
            return self.create_missing_identifier();
        }
        let start_pos = self.token_pos();
        let text = self.token_value().to_string();
        self.next_token();
        self.arena.add_identifier(start_pos, self.token_end(), text)
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let list_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_binding_element());
            if !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        let elements = self.make_node_list(elements, list_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start_pos,
            self.token_end(),
            BindingPatternData { elements },
        )
    }

    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let name = self.parse_binding_identifier();
            return self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                start_pos,
                self.token_end(),
                BindingElementData {
                    dot_dot_dot_token: true,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer: NodeIndex::NONE,
                },
            );
        }

        let is_shorthand_candidate = self.is_identifier();
        let key = self.parse_property_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
            (key, self.parse_binding_name())
        } else {
            if !is_shorthand_candidate {
                self.error_at_current_token(&messages::TOKEN_EXPECTED, &[":"]);
            }
            (NodeIndex::NONE, key)
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression(false)
        } else {
            NodeIndex::NONE
        };
        self.arena.add_binding_element(
            syntax_kind_ext::BINDING_ELEMENT,
            start_pos,
            self.token_end(),
            BindingElementData {
                dot_dot_dot_token: false,
                property_name,
                name,
                initializer,
            },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let list_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if !dot_dot_dot_token && self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression(false)
            } else {
                NodeIndex::NONE
            };
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_pos,
                self.token_end(),
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.is_token(SyntaxKind::CloseBracketToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        let elements = self.make_node_list(elements, list_pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start_pos,
            self.token_end(),
            BindingPatternData { elements },
        )
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function name(params) { body }` as a declaration or expression.
    pub(crate) fn parse_function_like(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword);
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.error_unsupported(self.token_pos(), "generators");
            self.next_token();
        }

        let name = if self.is_identifier() {
            self.parse_binding_identifier()
        } else {
            if kind == syntax_kind_ext::FUNCTION_DECLARATION {
                self.error_at_current_token(&messages::IDENTIFIER_EXPECTED, &[]);
            }
            NodeIndex::NONE
        };

        let parameters = self.parse_parameters();
        let body = self.parse_block();
        self.arena.add_function(
            kind,
            start_pos,
            self.token_end(),
            FunctionData {
                name,
                parameters,
                body,
            },
        )
    }

    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        let list_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start_pos = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression(false)
            } else {
                NodeIndex::NONE
            };
            parameters.push(self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                start_pos,
                self.token_end(),
                ParameterData {
                    dot_dot_dot_token,
                    name,
                    initializer,
                },
            ));
            if !self.is_token(SyntaxKind::CloseParenToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(parameters, list_pos)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start_pos,
            self.token_end(),
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    /// `( expression )` after `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression(false);
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        // A semicolon after do-while is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            start_pos,
            self.token_end(),
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start_pos,
            self.token_end(),
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = match self.token() {
            SyntaxKind::SemicolonToken => NodeIndex::NONE,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_declaration_list(true)
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_declaration_list(true)
            }
            _ => self.parse_expression(true),
        };

        let for_in_of_kind = match self.token() {
            SyntaxKind::InKeyword => Some(syntax_kind_ext::FOR_IN_STATEMENT),
            SyntaxKind::OfKeyword => Some(syntax_kind_ext::FOR_OF_STATEMENT),
            _ => None,
        };

        if let Some(kind) = for_in_of_kind {
            self.next_token();
            let expression = if kind == syntax_kind_ext::FOR_OF_STATEMENT {
                self.parse_assignment_expression(false)
            } else {
                self.parse_expression(false)
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.arena.add_for_in_of(
                kind,
                start_pos,
                self.token_end(),
                ForInOfData {
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start_pos,
            self.token_end(),
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_jump_statement(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let label = if self.is_identifier() && !self.has_preceding_line_break() {
            self.parse_binding_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena
            .add_jump(kind, start_pos, self.token_end(), JumpData { label })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)
        };
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::RETURN_STATEMENT,
            start_pos,
            self.token_end(),
            ReturnData { expression },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        if self.has_preceding_line_break() {
            self.error_at_current_token(&messages::EXPRESSION_EXPECTED, &[]);
        }
        let expression = self.parse_expression(false);
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::THROW_STATEMENT,
            start_pos,
            self.token_end(),
            ReturnData { expression },
        )
    }

    fn parse_with_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.arena.add_with_statement(
            syntax_kind_ext::WITH_STATEMENT,
            start_pos,
            self.token_end(),
            WithData {
                expression,
                statement,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let list_pos = self.token_pos();
        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_pos = self.token_pos();
            let (kind, test) = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    (syntax_kind_ext::CASE_CLAUSE, self.parse_expression(false))
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
                }
                _ => {
                    self.error_at_current_token(&messages::TOKEN_EXPECTED, &["case"]);
                    break;
                }
            };
            self.parse_expected(SyntaxKind::ColonToken);

            let statements_pos = self.token_pos();
            let mut statements = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                let before = self.token_pos();
                let statement = self.parse_statement();
                if statement.is_some() {
                    statements.push(statement);
                }
                if self.token_pos() == before {
                    self.error_unexpected_token();
                    self.next_token();
                }
            }
            let statements = self.make_node_list(statements, statements_pos);
            clauses.push(self.arena.add_case_clause(
                kind,
                clause_pos,
                self.token_end(),
                CaseClauseData {
                    expression: test,
                    statements,
                },
            ));
        }
        let clauses = self.make_node_list(clauses, list_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            start_pos,
            self.token_end(),
            SwitchData {
                expression,
                clauses,
            },
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let variable = if self.is_token(SyntaxKind::OpenBraceToken)
                    || self.is_token(SyntaxKind::OpenBracketToken)
                {
                    let pattern_pos = self.token_pos();
                    let pattern = self.parse_binding_name();
                    self.error_unsupported(pattern_pos, "destructuring catch parameters");
                    pattern
                } else {
                    self.parse_binding_identifier()
                };
                self.parse_expected(SyntaxKind::CloseParenToken);
                variable
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_pos,
                self.token_end(),
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.error_at_current_token(&messages::TOKEN_EXPECTED, &["catch"]);
        }

        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            start_pos,
            self.token_end(),
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let label = self.parse_binding_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            start_pos,
            self.token_end(),
            LabeledData { label, statement },
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression(false);
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            self.token_end(),
            ExprStatementData { expression },
        )
    }

    /// `import`/`export` are outside the supported subset: report once and
    /// skip to the end of the statement.
    fn parse_module_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.error_unsupported(start_pos, "modules");
        self.next_token();
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                _ if depth == 0 && self.has_preceding_line_break() => break,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.next_token();
        }
        NodeIndex::NONE
    }
}
