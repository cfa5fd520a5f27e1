//! Parser state - expression parsing methods

use lexlower_common::messages;
use lexlower_scanner::SyntaxKind;

use super::state::ParserState;
use crate::parser::{
    NodeIndex,
    node::{
        AccessExprData, BinaryExprData, CallExprData, ComputedPropertyData, ConditionalExprData,
        FunctionData, LiteralData, LiteralExprData, ParenthesizedData, PropertyAssignmentData,
        ShorthandPropertyData, SpreadData, UnaryExprData, node_flags,
    },
    syntax_kind_ext,
};

impl ParserState {
    // =========================================================================
    // Expression entry points
    // =========================================================================

    /// `Expression`: assignment expressions joined by commas. `no_in` disables
    /// the `in` operator (for-statement initializers).
    pub(crate) fn parse_expression(&mut self, no_in: bool) -> NodeIndex {
        let mut expr = self.parse_assignment_expression(no_in);
        while self.is_token(SyntaxKind::CommaToken) {
            let start_pos = self.node_pos(expr);
            self.next_token();
            let right = self.parse_assignment_expression(no_in);
            expr = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.token_end(),
                BinaryExprData {
                    left: expr,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }
        expr
    }

    pub(crate) fn parse_assignment_expression(&mut self, no_in: bool) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }

        // `x => ...`
        if self.is_identifier()
            && self.look_ahead(|p| {
                p.next_token() == SyntaxKind::EqualsGreaterThanToken && !p.has_preceding_line_break()
            })
        {
            let start_pos = self.token_pos();
            self.next_token();
            let skipped = self.skip_arrow_function(start_pos);
            self.exit_recursion();
            return skipped;
        }

        let start_pos = self.token_pos();
        let expr = self.parse_conditional_expression(no_in);
        let result = if self.token().is_assignment_operator() {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression(no_in);
            self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.token_end(),
                BinaryExprData {
                    left: expr,
                    operator_token: operator as u16,
                    right,
                },
            )
        } else {
            expr
        };

        self.exit_recursion();
        result
    }

    fn parse_conditional_expression(&mut self, no_in: bool) -> NodeIndex {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(0, no_in);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_assignment_expression(false);
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression(no_in);
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.token_end(),
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// Precedence climbing over binary operators. `**` is right-associative.
    fn parse_binary_expression(&mut self, precedence: u8, no_in: bool) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            let new_precedence = binary_operator_precedence(operator, no_in);
            if new_precedence == 0 {
                break;
            }
            let binds = if operator == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !binds {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(new_precedence, no_in);
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.token_end(),
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
        left
    }

    // =========================================================================
    // Unary and postfix
    // =========================================================================

    fn parse_unary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                if !self.enter_recursion() {
                    return self.create_missing_identifier();
                }
                let start_pos = self.token_pos();
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression();
                self.exit_recursion();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.token_end(),
                    UnaryExprData {
                        operator: operator as u16,
                        operand,
                    },
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        if (self.is_token(SyntaxKind::PlusPlusToken) || self.is_token(SyntaxKind::MinusMinusToken))
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            return self.arena.add_unary_expr(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                start_pos,
                self.token_end(),
                UnaryExprData {
                    operator: operator as u16,
                    operand,
                },
            );
        }
        operand
    }

    // =========================================================================
    // Member, call and new
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_call_tail(start_pos, expr, true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);

        if self.is_token(SyntaxKind::DotToken) {
            self.error_unsupported(start_pos, "new.target expressions");
            self.next_token();
            if self.is_identifier_or_keyword() {
                self.next_token();
            }
            return self.create_missing_identifier();
        }

        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_call_tail(callee_pos, callee, false);
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments())
        } else {
            None
        };
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            self.token_end(),
            CallExprData {
                expression,
                arguments,
            },
        )
    }

    /// Property accesses, element accesses and (when `allow_call`) calls
    /// following `expr`.
    fn parse_call_tail(&mut self, start_pos: u32, mut expr: NodeIndex, allow_call: bool) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expr = self.arena.add_access_expr(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start_pos,
                        self.token_end(),
                        AccessExprData {
                            expression: expr,
                            name_or_argument: name,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_expression(false);
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    expr = self.arena.add_access_expr(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start_pos,
                        self.token_end(),
                        AccessExprData {
                            expression: expr,
                            name_or_argument: argument,
                        },
                    );
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments();
                    expr = self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start_pos,
                        self.token_end(),
                        CallExprData {
                            expression: expr,
                            arguments: Some(arguments),
                        },
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral => {
                    self.error_unsupported(self.token_pos(), "tagged templates");
                    self.next_token();
                }
                _ => return expr,
            }
        }
    }

    fn parse_arguments(&mut self) -> crate::parser::NodeList {
        let list_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            arguments.push(self.parse_spread_or_assignment());
            if !self.is_token(SyntaxKind::CloseParenToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(arguments, list_pos)
    }

    fn parse_spread_or_assignment(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression(false);
        }
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression(false);
        self.arena.add_spread(
            syntax_kind_ext::SPREAD_ELEMENT,
            start_pos,
            self.token_end(),
            SpreadData { expression },
        )
    }

    /// Name after `.`: any identifier or keyword.
    fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            self.error_at_current_token(&messages::IDENTIFIER_EXPECTED, &[]);
            return self.create_missing_identifier();
        }
        let start_pos = self.token_pos();
        let text = self.token_value().to_string();
        self.next_token();
        self.arena.add_identifier(start_pos, self.token_end(), text)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::AsyncKeyword
                if self.look_ahead(|p| {
                    p.next_token() == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
                }) =>
            {
                self.error_unsupported(start_pos, "async functions");
                self.next_token();
                self.parse_function_like(syntax_kind_ext::FUNCTION_EXPRESSION)
            }
            _ if self.is_identifier() => {
                let text = self.token_value().to_string();
                self.next_token();
                self.arena.add_identifier(start_pos, self.token_end(), text)
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                self.next_token();
                self.arena.add_token(kind, start_pos, self.token_end())
            }
            SyntaxKind::NumericLiteral => {
                let text = self.token_value().to_string();
                let value = parse_numeric_value(&text);
                self.next_token();
                self.arena.add_literal(
                    SyntaxKind::NumericLiteral as u16,
                    start_pos,
                    self.token_end(),
                    LiteralData { text, value },
                )
            }
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let kind = self.token() as u16;
                let text = self.token_value().to_string();
                self.next_token();
                self.arena.add_literal(
                    kind,
                    start_pos,
                    self.token_end(),
                    LiteralData { text, value: None },
                )
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.current_token = self.scanner.re_scan_slash_token();
                let text = self.token_value().to_string();
                self.next_token();
                self.arena.add_literal(
                    SyntaxKind::RegularExpressionLiteral as u16,
                    start_pos,
                    self.token_end(),
                    LiteralData { text, value: None },
                )
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_arrow(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                self.parse_function_like(syntax_kind_ext::FUNCTION_EXPRESSION)
            }
            SyntaxKind::ClassKeyword => self.skip_class(),
            _ => {
                self.error_at_current_token(&messages::EXPRESSION_EXPECTED, &[]);
                self.create_missing_identifier()
            }
        }
    }

    /// `( expr )`, or an arrow function head which is reported and skipped.
    fn parse_parenthesized_or_arrow(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);

        // `() =>` and `(...rest) =>` can only be arrow parameter lists.
        if self.is_token(SyntaxKind::CloseParenToken) {
            self.next_token();
            return self.skip_arrow_function(start_pos);
        }
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let mut depth = 1u32;
            while depth > 0 && !self.is_token(SyntaxKind::EndOfFileToken) {
                match self.token() {
                    SyntaxKind::OpenParenToken => depth += 1,
                    SyntaxKind::CloseParenToken => depth -= 1,
                    _ => {}
                }
                self.next_token();
            }
            return self.skip_arrow_function(start_pos);
        }

        let expression = self.parse_expression(false);
        self.parse_expected(SyntaxKind::CloseParenToken);
        if self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_preceding_line_break() {
            return self.skip_arrow_function(start_pos);
        }
        self.arena.add_parenthesized(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            start_pos,
            self.token_end(),
            ParenthesizedData { expression },
        )
    }

    /// Report an arrow function whose parameters were already consumed and
    /// skip its body.
    fn skip_arrow_function(&mut self, start_pos: u32) -> NodeIndex {
        self.error_unsupported(start_pos, "arrow functions");
        if self.parse_expected(SyntaxKind::EqualsGreaterThanToken) {
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.parse_block();
            } else {
                self.parse_assignment_expression(false);
            }
        }
        self.create_missing_identifier()
    }

    /// Report a class and skip it up to its closing brace.
    pub(crate) fn skip_class(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.error_unsupported(start_pos, "classes");
        self.next_token();
        while !self.is_token(SyntaxKind::OpenBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.next_token();
        }
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
        self.create_missing_identifier()
    }

    // =========================================================================
    // Array and object literals
    // =========================================================================

    fn parse_array_literal(&mut self) -> NodeIndex {
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
            elements.push(self.parse_spread_or_assignment());
            if !self.is_token(SyntaxKind::CloseBracketToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        let elements = self.make_node_list(elements, list_pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            self.token_end(),
            LiteralExprData { elements },
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let list_pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_literal_member());
            if !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        let elements = self.make_node_list(elements, list_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start_pos,
            self.token_end(),
            LiteralExprData { elements },
        )
    }

    fn parse_object_literal_member(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment();
        }

        if self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead(|p| p.next_is_property_name_start() && !p.has_preceding_line_break())
        {
            self.error_unsupported(start_pos, "async functions");
            self.next_token();
        }
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.error_unsupported(start_pos, "generators");
            self.next_token();
        }

        let accessor_flag = match self.token_value() {
            "get" if self.is_token(SyntaxKind::Identifier) => node_flags::GETTER,
            "set" if self.is_token(SyntaxKind::Identifier) => node_flags::SETTER,
            _ => node_flags::NONE,
        };
        if accessor_flag != node_flags::NONE && self.look_ahead(|p| p.next_is_property_name_start()) {
            self.next_token();
            let name = self.parse_property_name();
            return self.parse_method_member(start_pos, name, accessor_flag);
        }

        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();

        if self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_method_member(start_pos, name, node_flags::METHOD);
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression(false);
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start_pos,
                self.token_end(),
                PropertyAssignmentData { name, initializer },
            );
        }

        if !is_shorthand_candidate {
            self.error_at_current_token(&messages::TOKEN_EXPECTED, &[":"]);
        }
        let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression(false)
        } else {
            NodeIndex::NONE
        };
        self.arena.add_shorthand_property(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            start_pos,
            self.token_end(),
            ShorthandPropertyData {
                name,
                object_assignment_initializer,
            },
        )
    }

    /// True when the token after the current one can start a property name,
    /// i.e. the current `get`/`set`/`async` is a modifier.
    fn next_is_property_name_start(&mut self) -> bool {
        self.next_token();
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::AsteriskToken
            )
    }

    /// `name(params) { body }` member; the function expression starts at the
    /// parameter list.
    fn parse_method_member(&mut self, start_pos: u32, name: NodeIndex, flag: u16) -> NodeIndex {
        let function_pos = self.token_pos();
        let parameters = self.parse_parameters();
        let body = self.parse_block();
        let initializer = self.arena.add_function(
            syntax_kind_ext::FUNCTION_EXPRESSION,
            function_pos,
            self.token_end(),
            FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
            },
        );
        let member = self.arena.add_property_assignment(
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            start_pos,
            self.token_end(),
            PropertyAssignmentData { name, initializer },
        );
        if let Some(node) = self.arena.get_mut(member) {
            node.flags |= flag;
        }
        member
    }

    /// Property key in object literals and object binding patterns.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                let kind = self.token();
                let text = self.token_value().to_string();
                let value = if kind == SyntaxKind::NumericLiteral {
                    parse_numeric_value(&text)
                } else {
                    None
                };
                self.next_token();
                self.arena.add_literal(
                    kind as u16,
                    start_pos,
                    self.token_end(),
                    LiteralData { text, value },
                )
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.parse_assignment_expression(false);
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_computed_property(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start_pos,
                    self.token_end(),
                    ComputedPropertyData { expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    fn node_pos(&self, index: NodeIndex) -> u32 {
        self.arena
            .get(index)
            .map_or_else(|| self.token_pos(), |node| node.pos)
    }
}

/// Binding power of a binary operator; 0 when `kind` is not one.
fn binary_operator_precedence(kind: SyntaxKind, no_in: bool) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 6,
        SyntaxKind::InKeyword if no_in => 0,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 7,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        SyntaxKind::AsteriskAsteriskToken => 11,
        _ => 0,
    }
}

/// Numeric value of a literal's source text. `None` for bigints and for text
/// that does not form a number.
pub(crate) fn parse_numeric_value(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if cleaned.ends_with('n') {
        return None;
    }
    let bytes = cleaned.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return u64::from_str_radix(&cleaned[2..], radix)
                .ok()
                .map(|v| v as f64);
        }
    }
    // Legacy octal: `017`.
    if bytes.len() > 1 && bytes[0] == b'0' && bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return u64::from_str_radix(&cleaned[1..], 8).ok().map(|v| v as f64);
    }
    cleaned.parse::<f64>().ok()
}
