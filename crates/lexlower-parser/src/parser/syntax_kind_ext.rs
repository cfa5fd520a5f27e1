//! Node kinds that have no scanner token of their own.
//!
//! Token kinds (identifiers, literals, `this`, `true`, ...) are stored as
//! `SyntaxKind as u16`; everything else uses these constants, which start
//! well above the last token kind.

pub const FIRST_NODE: u16 = 200;

pub const SOURCE_FILE: u16 = 200;

// Names
pub const COMPUTED_PROPERTY_NAME: u16 = 201;

// Binding patterns
pub const OBJECT_BINDING_PATTERN: u16 = 210;
pub const ARRAY_BINDING_PATTERN: u16 = 211;
pub const BINDING_ELEMENT: u16 = 212;

// Expressions
pub const ARRAY_LITERAL_EXPRESSION: u16 = 220;
pub const OBJECT_LITERAL_EXPRESSION: u16 = 221;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = 222;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = 223;
pub const CALL_EXPRESSION: u16 = 224;
pub const NEW_EXPRESSION: u16 = 225;
pub const PARENTHESIZED_EXPRESSION: u16 = 226;
pub const FUNCTION_EXPRESSION: u16 = 227;
pub const PREFIX_UNARY_EXPRESSION: u16 = 228;
pub const POSTFIX_UNARY_EXPRESSION: u16 = 229;
pub const BINARY_EXPRESSION: u16 = 230;
pub const CONDITIONAL_EXPRESSION: u16 = 231;
pub const SPREAD_ELEMENT: u16 = 232;
pub const OMITTED_EXPRESSION: u16 = 233;

// Object literal members
pub const PROPERTY_ASSIGNMENT: u16 = 240;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 241;

// Statements
pub const BLOCK: u16 = 250;
pub const EMPTY_STATEMENT: u16 = 251;
pub const VARIABLE_DECLARATION_LIST: u16 = 252;
pub const EXPRESSION_STATEMENT: u16 = 253;
pub const IF_STATEMENT: u16 = 254;
pub const DO_STATEMENT: u16 = 255;
pub const WHILE_STATEMENT: u16 = 256;
pub const FOR_STATEMENT: u16 = 257;
pub const FOR_IN_STATEMENT: u16 = 258;
pub const FOR_OF_STATEMENT: u16 = 259;
pub const CONTINUE_STATEMENT: u16 = 260;
pub const BREAK_STATEMENT: u16 = 261;
pub const RETURN_STATEMENT: u16 = 262;
pub const WITH_STATEMENT: u16 = 263;
pub const SWITCH_STATEMENT: u16 = 264;
pub const LABELED_STATEMENT: u16 = 265;
pub const THROW_STATEMENT: u16 = 266;
pub const TRY_STATEMENT: u16 = 267;
pub const DEBUGGER_STATEMENT: u16 = 268;

// Declarations
pub const VARIABLE_DECLARATION: u16 = 270;
pub const FUNCTION_DECLARATION: u16 = 271;
pub const PARAMETER: u16 = 272;

// Clauses
pub const CASE_CLAUSE: u16 = 280;
pub const DEFAULT_CLAUSE: u16 = 281;
pub const CATCH_CLAUSE: u16 = 282;

/// Human-readable kind name, used in debug output and tracing.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        SOURCE_FILE => "SourceFile",
        COMPUTED_PROPERTY_NAME => "ComputedPropertyName",
        OBJECT_BINDING_PATTERN => "ObjectBindingPattern",
        ARRAY_BINDING_PATTERN => "ArrayBindingPattern",
        BINDING_ELEMENT => "BindingElement",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        FUNCTION_EXPRESSION => "FunctionExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        SPREAD_ELEMENT => "SpreadElement",
        OMITTED_EXPRESSION => "OmittedExpression",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        BLOCK => "Block",
        EMPTY_STATEMENT => "EmptyStatement",
        VARIABLE_DECLARATION_LIST => "VariableDeclarationList",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        DO_STATEMENT => "DoStatement",
        WHILE_STATEMENT => "WhileStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_IN_STATEMENT => "ForInStatement",
        FOR_OF_STATEMENT => "ForOfStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        BREAK_STATEMENT => "BreakStatement",
        RETURN_STATEMENT => "ReturnStatement",
        WITH_STATEMENT => "WithStatement",
        SWITCH_STATEMENT => "SwitchStatement",
        LABELED_STATEMENT => "LabeledStatement",
        THROW_STATEMENT => "ThrowStatement",
        TRY_STATEMENT => "TryStatement",
        DEBUGGER_STATEMENT => "DebuggerStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        PARAMETER => "Parameter",
        CASE_CLAUSE => "CaseClause",
        DEFAULT_CLAUSE => "DefaultClause",
        CATCH_CLAUSE => "CatchClause",
        _ => match lexlower_scanner::SyntaxKind::try_from_u16(kind) {
            Some(lexlower_scanner::SyntaxKind::Identifier) => "Identifier",
            Some(lexlower_scanner::SyntaxKind::StringLiteral) => "StringLiteral",
            Some(lexlower_scanner::SyntaxKind::NumericLiteral) => "NumericLiteral",
            Some(lexlower_scanner::SyntaxKind::RegularExpressionLiteral) => {
                "RegularExpressionLiteral"
            }
            Some(lexlower_scanner::SyntaxKind::NoSubstitutionTemplateLiteral) => {
                "NoSubstitutionTemplateLiteral"
            }
            Some(lexlower_scanner::SyntaxKind::ThisKeyword) => "ThisKeyword",
            Some(lexlower_scanner::SyntaxKind::TrueKeyword) => "TrueKeyword",
            Some(lexlower_scanner::SyntaxKind::FalseKeyword) => "FalseKeyword",
            Some(lexlower_scanner::SyntaxKind::NullKeyword) => "NullKeyword",
            _ => "Unknown",
        },
    }
}
