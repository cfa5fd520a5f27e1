//! Diagnostic message table.

use super::DiagnosticCategory;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Scope and binding
    pub const DECLARATION_CONFLICT: u32 = 1001;
    pub const HOISTED_DECLARATION_DISALLOWED: u32 = 1002;
    pub const UNRESOLVED_REFERENCE: u32 = 1003;
    pub const TEMPORAL_DEAD_ZONE: u32 = 1004;

    // Static analysis
    pub const CONST_ASSIGNMENT: u32 = 1005;
    pub const LOOP_CLOSURE_CAPTURE: u32 = 1006;

    // Configuration
    pub const ENVIRONMENT_NOT_FOUND: u32 = 1007;
    pub const GLOBAL_WRITABILITY_CLASH: u32 = 1008;

    // Advisories and related information
    pub const LET_NEVER_MODIFIED: u32 = 1009;
    pub const LOOP_BEGINS_HERE: u32 = 1010;

    // Front-end
    pub const UNEXPECTED_TOKEN: u32 = 1100;
    pub const TOKEN_EXPECTED: u32 = 1101;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1102;
    pub const UNTERMINATED_COMMENT: u32 = 1103;
    pub const INVALID_CHARACTER: u32 = 1104;
    pub const UNSUPPORTED_SYNTAX: u32 = 1105;
    pub const UNTERMINATED_REGULAR_EXPRESSION: u32 = 1106;
    pub const IDENTIFIER_EXPECTED: u32 = 1107;
    pub const EXPRESSION_EXPECTED: u32 = 1108;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1109;
    pub const NESTING_TOO_DEEP: u32 = 1110;
}

pub mod diagnostic_messages {
    pub const X_IS_ALREADY_DECLARED: &str = "{0} is already declared";
    pub const VAR_X_IS_NOT_ALLOWED: &str = "var {0} is not allowed (use let or const)";
    pub const REFERENCE_TO_UNKNOWN_GLOBAL_VARIABLE: &str = "reference to unknown global variable {0}";
    pub const X_IS_REFERENCED_BEFORE_ITS_DECLARATION: &str =
        "{0} is referenced before its declaration";
    pub const CANT_ASSIGN_TO_CONST_VARIABLE: &str = "can't assign to const variable {0}";
    pub const CANT_TRANSFORM_CLOSURE: &str =
        "can't transform closure. {0} is defined outside closure, inside loop";
    pub const ENVIRONMENT_NOT_FOUND: &str = "environment \"{0}\" not found";
    pub const GLOBAL_WRITEABLE_AND_READONLY_CLASH: &str =
        "global variable {0} writeable and read-only clash";
    pub const LET_NEVER_MODIFIED: &str =
        "{0} is declared with let but never modified so could be a const";
    pub const LOOP_BEGINS_HERE: &str = "the enclosing {0} loop begins here";

    pub const UNEXPECTED_TOKEN: &str = "Unexpected token {0}";
    pub const TOKEN_EXPECTED: &str = "'{0}' expected";
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal";
    pub const UNTERMINATED_COMMENT: &str = "'*/' expected";
    pub const INVALID_CHARACTER: &str = "Invalid character";
    pub const UNSUPPORTED_SYNTAX: &str = "{0} are not supported";
    pub const UNTERMINATED_REGULAR_EXPRESSION: &str = "Unterminated regular expression literal";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal";
    pub const NESTING_TOO_DEEP: &str = "Syntax nesting is too deep";
}

use diagnostic_codes as c;
use diagnostic_messages as m;

/// Message table entries, one per diagnostic code.
pub mod messages {
    use super::{DiagnosticCategory, DiagnosticMessage, c, m};

    pub const DECLARATION_CONFLICT: DiagnosticMessage = DiagnosticMessage {
        code: c::DECLARATION_CONFLICT,
        category: DiagnosticCategory::Error,
        message: m::X_IS_ALREADY_DECLARED,
    };
    pub const HOISTED_DECLARATION_DISALLOWED: DiagnosticMessage = DiagnosticMessage {
        code: c::HOISTED_DECLARATION_DISALLOWED,
        category: DiagnosticCategory::Error,
        message: m::VAR_X_IS_NOT_ALLOWED,
    };
    pub const UNRESOLVED_REFERENCE: DiagnosticMessage = DiagnosticMessage {
        code: c::UNRESOLVED_REFERENCE,
        category: DiagnosticCategory::Error,
        message: m::REFERENCE_TO_UNKNOWN_GLOBAL_VARIABLE,
    };
    pub const TEMPORAL_DEAD_ZONE: DiagnosticMessage = DiagnosticMessage {
        code: c::TEMPORAL_DEAD_ZONE,
        category: DiagnosticCategory::Error,
        message: m::X_IS_REFERENCED_BEFORE_ITS_DECLARATION,
    };
    pub const CONST_ASSIGNMENT: DiagnosticMessage = DiagnosticMessage {
        code: c::CONST_ASSIGNMENT,
        category: DiagnosticCategory::Error,
        message: m::CANT_ASSIGN_TO_CONST_VARIABLE,
    };
    pub const LOOP_CLOSURE_CAPTURE: DiagnosticMessage = DiagnosticMessage {
        code: c::LOOP_CLOSURE_CAPTURE,
        category: DiagnosticCategory::Error,
        message: m::CANT_TRANSFORM_CLOSURE,
    };
    pub const ENVIRONMENT_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: c::ENVIRONMENT_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: m::ENVIRONMENT_NOT_FOUND,
    };
    pub const GLOBAL_WRITABILITY_CLASH: DiagnosticMessage = DiagnosticMessage {
        code: c::GLOBAL_WRITABILITY_CLASH,
        category: DiagnosticCategory::Error,
        message: m::GLOBAL_WRITEABLE_AND_READONLY_CLASH,
    };
    pub const LET_NEVER_MODIFIED: DiagnosticMessage = DiagnosticMessage {
        code: c::LET_NEVER_MODIFIED,
        category: DiagnosticCategory::Warning,
        message: m::LET_NEVER_MODIFIED,
    };
    pub const LOOP_BEGINS_HERE: DiagnosticMessage = DiagnosticMessage {
        code: c::LOOP_BEGINS_HERE,
        category: DiagnosticCategory::Message,
        message: m::LOOP_BEGINS_HERE,
    };
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = DiagnosticMessage {
        code: c::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: m::UNEXPECTED_TOKEN,
    };
    pub const TOKEN_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: c::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        message: m::TOKEN_EXPECTED,
    };
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: c::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: m::UNTERMINATED_STRING_LITERAL,
    };
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = DiagnosticMessage {
        code: c::UNTERMINATED_COMMENT,
        category: DiagnosticCategory::Error,
        message: m::UNTERMINATED_COMMENT,
    };
    pub const INVALID_CHARACTER: DiagnosticMessage = DiagnosticMessage {
        code: c::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: m::INVALID_CHARACTER,
    };
    pub const UNSUPPORTED_SYNTAX: DiagnosticMessage = DiagnosticMessage {
        code: c::UNSUPPORTED_SYNTAX,
        category: DiagnosticCategory::Error,
        message: m::UNSUPPORTED_SYNTAX,
    };
    pub const UNTERMINATED_REGULAR_EXPRESSION: DiagnosticMessage = DiagnosticMessage {
        code: c::UNTERMINATED_REGULAR_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: m::UNTERMINATED_REGULAR_EXPRESSION,
    };
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: c::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: m::IDENTIFIER_EXPECTED,
    };
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: c::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: m::EXPRESSION_EXPECTED,
    };
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: c::UNTERMINATED_TEMPLATE_LITERAL,
        category: DiagnosticCategory::Error,
        message: m::UNTERMINATED_TEMPLATE_LITERAL,
    };
    pub const NESTING_TOO_DEEP: DiagnosticMessage = DiagnosticMessage {
        code: c::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: m::NESTING_TOO_DEEP,
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    messages::DECLARATION_CONFLICT,
    messages::HOISTED_DECLARATION_DISALLOWED,
    messages::UNRESOLVED_REFERENCE,
    messages::TEMPORAL_DEAD_ZONE,
    messages::CONST_ASSIGNMENT,
    messages::LOOP_CLOSURE_CAPTURE,
    messages::ENVIRONMENT_NOT_FOUND,
    messages::GLOBAL_WRITABILITY_CLASH,
    messages::LET_NEVER_MODIFIED,
    messages::LOOP_BEGINS_HERE,
    messages::UNEXPECTED_TOKEN,
    messages::TOKEN_EXPECTED,
    messages::UNTERMINATED_STRING_LITERAL,
    messages::UNTERMINATED_COMMENT,
    messages::INVALID_CHARACTER,
    messages::UNSUPPORTED_SYNTAX,
    messages::UNTERMINATED_REGULAR_EXPRESSION,
    messages::IDENTIFIER_EXPECTED,
    messages::EXPRESSION_EXPECTED,
    messages::UNTERMINATED_TEMPLATE_LITERAL,
    messages::NESTING_TOO_DEEP,
];
