//! Classification of identifier occurrences.
//!
//! An identifier is either a *reference* (a use of a binding that scope
//! resolution has to look up), a *declaration name* (the binding slot of a
//! variable, function, parameter, catch clause or binding element), or a
//! plain name that never refers to a binding: property names after `.`,
//! object literal keys and statement labels.

use lexlower_scanner::SyntaxKind;

use crate::parser::{NodeArena, NodeIndex, syntax_kind_ext::*};

/// True when `index` is an identifier that refers to a binding.
pub fn is_reference(arena: &NodeArena, index: NodeIndex) -> bool {
    let Some(node) = arena.get(index) else {
        return false;
    };
    if !node.is_identifier() {
        return false;
    }
    let parent_index = arena.parent_of(index);
    let Some(parent) = arena.get(parent_index) else {
        return false;
    };

    match parent.kind {
        // obj.name
        PROPERTY_ACCESS_EXPRESSION => arena
            .get_access_expr(parent)
            .is_none_or(|data| data.name_or_argument != index),
        // { key: value }, { key() {} }
        PROPERTY_ASSIGNMENT => arena
            .get_property_assignment(parent)
            .is_none_or(|data| data.name != index),
        // let { key: name = init }: only the initializer holds references
        BINDING_ELEMENT => arena
            .get_binding_element(parent)
            .is_none_or(|data| data.property_name != index && data.name != index),
        LABELED_STATEMENT | BREAK_STATEMENT | CONTINUE_STATEMENT => false,
        _ => !is_declaration_name(arena, index),
    }
}

/// True when `index` is the name slot of a declaration (including names
/// nested inside binding patterns).
pub fn is_declaration_name(arena: &NodeArena, index: NodeIndex) -> bool {
    let parent_index = arena.parent_of(index);
    let Some(parent) = arena.get(parent_index) else {
        return false;
    };
    match parent.kind {
        VARIABLE_DECLARATION => arena
            .get_variable_declaration(parent)
            .is_some_and(|data| data.name == index),
        FUNCTION_DECLARATION | FUNCTION_EXPRESSION => arena
            .get_function(parent)
            .is_some_and(|data| data.name == index),
        PARAMETER => arena
            .get_parameter(parent)
            .is_some_and(|data| data.name == index),
        CATCH_CLAUSE => arena
            .get_catch_clause(parent)
            .is_some_and(|data| data.variable_declaration == index),
        BINDING_ELEMENT => arena
            .get_binding_element(parent)
            .is_some_and(|data| data.name == index),
        _ => false,
    }
}

/// True when the reference at `index` is written: the target of an
/// assignment (directly or inside a destructuring assignment pattern), of
/// `++`/`--`, or the left side of a `for-in`/`for-of`.
pub fn is_lvalue(arena: &NodeArena, index: NodeIndex) -> bool {
    if !is_reference(arena, index) {
        return false;
    }

    let mut child = index;
    let mut through_pattern = false;
    loop {
        let parent_index = arena.parent_of(child);
        let Some(parent) = arena.get(parent_index) else {
            return false;
        };
        match parent.kind {
            PARENTHESIZED_EXPRESSION | SPREAD_ELEMENT => {}
            ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => through_pattern = true,
            SHORTHAND_PROPERTY_ASSIGNMENT => {
                let is_name = arena
                    .get_shorthand_property(parent)
                    .is_some_and(|data| data.name == child);
                if !is_name {
                    return false;
                }
            }
            PROPERTY_ASSIGNMENT => {
                let is_value = arena
                    .get_property_assignment(parent)
                    .is_some_and(|data| data.initializer == child);
                if !is_value {
                    return false;
                }
            }
            BINARY_EXPRESSION => {
                return arena.get_binary_expr(parent).is_some_and(|data| {
                    data.left == child
                        && SyntaxKind::try_from_u16(data.operator_token)
                            .is_some_and(SyntaxKind::is_assignment_operator)
                });
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                return arena
                    .get_for_in_of(parent)
                    .is_some_and(|data| data.initializer == child);
            }
            PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
                return !through_pattern
                    && arena.get_unary_expr(parent).is_some_and(|data| {
                        data.operator == SyntaxKind::PlusPlusToken as u16
                            || data.operator == SyntaxKind::MinusMinusToken as u16
                    });
            }
            _ => return false,
        }
        child = parent_index;
    }
}
