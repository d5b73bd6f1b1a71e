//! Expression precedence chain
//!
//! ```text
//! Expression = Assignment
//! Assignment = InlineIf (AssignOp Assignment)?
//! InlineIf   = Or ('if' Or 'else' InlineIf)?
//! Or         = And (('or' | '||') And)*
//! And        = Compare (('and' | '&&') Compare)*
//! Compare    = Bitwise (('==' | '!=' | '<' | '>' | '<=' | '>=') Bitwise)*
//! Bitwise    = Shift (('&' | '|' | '^') Shift)*
//! Shift      = Add (('<<' | '>>') Add)*
//! Add        = Mul (('+' | '-') Mul)*
//! Mul        = Special (('*' | '/' | '%') Special)*
//! Special    = Prefix (('cast' | 'castable' | 'typeof') TypeRef)*
//! Prefix     = PrefixOp Prefix | Postfix
//! Postfix    = Primary ('.' (IDENT | 'new') ArgumentList? | ArgumentList | '++' | '--')*
//! Primary    = IDENT | Literal | '(' Expression ')' | BlockExpr
//! ```

use super::ScriptParser;
use super::declarations::{parse_block_arguments, parse_type_ref};
use super::statements::parse_statements;
use crate::parser::syntax_kind::SyntaxKind;

const OR_OPS: &[SyntaxKind] = &[SyntaxKind::OR_KW, SyntaxKind::PIPE_PIPE];
const AND_OPS: &[SyntaxKind] = &[SyntaxKind::AND_KW, SyntaxKind::AMP_AMP];
const COMPARE_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ_EQ,
    SyntaxKind::BANG_EQ,
    SyntaxKind::LT,
    SyntaxKind::GT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT_EQ,
];
const BITWISE_OPS: &[SyntaxKind] = &[SyntaxKind::AMP, SyntaxKind::PIPE, SyntaxKind::CARET];
const SHIFT_OPS: &[SyntaxKind] = &[SyntaxKind::SHL, SyntaxKind::SHR];
const ADD_OPS: &[SyntaxKind] = &[SyntaxKind::PLUS, SyntaxKind::MINUS];
const MUL_OPS: &[SyntaxKind] = &[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT];

/// Check whether a token can begin an expression
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || is_prefix_op(kind)
        || matches!(
            kind,
            SyntaxKind::IDENT
                | SyntaxKind::TRUE_KW
                | SyntaxKind::FALSE_KW
                | SyntaxKind::NULL_KW
                | SyntaxKind::THIS_KW
                | SyntaxKind::SUPER_KW
                | SyntaxKind::L_PAREN
                | SyntaxKind::BLOCK_KW
        )
}

fn is_prefix_op(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::MINUS
            | SyntaxKind::PLUS
            | SyntaxKind::BANG
            | SyntaxKind::NOT_KW
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS
    )
}

/// Expression = Assignment
///
/// Assignment is right associative: `a = b = c` is `a = (b = c)`.
pub fn parse_expression<P: ScriptParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_inline_if(p);

    if p.nth(0).is_assignment() {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.skip_trivia();
        p.bump();
        p.skip_newlines();
        parse_expression(p);
        p.finish_node();
    }
}

/// InlineIf = Or ('if' Or 'else' InlineIf)?
fn parse_inline_if<P: ScriptParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_or(p);

    if p.nth(0) == SyntaxKind::IF_KW {
        p.start_node_at(checkpoint, SyntaxKind::INLINE_IF_EXPR);
        p.skip_trivia();
        p.bump(); // if
        p.skip_trivia();
        parse_or(p);
        p.skip_trivia();
        if p.expect(SyntaxKind::ELSE_KW) {
            p.skip_trivia();
            parse_inline_if(p);
        }
        p.finish_node();
    }
}

/// Left associative binary level: `next (op next)*`
fn parse_binary<P: ScriptParser>(p: &mut P, ops: &[SyntaxKind], next: fn(&mut P)) {
    let checkpoint = p.checkpoint();
    next(p);

    while ops.contains(&p.nth(0)) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.skip_trivia();
        p.bump();
        p.skip_newlines();
        next(p);
        p.finish_node();
    }
}

fn parse_or<P: ScriptParser>(p: &mut P) {
    parse_binary(p, OR_OPS, parse_and::<P>);
}

fn parse_and<P: ScriptParser>(p: &mut P) {
    parse_binary(p, AND_OPS, parse_compare::<P>);
}

fn parse_compare<P: ScriptParser>(p: &mut P) {
    parse_binary(p, COMPARE_OPS, parse_bitwise::<P>);
}

fn parse_bitwise<P: ScriptParser>(p: &mut P) {
    parse_binary(p, BITWISE_OPS, parse_shift::<P>);
}

fn parse_shift<P: ScriptParser>(p: &mut P) {
    parse_binary(p, SHIFT_OPS, parse_add::<P>);
}

fn parse_add<P: ScriptParser>(p: &mut P) {
    parse_binary(p, ADD_OPS, parse_mul::<P>);
}

fn parse_mul<P: ScriptParser>(p: &mut P) {
    parse_binary(p, MUL_OPS, parse_special::<P>);
}

/// Special = Prefix (('cast' | 'castable' | 'typeof') TypeRef)*
fn parse_special<P: ScriptParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_prefix(p);

    while matches!(
        p.nth(0),
        SyntaxKind::CAST_KW | SyntaxKind::CASTABLE_KW | SyntaxKind::TYPEOF_KW
    ) {
        p.start_node_at(checkpoint, SyntaxKind::CAST_EXPR);
        p.skip_trivia();
        p.bump();
        p.skip_trivia();
        parse_type_ref(p);
        p.finish_node();
    }
}

/// Prefix = PrefixOp Prefix | Postfix
fn parse_prefix<P: ScriptParser>(p: &mut P) {
    if is_prefix_op(p.current_kind()) {
        p.start_node(SyntaxKind::PREFIX_EXPR);
        p.bump();
        p.skip_trivia();
        parse_prefix(p);
        p.finish_node();
    } else {
        parse_postfix_expression(p);
    }
}

/// Postfix = Primary ('.' (IDENT | 'new') ArgumentList? | ArgumentList | '++' | '--')*
///
/// Only names and member accesses can be called.
pub fn parse_postfix_expression<P: ScriptParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    let mut last = parse_primary(p);

    loop {
        match p.nth(0) {
            SyntaxKind::DOT => {
                p.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR);
                p.skip_trivia();
                p.bump(); // .
                p.skip_trivia();
                if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::NEW_KW) {
                    p.bump();
                } else {
                    p.error("expected member name".to_string());
                }
                p.finish_node();
                last = Some(SyntaxKind::MEMBER_EXPR);
            }
            SyntaxKind::L_PAREN
                if matches!(last, Some(SyntaxKind::MEMBER_EXPR | SyntaxKind::NAME_REF)) =>
            {
                p.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                p.skip_trivia();
                parse_argument_list(p);
                p.finish_node();
                last = Some(SyntaxKind::CALL_EXPR);
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                p.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                p.skip_trivia();
                p.bump();
                p.finish_node();
                last = Some(SyntaxKind::POSTFIX_EXPR);
            }
            _ => break,
        }
    }
}

/// Primary = IDENT | Literal | '(' Expression ')' | BlockExpr
///
/// Returns the kind of node produced, `None` if nothing could be parsed.
fn parse_primary<P: ScriptParser>(p: &mut P) -> Option<SyntaxKind> {
    let kind = p.current_kind();
    match kind {
        SyntaxKind::IDENT => {
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            p.finish_node();
            Some(SyntaxKind::NAME_REF)
        }
        SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW
        | SyntaxKind::THIS_KW
        | SyntaxKind::SUPER_KW => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
            Some(SyntaxKind::LITERAL)
        }
        _ if kind.is_literal() && !p.at_eof() => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
            Some(SyntaxKind::LITERAL)
        }
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            p.skip_newlines();
            parse_expression(p);
            p.skip_newlines();
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
            Some(SyntaxKind::PAREN_EXPR)
        }
        SyntaxKind::BLOCK_KW => {
            parse_block_expression(p);
            Some(SyntaxKind::BLOCK_EXPR)
        }
        _ => {
            p.error("expected expression".to_string());
            None
        }
    }
}

/// BlockExpr = 'block' BlockArguments Statements 'end'
fn parse_block_expression<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::BLOCK_EXPR);
    p.bump(); // block
    p.skip_trivia();
    parse_block_arguments(p);
    parse_statements(p, &[SyntaxKind::END_KW]);
    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// ArgumentList = '(' (Expression (',' Expression)*)? ')'
pub(super) fn parse_argument_list<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARGUMENT_LIST);
    p.expect(SyntaxKind::L_PAREN);
    p.skip_newlines();

    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            parse_expression(p);
            p.skip_newlines();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
            p.skip_newlines();
        }
    }

    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}
