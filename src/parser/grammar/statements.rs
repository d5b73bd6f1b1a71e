//! Statement blocks
//!
//! ```text
//! Statements = (Statement (NEWLINE | ';'))*
//! Statement  = IfStmt | WhileStmt | ForStmt | SelectStmt | TryStmt
//!            | ThrowStmt | ReturnStmt | BreakStmt | ContinueStmt
//!            | VariablesStmt | ExpressionStmt
//! ```

use super::ScriptParser;
use super::declarations::parse_type_ref;
use super::expressions::{can_start_expression, parse_expression, parse_postfix_expression};
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that can only start a declaration. A statement block stops there
/// so a missing `end` does not swallow the rest of the class.
const DECLARATION_START: &[SyntaxKind] = &[
    SyntaxKind::FUNC_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::FIXED_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::NATIVE_KW,
];

/// Statements = (Statement separator)*
///
/// Stops before any of `terminators` without consuming it.
pub fn parse_statements<P: ScriptParser>(p: &mut P, terminators: &[SyntaxKind]) {
    p.start_node(SyntaxKind::STATEMENTS);

    loop {
        p.skip_separators();
        if p.at_eof() || p.at_any(terminators) || p.at_any(DECLARATION_START) {
            break;
        }
        let pos_before = p.get_pos();
        parse_statement(p, terminators);
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error(format!("stuck on token: {:?}", p.current_kind()));
            p.bump();
        }
    }

    p.finish_node();
}

fn parse_statement<P: ScriptParser>(p: &mut P, terminators: &[SyntaxKind]) {
    match p.current_kind() {
        SyntaxKind::IF_KW => parse_if(p),
        SyntaxKind::WHILE_KW => parse_while(p),
        SyntaxKind::FOR_KW => parse_for(p),
        SyntaxKind::SELECT_KW => parse_select(p),
        SyntaxKind::TRY_KW => parse_try(p),
        SyntaxKind::THROW_KW => parse_optional_value(p, SyntaxKind::THROW_STMT),
        SyntaxKind::RETURN_KW => parse_optional_value(p, SyntaxKind::RETURN_STMT),
        SyntaxKind::BREAK_KW => parse_keyword_only(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CONTINUE_KW => parse_keyword_only(p, SyntaxKind::CONTINUE_STMT),
        SyntaxKind::VAR_KW => parse_variables(p),
        kind if can_start_expression(kind) => {
            p.start_node(SyntaxKind::EXPRESSION_STMT);
            parse_expression(p);
            p.finish_node();
            p.expect_line_end();
        }
        _ => p.error_recover("expected statement", terminators),
    }
}

/// IfStmt = 'if' Expression Statements ElifBranch* ElseBranch? 'end'
fn parse_if<P: ScriptParser>(p: &mut P) {
    const BRANCH_END: &[SyntaxKind] = &[SyntaxKind::ELIF_KW, SyntaxKind::ELSE_KW, SyntaxKind::END_KW];

    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    p.skip_trivia();
    parse_expression(p);
    parse_statements(p, BRANCH_END);

    while p.at(SyntaxKind::ELIF_KW) {
        p.start_node(SyntaxKind::ELIF_BRANCH);
        p.bump();
        p.skip_trivia();
        parse_expression(p);
        parse_statements(p, BRANCH_END);
        p.finish_node();
    }

    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_BRANCH);
        p.bump();
        parse_statements(p, &[SyntaxKind::END_KW]);
        p.finish_node();
    }

    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// WhileStmt = 'while' Expression Statements 'end'
fn parse_while<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHILE_STMT);
    p.bump(); // while
    p.skip_trivia();
    if can_start_expression(p.current_kind()) {
        parse_expression(p);
    } else {
        p.error("expected loop condition".to_string());
    }
    parse_statements(p, &[SyntaxKind::END_KW]);
    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// ForStmt = 'for' ForVariable '=' ForFrom ('to' | 'downto') ForTo ('step' ForStep)? Statements 'end'
fn parse_for<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_STMT);
    p.bump(); // for
    p.skip_trivia();

    p.start_node(SyntaxKind::FOR_VARIABLE);
    parse_postfix_expression(p);
    p.finish_node();
    p.skip_trivia();
    p.expect(SyntaxKind::EQ);
    p.skip_trivia();

    p.start_node(SyntaxKind::FOR_FROM);
    parse_expression(p);
    p.finish_node();
    p.skip_trivia();

    if p.at(SyntaxKind::TO_KW) || p.at(SyntaxKind::DOWNTO_KW) {
        p.bump();
    } else {
        p.error("expected 'to' or 'downto'".to_string());
    }
    p.skip_trivia();

    p.start_node(SyntaxKind::FOR_TO);
    parse_expression(p);
    p.finish_node();

    if p.nth(0) == SyntaxKind::STEP_KW {
        p.skip_trivia();
        p.bump();
        p.skip_trivia();
        p.start_node(SyntaxKind::FOR_STEP);
        parse_expression(p);
        p.finish_node();
    }

    parse_statements(p, &[SyntaxKind::END_KW]);
    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// SelectStmt = 'select' Expression SelectCase* SelectElse? 'end'
/// SelectCase = 'case' CaseValues Statements
fn parse_select<P: ScriptParser>(p: &mut P) {
    const CASE_END: &[SyntaxKind] = &[SyntaxKind::CASE_KW, SyntaxKind::ELSE_KW, SyntaxKind::END_KW];

    p.start_node(SyntaxKind::SELECT_STMT);
    p.bump(); // select
    p.skip_trivia();
    parse_expression(p);

    loop {
        p.skip_separators();
        match p.current_kind() {
            SyntaxKind::CASE_KW => {
                p.start_node(SyntaxKind::SELECT_CASE);
                p.bump();
                p.skip_trivia();
                p.start_node(SyntaxKind::CASE_VALUES);
                parse_expression(p);
                while p.nth(0) == SyntaxKind::COMMA {
                    p.skip_trivia();
                    p.bump();
                    p.skip_newlines();
                    parse_expression(p);
                }
                p.finish_node();
                parse_statements(p, CASE_END);
                p.finish_node();
            }
            SyntaxKind::ELSE_KW => {
                p.start_node(SyntaxKind::SELECT_ELSE);
                p.bump();
                parse_statements(p, &[SyntaxKind::END_KW]);
                p.finish_node();
            }
            _ if p.at_eof() || p.at(SyntaxKind::END_KW) || p.at_any(DECLARATION_START) => break,
            _ => p.error_recover("expected 'case' or 'else'", CASE_END),
        }
    }

    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// TryStmt    = 'try' Statements CatchClause* 'end'
/// CatchClause = 'catch' TypeRef IDENT Statements
fn parse_try<P: ScriptParser>(p: &mut P) {
    const CATCH_END: &[SyntaxKind] = &[SyntaxKind::CATCH_KW, SyntaxKind::END_KW];

    p.start_node(SyntaxKind::TRY_STMT);
    p.bump(); // try
    parse_statements(p, CATCH_END);

    while p.at(SyntaxKind::CATCH_KW) {
        p.start_node(SyntaxKind::CATCH_CLAUSE);
        p.bump();
        p.skip_trivia();
        parse_type_ref(p);
        p.skip_trivia();
        p.expect(SyntaxKind::IDENT);
        parse_statements(p, CATCH_END);
        p.finish_node();
    }

    p.expect(SyntaxKind::END_KW);
    p.finish_node();
}

/// ThrowStmt = 'throw' Expression?
/// ReturnStmt = 'return' Expression?
fn parse_optional_value<P: ScriptParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if can_start_expression(p.nth(0)) {
        p.skip_trivia();
        parse_expression(p);
    }
    p.finish_node();
    p.expect_line_end();
}

fn parse_keyword_only<P: ScriptParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.finish_node();
    p.expect_line_end();
}

/// VariablesStmt = 'var' TypeRef VariableDecl (',' VariableDecl)*
/// VariableDecl  = IDENT ('=' Expression)?
fn parse_variables<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::VARIABLES_STMT);
    p.bump(); // var
    p.skip_trivia();
    parse_type_ref(p);
    p.skip_trivia();

    loop {
        p.start_node(SyntaxKind::VARIABLE_DECL);
        p.expect(SyntaxKind::IDENT);
        if p.nth(0) == SyntaxKind::EQ {
            p.skip_trivia();
            p.bump();
            p.skip_newlines();
            parse_expression(p);
        }
        p.finish_node();

        if p.nth(0) != SyntaxKind::COMMA {
            break;
        }
        p.skip_trivia();
        p.bump();
        p.skip_newlines();
    }

    p.finish_node();
    p.expect_line_end();
}
