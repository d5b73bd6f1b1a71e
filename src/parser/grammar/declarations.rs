//! Script level statements and type declarations
//!
//! ```text
//! Script          = (PinNamespace | RequiresPackage | NamespaceDecl | TypeDecl)*
//! NamespaceDecl   = 'namespace' TypeRef (PinNamespace | RequiresPackage | TypeDecl)*
//! TypeDecl        = TypeModifiers? (ClassDecl | InterfaceDecl | EnumDecl)
//! ClassDecl       = 'class' IDENT ClassExtends? ClassImplements? ClassBody 'end'
//! ClassMember     = TypeModifiers? (TypeDecl | ClassVariables | ClassFunction)
//! ClassFunction   = 'func' FunctionBegin Statements 'end'
//! FunctionBegin   = ConstructorBegin | DestructorBegin | RegularFunctionBegin
//! ```

use super::ScriptParser;
use super::expressions::{parse_argument_list, parse_expression};
use super::statements::parse_statements;
use crate::parser::syntax_kind::SyntaxKind;

/// Result of scanning a modifier list.
#[derive(Debug, Clone, Copy, Default)]
struct ModifierScan {
    present: bool,
    /// `abstract` or `native`: the function has no statement block
    bodyless: bool,
}

/// Script = (PinNamespace | RequiresPackage | NamespaceDecl | TypeDecl)*
pub fn parse_script<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::SCRIPT);

    loop {
        p.skip_separators();
        if p.at_eof() {
            break;
        }
        let pos_before = p.get_pos();
        match p.current_kind() {
            SyntaxKind::NAMESPACE_KW => parse_namespace(p),
            _ => parse_script_member(p),
        }
        // Safety: if we didn't make progress, force-skip a token
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error(format!("stuck on token: {:?}", p.current_kind()));
            p.bump();
        }
    }

    p.finish_node();
}

fn parse_script_member<P: ScriptParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::PIN_KW => parse_pin(p),
        SyntaxKind::REQUIRES_KW => parse_requires(p),
        _ => {
            if !parse_type_declaration(p) {
                p.error_recover("expected declaration", &[]);
            }
        }
    }
}

/// PinNamespace = 'pin' TypeRef
fn parse_pin<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::PIN_NAMESPACE);
    p.bump(); // pin
    p.skip_trivia();
    parse_type_ref(p);
    p.expect_line_end();
    p.finish_node();
}

/// RequiresPackage = 'requires' STRING
fn parse_requires<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::REQUIRES_PACKAGE);
    p.bump(); // requires
    p.skip_trivia();
    p.expect(SyntaxKind::STRING);
    p.expect_line_end();
    p.finish_node();
}

/// NamespaceDecl = 'namespace' TypeRef member*
///
/// A namespace statement applies to every declaration up to the next
/// namespace statement or the end of the script.
fn parse_namespace<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::NAMESPACE_DECL);
    p.bump(); // namespace
    p.skip_trivia();
    parse_type_ref(p);
    p.expect_line_end();

    loop {
        p.skip_separators();
        if p.at_eof() || p.at(SyntaxKind::NAMESPACE_KW) {
            break;
        }
        let pos_before = p.get_pos();
        parse_script_member(p);
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error(format!("stuck on token: {:?}", p.current_kind()));
            p.bump();
        }
    }

    p.finish_node();
}

/// TypeRef = 'void' | IDENT ('.' IDENT)*
///
/// Always produces a TYPE_REF node, empty if no type could be parsed.
pub fn parse_type_ref<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPE_REF);
    if p.at(SyntaxKind::VOID_KW) {
        p.bump();
    } else if p.at(SyntaxKind::IDENT) {
        p.bump();
        while p.at(SyntaxKind::DOT) {
            p.bump();
            p.expect(SyntaxKind::IDENT);
        }
    } else {
        p.error("expected type name".to_string());
    }
    p.finish_node();
}

/// TypeModifiers = ('public' | 'protected' | 'private' | 'abstract' | 'fixed' | 'static' | 'native')+
fn parse_type_modifiers<P: ScriptParser>(p: &mut P) -> ModifierScan {
    let mut scan = ModifierScan::default();
    if !p.current_kind().is_modifier() {
        return scan;
    }

    scan.present = true;
    p.start_node(SyntaxKind::TYPE_MODIFIERS);
    loop {
        if matches!(p.current_kind(), SyntaxKind::ABSTRACT_KW | SyntaxKind::NATIVE_KW) {
            scan.bodyless = true;
        }
        p.bump();
        if p.nth(0).is_modifier() {
            p.skip_trivia();
        } else {
            break;
        }
    }
    p.finish_node();
    p.skip_trivia();
    scan
}

/// TypeDecl = TypeModifiers? (ClassDecl | InterfaceDecl | EnumDecl)
///
/// Returns false (consuming nothing) if the current tokens do not start a type declaration.
fn parse_type_declaration<P: ScriptParser>(p: &mut P) -> bool {
    let checkpoint = p.checkpoint();
    let modifiers = parse_type_modifiers(p);

    match p.current_kind() {
        SyntaxKind::CLASS_KW => {
            p.start_node_at(checkpoint, SyntaxKind::CLASS_DECL);
            parse_class_rest(p);
            p.finish_node();
            true
        }
        SyntaxKind::INTERFACE_KW => {
            p.start_node_at(checkpoint, SyntaxKind::INTERFACE_DECL);
            parse_interface_rest(p);
            p.finish_node();
            true
        }
        SyntaxKind::ENUM_KW => {
            p.start_node_at(checkpoint, SyntaxKind::ENUM_DECL);
            parse_enum_rest(p);
            p.finish_node();
            true
        }
        _ if modifiers.present => {
            p.start_node_at(checkpoint, SyntaxKind::ERROR);
            p.error("expected class, interface or enum".to_string());
            while !p.at_line_end() {
                p.bump();
            }
            p.finish_node();
            true
        }
        _ => false,
    }
}

/// ClassDecl = 'class' IDENT ('extends' TypeRef)? ('implements' TypeRef (',' TypeRef)*)? ClassBody 'end'
fn parse_class_rest<P: ScriptParser>(p: &mut P) {
    p.bump(); // class
    p.skip_trivia();
    p.expect(SyntaxKind::IDENT);
    p.skip_trivia();

    if p.at(SyntaxKind::EXTENDS_KW) {
        p.start_node(SyntaxKind::CLASS_EXTENDS);
        p.bump();
        p.skip_trivia();
        parse_type_ref(p);
        p.finish_node();
        p.skip_trivia();
    }

    if p.at(SyntaxKind::IMPLEMENTS_KW) {
        parse_implements(p, SyntaxKind::CLASS_IMPLEMENTS);
    }
    p.expect_line_end();

    p.start_node(SyntaxKind::CLASS_BODY);
    parse_members(p, false);
    p.finish_node();

    p.expect(SyntaxKind::END_KW);
}

/// InterfaceDecl = 'interface' IDENT ('implements' TypeRef (',' TypeRef)*)? InterfaceBody 'end'
fn parse_interface_rest<P: ScriptParser>(p: &mut P) {
    p.bump(); // interface
    p.skip_trivia();
    p.expect(SyntaxKind::IDENT);
    p.skip_trivia();

    if p.at(SyntaxKind::IMPLEMENTS_KW) {
        parse_implements(p, SyntaxKind::INTERFACE_IMPLEMENTS);
    }
    p.expect_line_end();

    p.start_node(SyntaxKind::INTERFACE_BODY);
    parse_members(p, true);
    p.finish_node();

    p.expect(SyntaxKind::END_KW);
}

fn parse_implements<P: ScriptParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump(); // implements
    p.skip_trivia();
    parse_type_ref(p);
    while p.nth(0) == SyntaxKind::COMMA {
        p.skip_trivia();
        p.bump();
        p.skip_trivia();
        parse_type_ref(p);
    }
    p.finish_node();
}

/// EnumDecl = 'enum' IDENT EnumBody 'end'
fn parse_enum_rest<P: ScriptParser>(p: &mut P) {
    p.bump(); // enum
    p.skip_trivia();
    p.expect(SyntaxKind::IDENT);
    p.expect_line_end();

    p.start_node(SyntaxKind::ENUM_BODY);
    loop {
        p.skip_separators();
        if p.at_eof() || p.at(SyntaxKind::END_KW) {
            break;
        }
        if p.at(SyntaxKind::IDENT) {
            // EnumEntry = IDENT ('=' Expression)?
            p.start_node(SyntaxKind::ENUM_ENTRY);
            p.bump();
            if p.nth(0) == SyntaxKind::EQ {
                p.skip_trivia();
                p.bump();
                p.skip_trivia();
                parse_expression(p);
            }
            p.finish_node();
            p.expect_line_end();
        } else {
            p.error_recover("expected enumeration entry", &[SyntaxKind::END_KW]);
        }
    }
    p.finish_node();

    p.expect(SyntaxKind::END_KW);
}

/// Members of a class or interface body, up to `end`.
fn parse_members<P: ScriptParser>(p: &mut P, in_interface: bool) {
    loop {
        p.skip_separators();
        if p.at_eof() || p.at(SyntaxKind::END_KW) {
            break;
        }
        let pos_before = p.get_pos();
        parse_member(p, in_interface);
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error(format!("stuck on token: {:?}", p.current_kind()));
            p.bump();
        }
    }
}

/// ClassMember = TypeModifiers? (TypeDecl | ClassVariables | ClassFunction)
fn parse_member<P: ScriptParser>(p: &mut P, in_interface: bool) {
    match p.nth_non_modifier() {
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => {
            parse_type_declaration(p);
            return;
        }
        _ => {}
    }

    let checkpoint = p.checkpoint();
    let modifiers = parse_type_modifiers(p);

    match p.current_kind() {
        SyntaxKind::FUNC_KW if in_interface => {
            p.start_node_at(checkpoint, SyntaxKind::INTERFACE_FUNCTION);
            p.bump(); // func
            p.skip_trivia();
            parse_function_begin(p);
            p.expect_line_end();
            p.finish_node();
        }
        SyntaxKind::FUNC_KW => {
            p.start_node_at(checkpoint, SyntaxKind::CLASS_FUNCTION);
            p.bump(); // func
            p.skip_trivia();
            parse_function_begin(p);
            if modifiers.bodyless {
                p.expect_line_end();
            } else {
                parse_statements(p, &[SyntaxKind::END_KW]);
                p.expect(SyntaxKind::END_KW);
            }
            p.finish_node();
        }
        SyntaxKind::VAR_KW if !in_interface => {
            p.start_node_at(checkpoint, SyntaxKind::CLASS_VARIABLES);
            parse_class_variables(p);
            p.finish_node();
        }
        _ => {
            p.start_node_at(checkpoint, SyntaxKind::ERROR);
            p.error("expected member declaration".to_string());
            while !p.at_line_end() && !p.at(SyntaxKind::END_KW) {
                p.bump();
            }
            p.finish_node();
        }
    }
}

/// ClassVariables = 'var' TypeRef ClassVariable (',' ClassVariable)*
/// ClassVariable  = IDENT ('=' Expression)?
fn parse_class_variables<P: ScriptParser>(p: &mut P) {
    p.bump(); // var
    p.skip_trivia();
    parse_type_ref(p);
    p.skip_trivia();

    loop {
        p.start_node(SyntaxKind::CLASS_VARIABLE);
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
    p.expect_line_end();
}

/// FunctionBegin = ConstructorBegin | DestructorBegin | RegularFunctionBegin
///
/// The FUNCTION_BEGIN node is always produced; it is left empty when no
/// alternative matches.
fn parse_function_begin<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_BEGIN);

    match p.current_kind() {
        SyntaxKind::NEW_KW => parse_constructor_begin(p),
        SyntaxKind::IDENT if p.current_text() == "destructor" && p.nth(1) == SyntaxKind::L_PAREN => {
            // DestructorBegin = 'destructor' FunctionArguments
            p.start_node(SyntaxKind::DESTRUCTOR_BEGIN);
            p.bump();
            p.skip_trivia();
            parse_function_arguments(p);
            p.finish_node();
        }
        SyntaxKind::IDENT | SyntaxKind::VOID_KW => parse_regular_function_begin(p),
        _ => p.error("expected function declaration".to_string()),
    }

    p.finish_node();
}

/// ConstructorBegin = 'new' FunctionArguments ConstructorCall?
/// ConstructorCall  = ('this' | 'super') ArgumentList
fn parse_constructor_begin<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::CONSTRUCTOR_BEGIN);
    p.bump(); // new
    p.skip_trivia();
    parse_function_arguments(p);

    if matches!(p.nth(0), SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW) {
        p.skip_trivia();
        p.start_node(SyntaxKind::CONSTRUCTOR_CALL);
        p.bump(); // this | super
        p.skip_trivia();
        parse_argument_list(p);
        p.finish_node();
    }

    p.finish_node();
}

/// RegularFunctionBegin = TypeRef (IDENT | Operator) FunctionArguments
fn parse_regular_function_begin<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::REGULAR_FUNCTION_BEGIN);
    parse_type_ref(p);
    p.skip_trivia();

    if p.at(SyntaxKind::IDENT) {
        p.bump();
    } else if is_overloadable_operator(p.current_kind()) {
        p.start_node(SyntaxKind::OPERATOR);
        p.bump();
        p.finish_node();
    } else {
        p.error("expected function name or operator".to_string());
    }
    p.skip_trivia();

    if p.at(SyntaxKind::L_PAREN) {
        parse_function_arguments(p);
    } else {
        p.error("expected argument list".to_string());
    }

    p.finish_node();
}

fn is_overloadable_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::STAR_EQ
            | SyntaxKind::SLASH_EQ
            | SyntaxKind::PERCENT_EQ
            | SyntaxKind::PLUS_EQ
            | SyntaxKind::MINUS_EQ
            | SyntaxKind::SHL_EQ
            | SyntaxKind::SHR_EQ
            | SyntaxKind::AMP_EQ
            | SyntaxKind::PIPE_EQ
            | SyntaxKind::AMP
            | SyntaxKind::PIPE
            | SyntaxKind::CARET
            | SyntaxKind::SHL
            | SyntaxKind::SHR
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ
            | SyntaxKind::STAR
            | SyntaxKind::SLASH
            | SyntaxKind::PERCENT
            | SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS
            | SyntaxKind::TILDE
    )
}

/// FunctionArguments = '(' (FunctionArgument (',' FunctionArgument)*)? ')'
/// FunctionArgument  = TypeRef IDENT
fn parse_function_arguments<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_ARGUMENTS);
    p.expect(SyntaxKind::L_PAREN);
    p.skip_newlines();

    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            p.start_node(SyntaxKind::FUNCTION_ARGUMENT);
            parse_type_ref(p);
            p.skip_trivia();
            p.expect(SyntaxKind::IDENT);
            p.finish_node();
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

/// Block arguments: `block int a, String b` or untyped `block each`.
pub(super) fn parse_block_arguments<P: ScriptParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_ARGUMENTS);
    while p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::FUNCTION_ARGUMENT);
        if matches!(p.nth(1), SyntaxKind::IDENT | SyntaxKind::DOT) {
            parse_type_ref(p);
            p.skip_trivia();
        }
        p.expect(SyntaxKind::IDENT);
        p.finish_node();
        if p.nth(0) != SyntaxKind::COMMA {
            break;
        }
        p.skip_trivia();
        p.bump();
        p.skip_trivia();
    }
    p.finish_node();
}

/// Extension for looking past a modifier list without consuming it.
trait ModifierLookahead {
    fn nth_non_modifier(&self) -> SyntaxKind;
}

impl<P: ScriptParser> ModifierLookahead for P {
    fn nth_non_modifier(&self) -> SyntaxKind {
        let mut n = 0;
        loop {
            let kind = self.nth(n);
            if !kind.is_modifier() {
                return kind;
            }
            n += 1;
        }
    }
}
