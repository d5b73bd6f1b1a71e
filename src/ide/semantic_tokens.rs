//! Semantic tokens — syntax highlighting from the context tree.
//!
//! The emitter walks a [`ContextScript`] in source order and records one token
//! per identifier that has a concrete single-line range. Tokens must come out
//! strictly increasing in (line, column); anything else is dropped rather
//! than re-sorted, which keeps duplicates from shared ranges (a type shared by
//! several variables, a documentation comment shared by a variable group) out
//! of the result.

use text_size::TextRange;

use crate::base::LineIndex;
use crate::context::{
    ConstantKind, Context, ContextBlock, ContextClass, ContextClassVariable,
    ContextDocumentation, ContextEnumeration, ContextFunction, ContextFunctionArgument,
    ContextInterface, ContextNode, ContextOperation, ContextRef, ContextScript, ContextStatements,
    DocumentationBlockKind, FunctionType, Identifier, OperationKind, TypeModifier,
    TypeModifierSet, TypeName,
};

/// Token type for semantic highlighting.
///
/// The discriminant is the index into [`TOKEN_TYPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Namespace,
    Class,
    Enum,
    Interface,
    Parameter,
    Variable,
    Property,
    EnumMember,
    Method,
    Comment,
    String,
    Keyword,
    Number,
    Operator,
}

impl TokenType {
    /// Convert to LSP token type index.
    pub fn to_lsp_index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        TOKEN_TYPES[self as usize]
    }
}

/// Legend token types, in index order.
pub const TOKEN_TYPES: [&str; 14] = [
    "namespace",
    "class",
    "enum",
    "interface",
    "parameter",
    "variable",
    "property",
    "enumMember",
    "method",
    "comment",
    "string",
    "keyword",
    "number",
    "operator",
];

/// Token modifier; the bit is `1 << discriminant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenModifier {
    Declaration,
    Readonly,
    Static,
    Deprecated,
    Abstract,
    Modification,
    Documentation,
    DefaultLibrary,
}

impl TokenModifier {
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn name(self) -> &'static str {
        TOKEN_MODIFIERS[self as usize]
    }
}

/// Legend token modifiers, in bit order.
pub const TOKEN_MODIFIERS: [&str; 8] = [
    "declaration",
    "readonly",
    "static",
    "deprecated",
    "abstract",
    "modification",
    "documentation",
    "defaultLibrary",
];

/// The legend announced to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SemanticTokensLegend {
    pub token_types: Vec<&'static str>,
    pub token_modifiers: Vec<&'static str>,
}

pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TOKEN_TYPES.to_vec(),
        token_modifiers: TOKEN_MODIFIERS.to_vec(),
    }
}

/// Which token categories are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenOptions {
    /// Operators, constants, member accesses and calls inside function bodies
    pub expressions: bool,
    /// `@param` targets inside documentation comments
    pub documentation: bool,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            expressions: true,
            documentation: true,
        }
    }
}

/// A semantic token with position information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticToken {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column (0-indexed, UTF-16 code units).
    pub col: u32,
    /// Length in UTF-16 code units.
    pub length: u32,
    /// Token type.
    pub token_type: TokenType,
    /// Modifier bitmask.
    pub modifiers: u32,
}

/// Tokens refused by [`SemanticTokensBuilder::push`] because of their position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DroppedTokens {
    /// Same range as an already emitted token, e.g. the shared type of a
    /// variable group
    pub duplicates: usize,
    /// Starts before the last emitted token without repeating one
    pub out_of_order: usize,
}

/// Accumulates tokens, keeping only strictly increasing positions.
pub struct SemanticTokensBuilder<'a> {
    line_index: &'a LineIndex,
    tokens: Vec<SemanticToken>,
    dropped: DroppedTokens,
}

impl<'a> SemanticTokensBuilder<'a> {
    pub fn new(line_index: &'a LineIndex) -> Self {
        Self {
            line_index,
            tokens: Vec::new(),
            dropped: DroppedTokens::default(),
        }
    }

    /// Append a token; returns `false` if it was dropped
    pub fn push(&mut self, range: Option<TextRange>, token_type: TokenType, modifiers: u32) -> bool {
        let Some(range) = range.filter(|r| !r.is_empty()) else {
            return false;
        };
        let span = self.line_index.span(range);
        if !span.is_single_line() {
            return false;
        }
        let start = (span.start.line, span.start.column);
        let length = span.end.column - span.start.column;
        if let Some(last) = self.tokens.last() {
            if start <= (last.line, last.col) {
                let duplicate = self
                    .tokens
                    .binary_search_by(|t| (t.line, t.col).cmp(&start))
                    .is_ok_and(|i| self.tokens[i].length == length);
                if duplicate {
                    self.dropped.duplicates += 1;
                } else {
                    self.dropped.out_of_order += 1;
                    tracing::trace!(?range, "dropped out-of-order semantic token");
                }
                return false;
            }
        }
        self.tokens.push(SemanticToken {
            line: span.start.line,
            col: span.start.column,
            length,
            token_type,
            modifiers,
        });
        true
    }

    pub fn dropped(&self) -> DroppedTokens {
        self.dropped
    }

    pub fn build(self) -> Vec<SemanticToken> {
        self.tokens
    }

    /// The accepted tokens together with what was refused
    pub fn finish(self) -> (Vec<SemanticToken>, DroppedTokens) {
        (self.tokens, self.dropped)
    }
}

/// Delta-encode tokens into the LSP `u32` array form.
///
/// Each token becomes `[deltaLine, deltaStart, length, type, modifiers]`;
/// `deltaStart` is relative to the previous token only on the same line.
pub fn encode(tokens: &[SemanticToken]) -> Vec<u32> {
    let mut out = Vec::with_capacity(tokens.len() * 5);
    let (mut prev_line, mut prev_col) = (0, 0);
    for token in tokens {
        let delta_line = token.line - prev_line;
        let delta_start = if delta_line == 0 {
            token.col - prev_col
        } else {
            token.col
        };
        out.extend([
            delta_line,
            delta_start,
            token.length,
            token.token_type.to_lsp_index(),
            token.modifiers,
        ]);
        prev_line = token.line;
        prev_col = token.col;
    }
    out
}

/// Get semantic tokens for a script.
///
/// # Arguments
/// * `script` - The context tree of the document
/// * `line_index` - Line index of the same text
/// * `options` - Token categories to emit
///
/// # Returns
/// Tokens in source order.
pub fn semantic_tokens(
    script: &ContextScript,
    line_index: &LineIndex,
    options: &TokenOptions,
) -> Vec<SemanticToken> {
    semantic_tokens_with_dropped(script, line_index, options).0
}

/// Like [`semantic_tokens`], also reporting the tokens the builder refused.
pub fn semantic_tokens_with_dropped(
    script: &ContextScript,
    line_index: &LineIndex,
    options: &TokenOptions,
) -> (Vec<SemanticToken>, DroppedTokens) {
    let mut emitter = Emitter {
        out: SemanticTokensBuilder::new(line_index),
        options,
    };
    for member in &script.members {
        emitter.context(member);
    }
    let (tokens, dropped) = emitter.out.finish();
    if dropped.out_of_order > 0 {
        tracing::debug!(
            out_of_order = dropped.out_of_order,
            "semantic tokens emitted out of source order"
        );
    }
    (tokens, dropped)
}

const DECLARATION: u32 = 1 << TokenModifier::Declaration as u32;

struct Emitter<'a, 'o> {
    out: SemanticTokensBuilder<'a>,
    options: &'o TokenOptions,
}

impl Emitter<'_, '_> {
    fn context(&mut self, context: &Context) {
        match context.view() {
            ContextRef::Script(_) => {}
            ContextRef::PinNamespace(c) => {
                self.out.push(c.name.range(), TokenType::Namespace, 0);
            }
            ContextRef::RequiresPackage(c) => {
                self.out.push(c.package.range(), TokenType::String, 0);
            }
            ContextRef::Namespace(c) => {
                self.out
                    .push(c.name.range(), TokenType::Namespace, DECLARATION);
                for member in &c.members {
                    self.context(member);
                }
            }
            ContextRef::Class(c) => self.class(c),
            ContextRef::Interface(c) => self.interface(c),
            ContextRef::Enumeration(c) => self.enumeration(c),
            ContextRef::ClassVariable(c) => self.class_variable(c),
            ContextRef::Function(c) => self.function(c),
            ContextRef::Statements(c) => self.statements(c),
            ContextRef::If(c) => {
                self.boxed(&c.condition);
                self.optional_statements(&c.statements);
                for elif in &c.elifs {
                    self.boxed(&elif.condition);
                    self.optional_statements(&elif.statements);
                }
                self.optional_statements(&c.else_statements);
            }
            ContextRef::While(c) => {
                self.boxed(&c.condition);
                self.optional_statements(&c.statements);
            }
            ContextRef::For(c) => {
                self.boxed(&c.variable);
                self.boxed(&c.from);
                self.boxed(&c.to);
                self.boxed(&c.step);
                self.optional_statements(&c.statements);
            }
            ContextRef::Select(c) => {
                self.boxed(&c.value);
                for case in &c.cases {
                    for value in &case.values {
                        self.context(value);
                    }
                    self.optional_statements(&case.statements);
                }
                self.optional_statements(&c.else_statements);
            }
            ContextRef::Try(c) => {
                self.optional_statements(&c.statements);
                for catch in &c.catches {
                    self.type_name(&catch.caught_type);
                    self.out
                        .push(catch.variable.range(), TokenType::Variable, DECLARATION);
                    self.optional_statements(&catch.statements);
                }
            }
            ContextRef::Throw(c) => self.boxed(&c.value),
            ContextRef::Return(c) => self.boxed(&c.value),
            ContextRef::Break(_) | ContextRef::Continue(_) => {}
            ContextRef::Variables(c) => {
                self.type_name(&c.type_name);
                for variable in &c.variables {
                    self.out
                        .push(variable.name.range(), TokenType::Variable, DECLARATION);
                    self.boxed(&variable.value);
                }
            }
            ContextRef::Variable(c) => {
                self.type_name(&c.type_name);
                self.out
                    .push(c.name.range(), TokenType::Variable, DECLARATION);
                self.boxed(&c.value);
            }
            ContextRef::Operation(c) => self.operation(c),
            ContextRef::SpecialOperation(c) => {
                self.boxed(&c.operand);
                if self.options.expressions {
                    self.out.push(c.operator_range, TokenType::Keyword, 0);
                }
                self.type_name(&c.target_type);
            }
            ContextRef::InlineIf(c) => {
                self.boxed(&c.condition);
                self.boxed(&c.if_true);
                self.boxed(&c.if_false);
            }
            ContextRef::Member(c) => {
                self.boxed(&c.object);
                self.member_name(&c.name, c.object.is_some(), 0);
            }
            ContextRef::FunctionCall(c) => {
                self.boxed(&c.object);
                if self.options.expressions {
                    self.out.push(c.name.range(), TokenType::Method, 0);
                }
                for argument in &c.arguments {
                    self.context(argument);
                }
            }
            ContextRef::Block(c) => self.block(c),
            ContextRef::Constant(c) => {
                if !self.options.expressions {
                    return;
                }
                let token_type = match c.kind {
                    kind if kind.is_numeric() => TokenType::Number,
                    ConstantKind::String | ConstantKind::Character => TokenType::String,
                    _ => TokenType::Keyword,
                };
                self.out.push(c.range(), token_type, 0);
            }
            ContextRef::Group(c) => self.boxed(&c.expression),
            ContextRef::FunctionArgument(_)
            | ContextRef::IfElif(_)
            | ContextRef::SelectCase(_)
            | ContextRef::TryCatch(_)
            | ContextRef::EnumEntry(_)
            | ContextRef::Documentation(_)
            | ContextRef::DocumentationBlock(_)
            | ContextRef::DocumentationInline(_) => {}
        }
    }

    fn boxed(&mut self, context: &Option<Box<Context>>) {
        if let Some(context) = context {
            self.context(context);
        }
    }

    fn optional_statements(&mut self, statements: &Option<ContextStatements>) {
        if let Some(statements) = statements {
            self.statements(statements);
        }
    }

    fn statements(&mut self, statements: &ContextStatements) {
        for statement in &statements.statements {
            self.context(statement);
        }
    }

    fn documentation(&mut self, documentation: &Option<ContextDocumentation>) {
        let Some(documentation) = documentation else {
            return;
        };
        if !self.options.documentation {
            return;
        }
        for block in &documentation.blocks {
            if block.kind != DocumentationBlockKind::Param {
                continue;
            }
            if let Some(argument) = &block.argument {
                self.out.push(
                    argument.range(),
                    TokenType::Parameter,
                    TokenModifier::Documentation.bit(),
                );
            }
        }
    }

    fn type_name(&mut self, type_name: &TypeName) {
        if type_name.is_void() {
            self.out.push(type_name.range(), TokenType::Keyword, 0);
        } else if type_name.is_builtin() {
            self.out.push(
                type_name.range(),
                TokenType::Class,
                TokenModifier::DefaultLibrary.bit(),
            );
        } else {
            self.out.push(type_name.range(), TokenType::Class, 0);
        }
    }

    fn class(&mut self, c: &ContextClass) {
        self.documentation(&c.documentation);
        let modifiers = declaration_modifiers(c.modifiers, &c.documentation, false);
        self.out.push(c.name.range(), TokenType::Class, modifiers);
        if let Some(extends) = &c.extends {
            self.type_name(extends);
        }
        for implements in &c.implements {
            self.type_name(implements);
        }
        for member in &c.members {
            self.context(member);
        }
    }

    fn interface(&mut self, c: &ContextInterface) {
        self.documentation(&c.documentation);
        let modifiers = declaration_modifiers(c.modifiers, &c.documentation, false);
        self.out.push(c.name.range(), TokenType::Interface, modifiers);
        for implements in &c.implements {
            self.type_name(implements);
        }
        for member in &c.members {
            self.context(member);
        }
    }

    fn enumeration(&mut self, c: &ContextEnumeration) {
        self.documentation(&c.documentation);
        let modifiers = declaration_modifiers(c.modifiers, &c.documentation, false);
        self.out.push(c.name.range(), TokenType::Enum, modifiers);
        for entry in &c.entries {
            self.documentation(&entry.documentation);
            let modifiers = declaration_modifiers(TypeModifierSet::new(), &entry.documentation, false)
                | TokenModifier::Readonly.bit()
                | TokenModifier::Static.bit();
            self.out.push(entry.name.range(), TokenType::EnumMember, modifiers);
            self.boxed(&entry.value);
        }
    }

    fn class_variable(&mut self, c: &ContextClassVariable) {
        self.documentation(&c.documentation);
        self.type_name(&c.type_name);
        let modifiers = declaration_modifiers(c.modifiers, &c.documentation, true);
        self.out.push(c.name.range(), TokenType::Property, modifiers);
        self.boxed(&c.value);
    }

    fn function(&mut self, c: &ContextFunction) {
        self.documentation(&c.documentation);
        // Constructor and operator return types are synthesized and carry no range
        if let Some(return_type) = &c.return_type {
            self.type_name(return_type);
        }
        let modifiers = declaration_modifiers(c.modifiers, &c.documentation, false);
        let token_type = match c.function_type {
            FunctionType::Operator => TokenType::Operator,
            _ => TokenType::Method,
        };
        self.out.push(c.name.range(), token_type, modifiers);
        self.arguments(&c.arguments);
        if let Some(delegation) = &c.delegation {
            for argument in delegation.arguments() {
                self.context(argument);
            }
        }
        if let Some(body) = &c.body {
            self.statements(body);
        }
    }

    fn arguments(&mut self, arguments: &[ContextFunctionArgument]) {
        for argument in arguments {
            self.type_name(&argument.type_name);
            self.out
                .push(argument.name.range(), TokenType::Parameter, DECLARATION);
        }
    }

    fn block(&mut self, c: &ContextBlock) {
        self.arguments(&c.arguments);
        self.optional_statements(&c.statements);
    }

    fn operation(&mut self, c: &ContextOperation) {
        let modification = if c.is_modification() {
            TokenModifier::Modification.bit()
        } else {
            0
        };
        match c.kind {
            OperationKind::Prefix => {
                self.operator(&c.operator);
                self.target(&c.right, modification);
            }
            OperationKind::Postfix => {
                self.target(&c.left, modification);
                self.operator(&c.operator);
            }
            OperationKind::Binary | OperationKind::Assignment => {
                self.target(&c.left, modification);
                self.operator(&c.operator);
                self.boxed(&c.right);
            }
        }
    }

    fn operator(&mut self, operator: &Identifier) {
        if self.options.expressions {
            self.out.push(operator.range(), TokenType::Operator, 0);
        }
    }

    /// An operand that receives `modifiers` if it is a plain member
    fn target(&mut self, operand: &Option<Box<Context>>, modifiers: u32) {
        match operand.as_deref() {
            Some(Context::Member(member)) => {
                self.boxed(&member.object);
                self.member_name(&member.name, member.object.is_some(), modifiers);
            }
            _ => self.boxed(operand),
        }
    }

    fn member_name(&mut self, name: &Identifier, has_object: bool, modifiers: u32) {
        if !self.options.expressions {
            return;
        }
        let token_type = if has_object {
            TokenType::Property
        } else {
            TokenType::Variable
        };
        self.out.push(name.range(), token_type, modifiers);
    }
}

fn declaration_modifiers(
    modifiers: TypeModifierSet,
    documentation: &Option<ContextDocumentation>,
    fixed_is_readonly: bool,
) -> u32 {
    let mut bits = DECLARATION;
    if modifiers.contains(TypeModifier::Static) {
        bits |= TokenModifier::Static.bit();
    }
    if modifiers.contains(TypeModifier::Abstract) {
        bits |= TokenModifier::Abstract.bit();
    }
    if fixed_is_readonly && modifiers.contains(TypeModifier::Fixed) {
        bits |= TokenModifier::Readonly.bit();
    }
    if documentation.as_ref().is_some_and(ContextDocumentation::is_deprecated) {
        bits |= TokenModifier::Deprecated.bit();
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BuildOptions, build_script};
    use crate::parser::parse;

    fn tokens_with(source: &str, options: &TokenOptions) -> Vec<(String, TokenType, u32)> {
        let script = build_script(&parse(source), &BuildOptions::default());
        let line_index = LineIndex::new(source);
        let lines: Vec<&str> = source.lines().collect();
        semantic_tokens(&script, &line_index, options)
            .into_iter()
            .map(|t| {
                let line = lines[t.line as usize];
                let text = line
                    .get(t.col as usize..(t.col + t.length) as usize)
                    .unwrap_or_default()
                    .to_string();
                (text, t.token_type, t.modifiers)
            })
            .collect()
    }

    fn tokens(source: &str) -> Vec<(String, TokenType, u32)> {
        tokens_with(source, &TokenOptions::default())
    }

    #[test]
    fn test_legend_matches_enums() {
        assert_eq!(TokenType::Operator.name(), "operator");
        assert_eq!(TokenType::EnumMember.to_lsp_index(), 7);
        assert_eq!(TokenModifier::DefaultLibrary.bit(), 1 << 7);
        assert_eq!(TokenModifier::Modification.name(), "modification");
        let legend = legend();
        assert_eq!(legend.token_types.len(), 14);
        assert_eq!(legend.token_modifiers.len(), 8);
    }

    #[test]
    fn test_class_declaration_tokens() {
        let result = tokens("class Foo extends Bar\nstatic fixed var int MAX = 3\nend\n");
        assert_eq!(
            result,
            vec![
                ("Foo".to_string(), TokenType::Class, DECLARATION),
                ("Bar".to_string(), TokenType::Class, 0),
                (
                    "int".to_string(),
                    TokenType::Class,
                    TokenModifier::DefaultLibrary.bit()
                ),
                (
                    "MAX".to_string(),
                    TokenType::Property,
                    DECLARATION | TokenModifier::Static.bit() | TokenModifier::Readonly.bit()
                ),
                ("3".to_string(), TokenType::Number, 0),
            ]
        );
    }

    #[test]
    fn test_function_body_tokens() {
        let result = tokens("class A\nfunc void f(int a)\na = a + 1\nend\nend\n");
        let texts: Vec<_> = result.iter().map(|(t, ty, _)| (t.as_str(), *ty)).collect();
        assert_eq!(
            texts,
            vec![
                ("A", TokenType::Class),
                ("void", TokenType::Keyword),
                ("f", TokenType::Method),
                ("int", TokenType::Class),
                ("a", TokenType::Parameter),
                ("a", TokenType::Variable),
                ("=", TokenType::Operator),
                ("a", TokenType::Variable),
                ("+", TokenType::Operator),
                ("1", TokenType::Number),
            ]
        );
        // The assignment target is marked as modified
        assert_eq!(result[5].2, TokenModifier::Modification.bit());
        assert_eq!(result[7].2, 0);
    }

    #[test]
    fn test_operator_and_constructor() {
        let result = tokens("class A\nfunc new()\nend\nfunc A +(A o)\nreturn this\nend\nend\n");
        assert!(result.contains(&(
            "new".to_string(),
            TokenType::Method,
            DECLARATION | TokenModifier::Static.bit()
        )));
        assert!(result.contains(&("+".to_string(), TokenType::Operator, DECLARATION)));
        assert!(result.contains(&("this".to_string(), TokenType::Keyword, 0)));
    }

    #[test]
    fn test_deprecated_and_param_documentation() {
        let source = "class A\n/** @deprecated Old. @param x Value. */\nfunc void f(int x)\nend\nend\n";
        let result = tokens(source);
        assert!(result.contains(&(
            "x".to_string(),
            TokenType::Parameter,
            TokenModifier::Documentation.bit()
        )));
        let f = result
            .iter()
            .find(|(t, _, _)| t == "f")
            .expect("function token");
        assert_ne!(f.2 & TokenModifier::Deprecated.bit(), 0);
    }

    #[test]
    fn test_enumeration_tokens() {
        let result = tokens("enum Mode\nfast\nslow\nend\n");
        assert_eq!(result[0], ("Mode".to_string(), TokenType::Enum, DECLARATION));
        assert_eq!(
            result[1],
            (
                "fast".to_string(),
                TokenType::EnumMember,
                DECLARATION | TokenModifier::Readonly.bit() | TokenModifier::Static.bit()
            )
        );
    }

    #[test]
    fn test_expression_tokens_can_be_disabled() {
        let options = TokenOptions {
            expressions: false,
            documentation: true,
        };
        let result = tokens_with("class A\nfunc void f()\nvar int x = 1 + 2\nend\nend\n", &options);
        assert!(result.iter().all(|(_, ty, _)| *ty != TokenType::Number));
        assert!(result.iter().all(|(_, ty, _)| *ty != TokenType::Operator));
        assert!(result.contains(&("x".to_string(), TokenType::Variable, DECLARATION)));
    }

    #[test]
    fn test_shared_type_is_emitted_once() {
        let result = tokens("class A\nvar int a, b\nend\n");
        let texts: Vec<_> = result.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["A", "int", "a", "b"]);

        let source = "class A\nvar int a, b\nend\n";
        let script = build_script(&parse(source), &BuildOptions::default());
        let (_, dropped) =
            semantic_tokens_with_dropped(&script, &LineIndex::new(source), &TokenOptions::default());
        assert_eq!(dropped.duplicates, 1);
        assert_eq!(dropped.out_of_order, 0);
    }

    #[test]
    fn test_builder_drops_out_of_order_and_multiline() {
        let text = "abc def\nghi";
        let line_index = LineIndex::new(text);
        let mut builder = SemanticTokensBuilder::new(&line_index);
        let range = |s: u32, e: u32| Some(TextRange::new(s.into(), e.into()));
        assert!(builder.push(range(4, 7), TokenType::Variable, 0));
        assert!(!builder.push(range(0, 3), TokenType::Variable, 0));
        assert!(!builder.push(range(4, 7), TokenType::Variable, 0));
        assert!(!builder.push(range(5, 10), TokenType::Variable, 0));
        assert!(!builder.push(None, TokenType::Variable, 0));
        assert!(builder.push(range(8, 11), TokenType::Variable, 0));
        assert_eq!(
            builder.dropped(),
            DroppedTokens {
                duplicates: 1,
                out_of_order: 1
            }
        );
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn test_repeat_of_earlier_token_is_a_duplicate() {
        let text = "ab cd ef";
        let line_index = LineIndex::new(text);
        let mut builder = SemanticTokensBuilder::new(&line_index);
        let range = |s: u32, e: u32| Some(TextRange::new(s.into(), e.into()));
        assert!(builder.push(range(0, 2), TokenType::Class, 0));
        assert!(builder.push(range(3, 5), TokenType::Variable, 0));
        assert!(!builder.push(range(0, 2), TokenType::Class, 0));
        assert!(!builder.push(range(0, 1), TokenType::Class, 0));
        assert!(builder.push(range(6, 8), TokenType::Variable, 0));
        let (tokens, dropped) = builder.finish();
        assert_eq!(tokens.len(), 3);
        assert_eq!(dropped.duplicates, 1);
        assert_eq!(dropped.out_of_order, 1);
    }

    #[test]
    fn test_encode_uses_deltas() {
        let token = |line, col, length| SemanticToken {
            line,
            col,
            length,
            token_type: TokenType::Variable,
            modifiers: 0,
        };
        let encoded = encode(&[token(1, 4, 2), token(1, 10, 3), token(3, 2, 1)]);
        assert_eq!(
            encoded,
            vec![1, 4, 2, 5, 0, 0, 6, 3, 5, 0, 2, 2, 1, 5, 0]
        );
    }
}
