//! Context tree — the semantic model built from the CST.
//!
//! Every declaration, statement, expression and documentation element of a
//! script becomes one context. Contexts own their children by value; there
//! are no parent pointers. Scope queries walk from the root instead (see
//! [`context_path_at`]).
//!
//! ## Architecture
//!
//! ```text
//! ast::Script
//!     ↓ build_script()
//! ContextScript
//!     ├── ContextNamespace / ContextPinNamespace / ContextRequiresPackage
//!     ├── ContextClass / ContextInterface / ContextEnumeration
//!     │       └── ContextFunction / ContextClassVariable / ...
//!     │               └── ContextStatements → statement and expression contexts
//!     └── ContextDocumentation attached to declarations
//! ```
//!
//! [`Context`] is the owned tagged union, [`ContextRef`] the borrowed view
//! used by traversals. Building never fails: missing grammar slots become
//! placeholder names (`"??"`) or unset fields.

mod builder;
mod declarations;
mod documentation;
mod expressions;
mod function;
mod identifier;
mod log;
mod modifiers;
mod statements;
mod type_name;
mod walk;

pub use builder::{BuildOptions, build_script};
pub use declarations::{
    ContextClass, ContextClassVariable, ContextEnumEntry, ContextEnumeration, ContextInterface,
    ContextNamespace, ContextPinNamespace, ContextRequiresPackage, ContextScript,
};
pub use documentation::{
    ContextDocumentation, ContextDocumentationBlock, ContextDocumentationInline,
    DocumentationBlockKind, DocumentationInlineKind,
};
pub use expressions::{
    ConstantKind, ContextBlock, ContextConstant, ContextFunctionCall, ContextGroup,
    ContextInlineIf, ContextMember, ContextOperation, ContextSpecialOperation, OperationKind,
    SpecialOperator,
};
pub use function::{
    ConstructorDelegation, ContextFunction, ContextFunctionArgument, FunctionBeginShape,
    FunctionType, OPERATOR_TABLE, resolve_operator,
};
pub use identifier::{Identifier, PLACEHOLDER};
pub use modifiers::{TypeModifier, TypeModifierSet};
pub use statements::{
    ContextBreak, ContextContinue, ContextFor, ContextIf, ContextIfElif, ContextReturn,
    ContextSelect, ContextSelectCase, ContextStatements, ContextThrow, ContextTry,
    ContextTryCatch, ContextVariable, ContextVariables, ContextWhile, ForDirection,
};
pub use type_name::{BUILTIN_TYPES, TypeName, TypeNameKind};
pub use walk::{context_path_at, walk_preorder};

use text_size::TextRange;

/// Behaviour shared by every context
pub trait ContextNode {
    /// Source range of the whole construct, if known
    fn range(&self) -> Option<TextRange>;

    /// Owned child contexts, in source order
    fn children(&self) -> Vec<ContextRef<'_>>;

    /// Release all owned children.
    ///
    /// Safe to call repeatedly; afterwards the context reports no children.
    fn dispose(&mut self);
}

macro_rules! contexts {
    ($($variant:ident($ty:ident)),+ $(,)?) => {
        /// Discriminant of a [`Context`]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ContextKind {
            $($variant),+
        }

        /// Any context, owned
        #[derive(Debug, Clone, PartialEq)]
        pub enum Context {
            $($variant($ty)),+
        }

        /// Any context, borrowed
        #[derive(Debug, Clone, Copy)]
        pub enum ContextRef<'a> {
            $($variant(&'a $ty)),+
        }

        impl Context {
            pub fn kind(&self) -> ContextKind {
                match self {
                    $(Self::$variant(_) => ContextKind::$variant),+
                }
            }

            /// Borrow this context as a [`ContextRef`]
            pub fn view(&self) -> ContextRef<'_> {
                match self {
                    $(Self::$variant(c) => ContextRef::$variant(c)),+
                }
            }
        }

        impl ContextNode for Context {
            fn range(&self) -> Option<TextRange> {
                match self {
                    $(Self::$variant(c) => c.range()),+
                }
            }

            fn children(&self) -> Vec<ContextRef<'_>> {
                match self {
                    $(Self::$variant(c) => c.children()),+
                }
            }

            fn dispose(&mut self) {
                match self {
                    $(Self::$variant(c) => c.dispose()),+
                }
            }
        }

        impl<'a> ContextRef<'a> {
            pub fn kind(self) -> ContextKind {
                match self {
                    $(Self::$variant(_) => ContextKind::$variant),+
                }
            }

            pub fn range(self) -> Option<TextRange> {
                match self {
                    $(Self::$variant(c) => c.range()),+
                }
            }

            pub fn children(self) -> Vec<ContextRef<'a>> {
                match self {
                    $(Self::$variant(c) => c.children()),+
                }
            }
        }

        $(
            impl From<$ty> for Context {
                fn from(context: $ty) -> Self {
                    Self::$variant(context)
                }
            }

            impl<'a> From<&'a $ty> for ContextRef<'a> {
                fn from(context: &'a $ty) -> Self {
                    Self::$variant(context)
                }
            }
        )+
    };
}

contexts! {
    Script(ContextScript),
    PinNamespace(ContextPinNamespace),
    RequiresPackage(ContextRequiresPackage),
    Namespace(ContextNamespace),
    Class(ContextClass),
    Interface(ContextInterface),
    Enumeration(ContextEnumeration),
    EnumEntry(ContextEnumEntry),
    ClassVariable(ContextClassVariable),
    Function(ContextFunction),
    FunctionArgument(ContextFunctionArgument),
    Statements(ContextStatements),
    If(ContextIf),
    IfElif(ContextIfElif),
    While(ContextWhile),
    For(ContextFor),
    Select(ContextSelect),
    SelectCase(ContextSelectCase),
    Try(ContextTry),
    TryCatch(ContextTryCatch),
    Throw(ContextThrow),
    Return(ContextReturn),
    Break(ContextBreak),
    Continue(ContextContinue),
    Variables(ContextVariables),
    Variable(ContextVariable),
    Operation(ContextOperation),
    SpecialOperation(ContextSpecialOperation),
    InlineIf(ContextInlineIf),
    Member(ContextMember),
    FunctionCall(ContextFunctionCall),
    Block(ContextBlock),
    Constant(ContextConstant),
    Group(ContextGroup),
    Documentation(ContextDocumentation),
    DocumentationBlock(ContextDocumentationBlock),
    DocumentationInline(ContextDocumentationInline),
}

impl ContextKind {
    /// Statement contexts that may appear in a statement block
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::While
                | Self::For
                | Self::Select
                | Self::Try
                | Self::Throw
                | Self::Return
                | Self::Break
                | Self::Continue
                | Self::Variables
        )
    }

    /// Expression contexts
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Operation
                | Self::SpecialOperation
                | Self::InlineIf
                | Self::Member
                | Self::FunctionCall
                | Self::Block
                | Self::Constant
                | Self::Group
        )
    }
}

// ============================================================================
// Child collection helpers
// ============================================================================

/// Push an optional boxed child
fn push_boxed<'a>(out: &mut Vec<ContextRef<'a>>, child: &'a Option<Box<Context>>) {
    if let Some(child) = child {
        out.push(child.view());
    }
}

/// Push a list of children
fn push_all<'a, T>(out: &mut Vec<ContextRef<'a>>, children: &'a [T])
where
    &'a T: Into<ContextRef<'a>>,
{
    out.extend(children.iter().map(Into::into));
}

impl<'a> From<&'a Context> for ContextRef<'a> {
    fn from(context: &'a Context) -> Self {
        context.view()
    }
}
