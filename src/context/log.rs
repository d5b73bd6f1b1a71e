//! Deterministic tree dump of a context tree

use std::fmt::{self, Write};

use super::function::{ConstructorDelegation, FunctionType};
use super::statements::ForDirection;
use super::{Context, ContextRef, TypeModifierSet};

impl<'a> ContextRef<'a> {
    /// Write one summary line for this context, then its children with the
    /// prefix extended by two spaces
    pub fn log<W: Write>(self, sink: &mut W, prefix: &str) -> fmt::Result {
        sink.write_str(prefix)?;
        self.write_summary(sink)?;
        sink.write_char('\n')?;

        let child_prefix = format!("{prefix}  ");
        for child in self.children() {
            child.log(sink, &child_prefix)?;
        }
        Ok(())
    }

    fn write_summary<W: Write>(self, f: &mut W) -> fmt::Result {
        match self {
            Self::Script(_) => f.write_str("Script"),
            Self::PinNamespace(c) => write!(f, "Pin Namespace: {}", c.name),
            Self::RequiresPackage(c) => write!(f, "Requires Package: {}", c.package),
            Self::Namespace(c) => write!(f, "Namespace: {}", c.name),
            Self::Class(c) => {
                write!(f, "Class: {}{}", modifiers(c.modifiers), c.name)?;
                if let Some(extends) = &c.extends {
                    write!(f, " extends {extends}")?;
                }
                write_implements(f, c.implements.iter().map(|t| t.name()))
            }
            Self::Interface(c) => {
                write!(f, "Interface: {}{}", modifiers(c.modifiers), c.name)?;
                write_implements(f, c.implements.iter().map(|t| t.name()))
            }
            Self::Enumeration(c) => {
                write!(f, "Enumeration: {}{}", modifiers(c.modifiers), c.name)
            }
            Self::EnumEntry(c) => write!(f, "Entry: {}", c.name),
            Self::ClassVariable(c) => write!(
                f,
                "Variable: {}{} {}",
                modifiers(c.modifiers),
                c.type_name,
                c.name
            ),
            Self::Function(c) => {
                let kind = match c.function_type {
                    FunctionType::Constructor => "Constructor",
                    FunctionType::Destructor => "Destructor",
                    FunctionType::Operator => "Operator",
                    FunctionType::Regular => "Function",
                };
                write!(f, "{kind}: {}", modifiers(c.modifiers))?;
                if let Some(return_type) = &c.return_type {
                    write!(f, "{return_type} ")?;
                }
                write!(f, "{}", c.name)?;
                match &c.delegation {
                    Some(ConstructorDelegation::This(args)) => write!(f, " this({})", args.len()),
                    Some(ConstructorDelegation::Super(args)) => {
                        write!(f, " super({})", args.len())
                    }
                    None => Ok(()),
                }
            }
            Self::FunctionArgument(c) => write!(f, "Argument: {} {}", c.type_name, c.name),
            Self::Statements(c) => write!(f, "Statements ({})", c.statements.len()),
            Self::If(_) => f.write_str("If"),
            Self::IfElif(_) => f.write_str("Elif"),
            Self::While(_) => f.write_str("While"),
            Self::For(c) => match c.direction {
                ForDirection::Up => f.write_str("For: to"),
                ForDirection::Down => f.write_str("For: downto"),
            },
            Self::Select(_) => f.write_str("Select"),
            Self::SelectCase(c) => write!(f, "Case ({})", c.values.len()),
            Self::Try(_) => f.write_str("Try"),
            Self::TryCatch(c) => write!(f, "Catch: {} {}", c.caught_type, c.variable),
            Self::Throw(_) => f.write_str("Throw"),
            Self::Return(_) => f.write_str("Return"),
            Self::Break(_) => f.write_str("Break"),
            Self::Continue(_) => f.write_str("Continue"),
            Self::Variables(c) => write!(f, "Variables: {}", c.type_name),
            Self::Variable(c) => write!(f, "Variable: {} {}", c.type_name, c.name),
            Self::Operation(c) => write!(f, "Operation: {} ({:?})", c.operator, c.kind),
            Self::SpecialOperation(c) => write!(
                f,
                "Special Operation: {} {}",
                c.operator.keyword(),
                c.target_type
            ),
            Self::InlineIf(_) => f.write_str("Inline If"),
            Self::Member(c) => write!(f, "Member: {}", c.name),
            Self::FunctionCall(c) => {
                write!(f, "Call: {} ({})", c.name, c.arguments.len())
            }
            Self::Block(c) => write!(f, "Block ({})", c.arguments.len()),
            Self::Constant(c) => write!(f, "Constant: {} ({:?})", c.text, c.kind),
            Self::Group(_) => f.write_str("Group"),
            Self::Documentation(c) => write!(f, "Documentation ({})", c.blocks.len()),
            Self::DocumentationBlock(c) => match &c.argument {
                Some(argument) => write!(f, "Doc {:?}: {argument}", c.kind),
                None => write!(f, "Doc {:?}", c.kind),
            },
            Self::DocumentationInline(c) => write!(f, "{:?}: {:?}", c.kind, c.text.as_str()),
        }
    }
}

impl Context {
    pub fn log<W: Write>(&self, sink: &mut W, prefix: &str) -> fmt::Result {
        self.view().log(sink, prefix)
    }

    /// The whole tree dump as a string
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.log(&mut out, "");
        out
    }
}

impl super::ContextScript {
    pub fn log<W: Write>(&self, sink: &mut W, prefix: &str) -> fmt::Result {
        ContextRef::from(self).log(sink, prefix)
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = self.log(&mut out, "");
        out
    }
}

fn modifiers(set: TypeModifierSet) -> String {
    if set.is_empty() {
        String::new()
    } else {
        format!("{set} ")
    }
}

fn write_implements<'n, W: Write>(
    f: &mut W,
    names: impl Iterator<Item = &'n str>,
) -> fmt::Result {
    let names: Vec<_> = names.collect();
    if names.is_empty() {
        return Ok(());
    }
    write!(f, " implements {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use crate::context::{BuildOptions, ContextNode, build_script};

    #[test]
    fn test_dump_is_indented_tree() {
        let source = "class Foo\nfunc new(int x) this(x)\nend\nfunc Foo +(Foo other)\nreturn this\nend\nend\n";
        let script = build_script(&crate::parser::parse(source), &BuildOptions::default());
        let expected = "\
Script
  Class: Foo
    Constructor: static Foo new this(1)
      Argument: int x
      Member: x
      Statements (0)
    Operator: Foo +
      Argument: Foo other
      Statements (1)
        Return
          Constant: this (This)
";
        assert_eq!(script.dump(), expected);
    }

    #[test]
    fn test_dump_of_disposed_tree() {
        let mut script = build_script(
            &crate::parser::parse("class Foo\nend\n"),
            &BuildOptions::default(),
        );
        script.dispose();
        assert_eq!(script.dump(), "Script\n");
    }
}
