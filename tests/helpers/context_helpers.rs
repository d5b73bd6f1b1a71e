//! Context tree helpers for building and searching trees.

use dscript::context::{
    BuildOptions, ContextFunction, ContextKind, ContextRef, ContextScript, build_script,
    walk_preorder,
};
use dscript::parser::parse;

/// Parse and build a script with default options.
pub fn build(source: &str) -> ContextScript {
    build_script(&parse(source), &BuildOptions::default())
}

/// Every function of a script in source order.
pub fn functions(script: &ContextScript) -> Vec<&ContextFunction> {
    let mut out = Vec::new();
    walk_preorder(script.into(), &mut |context| {
        if let ContextRef::Function(function) = context {
            out.push(function);
        }
    });
    out
}

/// The first function named `name`.
pub fn function<'a>(script: &'a ContextScript, name: &str) -> &'a ContextFunction {
    functions(script)
        .into_iter()
        .find(|f| f.name.name() == name)
        .unwrap_or_else(|| panic!("no function named {name}"))
}

/// Kinds of every context in pre-order.
pub fn kinds(script: &ContextScript) -> Vec<ContextKind> {
    let mut out = Vec::new();
    walk_preorder(script.into(), &mut |context| out.push(context.kind()));
    out
}

/// Number of contexts of `kind` in the tree.
pub fn count_kind(script: &ContextScript, kind: ContextKind) -> usize {
    kinds(script).into_iter().filter(|k| *k == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_lookup() {
        let script = build("class A\nfunc void run()\nend\nend\n");
        assert_eq!(function(&script, "run").name.name(), "run");
        assert_eq!(count_kind(&script, ContextKind::Function), 1);
    }
}
