//! Tree traversal helpers

use text_size::TextSize;

use super::ContextRef;

/// Visit `root` and every descendant in pre-order (children in source order)
pub fn walk_preorder<'a>(root: ContextRef<'a>, visit: &mut impl FnMut(ContextRef<'a>)) {
    visit(root);
    for child in root.children() {
        walk_preorder(child, visit);
    }
}

/// Contexts enclosing `offset`, from `root` down to the innermost one.
///
/// Empty if `root` itself does not contain the offset. Contexts without a
/// range are skipped.
pub fn context_path_at(root: ContextRef<'_>, offset: TextSize) -> Vec<ContextRef<'_>> {
    let mut path = Vec::new();
    if !root.range().is_some_and(|r| r.contains_inclusive(offset)) {
        return path;
    }

    let mut current = root;
    path.push(current);
    while let Some(child) = current
        .children()
        .into_iter()
        .find(|c| c.range().is_some_and(|r| r.contains_inclusive(offset)))
    {
        path.push(child);
        current = child;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BuildOptions, ContextKind, build_script};

    #[test]
    fn test_preorder_visits_every_context() {
        let script = build_script(
            &crate::parser::parse("class A\nvar int x\nfunc void f()\nend\nend\n"),
            &BuildOptions::default(),
        );
        let mut kinds = Vec::new();
        walk_preorder((&script).into(), &mut |c| kinds.push(c.kind()));
        assert_eq!(
            kinds,
            vec![
                ContextKind::Script,
                ContextKind::Class,
                ContextKind::ClassVariable,
                ContextKind::Function,
                ContextKind::Statements,
            ]
        );
    }

    #[test]
    fn test_path_reaches_innermost_context() {
        let source = "class A\nfunc void f(int a)\nreturn a + 1\nend\nend\n";
        let script = build_script(&crate::parser::parse(source), &BuildOptions::default());
        let offset = TextSize::from(source.find("a + 1").expect("offset") as u32);
        let kinds: Vec<_> = context_path_at((&script).into(), offset)
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ContextKind::Script,
                ContextKind::Class,
                ContextKind::Function,
                ContextKind::Statements,
                ContextKind::Return,
                ContextKind::Operation,
                ContextKind::Member,
            ]
        );
    }

    #[test]
    fn test_path_outside_root_is_empty() {
        let script = build_script(&crate::parser::parse("class A\nend"), &BuildOptions::default());
        assert!(context_path_at((&script).into(), TextSize::from(400)).is_empty());
    }
}
