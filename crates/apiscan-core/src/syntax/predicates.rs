//! Capability predicates over syntax nodes.
//!
//! A capability predicate answers one question about a node, e.g. "is this
//! call a data-access operation". `subtree_contains` lifts any such
//! predicate to a whole subtree and stops at the first match.

use tree_sitter::Node;

use crate::rules::catalog::DATA_ACCESS_METHODS;

/// True for `x.Method(...)` calls where `Method` is a known ORM / database
/// client operation.
pub fn is_data_access_call(node: Node<'_>, source: &[u8]) -> bool {
    if node.kind() != "call_expression" {
        return false;
    }

    let Some(callee) = node.child_by_field_name("function") else {
        return false;
    };
    if callee.kind() != "selector_expression" {
        return false;
    }

    callee
        .child_by_field_name("field")
        .and_then(|field| field.utf8_text(source).ok())
        .is_some_and(|name| DATA_ACCESS_METHODS.contains(&name))
}

/// Depth-first existence search. `root` itself is tested first.
pub fn subtree_contains<'tree, F>(root: Node<'tree>, mut pred: F) -> bool
where
    F: FnMut(Node<'tree>) -> bool,
{
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if pred(node) {
            return true;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }

    false
}

pub fn contains_data_access(node: Node<'_>, source: &[u8]) -> bool {
    subtree_contains(node, |n| is_data_access_call(n, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn first_call<'t>(root: Node<'t>) -> Option<Node<'t>> {
        let mut found = None;
        subtree_contains(root, |n| {
            if n.kind() == "call_expression" {
                found = Some(n);
                true
            } else {
                false
            }
        });
        found
    }

    #[test]
    fn selector_call_with_orm_name_is_data_access() {
        let src = "package main\nfunc f() { db.Where(\"id = ?\", 1) }\n";
        let tree = parse(src).unwrap();
        let call = first_call(tree.root()).expect("call present");
        assert!(is_data_access_call(call, tree.source_bytes()));
    }

    #[test]
    fn plain_function_call_is_not_data_access() {
        let src = "package main\nfunc f() { Find(x) }\n";
        let tree = parse(src).unwrap();
        let call = first_call(tree.root()).expect("call present");
        assert!(!is_data_access_call(call, tree.source_bytes()));
    }

    #[test]
    fn unknown_method_is_not_data_access() {
        let src = "package main\nfunc f() { fmt.Println(\"hi\") }\n";
        let tree = parse(src).unwrap();
        assert!(!contains_data_access(tree.root(), tree.source_bytes()));
    }

    #[test]
    fn nested_call_is_found_at_depth() {
        let src = "package main\nfunc f() {\n\tif ok {\n\t\tfor {\n\t\t\tdb.Exec(q)\n\t\t}\n\t}\n}\n";
        let tree = parse(src).unwrap();
        assert!(contains_data_access(tree.root(), tree.source_bytes()));
    }

    #[test]
    fn search_stops_at_first_match() {
        let src = "package main\nfunc f() { db.First(&a); db.Last(&b); db.Take(&c) }\n";
        let tree = parse(src).unwrap();

        let mut visited_calls = 0;
        let found = subtree_contains(tree.root(), |n| {
            if is_data_access_call(n, tree.source_bytes()) {
                visited_calls += 1;
                true
            } else {
                false
            }
        });

        assert!(found);
        assert_eq!(visited_calls, 1);
    }

    #[test]
    fn non_call_node_is_rejected() {
        let tree = parse("package main\n").unwrap();
        assert!(!is_data_access_call(tree.root(), tree.source_bytes()));
    }
}
