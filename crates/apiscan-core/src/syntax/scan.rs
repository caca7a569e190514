use tree_sitter::Node;

use crate::syntax::SyntaxTree;
use crate::syntax::predicates::contains_data_access;

/// Loop flavour, reported under distinct issue names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// `for init; cond; post {}`, `for cond {}` and `for {}`.
    Counted,
    /// `for k, v := range xs {}`.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopFact {
    pub kind: LoopKind,
    /// 1-based line of the `for` keyword.
    pub line: u32,
    /// Whether any call in the loop (header included) is a data-access call.
    pub has_data_access: bool,
}

/// Control-flow constructs counted towards complexity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFlowCounts {
    pub conditionals: u32,
    pub counted_loops: u32,
    pub range_loops: u32,
    pub switches: u32,
    pub type_switches: u32,
}

impl ControlFlowCounts {
    pub fn total(&self) -> u32 {
        self.conditionals
            .saturating_add(self.counted_loops)
            .saturating_add(self.range_loops)
            .saturating_add(self.switches)
            .saturating_add(self.type_switches)
    }
}

/// Structural observations gathered in one pass over the tree.
///
/// Pure facts: no severity, no findings. Loops appear in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeFacts {
    pub loops: Vec<LoopFact>,
    pub control_flow: ControlFlowCounts,
}

/// Walks every node once in document order and records loop and
/// control-flow facts.
///
/// Each loop additionally runs one short-circuiting data-access search over
/// its own subtree.
pub fn scan_tree(tree: &SyntaxTree<'_>) -> TreeFacts {
    let mut facts = TreeFacts::default();
    let source = tree.source_bytes();
    let mut cursor = tree.root().walk();

    loop {
        visit(cursor.node(), source, &mut facts);

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return facts;
            }
        }
    }
}

fn visit(node: Node<'_>, source: &[u8], facts: &mut TreeFacts) {
    let counts = &mut facts.control_flow;
    match node.kind() {
        "if_statement" => counts.conditionals += 1,
        "expression_switch_statement" => counts.switches += 1,
        "type_switch_statement" => counts.type_switches += 1,
        "for_statement" => {
            let kind = loop_kind(node);
            match kind {
                LoopKind::Counted => counts.counted_loops += 1,
                LoopKind::Range => counts.range_loops += 1,
            }
            facts.loops.push(LoopFact {
                kind,
                line: node.start_position().row as u32 + 1,
                has_data_access: contains_data_access(node, source),
            });
        }
        _ => {}
    }
}

fn loop_kind(for_stmt: Node<'_>) -> LoopKind {
    let mut cursor = for_stmt.walk();
    let is_range = for_stmt
        .named_children(&mut cursor)
        .any(|child| child.kind() == "range_clause");
    if is_range {
        LoopKind::Range
    } else {
        LoopKind::Counted
    }
}
