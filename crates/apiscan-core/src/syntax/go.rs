use tree_sitter::{Node, Parser, Tree};

use crate::error::SyntaxError;

/// A parsed Go file borrowing the text it was parsed from.
///
/// Only constructed for error-free trees: any ERROR or MISSING node makes
/// `parse` fail instead.
pub struct SyntaxTree<'src> {
    tree: Tree,
    source: &'src str,
}

impl<'src> SyntaxTree<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn source_bytes(&self) -> &'src [u8] {
        self.source.as_bytes()
    }
}

impl std::fmt::Debug for SyntaxTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root().kind())
            .field("len", &self.source.len())
            .finish()
    }
}

/// Parse Go source into a syntax tree.
///
/// The parse is all-or-nothing: tree-sitter always recovers, so a tree
/// carrying error nodes is reported as the first error found in document
/// order. Empty text parses to an empty `source_file`.
pub fn parse(source: &str) -> Result<SyntaxTree<'_>, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| SyntaxError::Language(e.to_string()))?;

    let tree = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(first_error(root, source.as_bytes()));
    }

    Ok(SyntaxTree { tree, source })
}

fn first_error(root: Node<'_>, source: &[u8]) -> SyntaxError {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_missing() {
            return invalid_at(node, format!("missing `{}`", node.kind()));
        }
        if node.is_error() {
            return invalid_at(node, format!("unexpected `{}`", snippet(node, source)));
        }

        // Reverse so the leftmost child is visited first.
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    invalid_at(root, "syntax error".to_string())
}

fn invalid_at(node: Node<'_>, message: String) -> SyntaxError {
    let pos = node.start_position();
    SyntaxError::Invalid {
        line: pos.row as u32 + 1,
        column: pos.column as u32 + 1,
        message,
    }
}

fn snippet(node: Node<'_>, source: &[u8]) -> String {
    let text = node.utf8_text(source).unwrap_or("");
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > 40 {
        let cut: String = first_line.chars().take(40).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}
