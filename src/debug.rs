use std::{collections::VecDeque, fmt};

use crate::{AvlTree, Links, NodeRef, TreeNode};

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Writes the tree to `w` as a Graphviz DOT digraph named `name`.
    ///
    /// Each node becomes a record `<l> | key | <r>`, and each parent-child link an edge leaving
    /// the matching port. Nodes are listed breadth-first.
    ///
    /// The export only reads the tree through [`AvlTree::root`] and [`NodeRef`].
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
        T::Key: fmt::Display,
    {
        let Ok(root) = self.root() else {
            return write!(w, "digraph \"graph-{name}\" {{}}");
        };

        writeln!(w, "digraph \"graph-{name}\" {{")?;
        writeln!(w, " node [shape=record, height=.1];")?;

        let mut queue: VecDeque<NodeRef<'_, T>> = VecDeque::new();
        queue.push_back(root);

        let mut links = String::new();

        while let Some(node) = queue.pop_front() {
            use fmt::Write;

            let key = node.key();
            writeln!(w, " \"{name}-{key}\" [label=\"<l> | {key} | <r>\"];")?;

            for (port, child) in [("l", node.left()), ("r", node.right())] {
                if let Some(child) = child {
                    let child_key = child.key();
                    writeln!(links, " \"{name}-{key}\":{port} -> \"{name}-{child_key}\";")?;
                    queue.push_back(child);
                }
            }
        }

        w.write_str(&links)?;

        w.write_str("}\n")
    }
}
