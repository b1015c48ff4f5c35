use crate::node::{Arena, NodeId};
use crate::sink::TreeRow;

/// Append the rows of the node and its rendered descendants in preorder.
///
/// Nothing is appended for hidden nodes. Children of collapsed nodes are skipped.
pub(crate) fn flatten_into<T>(arena: &Arena<T>, id: NodeId, rows: &mut Vec<TreeRow<T>>)
where
    T: Clone,
{
    let node = arena.node(id);
    if !node.visible {
        return;
    }
    if let Some(element) = &node.element {
        rows.push(TreeRow {
            element: element.clone(),
            depth: node.depth,
            collapsed: node.collapsed,
            node: id,
        });
    }
    if !node.collapsed {
        flatten_children_into(arena, id, rows);
    }
}

fn flatten_children_into<T>(arena: &Arena<T>, id: NodeId, rows: &mut Vec<TreeRow<T>>)
where
    T: Clone,
{
    for &child in &arena.node(id).children {
        flatten_into(arena, child, rows);
    }
}

/// Rows the children of the node render, ignoring whether the node itself is visible or collapsed.
#[must_use]
pub(crate) fn flatten_children<T>(arena: &Arena<T>, id: NodeId) -> Vec<TreeRow<T>>
where
    T: Clone,
{
    let mut rows = Vec::with_capacity(arena.node(id).children_render);
    flatten_children_into(arena, id, &mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexTreeModel, TreeElement};

    fn model() -> Model {
        let mut model = IndexTreeModel::new(Vec::new());
        model.splice(&[0], 0, TreeElement::example()).unwrap();
        model
    }

    type Model = IndexTreeModel<&'static str, Vec<TreeRow<&'static str>>>;

    fn flattened(model: &Model) -> Vec<&'static str> {
        flatten_children(model.arena(), NodeId::ROOT)
            .into_iter()
            .map(|row| row.element)
            .collect()
    }

    #[test]
    fn depth_works() {
        let model = model();
        let depths = flatten_children(model.arena(), NodeId::ROOT)
            .into_iter()
            .map(|row| row.depth)
            .collect::<Vec<_>>();
        assert_eq!(depths, [1, 2, 2, 2, 3, 3, 3, 2, 3, 3]);
    }

    #[test]
    fn flatten_all_expanded() {
        let model = model();
        assert_eq!(
            flattened(&model),
            [
                "vscode",
                ".build",
                "git",
                "github",
                "calendar.yml",
                "endgame",
                "build.js",
                "build",
                "lib",
                "gulpfile.js"
            ]
        );
        assert_eq!(&flatten_children(model.arena(), NodeId::ROOT), model.sink());
    }

    #[test]
    fn flatten_skips_children_of_collapsed() {
        let mut model = model();
        model.set_collapsed(&[0, 2], true).unwrap();
        assert_eq!(
            flattened(&model),
            ["vscode", ".build", "git", "github", "build", "lib", "gulpfile.js"]
        );
        model.set_collapsed(&[0], true).unwrap();
        assert_eq!(flattened(&model), ["vscode"]);
        assert_eq!(&flatten_children(model.arena(), NodeId::ROOT), model.sink());
    }
}
