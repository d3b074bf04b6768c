//! Notebook tools: flat listing, CRUD, and tree reconstruction.

use std::collections::{HashMap, HashSet};

use crate::client::{
    JoplinClient, NotebookFields, RawNotebook, NOTEBOOK_FIELDS, NOTEBOOK_TREE_FIELDS,
};
use crate::error::Result;
use crate::models::{Notebook, NotebookTreeNode};
use crate::tools::clamp_limit;
use crate::tools::params::{CreateNotebookParams, UpdateNotebookParams};

/// List all notebooks as a flat list.
pub async fn list_notebooks(client: &JoplinClient, limit: Option<i64>) -> Result<Vec<Notebook>> {
    let limit = clamp_limit(limit)?;
    let notebooks = client.get_notebooks(NOTEBOOK_FIELDS, limit).await?;
    Ok(notebooks.into_iter().map(Notebook::from).collect())
}

/// Get a notebook by ID.
pub async fn get_notebook(client: &JoplinClient, notebook_id: &str) -> Result<Notebook> {
    Ok(Notebook::from(client.get_notebook(notebook_id).await?))
}

/// Create a notebook and return the fully-populated record.
pub async fn create_notebook(
    client: &JoplinClient,
    params: CreateNotebookParams,
) -> Result<Notebook> {
    let fields = NotebookFields {
        title: Some(params.title),
        parent_id: params.parent_id.filter(|p| !p.is_empty()),
    };
    Ok(Notebook::from(client.create_notebook(&fields).await?))
}

/// Update a notebook with the provided fields only, then return it.
pub async fn update_notebook(
    client: &JoplinClient,
    params: UpdateNotebookParams,
) -> Result<Notebook> {
    let fields = NotebookFields {
        title: params.title,
        parent_id: params.parent_id,
    };

    if !fields.is_empty() {
        client.update_notebook(&params.notebook_id, &fields).await?;
    }

    get_notebook(client, &params.notebook_id).await
}

/// Get the notebook hierarchy as a tree, rebuilt from the flat list.
pub async fn get_notebook_tree(client: &JoplinClient) -> Result<Vec<NotebookTreeNode>> {
    let notebooks = client.get_notebooks(NOTEBOOK_TREE_FIELDS, 100).await?;
    Ok(build_notebook_tree(&notebooks))
}

/// Rebuild the notebook tree from a flat list.
///
/// A notebook is a root if its parent is empty or refers to an id absent from
/// the fetched set: an orphan whose parent fell outside the page cap is
/// promoted to root rather than dropped. Roots keep backend listing order. A
/// visited set breaks parent cycles instead of recursing unboundedly.
pub fn build_notebook_tree(notebooks: &[RawNotebook]) -> Vec<NotebookTreeNode> {
    let by_id: HashMap<&str, &RawNotebook> =
        notebooks.iter().map(|nb| (nb.id.as_str(), nb)).collect();

    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut roots: Vec<&str> = Vec::new();

    for nb in notebooks {
        match nb.parent_id.as_deref().filter(|p| !p.is_empty()) {
            Some(parent) if by_id.contains_key(parent) => {
                children.entry(parent).or_default().push(nb.id.as_str());
            }
            _ => roots.push(nb.id.as_str()),
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    roots
        .into_iter()
        .filter_map(|root| build_node(root, &by_id, &children, &mut visited))
        .collect()
}

fn build_node<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a RawNotebook>,
    children: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
) -> Option<NotebookTreeNode> {
    if !visited.insert(id) {
        tracing::warn!(notebook_id = id, "cycle in notebook hierarchy, skipping revisit");
        return None;
    }
    let nb = by_id.get(id)?;

    let child_nodes = children
        .get(id)
        .map(|ids| {
            ids.iter()
                .filter_map(|child| build_node(child, by_id, children, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(NotebookTreeNode {
        id: nb.id.clone(),
        title: nb.title.clone(),
        children: child_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, parent: Option<&str>) -> RawNotebook {
        RawNotebook {
            id: id.to_string(),
            title: id.to_uppercase(),
            parent_id: parent.map(str::to_string),
            created_time: None,
            updated_time: None,
        }
    }

    #[test]
    fn test_tree_shape() {
        let flat = vec![
            raw("a", None),
            raw("b", Some("a")),
            raw("c", Some("a")),
            raw("d", Some("b")),
        ];
        let tree = build_notebook_tree(&flat);

        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.id, "a");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].id, "b");
        assert_eq!(root.children[1].id, "c");
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].id, "d");
        assert!(root.children[1].children.is_empty());
    }

    #[test]
    fn test_orphan_promoted_to_root() {
        let flat = vec![raw("a", None), raw("b", Some("missing"))];
        let tree = build_notebook_tree(&flat);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, "a");
        assert_eq!(tree[1].id, "b");
    }

    #[test]
    fn test_empty_string_parent_is_root() {
        let flat = vec![raw("a", Some(""))];
        let tree = build_notebook_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, "a");
    }

    #[test]
    fn test_roots_keep_listing_order() {
        let flat = vec![raw("z", None), raw("a", None), raw("m", None)];
        let tree = build_notebook_tree(&flat);
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_cycle_terminates() {
        // a <-> b reference each other; neither is a root, so the pair is
        // unreachable and dropped. c stays a normal root.
        let flat = vec![raw("a", Some("b")), raw("b", Some("a")), raw("c", None)];
        let tree = build_notebook_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, "c");
    }

    #[test]
    fn test_self_parent_terminates() {
        let flat = vec![raw("a", Some("a"))];
        let tree = build_notebook_tree(&flat);
        // Not a root (its parent exists in the set), so it is dropped rather
        // than recursed into.
        assert!(tree.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(build_notebook_tree(&[]).is_empty());
    }
}
