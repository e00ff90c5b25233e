//! Workspace file tree model.

use crate::kernel::services::ports::{FileProvider, FileResult};
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: OsString,
    parent: Option<NodeId>,
    children: Option<BTreeMap<OsString, NodeId>>,
}

#[derive(Debug, Clone)]
pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    expanded: FxHashSet<NodeId>,
    absolute_root: PathBuf,
}

impl FileTree {
    pub fn new(root_name: OsString, absolute_root: PathBuf) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node {
            kind: NodeKind::Dir,
            name: root_name,
            parent: None,
            children: Some(BTreeMap::new()),
        });

        let mut expanded = FxHashSet::default();
        expanded.insert(root);

        Self {
            arena,
            root,
            expanded,
            absolute_root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn absolute_root(&self) -> &Path {
        &self.absolute_root
    }

    pub fn root_name(&self) -> String {
        self.arena
            .get(self.root)
            .map(|n| n.name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.arena.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `None` when `parent` is not a directory or already holds `name`.
    pub fn insert_child(&mut self, parent: NodeId, name: OsString, kind: NodeKind) -> Option<NodeId> {
        let children = self.arena.get(parent)?.children.as_ref()?;
        if children.contains_key(&name) {
            return None;
        }

        let id = self.arena.insert(Node {
            kind,
            name: name.clone(),
            parent: Some(parent),
            children: (kind == NodeKind::Dir).then(BTreeMap::new),
        });

        if let Some(children) = self.arena.get_mut(parent).and_then(|p| p.children.as_mut()) {
            children.insert(name, id);
        }

        Some(id)
    }

    pub fn full_path(&self, id: NodeId) -> PathBuf {
        let mut components = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                break;
            }
            let Some(node) = self.arena.get(node_id) else {
                break;
            };
            components.push(node.name.clone());
            current = node.parent;
        }

        let mut path = self.absolute_root.clone();
        for name in components.into_iter().rev() {
            path.push(name);
        }
        path
    }

    pub fn name(&self, id: NodeId) -> Option<&OsString> {
        self.arena.get(id).map(|n| &n.name)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .is_some_and(|n| n.kind == NodeKind::Dir)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle_expand(&mut self, id: NodeId) -> bool {
        if !self.is_dir(id) || id == self.root {
            return false;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        true
    }

    pub fn collapse(&mut self, id: NodeId) -> bool {
        id != self.root && self.expanded.remove(&id)
    }

    /// Visible rows in display order: directories first, then files, each group
    /// ordered case-insensitively.
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };

            if id != self.root {
                result.push(FileTreeRow {
                    id,
                    depth,
                    name: node.name.to_string_lossy().to_string(),
                    is_dir: node.kind == NodeKind::Dir,
                    is_expanded: self.expanded.contains(&id),
                });
            }

            if !self.expanded.contains(&id) {
                continue;
            }
            let Some(children) = &node.children else {
                continue;
            };

            let mut ordered: Vec<(bool, String, NodeId)> = children
                .iter()
                .filter_map(|(name, &child_id)| {
                    let child = self.arena.get(child_id)?;
                    Some((
                        child.kind != NodeKind::Dir,
                        name.to_string_lossy().to_lowercase(),
                        child_id,
                    ))
                })
                .collect();
            ordered.sort();

            let child_depth = if id == self.root { 0 } else { depth + 1 };
            for (_, _, child_id) in ordered.into_iter().rev() {
                stack.push((child_id, child_depth));
            }
        }

        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: String,
    pub is_dir: bool,
    pub is_expanded: bool,
}

pub fn should_ignore(name: &str) -> bool {
    name.starts_with('.')
        || matches!(
            name,
            "Thumbs.db" | "desktop.ini" | "node_modules" | "target"
        )
}

/// Builds the complete tree below `root_path`. Hidden entries are skipped and
/// symlinked directories are listed but not descended into.
pub fn build_file_tree(provider: &dyn FileProvider, root_path: &Path) -> FileResult<FileTree> {
    let absolute_root = provider
        .canonicalize(root_path)
        .unwrap_or_else(|_| root_path.to_path_buf());

    let root_name = absolute_root
        .file_name()
        .or_else(|| root_path.iter().next_back())
        .unwrap_or(root_path.as_os_str())
        .to_os_string();

    let mut tree = FileTree::new(root_name, absolute_root.clone());
    let root = tree.root();
    populate(provider, &mut tree, root, &absolute_root, true)?;
    Ok(tree)
}

fn populate(
    provider: &dyn FileProvider,
    tree: &mut FileTree,
    parent: NodeId,
    dir: &Path,
    is_root: bool,
) -> FileResult<()> {
    let entries = match provider.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if !is_root => {
            tracing::debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    for entry in entries {
        if should_ignore(&entry.name) {
            continue;
        }
        let kind = if entry.is_dir {
            NodeKind::Dir
        } else {
            NodeKind::File
        };
        let Some(id) = tree.insert_child(parent, OsString::from(&entry.name), kind) else {
            continue;
        };
        if entry.is_dir && !entry.is_symlink {
            populate(provider, tree, id, &entry.path, false)?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
