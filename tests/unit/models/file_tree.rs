use super::*;
use crate::kernel::services::adapters::LocalFileProvider;
use std::fs;
use tempfile::tempdir;

fn names(tree: &FileTree) -> Vec<(u16, String)> {
    tree.flatten_for_view()
        .into_iter()
        .map(|row| (row.depth, row.name))
        .collect()
}

#[test]
fn test_file_tree_new_is_empty() {
    let tree = FileTree::new(OsString::from("root"), PathBuf::from("/tmp/root"));
    assert!(tree.is_empty());
    assert_eq!(tree.root_name(), "root");
    assert!(tree.flatten_for_view().is_empty());
}

#[test]
fn test_insert_child_rejects_duplicates_and_files_as_parents() {
    let mut tree = FileTree::new(OsString::from("root"), PathBuf::from("/r"));
    let root = tree.root();

    let file = tree
        .insert_child(root, OsString::from("a.txt"), NodeKind::File)
        .unwrap();
    assert!(tree
        .insert_child(root, OsString::from("a.txt"), NodeKind::File)
        .is_none());
    assert!(tree
        .insert_child(file, OsString::from("x"), NodeKind::File)
        .is_none());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_full_path_joins_components() {
    let mut tree = FileTree::new(OsString::from("root"), PathBuf::from("/r"));
    let root = tree.root();
    let src = tree
        .insert_child(root, OsString::from("src"), NodeKind::Dir)
        .unwrap();
    let main = tree
        .insert_child(src, OsString::from("main.rs"), NodeKind::File)
        .unwrap();

    assert_eq!(tree.full_path(main), PathBuf::from("/r/src/main.rs"));
    assert_eq!(tree.full_path(root), PathBuf::from("/r"));
}

#[test]
fn test_flatten_orders_dirs_first_case_insensitive() {
    let mut tree = FileTree::new(OsString::from("root"), PathBuf::from("/r"));
    let root = tree.root();
    tree.insert_child(root, OsString::from("b.txt"), NodeKind::File);
    tree.insert_child(root, OsString::from("A.txt"), NodeKind::File);
    tree.insert_child(root, OsString::from("zdir"), NodeKind::Dir);
    tree.insert_child(root, OsString::from("Adir"), NodeKind::Dir);

    assert_eq!(
        names(&tree),
        vec![
            (0, "Adir".to_string()),
            (0, "zdir".to_string()),
            (0, "A.txt".to_string()),
            (0, "b.txt".to_string()),
        ]
    );
}

#[test]
fn test_toggle_expand_shows_children() {
    let mut tree = FileTree::new(OsString::from("root"), PathBuf::from("/r"));
    let root = tree.root();
    let dir = tree
        .insert_child(root, OsString::from("src"), NodeKind::Dir)
        .unwrap();
    let file = tree
        .insert_child(dir, OsString::from("lib.rs"), NodeKind::File)
        .unwrap();

    assert_eq!(names(&tree), vec![(0, "src".to_string())]);

    assert!(tree.toggle_expand(dir));
    assert!(tree.is_expanded(dir));
    assert_eq!(
        names(&tree),
        vec![(0, "src".to_string()), (1, "lib.rs".to_string())]
    );

    assert!(!tree.toggle_expand(file));
    assert!(!tree.toggle_expand(root));
    assert!(tree.collapse(dir));
    assert!(!tree.collapse(dir));
    assert_eq!(names(&tree).len(), 1);
}

#[test]
fn test_should_ignore() {
    assert!(should_ignore(".git"));
    assert!(should_ignore("node_modules"));
    assert!(should_ignore("target"));
    assert!(!should_ignore("src"));
    assert!(!should_ignore("Cargo.toml"));
}

#[test]
fn test_build_file_tree_from_disk() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join("src/main.rs"), "").unwrap();
    fs::write(dir.path().join("src/nested/deep.rs"), "").unwrap();
    fs::write(dir.path().join("README.md"), "").unwrap();
    fs::write(dir.path().join(".hidden"), "").unwrap();

    let mut tree = build_file_tree(&LocalFileProvider::new(), dir.path()).unwrap();

    assert_eq!(tree.len(), 5);
    assert_eq!(
        names(&tree),
        vec![(0, "src".to_string()), (0, "README.md".to_string())]
    );

    let src = tree.flatten_for_view()[0].id;
    tree.toggle_expand(src);
    assert_eq!(
        names(&tree),
        vec![
            (0, "src".to_string()),
            (1, "nested".to_string()),
            (1, "main.rs".to_string()),
            (0, "README.md".to_string()),
        ]
    );
    assert_eq!(
        tree.full_path(src),
        fs::canonicalize(dir.path()).unwrap().join("src")
    );
}

#[test]
fn test_build_file_tree_missing_root_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(build_file_tree(&LocalFileProvider::new(), &missing).is_err());
}
