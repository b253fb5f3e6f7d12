#![cfg(feature = "serde")]

//! Integration tests for serde support in linked-bst.
//!
//! A tree is written as the pre-order sequence of its values, so a round
//! trip through any serde format must rebuild exactly the same shape.

use linked_bst::BinarySearchTree;
use rstest::rstest;

#[rstest]
fn test_tree_json_roundtrip() {
    let tree: BinarySearchTree<i32> = [20, 10, 30, 15, 14, 5, 16].into_iter().collect();
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, "[20,10,5,15,14,16,30]");

    let restored: BinarySearchTree<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.to_string(), "20( 10( 5 , 15( 14 , 16 ) ) , 30 )");
    assert_eq!(tree, restored);
    assert!(restored.is_valid());
}

#[rstest]
fn test_tree_roundtrip_after_removal() {
    let mut tree: BinarySearchTree<i32> = [37, 20, 80, 10, 30, 59, 100, 5, 60, 90, 180]
        .into_iter()
        .collect();
    tree.remove(&37).unwrap();
    tree.remove(&100).unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    let restored: BinarySearchTree<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.to_string(), tree.to_string());
}

#[rstest]
fn test_tree_of_strings_roundtrip() {
    let tree: BinarySearchTree<String> = ["m", "c", "x", "a", "m"]
        .into_iter()
        .map(String::from)
        .collect();
    let json = serde_json::to_string(&tree).unwrap();
    let restored: BinarySearchTree<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.to_vec(), vec!["a", "c", "m", "m", "x"]);
    assert_eq!(tree, restored);
}

#[rstest]
fn test_empty_tree_roundtrip() {
    let tree: BinarySearchTree<i32> = BinarySearchTree::new();
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, "[]");
    let restored: BinarySearchTree<i32> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<BinarySearchTree<i32>, _> = serde_json::from_str(r#"{"a":1}"#);
    assert!(result.is_err());
}
