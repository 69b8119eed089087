//! Examples of using the radix tree
use radix_tree::{StringTree, Tree, WalkAction};

fn main() {
    // Create a new tree with string keys
    let mut tree = StringTree::<i32>::new();

    // Insert some values; re-inserting a key hands back the old value
    tree.insert("romane".to_string(), 1);
    tree.insert("romanus".to_string(), 2);
    tree.insert("romulus".to_string(), 3);
    tree.insert("rubens".to_string(), 4);
    tree.insert("ruber".to_string(), 5);
    assert_eq!(tree.insert("ruber".to_string(), 50), Some(5));

    // Check values
    assert_eq!(tree.get("romane"), Some(&1));
    assert_eq!(tree.get("ruber"), Some(&50));
    assert_eq!(tree.get("missing"), None);

    // Longest prefix match
    let (key, value) = tree.longest_prefix("romanesque").unwrap();
    println!("longest prefix of \"romanesque\": {} -> {}", key, value);

    // Ordered traversal, optionally limited to a prefix
    println!("everything under \"rom\":");
    tree.walk_prefix("rom", |k, v| {
        println!("  {} -> {}", k, v);
        false
    });

    println!("smallest: {:?}, largest: {:?}", tree.minimum(), tree.maximum());

    // Entries can be removed while walking
    tree.walk_mut(|k, _| {
        if k.ends_with("us") {
            WalkAction::Remove
        } else {
            WalkAction::Continue
        }
    });
    assert_eq!(tree.len(), 3);

    // Remove a whole prefix at once
    assert_eq!(tree.remove_prefix("rub"), 2);
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["romane"]);

    // Keys can be any byte string
    let bytes: Tree<Vec<u8>, &str> = vec![(vec![0x00, 0xff], "a"), (vec![0x00], "b")]
        .into_iter()
        .collect();
    assert_eq!(bytes.minimum(), Some((&vec![0x00], &"b")));
}

#[test]
fn test_prefix_view() {
    let tree: StringTree<i32> = vec![
        ("hello".to_string(), 1),
        ("help".to_string(), 2),
        ("world".to_string(), 3),
    ]
    .into_iter()
    .collect();

    // Create a view of the "hel" prefix
    let view = tree.view_prefix("hel");

    // Check prefix view properties
    assert!(view.exists());
    assert_eq!(view.len(), 2);
    assert!(!view.is_empty());

    // Check key existence in the view
    assert!(view.contains_key("hello"));
    assert!(view.contains_key("help"));
    assert!(!view.contains_key("world"));

    // Get values from the view
    assert_eq!(view.get("hello"), Some(&1));
    assert_eq!(view.get("help"), Some(&2));
    assert_eq!(view.get("world"), None);
}
