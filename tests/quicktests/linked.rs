use linked_bst::linked::Tree;
use linked_bst::TreeError;

use std::collections::HashSet;

/// Keeps the first copy of each item, in input order.
fn distinct(xs: Vec<i16>) -> Vec<i16> {
    let mut seen = HashSet::new();
    xs.into_iter().filter(|x| seen.insert(*x)).collect()
}

/// The neighbor of `item` found by sorting every item, together with `item` itself when it isn't
/// already there, and looking one place over from its first position.
fn sorted_neighbor(xs: &[i8], item: i8, after: bool) -> Option<i8> {
    let mut items = xs.to_vec();
    if !items.contains(&item) {
        items.push(item);
    }
    items.sort_unstable();
    let pos = items.iter().position(|x| *x == item)?;
    if after {
        items.get(pos + 1).copied()
    } else {
        pos.checked_sub(1).map(|p| items[p])
    }
}

quickcheck::quickcheck! {
    fn inorder_is_sorted(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        let mut expected = xs;
        expected.sort_unstable();
        tree.inorder().copied().eq(expected)
    }
}

quickcheck::quickcheck! {
    fn len_tracks_adds_and_removes(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();

        let successes = removes.iter().filter(|x| tree.remove(x).is_ok()).count();
        tree.len() == xs.len() - successes && tree.inorder().count() == tree.len()
    }
}

quickcheck::quickcheck! {
    fn removed_items_are_gone(xs: Vec<i16>) -> bool {
        let xs = distinct(xs);
        let mut tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| {
            tree.remove(x) == Ok(*x)
                && tree.find(x).is_none()
                && tree.remove(x) == Err(TreeError::NotFound)
        }) && tree.is_empty()
    }
}

quickcheck::quickcheck! {
    fn rebalance_keeps_items_and_shrinks(xs: Vec<i16>) -> bool {
        let xs = distinct(xs);
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before: Vec<_> = tree.inorder().copied().collect();
        let height = tree.height();

        tree.rebalance();

        let after: Vec<_> = tree.inorder().copied().collect();
        let shortest = (usize::BITS - xs.len().leading_zeros()).saturating_sub(1) as usize;
        before == after
            && tree.len() == xs.len()
            && tree.height() <= height
            && tree.height() == shortest
            && tree.is_balanced() == !xs.is_empty()
    }
}

quickcheck::quickcheck! {
    fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        let mut expected: Vec<_> = xs.into_iter().filter(|x| low <= *x && *x <= high).collect();
        expected.sort_unstable();
        tree.range_find(&low, &high).into_iter().copied().eq(expected)
    }
}

quickcheck::quickcheck! {
    fn neighbors_match_sorting(xs: Vec<i8>, removes: Vec<i8>, probes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for x in &removes {
            let _ = tree.remove(x);
        }
        let remaining: Vec<_> = tree.inorder().copied().collect();

        probes.iter().all(|p| {
            tree.successor(p).copied() == sorted_neighbor(&remaining, *p, true)
                && tree.predecessor(p).copied() == sorted_neighbor(&remaining, *p, false)
        })
    }
}

quickcheck::quickcheck! {
    fn every_item_is_found(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for x in &removes {
            let _ = tree.remove(x);
        }

        let remaining: Vec<_> = tree.inorder().copied().collect();
        remaining.iter().all(|x| tree.find(x) == Some(x))
    }
}

#[test]
fn sorted_insertion_is_a_chain() {
    for n in 1..50 {
        let tree: Tree<_> = (1..=n).collect();
        assert_eq!(tree.height(), n as usize - 1);
        if n >= 6 {
            assert!(!tree.is_balanced());
        }
    }
}

#[test]
fn word_list_round_trip() {
    let words = ["delta", "alpha", "echo", "charlie", "bravo", "alpha"];
    let mut tree: Tree<String> = words.iter().map(|w| w.to_string()).collect();

    tree.rebalance();

    assert_eq!(tree.successor(&"alpha".to_string()).map(String::as_str), Some("alpha"));
    assert_eq!(tree.successor(&"bravo".to_string()).map(String::as_str), Some("charlie"));
    assert_eq!(tree.predecessor(&"a".to_string()), None);
    assert_eq!(
        tree.into_iter().collect::<Vec<_>>(),
        vec!["alpha", "alpha", "bravo", "charlie", "delta", "echo"]
    );
}
