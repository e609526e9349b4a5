use ordtree::{BalancedTree, OrderedTree};

fn main() {
    let mut tree = OrderedTree::new();
    for x in [6109, 3400, 9000, 4560, 3750, 8001, 4981, 5560, 6600] {
        tree.insert(x);
    }
    assert!(!tree.insert(4560));
    println!("unbalanced: {:?} height {}", tree, tree.height());
    println!("cousins of 4981: {:?}", tree.cousins_of(&4981));

    tree.rebalance();
    println!("rebalanced: root {:?} height {}", tree.root(), tree.height());

    tree.remove(&5560);
    assert!(!tree.contains(&5560));

    let mut avl = BalancedTree::new();
    for x in 1..=26 {
        avl.insert(x);
    }
    println!("avl of 26 ascending items has height {}", avl.height());

    avl.traverse(|x| *x *= 2);
    print!("{{ ");
    for x in &avl {
        print!("{x}, ");
    }
    println!("}}");
}
