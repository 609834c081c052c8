use term_tv::components::{Button, EditField, Frame, Label};
use term_tv::{Pack, Point, Size, Widget, WidgetId, WidgetTree, Window};

fn form() -> (WidgetTree, WidgetId, [WidgetId; 3]) {
    let mut tree = WidgetTree::new();
    let win = tree.insert(Window::new("Form", 2, 1, 30, 8).with_pack(Pack::Vertical));
    let label = tree.add(win, Label::new("Name"));
    let edit = tree.add(win, EditField::new("", 10).with_scale(1));
    let ok = tree.add(win, Button::new("OK"));
    (tree, win, [label, edit, ok])
}

fn rect(tree: &WidgetTree, id: WidgetId) -> (Point, Size) {
    let base = tree.get(id).base();
    (base.pos(), base.size())
}

#[test]
fn window_interior_is_shared_by_weight() {
    let (tree, _, [label, edit, ok]) = form();
    assert_eq!(rect(&tree, label), (Point::new(3, 2), Size::new(28, 1)));
    assert_eq!(rect(&tree, edit), (Point::new(3, 3), Size::new(28, 3)));
    assert_eq!(rect(&tree, ok), (Point::new(3, 6), Size::new(28, 2)));
}

#[test]
fn hiding_a_child_relayouts_the_window() {
    let (mut tree, _, [label, edit, ok]) = form();
    tree.set_visible(edit, false);
    assert_eq!(rect(&tree, label).0, Point::new(3, 2));
    assert_eq!(rect(&tree, ok).0, Point::new(3, 3));
    tree.set_visible(edit, true);
    assert_eq!(rect(&tree, ok).0, Point::new(3, 6));
}

#[test]
fn size_never_drops_below_constraints() {
    let (mut tree, win, _) = form();
    tree.get_mut(win).base_mut().set_size(2, 1);
    assert_eq!(tree.get(win).base().size(), Size::new(8, 3));
}

#[test]
fn nested_rows_grow_the_window() {
    let mut tree = WidgetTree::new();
    let win = tree.insert(Window::new("Grow", 0, 0, 10, 3).with_pack(Pack::Vertical));
    let row = tree.add(win, Frame::new().with_gaps(1, 0));
    tree.add(row, Label::new("Password"));
    tree.add(row, EditField::new("", 12));

    // 8 + gap + 12 plus the border padding on both sides
    assert_eq!(tree.get(win).base().size(), Size::new(23, 3));
    assert_eq!(tree.get(row).base().pos(), Point::new(1, 1));
}

#[test]
fn even_and_odd_slack() {
    for (width, expected) in [(100, [50, 50]), (101, [50, 51])] {
        let mut tree = WidgetTree::new();
        let mut root = Frame::new();
        root.base_mut().set_size(width, 1);
        let root = tree.insert(root);
        let a = tree.add(root, Frame::new().with_constraints(10, 1).with_scale(1));
        let b = tree.add(root, Frame::new().with_constraints(10, 1).with_scale(1));
        let got = [a, b].map(|id| tree.get(id).base().size().width);
        assert_eq!(got, expected);
    }
}

#[test]
fn destroying_a_child_frees_its_space() {
    let (mut tree, win, [label, edit, ok]) = form();
    tree.destroy(edit);
    assert!(!tree.contains(edit));
    assert_eq!(tree.children(win), &[label, ok]);
    assert_eq!(rect(&tree, ok).0, Point::new(3, 3));
}
