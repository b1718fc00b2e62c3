use class2src::structure::*;
use class2src::Settings;

#[test]
fn switch_with_cases() {
    let mut tree = BlockTree::new(BlockKind::switch("x"));
    let root = tree.root();
    let first = tree.add_block(root, BlockKind::case("1,2"));
    tree.add_statement(first, "a();", Role::Body);
    tree.add_statement(first, "break;", Role::Exit);
    let other = tree.add_block(root, BlockKind::case("default"));
    tree.add_statement(other, "b();", Role::Body);

    let renderer = CodeRenderer::new("  ");
    assert_eq!(
        renderer.render(&tree, root, ""),
        concat!(
            "switch (x) {\n",
            "  \n  case 1: \n  case 2: \n",
            "    a();\n",
            "    break;\n",
            "  ",
            "  \n  default: \n",
            "    b();\n",
            "  ",
            "\n}\n",
        )
    );
}

#[test]
fn nested_loops_and_conditionals() {
    let mut tree = BlockTree::new(BlockKind::for_loop("int i = 0", "i < n", "i++"));
    let root = tree.root();
    tree.add_statement(root, "int j = i * 2;", Role::Entry);
    let check = tree.add_block(root, BlockKind::if_block("j > 10"));
    tree.add_statement(check, "return j;", Role::Body);
    let spin = tree.add_block(root, BlockKind::do_while("j", "<", "100"));
    tree.add_statement(spin, "j += 3;", Role::Body);
    tree.add_statement(spin, "count++;", Role::Body);

    let renderer = CodeRenderer::new("  ");
    assert_eq!(
        renderer.render(&tree, root, ""),
        concat!(
            "for (int i = 0;i < n;i++) {\n",
            "  int j = i * 2;\n",
            "  if (j > 10) \n",
            "    return j;\n",
            "  \n",
            "  do {\n",
            "    j += 3;\n",
            "    count++;\n",
            "  } while (j < 100);\n",
            "}\n",
        )
    );
}

#[test]
fn flatten_matches_render() {
    let mut tree = BlockTree::new(BlockKind::switch("op"));
    let root = tree.root();
    let add = tree.add_block(root, BlockKind::case(" 0 "));
    let guard = tree.add_block(add, BlockKind::if_block("overflow"));
    tree.add_statement(guard, "throw new ArithmeticException();", Role::Body);
    tree.add_statement(add, "break;", Role::Exit);
    let _empty = tree.add_block(root, BlockKind::case("default"));

    let renderer = CodeRenderer::from_settings(&Settings::new());
    for indent in ["", "\t"] {
        let pieces = renderer.flatten(&tree, root, indent);
        assert_eq!(pieces.concat(), renderer.render(&tree, root, indent));
    }

    // One piece per entry decoration, statement and exit decoration
    assert_eq!(renderer.flatten(&tree, root, "").len(), 10);
}

#[test]
fn removing_children_restores_braces() {
    let mut tree = BlockTree::new(BlockKind::if_block("ready"));
    let root = tree.root();
    tree.add_statement(root, "start();", Role::Body);
    let renderer = CodeRenderer::new(" ");
    assert_eq!(renderer.render(&tree, root, ""), "if (ready) \n start();\n\n");

    let _nested = tree.add_block(root, BlockKind::if_block("verbose"));
    assert_eq!(
        renderer.render(&tree, root, ""),
        "if (ready) {\n start();\n if (verbose) {\n }\n}\n"
    );

    tree.remove_last_block(root);
    assert_eq!(renderer.render(&tree, root, ""), "if (ready) \n start();\n\n");

    match tree.remove_last_statement(root) {
        Some(Child::Statement(line)) => {
            assert_eq!(line.text, "start();");
            assert_eq!(line.owner, root);
        }
        other => panic!("expected a statement line, got {:?}", other),
    }
    assert_eq!(renderer.render(&tree, root, ""), "if (ready) {\n}\n");
}

#[test]
fn render_a_subtree() {
    let mut tree = BlockTree::new(BlockKind::if_block("a"));
    let root = tree.root();
    let inner = tree.add_block(root, BlockKind::for_loop("", "", ""));
    tree.add_statement(inner, "tick();", Role::Body);
    tree.add_statement(root, "done();", Role::Body);

    let renderer = CodeRenderer::new("    ");
    assert_eq!(
        renderer.render(&tree, inner, "    "),
        "    for (;;) \n        tick();\n    \n"
    );
    assert!(tree.get(inner).is_some());
    assert_eq!(tree[inner].kind(), &BlockKind::for_loop("", "", ""));
}

#[test]
fn remove_last_statement_after_a_block() {
    let mut tree = BlockTree::new(BlockKind::if_block("a"));
    let root = tree.root();
    tree.add_statement(root, "prepare();", Role::Entry);
    let guard = tree.add_block(root, BlockKind::if_block("b"));
    tree.add_statement(guard, "run();", Role::Body);

    assert_eq!(tree.remove_last_statement(root), Some(Child::Block(guard)));
    assert_eq!(tree[root].children().len(), 1);

    let renderer = CodeRenderer::new("  ");
    assert_eq!(renderer.render(&tree, root, ""), "if (a) \n  prepare();\n\n");
}
