use std::ops::Index;

/// Handle to a block inside a [`BlockTree`]
///
/// Handles are only meaningful for the tree that produced them.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct BlockId(usize);

impl BlockId {
    /// Handle of the root block of every tree
    pub const ROOT: BlockId = BlockId(0);
}

/// Structured control construct, along with the source text that parameterizes it
///
/// The expressions are opaque text produced by the decompiler: they are spliced into the output
/// as-is.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum BlockKind {
    /// `if (condition) ...`
    If { condition: String },

    /// `for (init;test;update) ...`
    For {
        init: String,
        test: String,
        update: String,
    },

    /// `do { ... } while (left operator right);`
    DoWhile {
        left: String,
        operator: String,
        right: String,
    },

    /// `switch (expression) { ... }`
    Switch { expression: String },

    /// One or more `case` labels sharing a body
    ///
    /// `labels` is a comma-separated list which may include the literal `default`. Whitespace
    /// around each label is trimmed, so `"1, 2"` gives `case 1: ` and `case 2: `.
    Case { labels: String },
}

impl BlockKind {
    pub fn if_block(condition: impl Into<String>) -> BlockKind {
        BlockKind::If {
            condition: condition.into(),
        }
    }

    pub fn for_loop(
        init: impl Into<String>,
        test: impl Into<String>,
        update: impl Into<String>,
    ) -> BlockKind {
        BlockKind::For {
            init: init.into(),
            test: test.into(),
            update: update.into(),
        }
    }

    pub fn do_while(
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> BlockKind {
        BlockKind::DoWhile {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
        }
    }

    pub fn switch(expression: impl Into<String>) -> BlockKind {
        BlockKind::Switch {
            expression: expression.into(),
        }
    }

    pub fn case(labels: impl Into<String>) -> BlockKind {
        BlockKind::Case {
            labels: labels.into(),
        }
    }
}

/// What part of a construct a statement line stands for
///
/// This is informational: rendering treats every role the same way.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub enum Role {
    Entry,
    Exit,
    Body,
}

/// Leaf of the block tree: one line of already decompiled source
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatementLine {
    pub text: String,

    /// Block the line was added to
    pub owner: BlockId,

    pub role: Role,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Child {
    Block(BlockId),
    Statement(StatementLine),
}

/// Node of the block tree
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockNode {
    kind: BlockKind,

    /// Nested blocks and statements, in output order
    children: Vec<Child>,
}

impl BlockNode {
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Does the body consist of exactly one child (of any sort)?
    ///
    /// Simple `if` and `for` blocks are rendered without braces.
    pub fn is_simple_block(&self) -> bool {
        self.children.len() == 1
    }

    /// Text that opens the block, for a block rendered at `indent`
    pub fn entry_code(&self, indent: &str) -> String {
        match &self.kind {
            BlockKind::If { condition } if self.is_simple_block() => {
                format!("if ({}) \n", condition)
            }
            BlockKind::If { condition } => format!("if ({}) {{\n", condition),
            BlockKind::For { init, test, update } if self.is_simple_block() => {
                format!("for ({};{};{}) \n", init, test, update)
            }
            BlockKind::For { init, test, update } => {
                format!("for ({};{};{}) {{\n", init, test, update)
            }
            BlockKind::DoWhile { .. } => String::from("do {\n"),
            BlockKind::Switch { expression } => format!("switch ({}) {{\n", expression),
            BlockKind::Case { labels } => {
                let mut entry = String::new();
                for label in labels.split(',').map(str::trim) {
                    entry.push('\n');
                    entry.push_str(indent);
                    if label == "default" {
                        entry.push_str("default: ");
                    } else {
                        entry.push_str("case ");
                        entry.push_str(label);
                        entry.push_str(": ");
                    }
                }
                entry.push('\n');
                entry
            }
        }
    }

    /// Text that closes the block, for a block rendered at `indent`
    pub fn exit_code(&self, indent: &str) -> String {
        match &self.kind {
            BlockKind::If { .. } | BlockKind::For { .. } if self.is_simple_block() => {
                String::from("\n")
            }
            BlockKind::If { .. } | BlockKind::For { .. } => String::from("}\n"),
            BlockKind::DoWhile {
                left,
                operator,
                right,
            } => format!("}} while ({} {} {});\n", left, operator, right),
            BlockKind::Switch { .. } => format!("\n{}}}\n", indent),
            BlockKind::Case { .. } => String::new(),
        }
    }
}

/// Tree of structured blocks under construction
///
/// The tree owns every node; callers refer to blocks through [`BlockId`] handles. New blocks are
/// always created already attached to an existing parent, so a block has exactly one parent and
/// the tree can't become cyclic.
///
/// # Panics
///
/// The mutation methods and indexing panic when handed a [`BlockId`] that does not belong to
/// this tree. Use [`BlockTree::get`] to check a handle first.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockTree {
    nodes: Vec<BlockNode>,
}

impl BlockTree {
    /// Make a tree containing only a root block
    pub fn new(root: BlockKind) -> BlockTree {
        BlockTree {
            nodes: vec![BlockNode {
                kind: root,
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> BlockId {
        BlockId::ROOT
    }

    /// Get a block, if the handle belongs to this tree
    pub fn get(&self, id: BlockId) -> Option<&BlockNode> {
        self.nodes.get(id.0)
    }

    /// Create a new block as the last child of `parent`
    pub fn add_block(&mut self, parent: BlockId, kind: BlockKind) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes[parent.0].children.push(Child::Block(id));
        self.nodes.push(BlockNode {
            kind,
            children: vec![],
        });
        id
    }

    /// Append a statement line to `parent`
    pub fn add_statement(&mut self, parent: BlockId, text: impl Into<String>, role: Role) {
        let line = StatementLine {
            text: text.into(),
            owner: parent,
            role,
        };
        self.nodes[parent.0].children.push(Child::Statement(line));
    }

    /// Drop the last child of `parent`, whatever it is
    ///
    /// Does nothing if `parent` has no children. A removed block stays allocated in the tree but
    /// is no longer reachable from the root.
    pub fn remove_last_block(&mut self, parent: BlockId) {
        let _ = self.remove_last_statement(parent);
    }

    /// Pop and return the last child of `parent`
    ///
    /// The last child is usually the statement line just added, but a nested block is popped
    /// all the same. Returns `None` if `parent` has no children.
    pub fn remove_last_statement(&mut self, parent: BlockId) -> Option<Child> {
        self.nodes[parent.0].children.pop()
    }
}

impl Index<BlockId> for BlockTree {
    type Output = BlockNode;

    fn index(&self, id: BlockId) -> &BlockNode {
        &self.nodes[id.0]
    }
}
