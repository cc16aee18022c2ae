use serde::{Deserialize, Serialize};

use crate::generator::types::TopicNode;

/// 主题树统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    pub total_nodes: usize,
    pub leaf_nodes: usize,
    pub max_depth: usize,
}

/// 深度优先遍历所有树，统计节点数、叶子数与最大深度（根为第1层）
pub fn summarize(trees: &[TopicNode]) -> TreeSummary {
    let mut summary = TreeSummary::default();
    for tree in trees {
        visit(tree, 1, &mut summary);
    }
    summary
}

fn visit(node: &TopicNode, depth: usize, summary: &mut TreeSummary) {
    summary.total_nodes += 1;
    summary.max_depth = summary.max_depth.max(depth);
    if node.is_leaf() {
        summary.leaf_nodes += 1;
    }
    for child in &node.children {
        visit(child, depth + 1, summary);
    }
}
