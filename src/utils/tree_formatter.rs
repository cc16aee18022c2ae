use crate::generator::summary::TreeSummary;
use crate::generator::types::TopicNode;

/// 主题树格式化器 - 将主题树渲染为终端可读的树形字符串
pub struct TreeFormatter;

impl TreeFormatter {
    /// 渲染一棵主题树，根节点单独占一行
    pub fn format_tree(tree: &TopicNode) -> String {
        let mut result = format!("{}\n", tree.topic);
        let count = tree.children.len();
        for (i, child) in tree.children.iter().enumerate() {
            Self::render_node(child, "", i == count - 1, &mut result);
        }
        result
    }

    /// 渲染统计信息
    pub fn format_summary(summary: &TreeSummary) -> String {
        format!(
            "节点总数: {}  叶子节点: {}  最大深度: {}",
            summary.total_nodes, summary.leaf_nodes, summary.max_depth
        )
    }

    /// 递归渲染节点
    fn render_node(node: &TopicNode, prefix: &str, is_last: bool, result: &mut String) {
        let connector = if is_last { "└── " } else { "├── " };
        result.push_str(&format!("{}{}{}\n", prefix, connector, node.topic));

        let new_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };

        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            Self::render_node(child, &new_prefix, i == count - 1, result);
        }
    }
}
