//! 递归构建主题树
//!
//! 每个节点先完成自身的获取，再从左到右依次处理子节点；任一节点失败立即
//! 向上返回，不产生部分结果。

use futures::future::{BoxFuture, FutureExt};

use crate::generator::dispatcher::SubtopicFetcher;
use crate::generator::error::SubtopicGenerationError;
use crate::generator::types::{CallMetadata, TopicNode};

pub type BuildOutput = (Vec<TopicNode>, Vec<CallMetadata>);

pub struct TreeBuilder<'a> {
    fetcher: &'a SubtopicFetcher,
    max_level: u8,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(fetcher: &'a SubtopicFetcher, max_level: u8) -> Self {
        Self { fetcher, max_level }
    }

    /// 构建以 `topic` 为根（第1层）的整棵树
    pub async fn build_tree(&self, topic: &str) -> Result<TopicNode, SubtopicGenerationError> {
        let (children, metadata) = self.build(topic, 1, &[]).await?;
        Ok(TopicNode {
            topic: topic.to_string(),
            children,
            metadata,
        })
    }

    /// 返回 `topic` 的子节点，以及 `[本次调用] + 各子节点元数据` 的先序拼接
    ///
    /// `level` 是 `topic` 自身所在层级。超过 `max_level` 的层不会被获取；
    /// 位于 `max_level` 的节点仍会获取一次以记录调用，但返回的子主题不会挂到树上。
    pub fn build<'b>(
        &'b self,
        topic: &'b str,
        level: u8,
        ancestry: &'b [String],
    ) -> BoxFuture<'b, Result<BuildOutput, SubtopicGenerationError>> {
        async move {
            if level > self.max_level {
                return Ok((Vec::new(), Vec::new()));
            }

            let (subtopics, own_call) = self.fetcher.fetch(topic, ancestry).await?;

            let mut child_ancestry = ancestry.to_vec();
            child_ancestry.push(topic.to_string());

            let mut children = Vec::new();
            let mut metadata = vec![own_call];
            if level < self.max_level {
                for subtopic in subtopics {
                    let (grand_children, call_stats) =
                        self.build(&subtopic, level + 1, &child_ancestry).await?;
                    metadata.extend(call_stats.iter().cloned());
                    children.push(TopicNode {
                        topic: subtopic,
                        children: grand_children,
                        metadata: call_stats,
                    });
                }
            }

            Ok((children, metadata))
        }
        .boxed()
    }
}
