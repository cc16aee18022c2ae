//! 演示模式 - 无需网络、可复现的子主题合成
//!
//! 对主题的 UTF-8 字节做 MD5，摘要按大端读成 u128 作为偏移量，
//! 再以 `(offset + index) mod N` 依次取出锚点词。哈希算法、摘要转整数的方式
//! 以及锚点词表（含顺序）都是对外契约，修改会改变所有演示输出。

use md5::{Digest, Md5};

/// 锚点词表，顺序不可调整
pub const ANCHORS: [&str; 9] = [
    "Foundations",
    "Applications",
    "Trends",
    "Challenges",
    "Tools",
    "Case Studies",
    "Innovations",
    "Ethics",
    "Careers",
];

/// 每个主题固定生成的子主题数量
pub const DEMO_FANOUT: usize = 3;

pub struct DemoGenerator;

impl DemoGenerator {
    /// 为主题生成固定的3个子主题
    pub fn subtopics(topic: &str) -> Vec<String> {
        let offset = Self::offset(topic);
        let len = ANCHORS.len() as u128;

        (0..DEMO_FANOUT as u128)
            .map(|index| {
                let anchor = ANCHORS[((offset % len + index) % len) as usize];
                format!("{} {}", topic, anchor)
            })
            .collect()
    }

    fn offset(topic: &str) -> u128 {
        let mut hasher = Md5::new();
        hasher.update(topic.as_bytes());
        let mut digest = [0u8; 16];
        digest.copy_from_slice(&hasher.finalize());
        u128::from_be_bytes(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_deterministic() {
        let first = DemoGenerator::subtopics("Topic");
        let second = DemoGenerator::subtopics("Topic");

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|s| s.starts_with("Topic ")));
    }

    #[test]
    fn test_demo_reference_values() {
        assert_eq!(
            DemoGenerator::subtopics("Topic"),
            vec!["Topic Applications", "Topic Trends", "Topic Challenges"]
        );
        assert_eq!(
            DemoGenerator::subtopics("Machine Learning"),
            vec![
                "Machine Learning Challenges",
                "Machine Learning Tools",
                "Machine Learning Case Studies"
            ]
        );
    }

    #[test]
    fn test_demo_wraps_around_anchor_list() {
        assert_eq!(
            DemoGenerator::subtopics("History"),
            vec!["History Ethics", "History Careers", "History Foundations"]
        );
    }
}
