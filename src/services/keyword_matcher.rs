//! 关键词匹配服务 - 业务能力层
//!
//! 只负责"在文本中找出命中的规范标签"，不关心论文从哪来

use regex::Regex;

use crate::error::ConfigError;
use crate::models::paper::Paper;
use crate::models::taxonomy::Taxonomy;

/// 一个同义词组：规范标签 + 每个同义词的整词匹配正则
#[derive(Debug, Clone)]
struct KeywordGroup {
    canonical: String,
    patterns: Vec<Regex>,
}

/// 关键词匹配器
///
/// 每个同义词按 `\b<词>s?\b` 做不区分大小写的整词匹配（允许简单复数），
/// 一个组命中任意同义词即输出该组的规范标签（组内第一个词）。
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    groups: Vec<KeywordGroup>,
}

impl KeywordMatcher {
    /// 由逗号分隔的同义词组列表构建匹配器
    pub fn new<S: AsRef<str>>(groups: &[S]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(groups.len());

        for group in groups {
            let synonyms: Vec<&str> = group
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();

            let Some(canonical) = synonyms.first() else {
                continue;
            };

            let patterns = synonyms
                .iter()
                .map(|keyword| {
                    let pattern = format!(r"(?i)\b{}s?\b", regex::escape(keyword));
                    Regex::new(&pattern).map_err(|source| ConfigError::InvalidKeyword {
                        keyword: keyword.to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            compiled.push(KeywordGroup {
                canonical: canonical.to_string(),
                patterns,
            });
        }

        Ok(Self { groups: compiled })
    }

    /// 返回文本命中的规范标签，顺序与分类表一致，每组最多一次
    pub fn find_tags(&self, text: &str) -> Vec<String> {
        self.groups
            .iter()
            .filter(|group| group.patterns.iter().any(|re| re.is_match(text)))
            .map(|group| group.canonical.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// 论文标注器：架构 + 应用两套匹配器
#[derive(Debug, Clone, Default)]
pub struct PaperTagger {
    architectures: KeywordMatcher,
    applications: KeywordMatcher,
}

impl PaperTagger {
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, ConfigError> {
        Ok(Self {
            architectures: KeywordMatcher::new(&taxonomy.architectures)?,
            applications: KeywordMatcher::new(&taxonomy.applications)?,
        })
    }

    /// 根据摘要重新计算论文的架构与应用标签
    pub fn tag_paper(&self, paper: &mut Paper) {
        paper.architectures = self.architectures.find_tags(&paper.abstract_text);
        paper.applications = self.applications.find_tags(&paper.abstract_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(groups: &[&str]) -> KeywordMatcher {
        KeywordMatcher::new(groups).unwrap()
    }

    #[test]
    fn plural_form_yields_canonical_tag() {
        let m = matcher(&["transformer,transformers"]);
        assert_eq!(m.find_tags("We use transformers for X"), vec!["transformer"]);
    }

    #[test]
    fn singular_and_plural_both_match() {
        let m = matcher(&["transformer"]);
        assert_eq!(m.find_tags("a transformer model"), vec!["transformer"]);
        assert_eq!(m.find_tags("two Transformers"), vec!["transformer"]);
    }

    #[test]
    fn match_inside_longer_word_is_rejected() {
        let m = matcher(&["transformer,transformers"]);
        assert!(m.find_tags("a transformerish design").is_empty());
        assert!(m.find_tags("pretransformer layers").is_empty());
    }

    #[test]
    fn tags_follow_taxonomy_order_not_text_order() {
        let m = matcher(&["cnn,convolutional neural network", "rnn,recurrent neural network", "gnn"]);
        let tags = m.find_tags("A recurrent neural network beats a CNN.");
        assert_eq!(tags, vec!["cnn", "rnn"]);
    }

    #[test]
    fn group_emits_once_even_when_several_synonyms_hit() {
        let m = matcher(&["llm,large language model,language model"]);
        let tags = m.find_tags("An LLM is a large language model.");
        assert_eq!(tags, vec!["llm"]);
    }

    #[test]
    fn synonyms_are_trimmed_and_empty_ones_ignored() {
        let m = matcher(&[" diffusion model , ,diffusion", ""]);
        assert_eq!(m.len(), 1);
        assert_eq!(m.find_tags("score-based diffusion"), vec!["diffusion model"]);
        assert!(m.find_tags("nothing relevant here").is_empty());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = matcher(&["u-net,unet"]);
        assert_eq!(m.find_tags("a U-Net backbone"), vec!["u-net"]);
        assert!(m.find_tags("a u.net backbone").is_empty());
    }

    #[test]
    fn tagger_fills_both_tag_lists_from_abstract() {
        let taxonomy = Taxonomy {
            architectures: vec!["transformer,transformers".to_string()],
            applications: vec!["robotics,robot".to_string(), "medical imaging".to_string()],
        };
        let tagger = PaperTagger::new(&taxonomy).unwrap();

        let mut paper = crate::models::paper::Paper {
            title: "t".to_string(),
            url: "u".to_string(),
            authors: vec![],
            published: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            abstract_text: "Transformers that control robots.".to_string(),
            categories: Default::default(),
            architectures: vec!["stale".to_string()],
            applications: vec![],
            is_recent: false,
        };
        tagger.tag_paper(&mut paper);

        assert_eq!(paper.architectures, vec!["transformer"]);
        assert_eq!(paper.applications, vec!["robotics"]);
    }
}
