//! Cluster formation.
//!
//! A word followed directly by punctuation is one cluster, so "Hello," never
//! loses its comma to the next line. Everything else stands alone. Break
//! opportunities exist only between clusters.

use crate::model::{Syllable, SyllableKind};
use std::ops::Range;

/// One or more syllables that must stay on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub start: usize,
    pub end: usize,
    /// End of the word portion. Equal to `start` when there is no word.
    pub word_end: usize,
    pub kind: ClusterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterKind {
    /// A word plus any punctuation bound to it.
    Word,
    Glue,
    /// Punctuation with no word directly before it.
    Punctuation,
}

impl Cluster {
    pub fn is_glue(&self) -> bool {
        self.kind == ClusterKind::Glue
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The hyphenatable part of the cluster.
    pub fn word_range(&self) -> Range<usize> {
        self.start..self.word_end
    }
}

/// Group syllables into clusters, covering the same text in order.
pub fn build_clusters(syllables: &[Syllable]) -> Vec<Cluster> {
    let mut clusters = Vec::with_capacity(syllables.len());
    let mut iter = syllables.iter().peekable();

    while let Some(syl) = iter.next() {
        let cluster = match syl.kind {
            SyllableKind::Word => {
                let mut end = syl.end;
                while let Some(punct) =
                    iter.next_if(|next| next.kind == SyllableKind::Punctuation)
                {
                    end = punct.end;
                }
                Cluster {
                    start: syl.start,
                    end,
                    word_end: syl.end,
                    kind: ClusterKind::Word,
                }
            }
            SyllableKind::Glue => Cluster {
                start: syl.start,
                end: syl.end,
                word_end: syl.start,
                kind: ClusterKind::Glue,
            },
            SyllableKind::Punctuation => Cluster {
                start: syl.start,
                end: syl.end,
                word_end: syl.start,
                kind: ClusterKind::Punctuation,
            },
        };
        clusters.push(cluster);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use SyllableKind::*;

    fn syllables(spec: &[(usize, SyllableKind)]) -> Vec<Syllable> {
        let mut start = 0;
        spec.iter()
            .map(|&(len, kind)| {
                let s = Syllable::new(start, start + len, kind);
                start += len;
                s
            })
            .collect()
    }

    #[test]
    fn test_word_absorbs_trailing_punctuation() {
        // "Prefix Hello, World"
        let syls = syllables(&[
            (6, Word),
            (1, Glue),
            (5, Word),
            (1, Punctuation),
            (1, Glue),
            (5, Word),
        ]);
        let clusters = build_clusters(&syls);
        let ranges: Vec<_> = clusters.iter().map(|c| c.range()).collect();
        assert_eq!(ranges, vec![0..6, 6..7, 7..13, 13..14, 14..19]);
        assert_eq!(clusters[2].kind, ClusterKind::Word);
        assert_eq!(clusters[2].word_range(), 7..12);
    }

    #[test]
    fn test_multiple_punctuation_absorbed() {
        // "Wait?!" then "..."
        let syls = syllables(&[(4, Word), (1, Punctuation), (1, Punctuation)]);
        let clusters = build_clusters(&syls);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].range(), 0..6);
    }

    #[test]
    fn test_glue_stops_absorption() {
        let syls = syllables(&[(3, Word), (1, Glue), (1, Punctuation)]);
        let clusters = build_clusters(&syls);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[2].kind, ClusterKind::Punctuation);
        assert_eq!(clusters[2].word_range(), 4..4);
    }

    #[test]
    fn test_leading_punctuation_stands_alone() {
        let syls = syllables(&[(1, Punctuation), (5, Word)]);
        let clusters = build_clusters(&syls);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].kind, ClusterKind::Punctuation);
        assert_eq!(clusters[1].kind, ClusterKind::Word);
    }

    #[test]
    fn test_consecutive_words_are_separate() {
        let syls = syllables(&[(3, Word), (4, Word)]);
        assert_eq!(build_clusters(&syls).len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(build_clusters(&[]).is_empty());
    }
}
