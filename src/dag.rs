//! Transition-DAG construction over kana character positions.
//!
//! `Dag.nodes[i]` holds the romaji edges leaving position `i`: typing an
//! edge's spelling while at position `i` advances the cursor to
//! `edge.target`. Position `char_count` is the synthetic terminal node.

use std::cmp::Reverse;

use tracing::{debug, debug_span};

use crate::table::RomajiTable;
use crate::unicode::normalize_kana;

/// Consonants the sokuon っ doubles when it precedes them.
const GEMINATE_CONSONANTS: &str = "qvlxkgszjtdhfbpmyrwc";

/// Kana after ん for which the bare "n" spelling is ambiguous with the next
/// unit's own romaji: vowels, small vowels, and glides. The longer spellings
/// from the table (nn/xn/n') stay available either way.
const NASAL_BLOCKERS: &str = "あいうえおぁぃぅぇぉゃゅょ";

/// One accepted romaji transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Char position this edge advances to (always greater than its node's).
    pub target: usize,
    /// Romaji spelling consumed by the transition.
    pub spelling: String,
}

/// All accepted romaji transitions of one kana string.
///
/// `nodes` has `char_count + 1` entries and the terminal entry is always
/// empty. Each node's edge list is priority-ordered: farthest target first,
/// then shortest spelling; residual ties keep table declaration order.
#[derive(Debug, Clone)]
pub struct Dag {
    pub nodes: Vec<Vec<Edge>>,
    pub char_count: usize,
}

impl Dag {
    /// Build the transition DAG for `kana` using `table`.
    ///
    /// The target is normalized first (katakana→hiragana, full-width→ASCII,
    /// lowercase), so raw and pre-normalized callers build identical graphs.
    /// Total for every input: unregistered characters degrade to a verbatim
    /// single-char edge, never an error.
    pub fn build(table: &RomajiTable, kana: &str) -> Dag {
        let kana = normalize_kana(kana);
        let chars: Vec<char> = kana.chars().collect();
        let char_count = chars.len();
        let _span = debug_span!("build_dag", char_count).entered();

        // Byte offset per char position, so unit probes slice the normalized
        // &str instead of allocating a String per position.
        let byte_offsets: Vec<usize> = kana.char_indices().map(|(i, _)| i).collect();
        let byte_at = |pos: usize| byte_offsets.get(pos).copied().unwrap_or(kana.len());

        let mut nodes: Vec<Vec<Edge>> = vec![Vec::new(); char_count + 1];

        // Registered units. The 1-char and the 2-char unit starting at the
        // same position coexist; both edge sets are added.
        for start in 0..char_count {
            for unit_len in 1..=2usize {
                let end = start + unit_len;
                if end > char_count {
                    break;
                }
                let unit = &kana[byte_at(start)..byte_at(end)];
                if let Some(spellings) = table.spellings(unit) {
                    for spelling in spellings {
                        nodes[start].push(Edge {
                            target: end,
                            spelling: spelling.clone(),
                        });
                    }
                }
            }
        }

        // Sokuon: right-to-left, so a っ sees the finished edge list of the
        // next position and a っっ run chains its doubling.
        for i in (0..char_count.saturating_sub(1)).rev() {
            if chars[i] != 'っ' {
                continue;
            }
            let doubled: Vec<Edge> = nodes[i + 1]
                .iter()
                .filter_map(|e| {
                    let head = e.spelling.chars().next()?;
                    GEMINATE_CONSONANTS.contains(head).then(|| Edge {
                        target: e.target,
                        spelling: format!("{head}{}", e.spelling),
                    })
                })
                .collect();
            nodes[i].extend(doubled);
        }

        // Hatsuon: the bare "n" shorthand, unless the next char would make it
        // ambiguous. Depends only on the literal next char, not built edges.
        for i in 0..char_count {
            if chars[i] != 'ん' {
                continue;
            }
            let blocked = chars
                .get(i + 1)
                .is_some_and(|&next| NASAL_BLOCKERS.contains(next));
            if !blocked {
                nodes[i].push(Edge {
                    target: i + 1,
                    spelling: "n".to_string(),
                });
            }
        }

        // Verbatim fallback keeps every non-terminal node connected.
        for i in 0..char_count {
            if nodes[i].is_empty() {
                nodes[i].push(Edge {
                    target: i + 1,
                    spelling: chars[i].to_string(),
                });
            }
        }

        // Priority order: commit to the longest kana advance the typed prefix
        // can reach, and among equal advances prefer the fewest remaining
        // keystrokes. The stable sort keeps table order for full ties.
        for edges in &mut nodes {
            edges.sort_by_key(|e| (Reverse(e.target), e.spelling.chars().count()));
        }

        debug!(
            node_count = nodes.len(),
            edge_count = nodes.iter().map(Vec::len).sum::<usize>()
        );
        Dag { nodes, char_count }
    }

    /// Top-priority completion from `start` to the terminal node: first-edge
    /// spellings, concatenated.
    pub fn completion_from(&self, start: usize) -> String {
        let mut out = String::new();
        let mut idx = start;
        while idx < self.char_count {
            let Some(edge) = self.nodes[idx].first() else {
                debug_assert!(false, "non-terminal node {idx} has no edges");
                break;
            };
            debug_assert!(edge.target > idx, "edge at node {idx} does not advance");
            out.push_str(&edge.spelling);
            idx = edge.target;
        }
        out
    }

    /// The top-priority romaji spelling of the whole string.
    pub fn preferred_romaji(&self) -> String {
        self.completion_from(0)
    }
}
