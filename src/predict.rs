//! Greedy classification of a typed romaji buffer against a kana target.
//!
//! One call per keystroke: the input is split into the part that advanced the
//! target (`hit_romaji`, covering the `hit_kana` prefix), the romaji still
//! required to finish the string (`rem_romaji`), and a trailing remainder
//! that matches no continuation (`del_romaji`).

use tracing::{debug, debug_span};

use crate::dag::{Dag, Edge};
use crate::table::RomajiTable;

/// Disjoint classification of one romaji input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prediction {
    /// Kana prefix whose romaji has been fully typed.
    pub hit_kana: String,
    /// Input prefix consumed toward the target, committed plus partial.
    pub hit_romaji: String,
    /// Romaji still to be typed to complete the kana string from here.
    pub rem_romaji: String,
    /// Trailing input that extends no valid path and should be dropped.
    pub del_romaji: String,
}

/// Traversal state threaded through the phases.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Kana char position reached in the DAG.
    tar_idx: usize,
    /// Bytes of the lowercased input consumed so far. Always a char
    /// boundary: it only advances by whole matched characters.
    rom_idx: usize,
}

/// Committed phase: repeatedly take the first edge (in priority order) whose
/// spelling is fully present in the unconsumed input. No backtracking.
fn consume_committed(dag: &Dag, romaji: &str, mut cur: Cursor, hit: &mut String) -> Cursor {
    while cur.tar_idx < dag.char_count && cur.rom_idx < romaji.len() {
        let rest = &romaji[cur.rom_idx..];
        let matched = dag.nodes[cur.tar_idx]
            .iter()
            .find(|e| rest.starts_with(e.spelling.as_str()));
        let Some(edge) = matched else {
            break;
        };
        hit.push_str(&edge.spelling);
        cur = Cursor {
            tar_idx: edge.target,
            rom_idx: cur.rom_idx + edge.spelling.len(),
        };
    }
    cur
}

/// Byte length of the common prefix of `a` and `b`, whole chars only.
/// Fallback edges can carry non-ASCII spellings, so a byte-wise prefix could
/// end inside a UTF-8 sequence.
fn common_prefix_bytes(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Partial phase: among the current node's edges, the one sharing the longest
/// prefix with the unconsumed input (the earlier edge wins ties) commits
/// that prefix and yields the spelling's untyped tail as pending romaji.
fn consume_partial(
    dag: &Dag,
    romaji: &str,
    mut cur: Cursor,
    hit: &mut String,
) -> (Cursor, Option<String>) {
    if cur.tar_idx >= dag.char_count {
        return (cur, None);
    }
    let rest = &romaji[cur.rom_idx..];

    let mut best: Option<(usize, &Edge)> = None;
    for edge in &dag.nodes[cur.tar_idx] {
        let len = common_prefix_bytes(&edge.spelling, rest);
        if len > 0 && best.map_or(true, |(max, _)| len > max) {
            best = Some((len, edge));
        }
    }
    let Some((len, edge)) = best else {
        return (cur, None);
    };

    hit.push_str(&edge.spelling[..len]);
    cur = Cursor {
        tar_idx: edge.target,
        rom_idx: cur.rom_idx + len,
    };
    (cur, Some(edge.spelling[len..].to_string()))
}

/// Classify `romaji` against `kana` using an explicit mapping table.
///
/// Total for arbitrary input: unknown romaji ends up in `del_romaji`, never
/// in an error. Matching is case-insensitive.
pub fn predict_with(table: &RomajiTable, kana: &str, romaji: &str) -> Prediction {
    let _span = debug_span!(
        "predict",
        kana_chars = kana.chars().count(),
        romaji_bytes = romaji.len()
    )
    .entered();

    let romaji = romaji.to_ascii_lowercase();
    let dag = Dag::build(table, kana);

    let mut hit_romaji = String::new();
    let cur = consume_committed(
        &dag,
        &romaji,
        Cursor { tar_idx: 0, rom_idx: 0 },
        &mut hit_romaji,
    );

    // The confirmed prefix counts fully-typed units only; a unit the partial
    // phase has merely begun stays outside it. Sliced from the caller's
    // string: normalization is 1:1 in chars, so the indices line up.
    let hit_kana: String = kana.chars().take(cur.tar_idx).collect();

    let (cur, pending_tail) = consume_partial(&dag, &romaji, cur, &mut hit_romaji);

    let mut rem_romaji = pending_tail.unwrap_or_default();
    rem_romaji.push_str(&dag.completion_from(cur.tar_idx));

    let del_romaji = romaji[cur.rom_idx..].to_string();

    debug!(
        hit_chars = hit_kana.chars().count(),
        rem_bytes = rem_romaji.len(),
        del_bytes = del_romaji.len()
    );
    Prediction {
        hit_kana,
        hit_romaji,
        rem_romaji,
        del_romaji,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(kana: &str, romaji: &str) -> Prediction {
        predict_with(RomajiTable::default_table(), kana, romaji)
    }

    #[test]
    fn test_committed_phase_stops_at_mismatch() {
        let p = predict("かな", "kaxx");
        assert_eq!(p.hit_kana, "か");
        assert_eq!(p.hit_romaji, "ka");
        assert_eq!(p.rem_romaji, "na");
        assert_eq!(p.del_romaji, "xx");
    }

    #[test]
    fn test_partial_phase_longest_prefix_wins() {
        // At う the edges are u/wu/whu; "wh" overlaps whu by two chars.
        let p = predict("う", "wh");
        assert_eq!(p.hit_kana, "");
        assert_eq!(p.hit_romaji, "wh");
        assert_eq!(p.rem_romaji, "u");
        assert_eq!(p.del_romaji, "");
    }

    #[test]
    fn test_partial_phase_tie_takes_earlier_edge() {
        // "t" overlaps ts and tsu equally; ts sorts earlier (shorter), so the
        // pending tail is "s", not "su".
        let p = predict("つ", "t");
        assert_eq!(p.hit_romaji, "t");
        assert_eq!(p.rem_romaji, "s");
    }

    #[test]
    fn test_case_insensitive() {
        let p = predict("かな", "KaNa");
        assert_eq!(p.hit_kana, "かな");
        assert_eq!(p.hit_romaji, "kana");
        assert_eq!(p.del_romaji, "");
    }

    #[test]
    fn test_multibyte_garbage_in_romaji() {
        // Non-ASCII input never matches and never splits a char boundary.
        let p = predict("かな", "kaあい");
        assert_eq!(p.hit_kana, "か");
        assert_eq!(p.del_romaji, "あい");
    }

    #[test]
    fn test_fallback_unit_consumed_verbatim() {
        let p = predict("x-men", "x-");
        assert_eq!(p.hit_kana, "x-");
        assert_eq!(p.rem_romaji, "men");
        assert_eq!(p.del_romaji, "");
    }

    #[test]
    fn test_injected_fixture_table() {
        let table = RomajiTable::from_pairs([("か", vec!["ka"])]).unwrap();
        let p = predict_with(&table, "かか", "kak");
        assert_eq!(p.hit_kana, "か");
        assert_eq!(p.hit_romaji, "kak");
        assert_eq!(p.rem_romaji, "a");
        assert_eq!(p.del_romaji, "");
    }
}
