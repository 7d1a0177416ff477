//! Duplicate removal and collinear merging of plane segments.

use std::collections::HashMap;

use crate::geom::{GeomCfg, Line, PointKey};

/// Keep the lines of one key group that survive: a lone line always, and
/// from a group of duplicates only plane-lying edges (at most `keep` of them).
fn survivors(group: &[Line], keep: usize) -> impl Iterator<Item = Line> + '_ {
    let lone = group.len() == 1;
    group
        .iter()
        .filter(move |l| lone || l.edge)
        .take(if lone { 1 } else { keep })
        .copied()
}

fn by_key(lines: &mut [Line]) {
    lines.sort_by(|a, b| a.key.cmp(&b.key));
}

/// Remove duplicate lines and merge collinear neighbours.
///
/// 1. Lines sharing a key are dropped unless they are plane-lying edges.
/// 2. Where exactly two lines meet at a point and are collinear, they are
///    replaced by one line spanning both; the merged line is an edge if
///    either part was. Merges chain along straight runs.
/// 3. Remaining duplicates collapse to a single edge line, or vanish when
///    none of them is an edge.
pub fn remove_duplicate_lines(mut lines: Vec<Line>, cfg: &GeomCfg) -> Vec<Line> {
    by_key(&mut lines);
    let kept: Vec<Line> = lines
        .chunk_by(|a, b| a.key == b.key)
        .flat_map(|g| survivors(g, usize::MAX))
        .collect();

    let mut slots: Vec<Option<Line>> = kept.into_iter().map(Some).collect();
    let mut order: Vec<PointKey> = Vec::new();
    let mut adj: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, line) in slots.iter().enumerate() {
        let Some(line) = line else { continue };
        for key in [line.key.0, line.key.1] {
            adj.entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(i);
        }
    }

    for key in order {
        let (i, j) = match adj.get(&key).map(Vec::as_slice) {
            Some(&[i, j]) => (i, j),
            _ => continue,
        };
        let (Some(l1), Some(l2)) = (slots[i], slots[j]) else {
            continue;
        };
        if !l1.is_collinear(&l2, cfg) {
            continue;
        }
        let p1 = if l1.p1.key() != key { l1.p1 } else { l1.p2 };
        let p2 = if l2.p1.key() != key { l2.p1 } else { l2.p2 };
        if p1.key() == p2.key() {
            continue;
        }
        slots[i] = None;
        slots[j] = None;
        let mut merged = Line::ordered(p1, p2);
        merged.edge = l1.edge || l2.edge;
        let idx = slots.len();
        slots.push(Some(merged));
        adj.remove(&key);
        for end in [p1.key(), p2.key()] {
            if let Some(group) = adj.get_mut(&end) {
                group.retain(|&x| x != i && x != j);
                group.push(idx);
            }
        }
    }

    let mut lines: Vec<Line> = slots.into_iter().flatten().collect();
    by_key(&mut lines);
    lines
        .chunk_by(|a, b| a.key == b.key)
        .flat_map(|g| survivors(g, 1))
        .collect()
}
