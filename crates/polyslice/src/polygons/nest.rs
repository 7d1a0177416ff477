//! Parent/child nesting and winding normalization.

use crate::geom::GeomCfg;
use crate::polygon::Polygon;

/// Build containment trees from a polygon soup.
///
/// Polygons are visited smallest first; each one's parent is the first
/// larger polygon it nests in. Depth counts parents up the chain. Even-depth
/// polygons are returned as tops carrying their odd-depth children in
/// `inner`; odd-depth polygons keep no children. With `deep`, only depth-0
/// polygons are returned and the full tree is kept. With `open_top`, open
/// polygons never become parents.
pub fn nest(mut polys: Vec<Polygon>, deep: bool, open_top: bool, cfg: &GeomCfg) -> Vec<Polygon> {
    polys.sort_by(|a, b| a.area().total_cmp(&b.area()));
    for p in &mut polys {
        p.clear_inner();
    }
    let n = polys.len();
    // parent[i] > i always: parents are larger, and the vec is sorted by area
    let mut parent: Vec<Option<usize>> = vec![None; n];
    for i in 0..n.saturating_sub(1) {
        for j in i + 1..n {
            if open_top && polys[j].open {
                continue;
            }
            if polys[i].is_nested(&polys[j], cfg) {
                parent[i] = Some(j);
                break;
            }
        }
    }
    let depth: Vec<usize> = (0..n)
        .map(|i| {
            let mut d = 0;
            let mut p = parent[i];
            while let Some(j) = p {
                d += 1;
                p = parent[j];
            }
            d
        })
        .collect();

    let mut slots: Vec<Option<Polygon>> = polys.into_iter().map(Some).collect();
    let mut tops = Vec::new();
    for i in 0..n {
        let Some(mut poly) = slots[i].take() else {
            continue;
        };
        poly.depth = depth[i];
        let top = if deep {
            depth[i] == 0
        } else {
            depth[i] % 2 == 0
        };
        if !deep && !top {
            poly.clear_inner();
        }
        match parent[i] {
            Some(j) if !top => match slots[j].as_mut() {
                Some(par) => {
                    par.add_inner(poly);
                }
                None => tops.push(poly),
            },
            _ => tops.push(poly),
        }
    }
    tops
}

/// Wind every polygon `clockwise` (or not); with `recurse`, holes the other way.
pub fn set_winding(polys: &mut [Polygon], clockwise: bool, recurse: bool) {
    for p in polys {
        p.set_clockwise(clockwise);
        if recurse {
            set_winding(p.inner_mut(), !clockwise, false);
        }
    }
}

/// Give every polygon the winding already held by the majority of points.
/// Returns true when that is clockwise.
pub fn align_windings(polys: &mut [Polygon]) -> bool {
    let total: usize = polys.iter().map(Polygon::len).sum();
    let cw: usize = polys
        .iter()
        .filter(|p| p.is_clockwise())
        .map(Polygon::len)
        .sum();
    let clockwise = cw * 2 > total;
    for p in polys {
        p.set_clockwise(clockwise);
    }
    clockwise
}
