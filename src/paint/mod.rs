//! Paint records handed to an external painter.
//!
//! Nothing here rasterises. [`paint_set`] resolves one colour per casing
//! (override, thread colour, or the style's base colour) and pairs it with
//! the casing's fill and stroke paths plus any shadows cast onto it.

pub mod color;

pub use color::Color;

use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::casing::{CasingSet, Thread, ThreadMap};
use crate::error::Result;
use crate::geometry::Pline;
use crate::subdivision::EdgeId;

/// Cycles through a palette, one colour per call.
///
/// The position is plain state owned by the caller; two cycles never
/// influence each other.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    palette: Vec<Color>,
    index: usize,
}

impl ColorCycle {
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette, index: 0 }
    }

    /// Number of colours handed out so far.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Iterator for ColorCycle {
    type Item = Color;

    /// Returns the next palette colour, wrapping around; `None` only for an
    /// empty palette.
    fn next(&mut self) -> Option<Color> {
        let color = self.palette.get(self.index % self.palette.len().max(1)).copied()?;
        self.index += 1;
        Some(color)
    }
}

/// Explicit colours that win over the cycle.
#[derive(Debug, Clone, Default)]
pub struct ColorOverrides {
    threads: HashMap<usize, Color>,
    casings: HashMap<EdgeId, Color>,
}

impl ColorOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Colours every casing of the thread at `index`.
    pub fn set_thread(&mut self, index: usize, color: Color) {
        self.threads.insert(index, color);
    }

    /// Colours a single casing, overriding its thread.
    pub fn set_casing(&mut self, edge: EdgeId, color: Color) {
        self.casings.insert(edge, color);
    }

    #[must_use]
    pub fn thread(&self, index: usize) -> Option<Color> {
        self.threads.get(&index).copied()
    }

    #[must_use]
    pub fn casing(&self, edge: EdgeId) -> Option<Color> {
        self.casings.get(&edge).copied()
    }
}

/// A shadow cast onto an Under side by the strand passing over it.
#[derive(Debug, Clone)]
pub struct ShadowPaint {
    pub outline: Pline,
    pub color: Color,
}

/// Everything needed to draw one casing.
#[derive(Debug, Clone)]
pub struct CasingPaint {
    pub edge: EdgeId,
    /// Closed path to fill.
    pub fill: Pline,
    /// Open paths to stroke.
    pub outlines: Vec<Pline>,
    pub color: Color,
    pub shadows: Vec<ShadowPaint>,
}

/// Resolves colours and paths for every casing of `set`.
///
/// Each thread draws one colour from `cycle` unless `overrides` names one;
/// a casing override beats its thread. Casings left uncoloured, and an
/// exhausted (empty) cycle, fall back to the style's base colour. Shadows
/// take the darkened colour of the casing passing over.
///
/// # Errors
///
/// Returns `WeaveError::MissingCasing` if the set is inconsistent.
pub fn paint_set(
    set: &CasingSet,
    threads: &[Thread],
    cycle: &mut ColorCycle,
    overrides: &ColorOverrides,
) -> Result<Vec<CasingPaint>> {
    let base = set.style().base_color();
    let thread_colors: Vec<Color> = (0..threads.len())
        .map(|i| overrides.thread(i).or_else(|| cycle.next()).unwrap_or(base))
        .collect();
    let thread_map = ThreadMap::new(threads);

    let mut colors: SecondaryMap<EdgeId, Color> = SecondaryMap::new();
    for (edge, _) in set.casings() {
        let color = overrides
            .casing(edge)
            .or_else(|| {
                thread_map
                    .thread_of(edge)
                    .and_then(|i| thread_colors.get(i).copied())
            })
            .unwrap_or(base);
        colors.insert(edge, color);
    }

    let shadow_length = set.style().shadow();
    let mut paints = Vec::with_capacity(set.len());
    for (edge, casing) in set.casings() {
        let color = colors.get(edge).copied().unwrap_or(base);

        let mut shadows = Vec::new();
        for (idx, _) in casing.sides() {
            let Some(outline) = casing.shadow_boundary(idx, shadow_length) else {
                continue;
            };
            let over = set
                .crossing_over(edge, idx)
                .and_then(|e| colors.get(e).copied())
                .unwrap_or(color);
            shadows.push(ShadowPaint {
                outline,
                color: over.darkened(),
            });
        }

        paints.push(CasingPaint {
            edge,
            fill: casing.fill_boundary(),
            outlines: set.outline(edge)?,
            color,
            shadows,
        });
    }

    tracing::debug!(casings = paints.len(), threads = threads.len(), "paint resolved");
    Ok(paints)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::casing::{threads, CasingStyle, Interlace};
    use crate::math::Point2;
    use crate::subdivision::{Subdivision, WeaveSeeds, WeaveTag};

    const RED: Color = Color::from_rgb(255, 0, 0);
    const BLUE: Color = Color::from_rgb(0, 0, 255);

    fn woven_cross(shadow: f64) -> (CasingSet, [EdgeId; 4]) {
        let mut sub = Subdivision::new();
        let c = sub.add_vertex(Point2::origin());
        let mut edges = Vec::new();
        for (x, y) in [(10.0, 0.0), (0.0, 10.0), (-10.0, 0.0), (0.0, -10.0)] {
            let v = sub.add_vertex(Point2::new(x, y));
            edges.push(sub.add_line(c, v).unwrap());
        }
        let mut seeds = WeaveSeeds::new();
        seeds.set(edges[1], c, WeaveTag::Under);
        let style = CasingStyle::new(1.0, 0.25, shadow).unwrap();
        let set = Interlace::new(style, seeds).execute(&sub).unwrap();
        (set, [edges[0], edges[1], edges[2], edges[3]])
    }

    #[test]
    fn cycle_wraps_and_counts() {
        let mut cycle = ColorCycle::new(vec![RED, BLUE]);
        assert_eq!(cycle.next(), Some(RED));
        assert_eq!(cycle.next(), Some(BLUE));
        assert_eq!(cycle.next(), Some(RED));
        assert_eq!(cycle.index(), 3);
        cycle.reset();
        assert_eq!(cycle.next(), Some(RED));
        assert_eq!(ColorCycle::new(Vec::new()).next(), None);
    }

    #[test]
    fn threads_share_colours_and_shadows_darken_the_over_strand() {
        let (set, [e, n, w, s]) = woven_cross(2.0);
        let threads = threads::trace(&set).unwrap();
        let mut cycle = ColorCycle::new(vec![RED, BLUE]);
        let paints = paint_set(&set, &threads, &mut cycle, &ColorOverrides::new()).unwrap();
        assert_eq!(paints.len(), 4);

        let color_of = |edge| paints.iter().find(|p| p.edge == edge).unwrap().color;
        assert_eq!(color_of(e), RED);
        assert_eq!(color_of(w), RED);
        assert_eq!(color_of(n), BLUE);
        assert_eq!(color_of(s), BLUE);

        let under = paints.iter().find(|p| p.edge == n).unwrap();
        assert_eq!(under.shadows.len(), 1);
        assert_eq!(under.shadows[0].color, RED.darkened());
        assert!(under.shadows[0].outline.closed);
        // Gapped end plus far cap plus two long boundaries.
        assert_eq!(under.outlines.len(), 4);

        let over = paints.iter().find(|p| p.edge == e).unwrap();
        assert!(over.shadows.is_empty());
        assert_eq!(over.outlines.len(), 3);
    }

    #[test]
    fn overrides_win() {
        let (set, [e, n, w, _]) = woven_cross(0.0);
        let threads = threads::trace(&set).unwrap();
        let mut overrides = ColorOverrides::new();
        overrides.set_thread(1, Color::WHITE);
        overrides.set_casing(w, BLUE);
        let mut cycle = ColorCycle::new(vec![RED]);
        let paints = paint_set(&set, &threads, &mut cycle, &overrides).unwrap();

        let color_of = |edge| paints.iter().find(|p| p.edge == edge).unwrap().color;
        assert_eq!(color_of(e), RED);
        assert_eq!(color_of(w), BLUE);
        assert_eq!(color_of(n), Color::WHITE);
        // No shadow length, no shadow.
        assert!(paints.iter().all(|p| p.shadows.is_empty()));
    }

    #[test]
    fn empty_cycle_falls_back_to_base() {
        let (set, [e, ..]) = woven_cross(0.0);
        let threads = threads::trace(&set).unwrap();
        let mut cycle = ColorCycle::new(Vec::new());
        let paints = paint_set(&set, &threads, &mut cycle, &ColorOverrides::new()).unwrap();
        let paint = paints.iter().find(|p| p.edge == e).unwrap();
        assert_eq!(paint.color, set.style().base_color());
    }
}
