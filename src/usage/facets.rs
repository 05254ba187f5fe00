//! Facet panels built from the long table
//!
//! Rows are partitioned by their `variable` into one panel each, in order of
//! first appearance. Each panel carries its points sorted on the x axis and
//! knows its own y range; the x range is shared by all panels.

use super::reshape::MeltedSample;

/// Relative padding added on both sides of an axis range
const RANGE_PADDING: f64 = 0.05;

/// A single facet panel (one metric)
#[derive(Debug, Clone)]
pub struct FacetPanel {
    /// Index of this panel (0-based, top to bottom)
    pub index: usize,
    /// Panel title
    pub label: String,
    /// The `variable` value this panel was built from
    pub variable: String,
    /// (elapsed_seconds, value) sorted by elapsed_seconds, one point per x
    pub points: Vec<(f64, f64)>,
}

impl FacetPanel {
    fn new(index: usize, variable: &str, raw: Vec<(f64, f64)>) -> Self {
        FacetPanel {
            index,
            label: format!("variable = {}", variable),
            variable: variable.to_string(),
            points: collapse_points(raw),
        }
    }

    /// y-axis range of this panel, padded
    pub fn y_range(&self) -> (f64, f64) {
        padded_range(self.points.iter().map(|(_, y)| *y))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sort points by x and replace points sharing an x by their mean
///
/// Points with a non-finite coordinate are dropped.
fn collapse_points(mut raw: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    raw.retain(|(x, y)| x.is_finite() && y.is_finite());
    raw.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut points: Vec<(f64, f64)> = Vec::with_capacity(raw.len());
    let mut run: Option<(f64, f64, usize)> = None; // (x, sum, count)

    for (x, y) in raw {
        run = match run {
            Some((rx, sum, n)) if rx == x => Some((rx, sum + y, n + 1)),
            Some((rx, sum, n)) => {
                points.push((rx, sum / n as f64));
                Some((x, y, 1))
            }
            None => Some((x, y, 1)),
        };
    }
    if let Some((rx, sum, n)) = run {
        points.push((rx, sum / n as f64));
    }

    points
}

/// Min/max of the values with relative padding; a flat or empty series gets
/// a unit margin instead
pub fn padded_range<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * RANGE_PADDING, max + span * RANGE_PADDING)
    }
}

/// Complete faceting information for a plot
#[derive(Debug, Clone, Default)]
pub struct FacetInfo {
    pub panels: Vec<FacetPanel>,
}

impl FacetInfo {
    /// Partition the long table by `variable`
    pub fn from_samples(samples: &[MeltedSample]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut grouped: Vec<Vec<(f64, f64)>> = Vec::new();

        for sample in samples {
            let slot = match order.iter().position(|v| *v == sample.variable) {
                Some(slot) => slot,
                None => {
                    order.push(&sample.variable);
                    grouped.push(Vec::new());
                    order.len() - 1
                }
            };
            if let Some(value) = sample.value {
                grouped[slot].push((sample.elapsed_seconds, value));
            }
        }

        let panels = order
            .into_iter()
            .zip(grouped)
            .enumerate()
            .map(|(index, (variable, raw))| FacetPanel::new(index, variable, raw))
            .collect();

        FacetInfo { panels }
    }

    /// Number of panels (one per variable)
    pub fn n_panels(&self) -> usize {
        self.panels.len()
    }

    /// True when no panel has a point to draw
    pub fn is_empty(&self) -> bool {
        self.panels.iter().all(FacetPanel::is_empty)
    }

    /// x-axis range shared by every panel, padded
    pub fn x_range(&self) -> (f64, f64) {
        padded_range(
            self.panels
                .iter()
                .flat_map(|p| p.points.iter().map(|(x, _)| *x)),
        )
    }

    pub fn get(&self, index: usize) -> Option<&FacetPanel> {
        self.panels.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melted(rows: &[(f64, &str, Option<f64>)]) -> Vec<MeltedSample> {
        rows.iter()
            .map(|(x, variable, value)| MeltedSample {
                elapsed_seconds: *x,
                variable: variable.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_partition_by_variable() {
        let samples = melted(&[
            (0.0, "cpu_percent", Some(10.0)),
            (1.0, "cpu_percent", Some(20.0)),
            (2.0, "cpu_percent", Some(15.0)),
            (0.0, "ram_percent", Some(20.0)),
            (1.0, "ram_percent", Some(25.0)),
            (2.0, "ram_percent", Some(30.0)),
        ]);

        let facets = FacetInfo::from_samples(&samples);
        assert_eq!(facets.n_panels(), 2);

        let cpu = facets.get(0).unwrap();
        assert_eq!(cpu.index, 0);
        assert_eq!(cpu.variable, "cpu_percent");
        assert_eq!(cpu.label, "variable = cpu_percent");
        assert_eq!(cpu.points, vec![(0.0, 10.0), (1.0, 20.0), (2.0, 15.0)]);

        let ram = facets.get(1).unwrap();
        assert_eq!(ram.variable, "ram_percent");
        assert_eq!(ram.points, vec![(0.0, 20.0), (1.0, 25.0), (2.0, 30.0)]);
    }

    #[test]
    fn test_points_sorted_by_x() {
        let samples = melted(&[
            (2.0, "cpu_percent", Some(3.0)),
            (0.0, "cpu_percent", Some(1.0)),
            (1.0, "cpu_percent", Some(2.0)),
        ]);
        let facets = FacetInfo::from_samples(&samples);
        assert_eq!(
            facets.panels[0].points,
            vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]
        );
    }

    #[test]
    fn test_duplicate_x_averaged() {
        let samples = melted(&[
            (0.0, "cpu_percent", Some(10.0)),
            (1.0, "cpu_percent", Some(20.0)),
            (1.0, "cpu_percent", Some(40.0)),
            (2.0, "cpu_percent", Some(5.0)),
        ]);
        let facets = FacetInfo::from_samples(&samples);
        assert_eq!(
            facets.panels[0].points,
            vec![(0.0, 10.0), (1.0, 30.0), (2.0, 5.0)]
        );
    }

    #[test]
    fn test_nulls_dropped() {
        let samples = melted(&[
            (0.0, "cpu_percent", Some(10.0)),
            (1.0, "cpu_percent", None),
            (2.0, "cpu_percent", Some(f64::NAN)),
            (0.0, "ram_percent", None),
        ]);
        let facets = FacetInfo::from_samples(&samples);

        // The all-null variable still gets its (empty) panel
        assert_eq!(facets.n_panels(), 2);
        assert_eq!(facets.panels[0].points, vec![(0.0, 10.0)]);
        assert!(facets.panels[1].is_empty());
        assert!(!facets.is_empty());

        assert!(FacetInfo::from_samples(&[]).is_empty());
    }

    fn assert_range(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_ranges() {
        let samples = melted(&[
            (0.0, "cpu_percent", Some(0.0)),
            (10.0, "cpu_percent", Some(200.0)),
            (5.0, "ram_percent", Some(50.0)),
            (20.0, "ram_percent", Some(50.0)),
        ]);
        let facets = FacetInfo::from_samples(&samples);

        // Shared x across both panels
        assert_range(facets.x_range(), (-1.0, 21.0));

        // Per-panel y
        assert_range(facets.panels[0].y_range(), (-10.0, 210.0));
        assert_range(facets.panels[1].y_range(), (49.0, 51.0));
    }

    #[test]
    fn test_padded_range_empty() {
        assert_eq!(padded_range(Vec::new()), (0.0, 1.0));
    }
}
