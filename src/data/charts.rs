//! Chart state owned by the application and rebuilt on every snapshot.
//!
//! [`ChartState`] holds the data behind the two dashboard panels (response
//! time and availability). [`ChartState::render`] fully replaces the labels
//! and series from a snapshot; nothing is merged or appended, so stale series
//! from a previous snapshot never linger.

use ratatui::style::Color;
use std::collections::BTreeMap;

use super::snapshot::MonitoringSnapshot;

/// Palette cycled through as targets first appear.
///
/// A target keeps the color it was assigned on first appearance for the
/// lifetime of the chart state, so its line does not change color between
/// renders.
const SERIES_PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::LightRed,
    Color::LightCyan,
    Color::LightMagenta,
];

/// One colored line in a chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    /// Target URL this series belongs to.
    pub target: String,
    /// Line color, stable across renders for a given target.
    pub color: Color,
    /// (index, value) points in the form the chart widget consumes.
    pub points: Vec<(f64, f64)>,
}

impl SeriesData {
    /// The y-values of this series, in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// Labels and series for one chart panel.
#[derive(Debug, Clone, Default)]
pub struct ChartPanel {
    /// Shared x-axis labels, taken from the first target in the snapshot.
    pub labels: Vec<String>,
    /// One series per target.
    pub series: Vec<SeriesData>,
}

impl ChartPanel {
    /// Largest y-value across all series, for axis scaling.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, y)| *y))
            .fold(0.0_f64, f64::max)
    }

    /// Number of data points along the x-axis.
    pub fn width(&self) -> usize {
        self.labels.len()
    }
}

/// Data behind the two dashboard charts.
///
/// Created once at startup and owned by the application; mutated only by
/// [`render`](Self::render), which executes to completion between draws.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    /// Response time panel (milliseconds).
    pub response_time: ChartPanel,
    /// Availability panel (plotted raw against a 0-100 axis).
    pub availability: ChartPanel,
    /// Color assigned to each target at first appearance.
    colors: BTreeMap<String, Color>,
    next_color: usize,
}

impl ChartState {
    /// Create an empty chart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both panels with the contents of `snapshot`.
    ///
    /// The shared label sequence comes from the snapshot's first entry; the
    /// renderer assumes all targets are aligned to it, which callers must have
    /// validated beforehand (see [`crate::data::snapshot::validate`]).
    pub fn render(&mut self, snapshot: &MonitoringSnapshot) {
        let labels: Vec<String> = snapshot
            .values()
            .next()
            .map(|series| series.timestamps.clone())
            .unwrap_or_default();

        let mut response_time = Vec::with_capacity(snapshot.len());
        let mut availability = Vec::with_capacity(snapshot.len());

        for (url, series) in snapshot {
            let color = self.color_for(url);
            response_time.push(SeriesData {
                target: url.clone(),
                color,
                points: indexed(&series.response_times),
            });
            availability.push(SeriesData {
                target: url.clone(),
                color,
                points: indexed(&series.status_codes),
            });
        }

        self.response_time = ChartPanel {
            labels: labels.clone(),
            series: response_time,
        };
        self.availability = ChartPanel {
            labels,
            series: availability,
        };
    }

    /// True when neither panel has any series yet.
    pub fn is_empty(&self) -> bool {
        self.response_time.series.is_empty() && self.availability.series.is_empty()
    }

    /// Color for a target, assigned from the palette on first appearance.
    fn color_for(&mut self, target: &str) -> Color {
        if let Some(color) = self.colors.get(target) {
            return *color;
        }
        let color = SERIES_PALETTE[self.next_color % SERIES_PALETTE.len()];
        self.next_color += 1;
        self.colors.insert(target.to_string(), color);
        color
    }
}

/// Pair values with their index for the chart widget's (x, y) form.
fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::snapshot::TargetSeries;

    fn two_target_snapshot() -> MonitoringSnapshot {
        let mut snapshot = MonitoringSnapshot::new();
        snapshot.insert(
            "https://a.com".to_string(),
            TargetSeries {
                timestamps: vec!["t1".into(), "t2".into()],
                response_times: vec![10.0, 20.0],
                status_codes: vec![200.0, 200.0],
            },
        );
        snapshot.insert(
            "https://b.com".to_string(),
            TargetSeries {
                timestamps: vec!["t1".into(), "t2".into()],
                response_times: vec![30.0, 40.0],
                status_codes: vec![500.0, 200.0],
            },
        );
        snapshot
    }

    #[test]
    fn test_render_builds_one_series_per_target() {
        let mut charts = ChartState::new();
        charts.render(&two_target_snapshot());

        assert_eq!(charts.response_time.series.len(), 2);
        assert_eq!(charts.availability.series.len(), 2);
        assert_eq!(charts.response_time.labels, vec!["t1", "t2"]);

        assert_eq!(charts.response_time.series[0].values(), vec![10.0, 20.0]);
        assert_eq!(charts.response_time.series[1].values(), vec![30.0, 40.0]);
        assert_eq!(charts.availability.series[0].values(), vec![200.0, 200.0]);
        assert_eq!(charts.availability.series[1].values(), vec![500.0, 200.0]);
    }

    #[test]
    fn test_render_replaces_previous_series() {
        let mut charts = ChartState::new();
        charts.render(&two_target_snapshot());

        let mut second = MonitoringSnapshot::new();
        second.insert(
            "https://c.com".to_string(),
            TargetSeries {
                timestamps: vec!["t3".into()],
                response_times: vec![5.0],
                status_codes: vec![200.0],
            },
        );
        charts.render(&second);

        // No residual series from the first snapshot.
        assert_eq!(charts.response_time.series.len(), 1);
        assert_eq!(charts.availability.series.len(), 1);
        assert_eq!(charts.response_time.series[0].target, "https://c.com");
        assert_eq!(charts.response_time.labels, vec!["t3"]);
    }

    #[test]
    fn test_render_is_idempotent_on_data() {
        let snapshot = two_target_snapshot();
        let mut charts = ChartState::new();

        charts.render(&snapshot);
        let first = charts.response_time.series.clone();
        charts.render(&snapshot);

        assert_eq!(charts.response_time.series, first);
    }

    #[test]
    fn test_colors_stable_across_renders() {
        let snapshot = two_target_snapshot();
        let mut charts = ChartState::new();

        charts.render(&snapshot);
        let a_color = charts.response_time.series[0].color;
        let b_color = charts.response_time.series[1].color;
        assert_ne!(a_color, b_color);

        charts.render(&snapshot);
        assert_eq!(charts.response_time.series[0].color, a_color);
        assert_eq!(charts.response_time.series[1].color, b_color);

        // Both panels agree on a target's color.
        assert_eq!(charts.availability.series[0].color, a_color);
    }

    #[test]
    fn test_render_empty_snapshot() {
        let mut charts = ChartState::new();
        charts.render(&MonitoringSnapshot::new());
        assert!(charts.is_empty());
        assert!(charts.response_time.labels.is_empty());
    }

    #[test]
    fn test_max_value_for_axis_scaling() {
        let mut charts = ChartState::new();
        charts.render(&two_target_snapshot());
        assert_eq!(charts.response_time.max_value(), 40.0);
        assert_eq!(charts.availability.max_value(), 500.0);
    }
}
