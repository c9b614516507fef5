//! Movement points shown on the report sheet.
//!
//! This table is configured independently of the scoring rule table and
//! does not share its boundaries: it has no gaps, so every movement lands
//! in exactly one band.

use crate::types::config::MovementBand;

#[derive(Debug, Clone, PartialEq)]
pub struct PointsTable {
    bands: Vec<MovementBand>,
}

impl Default for PointsTable {
    fn default() -> Self {
        let band = |below: Option<f64>, points: f64, label: &str| MovementBand {
            below,
            points,
            label: label.to_string(),
        };
        Self {
            bands: vec![
                band(Some(10.0), 0.15, "Below 10%"),
                band(Some(26.0), 0.25, "10% - 25%"),
                band(Some(31.0), 0.5, "26% - 30%"),
                band(Some(51.0), 0.75, "31% - 50%"),
                band(Some(81.0), 1.25, "51% - 80%"),
                band(Some(100.0), 1.5, "81% - 99%"),
                band(None, 2.5, "100% or a major breakthrough"),
            ],
        }
    }
}

impl PointsTable {
    /// Uses the configured bands when present. Bands are expected to have
    /// passed config validation.
    pub fn from_config(bands: Option<&[MovementBand]>) -> Self {
        match bands {
            Some(bands) if !bands.is_empty() => Self {
                bands: bands.to_vec(),
            },
            _ => Self::default(),
        }
    }

    pub fn bands(&self) -> &[MovementBand] {
        &self.bands
    }

    /// Index of the first band whose upper bound exceeds `movement`;
    /// anything else (including NaN) lands in the open top band.
    pub fn band_index(&self, movement: f64) -> usize {
        self.bands
            .iter()
            .position(|band| band.below.is_some_and(|below| movement < below))
            .unwrap_or(self.bands.len().saturating_sub(1))
    }

    pub fn points_for(&self, movement: f64) -> f64 {
        self.bands
            .get(self.band_index(movement))
            .map(|band| band.points)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::scoring::movement_bonus;

    #[test]
    fn default_bands_cover_scoring_gaps() {
        let table = PointsTable::default();
        assert_eq!(table.points_for(-5.0), 0.15);
        assert_eq!(table.points_for(25.0), 0.25);
        assert_eq!(table.points_for(30.5), 0.5);
        assert_eq!(table.points_for(50.0), 0.75);
        assert_eq!(table.points_for(99.5), 1.5);
        assert_eq!(table.points_for(100.0), 2.5);
    }

    #[test]
    fn sheet_table_and_scoring_table_disagree_in_gaps() {
        let table = PointsTable::default();
        assert_eq!(movement_bonus(25.0), 0.0);
        assert_eq!(table.points_for(25.0), 0.25);
        assert_eq!(movement_bonus(99.5), 0.0);
        assert_eq!(table.points_for(99.5), 1.5);
    }

    #[test]
    fn configured_bands_replace_defaults() {
        let bands = vec![
            MovementBand {
                below: Some(50.0),
                points: 0.5,
                label: "low".to_string(),
            },
            MovementBand {
                below: None,
                points: 1.0,
                label: "high".to_string(),
            },
        ];
        let table = PointsTable::from_config(Some(bands.as_slice()));
        assert_eq!(table.band_index(49.9), 0);
        assert_eq!(table.band_index(50.0), 1);
        assert_eq!(table.points_for(f64::NAN), 1.0);
        assert_eq!(PointsTable::from_config(Some(&[][..])), PointsTable::default());
    }
}
