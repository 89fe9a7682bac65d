//! End-to-end indication run over a triangle dataset

use super::rows::{aggregate, net_trend_factors, IndicationRow, PortfolioIndication, RowInputs};
use crate::config::IndicationConfig;
use crate::development::{calculate_cdfs, calculate_ldfs, latest_diagonal, validate_selection, LdfSummary};
use crate::error::{IndicationError, Result};
use crate::triangle::{MeasureType, Triangle, TriangleSet};
use log::{debug, info};
use serde::Serialize;

/// Development diagnostics plus the indication for one run
#[derive(Debug, Clone, Serialize)]
pub struct IndicationReport {
    pub paid_ldfs: LdfSummary,
    pub case_incurred_ldfs: LdfSummary,
    pub indication: PortfolioIndication,
}

/// Indication engine configured for one run
pub struct IndicationEngine {
    config: IndicationConfig,
}

impl IndicationEngine {
    /// Create an engine; the configuration is validated up front
    pub fn new(config: IndicationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicationConfig {
        &self.config
    }

    /// Simple and weighted development factors for one measure
    pub fn ldf_summary(&self, triangles: &TriangleSet, measure: &MeasureType) -> Result<LdfSummary> {
        let triangle = triangles.get(measure)?;
        calculate_ldfs(triangle, self.config.first_age, self.config.age_length)
    }

    fn selection_for(&self, measure: &MeasureType) -> Result<&[f64]> {
        match measure {
            MeasureType::Paid => Ok(self.config.paid_selected_ldfs.as_slice()),
            MeasureType::CaseIncurred => Ok(self.config.case_incurred_selected_ldfs.as_slice()),
            other => Err(IndicationError::InvalidConfig(format!(
                "no selected development factors for {}",
                other
            ))),
        }
    }

    /// Cumulative factors from the configured selection for `measure`
    ///
    /// The selection is checked against the triangle's period count first.
    pub fn selected_cdfs(&self, triangles: &TriangleSet, measure: &MeasureType) -> Result<Vec<f64>> {
        let triangle = triangles.get(measure)?;
        let selected = self.selection_for(measure)?;
        validate_selection(measure, selected, triangle.periods())?;
        Ok(calculate_cdfs(selected, self.config.cdf_rounding))
    }

    /// Earned premium at the first development age, oldest origin first
    fn earned_premium(&self, triangle: &Triangle) -> Result<Vec<f64>> {
        (0..triangle.periods())
            .map(|row| triangle.value(row, self.config.first_age))
            .collect()
    }

    /// Build the indication table and the portfolio rate change
    pub fn indicate(&self, triangles: &TriangleSet) -> Result<PortfolioIndication> {
        let premium_tri = triangles.get(&MeasureType::EarnedPremium)?;
        let paid_tri = triangles.get(&MeasureType::Paid)?;
        let case_tri = triangles.get(&MeasureType::CaseIncurred)?;

        for other in [paid_tri, case_tri] {
            if other.origins() != premium_tri.origins() {
                return Err(IndicationError::OriginMismatch {
                    left: MeasureType::EarnedPremium,
                    right: other.measure().clone(),
                });
            }
        }

        let earned_premium = self.earned_premium(premium_tri)?;
        let current_paid = latest_diagonal(paid_tri)?;
        let paid_cdfs = self.selected_cdfs(triangles, &MeasureType::Paid)?;
        let current_case = latest_diagonal(case_tri)?;
        let case_cdfs = self.selected_cdfs(triangles, &MeasureType::CaseIncurred)?;
        let net_trend = net_trend_factors(self.config.trend_factor, premium_tri.periods());

        let rows = premium_tri
            .origins()
            .iter()
            .enumerate()
            .map(|(i, &origin)| {
                let row = IndicationRow::from_inputs(
                    RowInputs {
                        origin,
                        earned_premium: earned_premium[i],
                        current_paid: current_paid[i],
                        paid_cdf: paid_cdfs[i],
                        current_case_incurred: current_case[i],
                        case_incurred_cdf: case_cdfs[i],
                        net_trend: net_trend[i],
                    },
                    self.config.blend_cutoff_year,
                )?;
                debug!("{:?}", row);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        let result = aggregate(rows, self.config.permissible_loss_ratio)?;
        info!(
            "Indication over {} origin periods: trended ratio {} vs permissible {} -> {}",
            result.rows.len(),
            result.total_trended_ultimate_ratio,
            result.permissible_loss_ratio,
            result.indication
        );
        Ok(result)
    }

    /// Development diagnostics for paid and case incurred, then the indication
    pub fn run(&self, triangles: &TriangleSet) -> Result<IndicationReport> {
        Ok(IndicationReport {
            paid_ldfs: self.ldf_summary(triangles, &MeasureType::Paid)?,
            case_incurred_ldfs: self.ldf_summary(triangles, &MeasureType::CaseIncurred)?,
            indication: self.indicate(triangles)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::{load_triangles_from_reader, TriangleLayout};

    const DATA: &str = "\
Type,AY,12,24,36,48
paid,2015,100,200,250,260
paid,2016,110,231,286,
paid,2017,120,240,,
paid,2018,130,,,
case_incurred,2015,150,240,265,265
case_incurred,2016,160,250,270,
case_incurred,2017,170,260,,
case_incurred,2018,180,,,
earned_premium,2015,400,400,400,400
earned_premium,2016,420,420,420,
earned_premium,2017,450,450,,
earned_premium,2018,480,,,
";

    fn triangles() -> TriangleSet {
        load_triangles_from_reader(DATA.as_bytes(), &TriangleLayout::default()).unwrap()
    }

    fn config() -> IndicationConfig {
        IndicationConfig {
            paid_selected_ldfs: vec![2.0, 1.25, 1.04, 1.0],
            case_incurred_selected_ldfs: vec![1.5, 1.1, 1.0, 1.0],
            ..IndicationConfig::default()
        }
    }

    #[test]
    fn test_selected_cdfs() {
        let engine = IndicationEngine::new(config()).unwrap();
        let set = triangles();
        assert_eq!(
            engine.selected_cdfs(&set, &MeasureType::Paid).unwrap(),
            vec![1.0, 1.04, 1.3, 2.6]
        );
        assert_eq!(
            engine.selected_cdfs(&set, &MeasureType::CaseIncurred).unwrap(),
            vec![1.0, 1.0, 1.1, 1.65]
        );
    }

    #[test]
    fn test_full_indication() {
        let engine = IndicationEngine::new(config()).unwrap();
        let result = engine.indicate(&triangles()).unwrap();

        let origins: Vec<i32> = result.rows.iter().map(|r| r.origin).collect();
        assert_eq!(origins, vec![2015, 2016, 2017, 2018]);

        let current_paid: Vec<f64> = result.rows.iter().map(|r| r.current_paid).collect();
        assert_eq!(current_paid, vec![260.0, 286.0, 240.0, 130.0]);

        let paid_ult: Vec<f64> = result.rows.iter().map(|r| r.paid_ultimate).collect();
        assert_eq!(paid_ult, vec![260.0, 300.0, 310.0, 340.0]);

        let case_ult: Vec<f64> = result.rows.iter().map(|r| r.case_incurred_ultimate).collect();
        assert_eq!(case_ult, vec![260.0, 270.0, 290.0, 300.0]);

        let selected: Vec<f64> = result.rows.iter().map(|r| r.selected_ultimate).collect();
        assert_eq!(selected, vec![260.0, 270.0, 300.0, 320.0]);

        let ratios: Vec<f64> = result.rows.iter().map(|r| r.trended_ultimate_ratio).collect();
        assert_eq!(ratios, vec![0.7, 0.682, 0.697, 0.687]);

        assert_eq!(result.rows[0].earned_premium, 400.0);
        assert_eq!(result.total_trended_ultimate_ratio, 0.691);
        assert_eq!(result.indication, 0.256);
    }

    #[test]
    fn test_run_includes_diagnostics() {
        let engine = IndicationEngine::new(config()).unwrap();
        let report = engine.run(&triangles()).unwrap();
        assert_eq!(report.paid_ldfs.transitions.len(), 3);
        assert_eq!(report.case_incurred_ldfs.measure, MeasureType::CaseIncurred);
        assert_eq!(report.indication.indication, 0.256);
    }

    #[test]
    fn test_selection_length_mismatch() {
        let engine = IndicationEngine::new(IndicationConfig::default()).unwrap();
        let err = engine.indicate(&triangles()).unwrap_err();
        assert!(matches!(
            err,
            IndicationError::SelectionLength { expected: 4, actual: 10, .. }
        ));
    }

    #[test]
    fn test_missing_measure() {
        let data = "Type,AY,12\npaid,2020,100\n";
        let set = load_triangles_from_reader(data.as_bytes(), &TriangleLayout::default()).unwrap();
        let engine = IndicationEngine::new(config()).unwrap();
        assert!(matches!(
            engine.indicate(&set),
            Err(IndicationError::UnknownMeasure(MeasureType::EarnedPremium))
        ));
    }

    #[test]
    fn test_origin_mismatch() {
        let data = DATA.replace("case_incurred,2018", "case_incurred,2019");
        let set = load_triangles_from_reader(data.as_bytes(), &TriangleLayout::default()).unwrap();
        let engine = IndicationEngine::new(config()).unwrap();
        assert!(matches!(
            engine.indicate(&set),
            Err(IndicationError::OriginMismatch { .. })
        ));
    }

    #[test]
    fn test_default_config_on_sample_dataset() {
        let config = IndicationConfig::default();
        let set = crate::triangle::load_triangles(&config.data_file, &config.layout()).unwrap();
        let engine = IndicationEngine::new(config).unwrap();
        let report = engine.run(&set).unwrap();

        assert_eq!(report.paid_ldfs.transitions.len(), 9);
        assert_eq!(report.indication.rows.len(), 10);
        assert_eq!(report.indication.rows[0].paid_cdf, 1.0);
        assert_eq!(report.indication.rows[9].paid_cdf, 2.988);
        assert_eq!(report.indication.rows[9].case_incurred_cdf, 1.949);
        assert!(report.indication.indication.is_finite());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = IndicationConfig {
            permissible_loss_ratio: -0.5,
            ..IndicationConfig::default()
        };
        assert!(IndicationEngine::new(bad).is_err());
    }
}
