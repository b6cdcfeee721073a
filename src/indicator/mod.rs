//! Indicator matching.
//!
//! An indicator is appropriate for a titration when its transition interval
//! (inclusive) contains the equivalence pH. Flask colour is a teaching cue, not
//! a measurement: below the interval the acidic colour is shown, anywhere from
//! the lower bound upwards the basic colour is shown. No in-band blending.

use crate::domain::{Indicator, IndicatorState};
use crate::error::CatalogError;

impl Indicator {
    /// `low <= ph <= high`.
    pub fn brackets(&self, ph: f64) -> bool {
        self.low <= ph && ph <= self.high
    }

    pub fn state(&self, ph: f64) -> IndicatorState {
        if ph < self.low {
            IndicatorState::Acidic
        } else if ph > self.high {
            IndicatorState::Basic
        } else {
            IndicatorState::Transition
        }
    }

    /// Display colour at `ph`. The transition band shows the basic colour.
    pub fn color_for(&self, ph: f64) -> &str {
        match self.state(ph) {
            IndicatorState::Acidic => &self.acidic_color,
            IndicatorState::Transition | IndicatorState::Basic => &self.basic_color,
        }
    }
}

pub fn find<'a>(indicators: &'a [Indicator], id: &str) -> Result<&'a Indicator, CatalogError> {
    indicators
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| CatalogError::UnknownIndicator(id.to_string()))
}

/// True iff `equivalence_ph` lies in the indicator's transition interval.
pub fn is_appropriate(
    indicators: &[Indicator],
    id: &str,
    equivalence_ph: f64,
) -> Result<bool, CatalogError> {
    Ok(find(indicators, id)?.brackets(equivalence_ph))
}

pub fn color_for<'a>(indicators: &'a [Indicator], id: &str, ph: f64) -> Result<&'a str, CatalogError> {
    Ok(find(indicators, id)?.color_for(ph))
}

/// Every indicator whose interval contains `ph`, in catalog order.
pub fn appropriate_for(indicators: &[Indicator], ph: f64) -> Vec<&Indicator> {
    indicators.iter().filter(|i| i.brackets(ph)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_indicators;

    #[test]
    fn acetate_equivalence_matches_phenolphthalein_only() {
        let list = builtin_indicators();
        assert!(is_appropriate(&list, "phenolphthalein", 8.72).unwrap());
        assert!(!is_appropriate(&list, "methyl-orange", 8.72).unwrap());
    }

    #[test]
    fn interval_is_inclusive() {
        let list = builtin_indicators();
        assert!(is_appropriate(&list, "phenolphthalein", 8.2).unwrap());
        assert!(is_appropriate(&list, "phenolphthalein", 10.0).unwrap());
        assert!(!is_appropriate(&list, "phenolphthalein", 10.0001).unwrap());
    }

    #[test]
    fn colour_switches_at_lower_bound() {
        let list = builtin_indicators();
        let php = find(&list, "phenolphthalein").unwrap();
        assert_eq!(php.color_for(7.0), "#FFFFFF");
        assert_eq!(php.color_for(8.2), "#EC407A");
        assert_eq!(php.color_for(9.0), "#EC407A");
        assert_eq!(php.color_for(12.0), "#EC407A");
        assert_eq!(php.state(9.0), IndicatorState::Transition);
    }

    #[test]
    fn unknown_indicator_is_not_silently_false() {
        let list = builtin_indicators();
        assert!(matches!(
            is_appropriate(&list, "litmus", 7.0),
            Err(CatalogError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn lists_every_bracketing_indicator() {
        let list = builtin_indicators();
        let ids: Vec<&str> = appropriate_for(&list, 7.0).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["bromothymol-blue", "phenol-red"]);
    }
}
