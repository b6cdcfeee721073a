//! Volume grid generation.
//!
//! We sample titration curves on a coarse uniform grid plus a handful of fixed
//! offsets around each equivalence volume, where the pH jumps by several units
//! within a fraction of a millilitre. This resolves the steep inflection without
//! refining the whole grid.

/// Uniform grid spacing (mL).
pub const GRID_STEP_ML: f64 = 0.5;

/// Extra samples placed around every equivalence volume (mL).
pub const REFINEMENT_OFFSETS_ML: [f64; 6] = [-0.1, -0.05, -0.01, 0.01, 0.05, 0.1];

/// Slack for floating-point grid endpoints (mL).
const VOLUME_SLACK_ML: f64 = 1e-9;

/// `0, step, 2·step, …` up to `max_ml`, with `max_ml` appended when it is not on
/// the grid.
pub fn uniform_volumes(max_ml: f64, step_ml: f64) -> Vec<f64> {
    if !(max_ml.is_finite() && max_ml > 0.0 && step_ml.is_finite() && step_ml > 0.0) {
        return vec![0.0];
    }

    let steps = (max_ml / step_ml + VOLUME_SLACK_ML).floor() as usize;
    let mut out: Vec<f64> = (0..=steps).map(|i| i as f64 * step_ml).collect();
    if let Some(&last) = out.last() {
        if max_ml - last > VOLUME_SLACK_ML {
            out.push(max_ml);
        }
    }
    out
}

/// Each equivalence volume plus its refinement offsets, kept within `[0, max_ml]`.
pub fn refined_volumes(equivalence_ml: &[f64], max_ml: f64) -> Vec<f64> {
    equivalence_ml
        .iter()
        .flat_map(|&v| std::iter::once(0.0).chain(REFINEMENT_OFFSETS_ML).map(move |o| v + o))
        .filter(|&v| v >= 0.0 && v <= max_ml + VOLUME_SLACK_ML)
        .collect()
}

/// Sort ascending and drop exact duplicates.
pub fn merge_volumes(mut volumes: Vec<f64>) -> Vec<f64> {
    volumes.sort_by(f64::total_cmp);
    volumes.dedup();
    volumes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_includes_endpoints() {
        let v = uniform_volumes(50.0, GRID_STEP_ML);
        assert_eq!(v.len(), 101);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[v.len() - 1], 50.0);
    }

    #[test]
    fn uniform_appends_off_grid_max() {
        let v = uniform_volumes(1.2, GRID_STEP_ML);
        assert_eq!(v, vec![0.0, 0.5, 1.0, 1.2]);
    }

    #[test]
    fn refinement_is_clipped_to_range() {
        let v = refined_volumes(&[0.05, 10.0], 10.05);
        assert!(v.iter().all(|&x| (0.0..=10.05 + 1e-9).contains(&x)));
        // 0.05 - 0.1 and 0.05 - 0.05 would be negative/zero; zero is allowed.
        assert!(v.contains(&0.0));
        assert!(!v.iter().any(|&x| x > 10.05 + 1e-9));
    }

    #[test]
    fn merge_sorts_and_dedups() {
        let v = merge_volumes(vec![2.0, 1.0, 2.0, 0.5]);
        assert_eq!(v, vec![0.5, 1.0, 2.0]);
    }
}
