//! Weighted component composition engine.

use super::types::ScoreComponent;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A component paired with its weight.
struct WeightedComponent<T, C> {
    component: Box<dyn ScoreComponent<T, C>>,
    weight: f64,
}

/// Engine combining several score components by weighted sum and ranking
/// items by the result, highest first.
///
/// # Examples
///
/// ```
/// use u_taskrank::scoring::{CompositeEngine, ScoreComponent};
///
/// struct Value;
/// impl ScoreComponent<f64, ()> for Value {
///     fn name(&self) -> &str { "value" }
///     fn score(&self, item: &f64, _ctx: &()) -> f64 { *item }
/// }
///
/// let engine: CompositeEngine<f64, ()> = CompositeEngine::new().with_component(Value, 0.5);
/// let scores = engine.score_all(&[1.0, 4.0, 2.0], &(), false);
/// assert_eq!(scores, vec![0.5, 2.0, 1.0]);
/// assert_eq!(engine.rank(&scores), vec![1, 2, 0]);
/// ```
pub struct CompositeEngine<T, C> {
    components: Vec<WeightedComponent<T, C>>,
    precision: Option<i32>,
}

impl<T, C> CompositeEngine<T, C> {
    /// Creates an empty engine with no rounding.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            precision: None,
        }
    }

    /// Rounds composite scores to `decimals` places.
    pub fn with_precision(mut self, decimals: i32) -> Self {
        self.precision = Some(decimals);
        self
    }

    /// Adds a weighted component.
    pub fn with_component<R: ScoreComponent<T, C> + 'static>(
        mut self,
        component: R,
        weight: f64,
    ) -> Self {
        self.components.push(WeightedComponent {
            component: Box::new(component),
            weight,
        });
        self
    }

    /// Computes the composite (weighted, optionally rounded) score.
    pub fn score(&self, item: &T, context: &C) -> f64 {
        let sum: f64 = self
            .components
            .iter()
            .map(|wc| wc.component.score(item, context) * wc.weight)
            .sum();
        match self.precision {
            Some(decimals) => round_to(sum, decimals),
            None => sum,
        }
    }

    /// Scores every item, on the rayon pool when `parallel` is set and the
    /// `parallel` feature is enabled.
    pub fn score_all(&self, items: &[T], context: &C, parallel: bool) -> Vec<f64>
    where
        T: Sync,
        C: Sync,
    {
        evaluate(items, parallel, |item| self.score(item, context))
    }

    /// Orders item indices by descending score.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(&self, scores: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..scores.len()).collect();
        indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        indices
    }
}

impl<T, C> Default for CompositeEngine<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(feature = "parallel")]
fn evaluate<T, F>(items: &[T], parallel: bool, f: F) -> Vec<f64>
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate<T, F>(items: &[T], _parallel: bool, f: F) -> Vec<f64>
where
    F: Fn(&T) -> f64,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test domain: items with value and weight
    #[derive(Debug, Clone)]
    struct Item {
        value: f64,
        weight: f64,
    }

    struct EmptyContext;

    struct ByValue;
    impl ScoreComponent<Item, EmptyContext> for ByValue {
        fn name(&self) -> &str {
            "ByValue"
        }
        fn score(&self, item: &Item, _ctx: &EmptyContext) -> f64 {
            item.value
        }
    }

    struct ByWeight;
    impl ScoreComponent<Item, EmptyContext> for ByWeight {
        fn name(&self) -> &str {
            "ByWeight"
        }
        fn score(&self, item: &Item, _ctx: &EmptyContext) -> f64 {
            item.weight
        }
    }

    fn item(value: f64, weight: f64) -> Item {
        Item { value, weight }
    }

    fn ranked(engine: &CompositeEngine<Item, EmptyContext>, items: &[Item]) -> Vec<usize> {
        engine.rank(&engine.score_all(items, &EmptyContext, false))
    }

    #[test]
    fn test_single_component_descending() {
        let engine = CompositeEngine::new().with_component(ByValue, 1.0);
        let items = vec![item(3.0, 0.0), item(1.0, 0.0), item(2.0, 0.0)];
        assert_eq!(ranked(&engine, &items), vec![0, 2, 1]);
    }

    #[test]
    fn test_weighted_sum() {
        let engine = CompositeEngine::new()
            .with_component(ByValue, 2.0)
            .with_component(ByWeight, 1.0);
        let s = engine.score(&item(3.0, 5.0), &EmptyContext);

        // 2.0 * 3.0 + 1.0 * 5.0 = 11.0
        assert!((s - 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_ties_preserve_order() {
        let engine = CompositeEngine::new()
            .with_component(ByValue, 0.5)
            .with_component(ByWeight, 0.5);
        // scores: 2.0, 1.5, 1.5, 2.0
        let items = vec![item(3.0, 1.0), item(1.0, 2.0), item(2.0, 1.0), item(1.0, 3.0)];
        assert_eq!(ranked(&engine, &items), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_rank_close_scores_strictly_descending() {
        let engine = CompositeEngine::<Item, EmptyContext>::new();
        let scores: Vec<f64> = (0..200).map(|i| ((i * 37) % 200) as f64 / 10.0).collect();
        let order = engine.rank(&scores);

        assert_eq!(order.len(), scores.len());
        for pair in order.windows(2) {
            assert!(scores[pair[0]] >= scores[pair[1]]);
        }
    }

    #[test]
    fn test_rank_tiny_difference_not_tied() {
        let engine = CompositeEngine::<Item, EmptyContext>::new();
        assert_eq!(engine.rank(&[1.0, 1.0 + 1e-12]), vec![1, 0]);
    }

    #[test]
    fn test_precision() {
        let engine = CompositeEngine::new()
            .with_component(ByValue, 1.0)
            .with_precision(4);
        assert_eq!(engine.score(&item(0.123456, 0.0), &EmptyContext), 0.1235);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
    }

    #[test]
    fn test_rank_empty() {
        let engine = CompositeEngine::<Item, EmptyContext>::new().with_component(ByValue, 1.0);
        assert!(engine.rank(&[]).is_empty());
    }

    #[test]
    fn test_no_components() {
        let engine = CompositeEngine::<Item, EmptyContext>::new();
        let items = vec![item(5.0, 0.0), item(9.0, 0.0)];
        assert_eq!(ranked(&engine, &items), vec![0, 1]);
        assert_eq!(engine.score(&items[1], &EmptyContext), 0.0);
    }

    #[test]
    fn test_score_all_parallel_flag_matches() {
        let engine = CompositeEngine::new()
            .with_component(ByValue, 0.3)
            .with_component(ByWeight, 0.7);
        let items: Vec<Item> = (0..64).map(|i| item(i as f64, (64 - i) as f64)).collect();
        assert_eq!(
            engine.score_all(&items, &EmptyContext, true),
            engine.score_all(&items, &EmptyContext, false)
        );
    }
}
