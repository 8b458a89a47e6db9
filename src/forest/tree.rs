use ndarray::{ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand::Rng;

// ---------------------------------------------------------------------------
// CART decision tree (Gini impurity, axis-aligned threshold splits)
// ---------------------------------------------------------------------------

/// Growth limits for a single tree, resolved against the training data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Non-constant features to examine per node.
    pub max_features: usize,
    pub n_classes: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted tree. Nodes live in a flat arena; index 0 is the root.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    depth: usize,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Number of sorted samples going left.
    position: usize,
    score: f64,
}

impl DecisionTree {
    /// Grow a tree on the given (possibly repeated) sample rows.
    pub(crate) fn fit<R: Rng>(
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        mut samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut builder = Builder {
            x,
            y,
            params: *params,
            nodes: Vec::new(),
            depth: 0,
        };
        builder.grow(&mut samples, 0, rng);
        DecisionTree {
            nodes: builder.nodes,
            depth: builder.depth,
        }
    }

    /// Class predicted for a single feature row.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { class } => return class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

struct Builder<'a, 'b> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'b, usize>,
    params: TreeParams,
    nodes: Vec<Node>,
    depth: usize,
}

impl Builder<'_, '_> {
    fn grow<R: Rng>(&mut self, samples: &mut [usize], depth: usize, rng: &mut R) -> usize {
        self.depth = self.depth.max(depth);

        let counts = self.class_counts(samples);
        let majority = majority_class(&counts);
        let node_idx = self.nodes.len();
        self.nodes.push(Node::Leaf { class: majority });

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_small = samples.len() < self.params.min_samples_split;
        let too_deep = self.params.max_depth.is_some_and(|max| depth >= max);
        if pure || too_small || too_deep {
            return node_idx;
        }

        let Some(best) = self.best_split(samples, &counts, rng) else {
            return node_idx;
        };

        self.sort_by_feature(samples, best.feature);
        let (left_samples, right_samples) = samples.split_at_mut(best.position);
        let left = self.grow(left_samples, depth + 1, rng);
        let right = self.grow(right_samples, depth + 1, rng);

        self.nodes[node_idx] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_idx
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.params.n_classes];
        for &s in samples {
            counts[self.y[s]] += 1;
        }
        counts
    }

    fn sort_by_feature(&self, samples: &mut [usize], feature: usize) {
        samples.sort_by(|&a, &b| self.x[[a, feature]].total_cmp(&self.x[[b, feature]]));
    }

    /// Visit features in random order until `max_features` non-constant ones
    /// have been scored; keep the split with the lowest weighted Gini.
    fn best_split<R: Rng>(
        &self,
        samples: &mut [usize],
        parent_counts: &[usize],
        rng: &mut R,
    ) -> Option<BestSplit> {
        let n_features = self.x.ncols();
        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(rng);

        let min_leaf = self.params.min_samples_leaf;
        let n = samples.len();
        let mut best: Option<BestSplit> = None;
        let mut examined = 0;

        for feature in features {
            if examined >= self.params.max_features {
                break;
            }
            self.sort_by_feature(samples, feature);
            let first = self.x[[samples[0], feature]];
            let last = self.x[[samples[n - 1], feature]];
            if first >= last {
                continue;
            }
            examined += 1;

            let mut left = vec![0usize; parent_counts.len()];
            for pos in 1..n {
                left[self.y[samples[pos - 1]]] += 1;

                let prev = self.x[[samples[pos - 1], feature]];
                let next = self.x[[samples[pos], feature]];
                if prev >= next || pos < min_leaf || n - pos < min_leaf {
                    continue;
                }

                let score = weighted_gini(&left, parent_counts, pos, n);
                let improves = match &best {
                    Some(b) => score < b.score,
                    None => true,
                };
                if improves {
                    let mut threshold = prev + (next - prev) / 2.0;
                    if threshold >= next {
                        threshold = prev;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        position: pos,
                        score,
                    });
                }
            }
        }

        best
    }
}

/// `n_left * gini(left) + n_right * gini(right)`, with the right side
/// derived from the parent counts.
fn weighted_gini(left: &[usize], parent: &[usize], n_left: usize, n: usize) -> f64 {
    let n_right = n - n_left;
    let mut sq_left = 0.0;
    let mut sq_right = 0.0;
    for (&l, &p) in left.iter().zip(parent) {
        let r = p - l;
        sq_left += (l * l) as f64;
        sq_right += (r * r) as f64;
    }
    (n_left as f64 - sq_left / n_left as f64) + (n_right as f64 - sq_right / n_right as f64)
}

/// Index of the largest count; ties go to the smallest class index.
pub(crate) fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn params(max_features: usize) -> TreeParams {
        TreeParams {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features,
            n_classes: 2,
        }
    }

    #[test]
    fn separates_one_dimensional_classes() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = array![0, 0, 0, 1, 1, 1];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let tree = DecisionTree::fit(x.view(), y.view(), (0..6).collect(), &params(1), &mut rng);

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_row(array![2.5].view()), 0);
        assert_eq!(tree.predict_row(array![9.0].view()), 1);
        // Threshold sits halfway between 3 and 10.
        assert_eq!(tree.predict_row(array![6.4].view()), 0);
        assert_eq!(tree.predict_row(array![6.6].view()), 1);
    }

    #[test]
    fn learns_xor_with_depth_two() {
        let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let y = array![0, 1, 1, 0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let tree = DecisionTree::fit(x.view(), y.view(), (0..4).collect(), &params(2), &mut rng);

        for (row, &label) in x.rows().into_iter().zip(y.iter()) {
            assert_eq!(tree.predict_row(row), label);
        }
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn fits_from_views_with_unrelated_lifetimes() {
        let y = array![0, 1, 0, 1];
        let p = params(1);
        let tree = {
            let x = array![[0.0], [5.0], [1.0], [6.0]];
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
            DecisionTree::fit(x.view(), y.view(), (0..4).collect(), &p, &mut rng)
        };
        assert_eq!(tree.predict_row(array![0.5].view()), 0);
        assert_eq!(tree.predict_row(array![5.5].view()), 1);
    }

    #[test]
    fn constant_features_give_majority_leaf() {
        let x = array![[5.0], [5.0], [5.0]];
        let y = array![1, 0, 1];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), y.view(), (0..3).collect(), &params(1), &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_row(array![5.0].view()), 1);
    }

    #[test]
    fn depth_limit_is_respected() {
        let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let y = array![0, 1, 1, 0];
        let mut p = params(2);
        p.max_depth = Some(1);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let tree = DecisionTree::fit(x.view(), y.view(), (0..4).collect(), &p, &mut rng);
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn majority_ties_pick_smallest_class() {
        assert_eq!(majority_class(&[2, 2]), 0);
        assert_eq!(majority_class(&[1, 3, 3]), 1);
        assert_eq!(majority_class(&[0, 0, 1]), 2);
    }
}
