//! Seeded k-means over sparse document vectors.
//!
//! Centroids are dense; points stay sparse. Initialisation uses k-means++
//! driven by a seeded RNG, so a fixed seed and input always give the same
//! partition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Result of a k-means fit.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster index per point, in input order
    pub labels: Vec<usize>,
    /// Number of centroids actually used (<= requested k)
    pub clusters: usize,
    /// Refinement rounds run by the winning restart
    pub iterations: usize,
    /// Sum of squared distances from points to their centroid
    pub inertia: f64,
}

/// K-means clusterer.
///
/// Runs several seeded restarts and keeps the partition with the lowest
/// inertia; ties keep the earliest restart.
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    seed: u64,
    restarts: usize,
}

impl KMeans {
    /// Create a clusterer for `k` clusters with a single restart.
    pub fn new(k: usize, max_iterations: usize, seed: u64) -> Self {
        Self {
            k,
            max_iterations,
            seed,
            restarts: 1,
        }
    }

    /// Set the number of seeded restarts (at least one).
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Partition sparse points of the given dimension.
    ///
    /// Fewer than `k` clusters are used when there are fewer distinct points
    /// than requested clusters.
    pub fn fit(&self, points: &[&[(usize, f64)]], dimension: usize) -> KMeansFit {
        if points.is_empty() || self.k == 0 {
            return KMeansFit {
                labels: Vec::new(),
                clusters: 0,
                iterations: 0,
                inertia: 0.0,
            };
        }

        let point_norms: Vec<f64> = points.iter().map(|p| squared_norm_sparse(p)).collect();

        let mut best: Option<KMeansFit> = None;
        for restart in 0..self.restarts {
            let seed = self.seed.wrapping_add(restart as u64);
            let fit = self.fit_once(points, &point_norms, dimension, seed);
            debug!(
                restart,
                clusters = fit.clusters,
                iterations = fit.iterations,
                inertia = fit.inertia,
                "k-means restart finished"
            );
            let better = best
                .as_ref()
                .map_or(true, |current| fit.inertia < current.inertia);
            if better {
                best = Some(fit);
            }
        }

        best.unwrap_or(KMeansFit {
            labels: Vec::new(),
            clusters: 0,
            iterations: 0,
            inertia: 0.0,
        })
    }

    fn fit_once(
        &self,
        points: &[&[(usize, f64)]],
        point_norms: &[f64],
        dimension: usize,
        seed: u64,
    ) -> KMeansFit {
        let mut centroids = self.initial_centroids(points, point_norms, dimension, seed);
        let mut labels = vec![usize::MAX; points.len()];
        let mut iterations = 0;

        for _ in 0..self.max_iterations.max(1) {
            iterations += 1;
            let centroid_norms = centroid_norms(&centroids);

            let mut changed = false;
            for (i, point) in points.iter().enumerate() {
                let best = nearest(point, point_norms[i], &centroids, &centroid_norms);
                if labels[i] != best {
                    labels[i] = best;
                    changed = true;
                }
            }
            if !changed {
                break;
            }

            recompute_centroids(points, &labels, &mut centroids, dimension);
        }

        let norms = centroid_norms(&centroids);
        let inertia = points
            .iter()
            .enumerate()
            .map(|(i, p)| squared_distance(p, point_norms[i], &centroids[labels[i]], norms[labels[i]]))
            .sum();

        KMeansFit {
            labels,
            clusters: centroids.len(),
            iterations,
            inertia,
        }
    }

    /// k-means++ seeding.
    fn initial_centroids(
        &self,
        points: &[&[(usize, f64)]],
        point_norms: &[f64],
        dimension: usize,
        seed: u64,
    ) -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = points.len();

        let first = rng.random_range(0..n);
        let mut centroids = vec![densify(points[first], dimension)];
        let first_norm = point_norms[first];
        let mut min_dist: Vec<f64> = points
            .iter()
            .enumerate()
            .map(|(i, p)| squared_distance(p, point_norms[i], &centroids[0], first_norm))
            .collect();

        while centroids.len() < self.k.min(n) {
            let total: f64 = min_dist.iter().sum();
            if total <= f64::EPSILON {
                // Every point coincides with a chosen centroid
                break;
            }

            let mut target = rng.random::<f64>() * total;
            let mut chosen = min_dist.iter().rposition(|d| *d > 0.0).unwrap_or(0);
            for (i, d) in min_dist.iter().enumerate() {
                if *d <= 0.0 {
                    continue;
                }
                target -= d;
                if target <= 0.0 {
                    chosen = i;
                    break;
                }
            }

            let centroid = densify(points[chosen], dimension);
            let centroid_norm = point_norms[chosen];
            for (i, p) in points.iter().enumerate() {
                let d = squared_distance(p, point_norms[i], &centroid, centroid_norm);
                if d < min_dist[i] {
                    min_dist[i] = d;
                }
            }
            centroids.push(centroid);
        }

        centroids
    }
}

fn centroid_norms(centroids: &[Vec<f64>]) -> Vec<f64> {
    centroids
        .iter()
        .map(|c| c.iter().map(|x| x * x).sum())
        .collect()
}

fn densify(point: &[(usize, f64)], dimension: usize) -> Vec<f64> {
    let mut dense = vec![0.0; dimension];
    for &(column, weight) in point {
        dense[column] = weight;
    }
    dense
}

fn squared_norm_sparse(point: &[(usize, f64)]) -> f64 {
    point.iter().map(|(_, w)| w * w).sum()
}

/// `|p|^2 + |c|^2 - 2 p.c`, clamped at zero.
fn squared_distance(point: &[(usize, f64)], point_norm: f64, centroid: &[f64], centroid_norm: f64) -> f64 {
    let dot: f64 = point.iter().map(|&(column, w)| w * centroid[column]).sum();
    (point_norm + centroid_norm - 2.0 * dot).max(0.0)
}

/// Index of the nearest centroid; ties go to the lowest index.
fn nearest(point: &[(usize, f64)], point_norm: f64, centroids: &[Vec<f64>], centroid_norms: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, point_norm, centroid, centroid_norms[j]);
        if d < best_dist {
            best = j;
            best_dist = d;
        }
    }
    best
}

/// Move each centroid to the mean of its members; empty clusters keep their centroid.
fn recompute_centroids(
    points: &[&[(usize, f64)]],
    labels: &[usize],
    centroids: &mut [Vec<f64>],
    dimension: usize,
) {
    let mut sums = vec![vec![0.0; dimension]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for &(column, weight) in point.iter() {
            sums[label][column] += weight;
        }
    }

    for (j, centroid) in centroids.iter_mut().enumerate() {
        if counts[j] == 0 {
            continue;
        }
        let n = counts[j] as f64;
        for (value, sum) in centroid.iter_mut().zip(&sums[j]) {
            *value = sum / n;
        }
    }
}
