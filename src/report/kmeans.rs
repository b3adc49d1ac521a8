use rand::{rngs::StdRng, Rng, SeedableRng};

const MAX_ITER: usize = 300;

/// Lloyd's k-means over planar points, seeded with k-means++.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    pub centroids: Vec<[f64; 2]>,
    /// Cluster of every input point, by index into `centroids`.
    pub labels: Vec<usize>,
}

impl KMeans {
    /// Fit at most `k` clusters. Fewer come back when the input has fewer
    /// distinct points than `k`. The same seed gives the same clustering.
    pub fn fit(points: &[[f64; 2]], k: usize, seed: u64) -> Self {
        if points.is_empty() || k == 0 {
            return Self {
                centroids: Vec::new(),
                labels: Vec::new(),
            };
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut centroids = init_plus_plus(points, k, &mut rng);
        let mut labels = assign(points, &centroids);

        for _ in 0..MAX_ITER {
            centroids = update(points, &labels, &centroids);
            let next = assign(points, &centroids);
            if next == labels {
                break;
            }
            labels = next;
        }
        Self { centroids, labels }
    }

    /// Number of points in every cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

fn dist2(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let (dx, dy) = (a[0] - b[0], a[1] - b[1]);
    dx * dx + dy * dy
}

fn nearest(point: &[f64; 2], centroids: &[[f64; 2]]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, dist2(point, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn init_plus_plus(points: &[[f64; 2]], k: usize, rng: &mut StdRng) -> Vec<[f64; 2]> {
    let mut centroids = vec![points[rng.random_range(0..points.len())]];
    while centroids.len() < k {
        let weights: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // every point already sits on a centroid
            break;
        }
        let mut target = rng.random::<f64>() * total;
        let mut pick = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if *w > 0.0 && target < *w {
                pick = i;
                break;
            }
            target -= w;
        }
        centroids.push(points[pick]);
    }
    centroids
}

fn assign(points: &[[f64; 2]], centroids: &[[f64; 2]]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids).0).collect()
}

/// Mean of every cluster; an empty cluster keeps its old centroid.
fn update(points: &[[f64; 2]], labels: &[usize], old: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut sums = vec![[0.0f64; 2]; old.len()];
    let mut counts = vec![0usize; old.len()];
    for (p, &l) in points.iter().zip(labels) {
        sums[l][0] += p[0];
        sums[l][1] += p[1];
        counts[l] += 1;
    }
    sums.iter()
        .zip(&counts)
        .zip(old)
        .map(|((s, &n), o)| {
            if n == 0 {
                *o
            } else {
                [s[0] / n as f64, s[1] / n as f64]
            }
        })
        .collect()
}
