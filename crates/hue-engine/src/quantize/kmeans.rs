//! Weighted k-means over a color histogram.
//!
//! Clustering runs on distinct colors weighted by their pixel count rather
//! than on raw pixels, so cost scales with palette variety instead of image
//! size. The histogram arrives sorted by color, which together with the
//! seeded RNG makes every run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::QuantizeOptions;
use crate::color::Rgb;

/// One distinct color and the number of pixels carrying it.
#[derive(Debug, Clone, Copy)]
pub(super) struct HistogramEntry {
    pub color: Rgb,
    pub count: u32,
}

/// A final cluster: rounded centroid plus the pixels assigned to it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cluster {
    pub centroid: Rgb,
    pub count: u64,
}

fn distance_squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

fn channels(color: Rgb) -> [f64; 3] {
    [color.r as f64, color.g as f64, color.b as f64]
}

/// Index of the nearest centroid; ties go to the lowest index.
fn nearest(point: [f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = distance_squared(point, *c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Pick an index with probability proportional to `weights`.
fn weighted_pick(rng: &mut StdRng, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        if target < *w {
            return Some(i);
        }
        target -= w;
    }
    // Floating point leftovers: fall back to the last positive weight
    weights.iter().rposition(|w| *w > 0.0)
}

/// k-means++ seeding: first centroid by pixel count, the rest by
/// count × squared distance to the nearest chosen centroid.
fn seed_centroids(entries: &[HistogramEntry], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let counts: Vec<f64> = entries.iter().map(|e| e.count as f64).collect();
    let mut centroids = Vec::with_capacity(k);

    let Some(first) = weighted_pick(rng, &counts) else {
        return centroids;
    };
    centroids.push(channels(entries[first].color));

    while centroids.len() < k {
        let weights: Vec<f64> = entries
            .iter()
            .map(|e| {
                let p = channels(e.color);
                let d = centroids
                    .iter()
                    .map(|c| distance_squared(p, *c))
                    .fold(f64::INFINITY, f64::min);
                d * e.count as f64
            })
            .collect();

        match weighted_pick(rng, &weights) {
            Some(i) => centroids.push(channels(entries[i].color)),
            // Every remaining color already is a centroid
            None => break,
        }
    }

    centroids
}

/// Run seeded, weighted Lloyd iterations and return non-empty clusters.
pub(super) fn cluster(entries: &[HistogramEntry], options: &QuantizeOptions) -> Vec<Cluster> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut centroids = seed_centroids(entries, options.max_colors, &mut rng);
    let threshold = (options.convergence as f64).powi(2);

    for _ in 0..options.max_iterations {
        let mut sums = vec![[0.0f64; 3]; centroids.len()];
        let mut weights = vec![0.0f64; centroids.len()];

        for entry in entries {
            let p = channels(entry.color);
            let idx = nearest(p, &centroids);
            let w = entry.count as f64;
            sums[idx][0] += p[0] * w;
            sums[idx][1] += p[1] * w;
            sums[idx][2] += p[2] * w;
            weights[idx] += w;
        }

        let mut max_shift = 0.0f64;
        for (i, centroid) in centroids.iter_mut().enumerate() {
            if weights[i] == 0.0 {
                continue;
            }
            let updated = [
                sums[i][0] / weights[i],
                sums[i][1] / weights[i],
                sums[i][2] / weights[i],
            ];
            max_shift = max_shift.max(distance_squared(*centroid, updated));
            *centroid = updated;
        }

        if max_shift <= threshold {
            break;
        }
    }

    let mut counts = vec![0u64; centroids.len()];
    for entry in entries {
        counts[nearest(channels(entry.color), &centroids)] += entry.count as u64;
    }

    centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(c, count)| Cluster {
            centroid: Rgb::from_f32_channels([c[0] as f32, c[1] as f32, c[2] as f32]),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(r: u8, g: u8, b: u8, count: u32) -> HistogramEntry {
        HistogramEntry {
            color: Rgb::new(r, g, b),
            count,
        }
    }

    #[test]
    fn test_weighted_pick_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let idx = weighted_pick(&mut rng, &[0.0, 3.0, 0.0]).unwrap();
            assert_eq!(idx, 1);
        }
        assert_eq!(weighted_pick(&mut rng, &[0.0, 0.0]), None);
    }

    #[test]
    fn test_two_well_separated_groups() {
        let entries = vec![
            entry(0, 0, 0, 10),
            entry(4, 4, 4, 10),
            entry(250, 250, 250, 5),
            entry(255, 255, 255, 5),
        ];
        let options = QuantizeOptions::default().max_colors(2);
        let mut clusters = cluster(&entries, &options);
        clusters.sort_by_key(|c| c.centroid);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].centroid, Rgb::new(2, 2, 2));
        assert_eq!(clusters[0].count, 20);
        assert_eq!(clusters[1].centroid, Rgb::new(253, 253, 253));
        assert_eq!(clusters[1].count, 10);
    }

    #[test]
    fn test_seeding_stops_when_colors_run_out() {
        let entries = vec![entry(10, 20, 30, 4), entry(200, 100, 0, 4)];
        let mut rng = StdRng::seed_from_u64(9);
        let centroids = seed_centroids(&entries, 5, &mut rng);
        assert_eq!(centroids.len(), 2);
    }

    #[test]
    fn test_cluster_counts_cover_every_pixel() {
        let entries: Vec<_> = (0..40u8)
            .map(|i| entry(i * 6, 255 - i * 6, i, 1 + i as u32))
            .collect();
        let total: u64 = entries.iter().map(|e| e.count as u64).sum();
        let clusters = cluster(&entries, &QuantizeOptions::default().max_colors(5));

        assert!(clusters.len() <= 5);
        assert_eq!(clusters.iter().map(|c| c.count).sum::<u64>(), total);
    }
}
