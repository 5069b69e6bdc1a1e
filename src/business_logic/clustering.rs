use crate::errors::LevelError;

/// One agglomeration step. Leaves are `0..n`, the i-th merge creates node `n + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub height: f64,
    pub size: usize,
}

/// Ward dendrogram over 1-D points, merges ordered by height
#[derive(Debug, Clone)]
pub struct Dendrogram {
    n_leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Cut into `num_clusters` groups by undoing the most recent merges.
    /// Labels follow the heap order of the remaining subtree roots.
    pub fn cut(&self, num_clusters: usize) -> Vec<usize> {
        let n = self.n_leaves;
        if num_clusters <= 1 || self.merges.is_empty() {
            return vec![0; n];
        }

        let root = n + self.merges.len() - 1;
        let mut heap = vec![root];
        for _ in 1..num_clusters.min(n) {
            let merge = self.merges[heap[0] - n];
            heap_push(&mut heap, merge.left);
            heap_push_pop(&mut heap, merge.right);
        }

        let mut labels = vec![0; n];
        for (label, &node) in heap.iter().enumerate() {
            for leaf in self.leaves(node) {
                labels[leaf] = label;
            }
        }
        labels
    }

    fn leaves(&self, node: usize) -> Vec<usize> {
        let n = self.n_leaves;
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            if node < n {
                leaves.push(node);
            } else {
                let merge = &self.merges[node - n];
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }
        leaves
    }
}

/// Ward merge height between two clusters given their means and sizes
fn ward_distance(mean_a: f64, size_a: usize, mean_b: f64, size_b: usize) -> f64 {
    let (na, nb) = (size_a as f64, size_b as f64);
    (2.0 * na * nb / (na + nb)).sqrt() * (mean_a - mean_b).abs()
}

/// Build the ward dendrogram with the nearest-neighbour chain algorithm
pub fn ward_tree(values: &[f64]) -> Dendrogram {
    let n = values.len();
    let mut means = values.to_vec();
    let mut sizes = vec![1usize; n];
    let mut steps: Vec<Merge> = Vec::with_capacity(n.saturating_sub(1));
    let mut chain: Vec<usize> = Vec::with_capacity(n);

    for _ in 1..n {
        if chain.is_empty() {
            if let Some(first) = (0..n).find(|&i| sizes[i] > 0) {
                chain.push(first);
            }
        }

        let (x, y, height) = loop {
            let x = chain[chain.len() - 1];
            let prev = chain.len().checked_sub(2).map(|i| chain[i]);

            // Ties keep the previous chain element so the chain terminates
            let (mut y, mut best) = match prev {
                Some(p) => (p, ward_distance(means[x], sizes[x], means[p], sizes[p])),
                None => (x, f64::INFINITY),
            };
            for i in 0..n {
                if sizes[i] == 0 || i == x {
                    continue;
                }
                let distance = ward_distance(means[x], sizes[x], means[i], sizes[i]);
                if distance < best {
                    best = distance;
                    y = i;
                }
            }

            if prev == Some(y) {
                chain.truncate(chain.len() - 2);
                break (x, y, best);
            }
            chain.push(y);
        };

        let (x, y) = if x < y { (x, y) } else { (y, x) };
        let (nx, ny) = (sizes[x], sizes[y]);
        means[y] = (means[x] * nx as f64 + means[y] * ny as f64) / (nx + ny) as f64;
        sizes[x] = 0;
        sizes[y] = nx + ny;

        steps.push(Merge {
            left: x,
            right: y,
            height,
            size: nx + ny,
        });
    }

    // The chain finds merges out of order; ward heights are monotone so
    // sorting restores the agglomeration order
    steps.sort_by(|a, b| a.height.total_cmp(&b.height));

    Dendrogram {
        n_leaves: n,
        merges: relabel(steps, n),
    }
}

/// Map slot indices of each step onto dendrogram node ids
fn relabel(steps: Vec<Merge>, n: usize) -> Vec<Merge> {
    let mut parent: Vec<usize> = (0..(2 * n).saturating_sub(1)).collect();

    fn find(parent: &mut [usize], mut node: usize) -> usize {
        let mut root = node;
        while parent[root] != root {
            root = parent[root];
        }
        while parent[node] != root {
            let next = parent[node];
            parent[node] = root;
            node = next;
        }
        root
    }

    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| {
            let a = find(&mut parent, step.left);
            let b = find(&mut parent, step.right);
            let node = n + i;
            parent[a] = node;
            parent[b] = node;
            Merge {
                left: a.min(b),
                right: a.max(b),
                ..step
            }
        })
        .collect()
}

/// Assign each value to one of `num_clusters` ward clusters
pub fn ward_labels(values: &[f64], num_clusters: usize) -> Result<Vec<usize>, LevelError> {
    if num_clusters == 0 {
        return Err(LevelError::InvalidParameter(
            "number of clusters must be at least 1".to_string(),
        ));
    }
    if num_clusters > values.len() {
        return Err(LevelError::InvalidParameter(format!(
            "cannot form {} clusters from {} points",
            num_clusters,
            values.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(LevelError::InvalidParameter(
            "cluster input must be finite".to_string(),
        ));
    }

    if num_clusters == 1 {
        return Ok(vec![0; values.len()]);
    }

    Ok(ward_tree(values).cut(num_clusters))
}

// Binary heap on a plain Vec with the largest node id on top. Mirrors the
// sift order of the classic array heap so label numbering is reproducible.

fn heap_push(heap: &mut Vec<usize>, item: usize) {
    heap.push(item);
    let last = heap.len() - 1;
    sift_toward_root(heap, 0, last);
}

fn heap_push_pop(heap: &mut [usize], item: usize) -> usize {
    if !heap.is_empty() && heap[0] > item {
        let top = std::mem::replace(&mut heap[0], item);
        sift_toward_leaf(heap, 0);
        return top;
    }
    item
}

fn sift_toward_root(heap: &mut [usize], start: usize, mut pos: usize) {
    let item = heap[pos];
    while pos > start {
        let parent = (pos - 1) >> 1;
        if item > heap[parent] {
            heap[pos] = heap[parent];
            pos = parent;
            continue;
        }
        break;
    }
    heap[pos] = item;
}

fn sift_toward_leaf(heap: &mut [usize], mut pos: usize) {
    let end = heap.len();
    let start = pos;
    let item = heap[pos];
    let mut child = 2 * pos + 1;
    while child < end {
        let right = child + 1;
        if right < end && heap[child] <= heap[right] {
            child = right;
        }
        heap[pos] = heap[child];
        pos = child;
        child = 2 * pos + 1;
    }
    heap[pos] = item;
    sift_toward_root(heap, start, pos);
}
