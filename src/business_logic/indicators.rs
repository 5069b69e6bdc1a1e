use std::collections::VecDeque;

/// Which side of the window a [`RollingExtreme`] tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

impl Extreme {
    /// True when `candidate` should evict `held` from the back of the deque
    fn dominates(self, candidate: f64, held: f64) -> bool {
        match self {
            Extreme::Max => candidate >= held,
            Extreme::Min => candidate <= held,
        }
    }
}

/// Rolling maximum/minimum over a fixed window (monotonic deque)
#[derive(Debug, Clone)]
pub struct RollingExtreme {
    window: usize,
    extreme: Extreme,
    deque: VecDeque<(usize, f64)>,
    idx: usize,
}

impl RollingExtreme {
    pub fn new(window: usize, extreme: Extreme) -> Self {
        Self {
            window,
            extreme,
            deque: VecDeque::with_capacity(window),
            idx: 0,
        }
    }

    pub fn max(window: usize) -> Self {
        Self::new(window, Extreme::Max)
    }

    pub fn min(window: usize) -> Self {
        Self::new(window, Extreme::Min)
    }

    /// Push the next value, returns the window extreme once the window is full
    pub fn update(&mut self, value: f64) -> Option<f64> {
        let idx = self.idx;
        self.idx += 1;

        while let Some(&(_, held)) = self.deque.back() {
            if self.extreme.dominates(value, held) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((idx, value));

        // Drop the front once it slides out of [idx - window + 1, idx]
        while let Some(&(front_idx, _)) = self.deque.front() {
            if front_idx + self.window <= idx {
                self.deque.pop_front();
            } else {
                break;
            }
        }

        if self.window == 0 || self.idx < self.window {
            return None;
        }

        self.deque.front().map(|&(_, extreme)| extreme)
    }
}

/// Rolling maximum aligned to input index, `None` until the window is full
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut calc = RollingExtreme::max(window);
    values.iter().map(|&value| calc.update(value)).collect()
}

/// Rolling minimum aligned to input index, `None` until the window is full
pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut calc = RollingExtreme::min(window);
    values.iter().map(|&value| calc.update(value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_max_warmup_and_values() {
        let values = [10.0, 12.0, 11.0, 15.0, 14.0, 16.0];
        let result = rolling_max(&values, 3);

        assert_eq!(
            result,
            vec![None, None, Some(12.0), Some(15.0), Some(15.0), Some(16.0)]
        );
    }

    #[test]
    fn test_rolling_min_warmup_and_values() {
        let values = [9.0, 10.0, 9.0, 13.0, 12.0, 14.0];
        let result = rolling_min(&values, 2);

        assert_eq!(
            result,
            vec![None, Some(9.0), Some(9.0), Some(9.0), Some(12.0), Some(12.0)]
        );
    }

    #[test]
    fn test_window_one_is_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];

        let max: Vec<f64> = rolling_max(&values, 1).into_iter().flatten().collect();
        let min: Vec<f64> = rolling_min(&values, 1).into_iter().flatten().collect();

        assert_eq!(max, values.to_vec());
        assert_eq!(min, values.to_vec());
    }

    #[test]
    fn test_window_longer_than_input() {
        let values = [1.0, 2.0];
        assert_eq!(rolling_max(&values, 5), vec![None, None]);
    }

    #[test]
    fn test_matches_naive_window_scan() {
        let values = [5.0, 3.0, 8.0, 8.0, 2.0, 7.0, 1.0, 9.0, 4.0, 6.0];
        let window = 4;

        let max = rolling_max(&values, window);
        let min = rolling_min(&values, window);

        for i in 0..values.len() {
            if i + 1 < window {
                assert!(max[i].is_none());
                assert!(min[i].is_none());
                continue;
            }
            let span = &values[i + 1 - window..=i];
            let naive_max = span.iter().cloned().fold(f64::MIN, f64::max);
            let naive_min = span.iter().cloned().fold(f64::MAX, f64::min);
            assert_eq!(max[i], Some(naive_max), "max mismatch at {}", i);
            assert_eq!(min[i], Some(naive_min), "min mismatch at {}", i);
        }
    }

    #[test]
    fn test_zero_window_never_ready() {
        let mut calc = RollingExtreme::max(0);
        assert!(calc.update(1.0).is_none());
        assert!(calc.update(2.0).is_none());
    }
}
