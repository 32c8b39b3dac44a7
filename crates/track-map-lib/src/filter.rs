//! Track point selection
//!
//! A point at zero-based input index `i` is retained when `i >= skip_lead` and
//! `(i - skip_lead) % include_every == 0`. Afterwards the last `skip_trail` retained
//! points are dropped. The trailing trim is done lazily with a look-behind buffer, so a
//! retained point is only released once `skip_trail` newer retained points exist.

use crate::{MapError, Result, TrackPoint};
use std::collections::VecDeque;

/// Selection parameters for the track points sent to the map service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    skip_lead: usize,
    skip_trail: usize,
    include_every: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_lead: 0,
            skip_trail: 0,
            include_every: 1,
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl FilterConfig {
    /// Create a filter, rejecting a zero stride
    pub fn new(skip_lead: usize, skip_trail: usize, include_every: usize) -> Result<Self> {
        if include_every == 0 {
            return Err(MapError::InvalidFilter(
                "include_every must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            skip_lead,
            skip_trail,
            include_every,
        })
    }

    #[inline]
    pub fn skip_lead(&self) -> usize {
        self.skip_lead
    }

    #[inline]
    pub fn skip_trail(&self) -> usize {
        self.skip_trail
    }

    #[inline]
    pub fn include_every(&self) -> usize {
        self.include_every
    }

    /// Whether the point at input index `index` passes the lead and stride rules
    #[inline]
    pub fn includes(&self, index: usize) -> bool {
        index >= self.skip_lead && (index - self.skip_lead) % self.include_every == 0
    }

    /// Number of points retained from an input of `input_len` points, trailing trim included
    pub fn retained_count(&self, input_len: usize) -> usize {
        input_len
            .saturating_sub(self.skip_lead)
            .div_ceil(self.include_every)
            .saturating_sub(self.skip_trail)
    }

    /// Lazily apply the filter to a sequence of points
    pub fn apply<I>(&self, points: I) -> Retained<I::IntoIter>
    where
        I: IntoIterator<Item = TrackPoint>,
    {
        Retained {
            points: points.into_iter(),
            config: *self,
            index: 0,
            pending: VecDeque::with_capacity(self.skip_trail.min(1024) + 1),
        }
    }
}

/// Iterator over the retained points of a track, see [`FilterConfig::apply`]
#[derive(Debug)]
pub struct Retained<I> {
    points: I,
    config: FilterConfig,
    /// Index of the next raw input point
    index: usize,
    /// Retained points not yet known to be outside the trailing `skip_trail`
    pending: VecDeque<TrackPoint>,
}

impl<I> Iterator for Retained<I>
where
    I: Iterator<Item = TrackPoint>,
{
    type Item = TrackPoint;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Anything still pending when the input ends belongs to the trimmed tail
            let point = self.points.next()?;
            let index = self.index;
            self.index += 1;

            if !self.config.includes(index) {
                continue;
            }

            self.pending.push_back(point);
            if self.pending.len() > self.config.skip_trail {
                return self.pending.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_points(count: usize) -> Vec<TrackPoint> {
        (0..count)
            .map(|i| TrackPoint::new(i as f64, -(i as f64)))
            .collect()
    }

    fn retained_indices(config: FilterConfig, count: usize) -> Vec<usize> {
        config
            .apply(numbered_points(count))
            .map(|p| p.latitude as usize)
            .collect()
    }

    #[test]
    fn test_default_filter_is_identity() {
        let points = numbered_points(7);
        let filtered: Vec<_> = FilterConfig::default().apply(points.clone()).collect();
        assert_eq!(filtered, points);
    }

    #[test]
    fn test_zero_stride_is_rejected() {
        let result = FilterConfig::new(0, 0, 0);
        assert!(matches!(result, Err(MapError::InvalidFilter(_))));
    }

    #[test]
    fn test_skip_lead_then_stride() {
        let config = FilterConfig::new(2, 0, 3).unwrap();
        assert_eq!(retained_indices(config, 10), vec![2, 5, 8]);
    }

    #[test]
    fn test_skip_trail_counts_retained_points() {
        // Retained before trim: 0, 2, 4, 6, 8 -> drop the last two retained, not raw points
        let config = FilterConfig::new(0, 2, 2).unwrap();
        assert_eq!(retained_indices(config, 10), vec![0, 2, 4]);
    }

    #[test]
    fn test_skip_trail_beyond_retained_is_empty() {
        let config = FilterConfig::new(1, 50, 1).unwrap();
        assert!(retained_indices(config, 10).is_empty());

        let config = FilterConfig::new(0, 3, 1).unwrap();
        assert!(retained_indices(config, 3).is_empty());
    }

    #[test]
    fn test_skip_lead_beyond_input_is_empty() {
        let config = FilterConfig::new(20, 0, 1).unwrap();
        assert!(retained_indices(config, 10).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let config = FilterConfig::new(3, 2, 4).unwrap();
        assert_eq!(config.apply(Vec::new()).count(), 0);
    }

    #[test]
    fn test_stride_count_matches_ceiling() {
        for count in 0..25 {
            for skip_lead in 0..6 {
                for include_every in 1..6 {
                    let config = FilterConfig::new(skip_lead, 0, include_every).unwrap();
                    let expected = if count >= skip_lead {
                        (count - skip_lead).div_ceil(include_every)
                    } else {
                        0
                    };
                    assert_eq!(retained_indices(config, count).len(), expected);
                    assert_eq!(config.retained_count(count), expected);
                }
            }
        }
    }

    #[test]
    fn test_retained_count_includes_trailing_trim() {
        let config = FilterConfig::new(1, 2, 3).unwrap();
        assert_eq!(config.retained_count(11), 2);
        assert_eq!(retained_indices(config, 11), vec![1, 4]);
        assert_eq!(config.retained_count(3), 0);
    }

    #[test]
    fn test_filter_is_lazy() {
        // An endless source still yields as soon as enough look-behind has been buffered
        let endless = (0..).map(|i| TrackPoint::new(i as f64, 0.0));
        let config = FilterConfig::new(1, 2, 2).unwrap();
        let first: Vec<_> = config
            .apply(endless)
            .take(3)
            .map(|p| p.latitude as usize)
            .collect();
        assert_eq!(first, vec![1, 3, 5]);
    }
}
