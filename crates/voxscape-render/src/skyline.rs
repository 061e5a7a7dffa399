//! Per-column skyline tracking for occlusion without a depth buffer.

/// Highest logical row drawn so far in each column of one frame.
///
/// Owned by a single render call. Because depth slices are visited near to
/// far, a sample is visible only if it projects above everything already
/// drawn in its column.
#[derive(Clone, Debug)]
pub struct Skyline {
    tops: Vec<u32>,
}

impl Skyline {
    /// Create a skyline with every column at the bottom of the screen.
    pub fn new(columns: usize) -> Self {
        Self {
            tops: vec![0; columns],
        }
    }

    /// Current top row of column `x`.
    pub fn top(&self, x: usize) -> u32 {
        self.tops[x]
    }

    pub fn tops(&self) -> &[u32] {
        &self.tops
    }

    /// Raise column `x` to `row` if the sample is visible.
    ///
    /// Returns the logical row range `(previous_top, new_top)` to fill, or
    /// `None` when the sample is hidden behind nearer terrain. The stored top
    /// never decreases.
    #[inline]
    pub fn raise(&mut self, x: usize, row: f32) -> Option<(u32, u32)> {
        let top = self.tops[x];
        if row > top as f32 {
            let new_top = row as u32;
            self.tops[x] = new_top;
            Some((top, new_top))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_bottom() {
        let skyline = Skyline::new(5);
        assert_eq!(skyline.tops(), &[0; 5]);
    }

    #[test]
    fn test_raise_reports_run_and_records_top() {
        let mut skyline = Skyline::new(2);
        assert_eq!(skyline.raise(0, 4.7), Some((0, 4)));
        assert_eq!(skyline.top(0), 4);
        assert_eq!(skyline.raise(0, 9.0), Some((4, 9)));
        assert_eq!(skyline.top(1), 0);
    }

    #[test]
    fn test_hidden_samples_rejected() {
        let mut skyline = Skyline::new(1);
        skyline.raise(0, 10.0);
        assert_eq!(skyline.raise(0, 10.0), None);
        assert_eq!(skyline.raise(0, 3.0), None);
        assert_eq!(skyline.raise(0, -50.0), None);
        assert_eq!(skyline.top(0), 10);
    }

    #[test]
    fn test_below_screen_never_raises() {
        let mut skyline = Skyline::new(1);
        assert_eq!(skyline.raise(0, -0.5), None);
        assert_eq!(skyline.raise(0, 0.0), None);
        assert_eq!(skyline.top(0), 0);
    }

    #[test]
    fn test_tops_are_monotonic() {
        let mut skyline = Skyline::new(3);
        let mut previous = skyline.tops().to_vec();
        // Deterministic pseudo-random walk of projected rows.
        let mut seed = 12345u32;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let x = (seed >> 8) as usize % 3;
            let row = ((seed >> 16) % 400) as f32 - 100.0 + 0.25;
            skyline.raise(x, row);
            for (now, before) in skyline.tops().iter().zip(&previous) {
                assert!(now >= before);
            }
            previous = skyline.tops().to_vec();
        }
    }
}
