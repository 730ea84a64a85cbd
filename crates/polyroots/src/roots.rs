/// Largest number of real roots any supported polynomial can have.
pub const MAX_ROOTS: usize = 4;

/// Fixed-capacity buffer of real roots filled by the solvers.
///
/// The buffer never allocates. Solvers clear it before filling, so the same
/// buffer can be reused across calls in a hot loop.
///
/// # Examples
///
/// ```
/// use polyroots::{quadratic, Roots};
///
/// let mut roots = Roots::new();
/// quadratic(1.0, -3.0, 2.0, &mut roots);
///
/// let mut found: Vec<f64> = roots.iter().collect();
/// found.sort_by(f64::total_cmp);
/// assert_eq!(found, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Roots {
    values: [f64; MAX_ROOTS],
    len: usize,
}

impl Roots {
    pub const fn new() -> Self {
        Self {
            values: [0.0; MAX_ROOTS],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends a root, returning `false` if the buffer is already full.
    pub fn push(&mut self, root: f64) -> bool {
        if self.len == MAX_ROOTS {
            return false;
        }
        self.values[self.len] = root;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    /// Smallest root inside the closed interval `[lo, hi]`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyroots::{quadratic, Roots};
    ///
    /// let mut roots = Roots::new();
    /// quadratic(1.0, 0.0, -4.0, &mut roots); // ±2
    ///
    /// assert_eq!(roots.smallest_in(0.0, 10.0), Some(2.0));
    /// assert_eq!(roots.smallest_in(3.0, 10.0), None);
    /// ```
    pub fn smallest_in(&self, lo: f64, hi: f64) -> Option<f64> {
        self.smallest_where(|x| x >= lo && x <= hi)
    }

    /// Smallest root accepted by `accept`, if any.
    pub fn smallest_where(&self, mut accept: impl FnMut(f64) -> bool) -> Option<f64> {
        self.iter()
            .filter(|&x| accept(x))
            .fold(None, |best: Option<f64>, x| match best {
                Some(b) if b <= x => Some(b),
                _ => Some(x),
            })
    }

    pub(crate) fn refine_from(&mut self, start: usize, mut refine: impl FnMut(f64) -> f64) {
        let start = start.min(self.len);
        for value in &mut self.values[start..self.len] {
            *value = refine(*value);
        }
    }

    /// Sorts the stored roots in ascending order, NaN last.
    pub fn sort(&mut self) {
        self.values[..self.len].sort_by(f64::total_cmp);
    }
}
