//! Bounded observation history
//!
//! Keeps the most recent observations in arrival order. When an append pushes
//! the length past capacity, the oldest observation is evicted.

use lagcast_spi::{ForecastError, Result};
use std::collections::VecDeque;

/// Fixed-capacity FIFO store of observations
///
/// # Example
///
/// ```rust
/// use lagcast_core::history::HistoryBuffer;
///
/// let mut history = HistoryBuffer::new(3).unwrap();
/// for value in [1.0, 2.0, 3.0, 4.0] {
///     history.append(value).unwrap();
/// }
/// assert_eq!(history.snapshot(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    values: VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` observations
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(ForecastError::invalid_parameter(
                "capacity",
                "must be at least 1",
            ));
        }

        Ok(Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Append an observation, evicting the oldest one when over capacity
    ///
    /// # Returns
    ///
    /// The evicted observation, if any. Non-finite values are rejected with
    /// `InvalidInput` and leave the buffer untouched.
    pub fn append(&mut self, value: f64) -> Result<Option<f64>> {
        ensure_finite(value)?;

        self.values.push_back(value);
        if self.values.len() > self.capacity {
            return Ok(self.values.pop_front());
        }
        Ok(None)
    }

    /// Replace the observation at `position` in place
    ///
    /// # Returns
    ///
    /// `true` if the stored value changed, `false` if it already held `value`.
    pub fn update(&mut self, position: usize, value: f64) -> Result<bool> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(position)
            .ok_or(ForecastError::IndexOutOfBounds { position, len })?;
        ensure_finite(value)?;

        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// The `n` most recent observations, oldest first
    ///
    /// Returns fewer than `n` values when the buffer is shorter.
    pub fn latest(&self, n: usize) -> Vec<f64> {
        let skip = self.values.len().saturating_sub(n);
        self.values.iter().skip(skip).copied().collect()
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::InvalidInput(format!(
            "observation must be a finite number, got {}",
            value
        )))
    }
}
