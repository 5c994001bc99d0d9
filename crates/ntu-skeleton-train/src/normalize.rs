//! Global per-channel min-max scaling.
//!
//! The channel axis is the last axis of the array. Bounds are taken jointly
//! over every other axis and NaN entries are ignored, so NaN padding neither
//! moves the bounds nor turns into a number: it stays NaN after scaling.
//!
//! A channel whose minimum equals its maximum maps to `0.0`. A channel with no
//! finite entries has NaN bounds and scales to NaN.

use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, DataMut, Dimension};

/// Fitted per-channel bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Array1<f32>,
    max: Array1<f32>,
}

impl MinMaxScaler {
    /// Compute per-channel bounds of `data`, ignoring NaN.
    ///
    /// A zero-dimensional array yields a scaler with no channels.
    pub fn fit<S, D>(data: &ArrayBase<S, D>) -> Self
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        let Some(last) = data.ndim().checked_sub(1) else {
            return MinMaxScaler {
                min: Array1::zeros(0),
                max: Array1::zeros(0),
            };
        };
        let channels = data.len_of(Axis(last));
        let mut min = Array1::from_elem(channels, f32::INFINITY);
        let mut max = Array1::from_elem(channels, f32::NEG_INFINITY);

        for lane in data.lanes(Axis(last)) {
            for (c, &v) in lane.iter().enumerate() {
                if v.is_nan() {
                    continue;
                }
                if v < min[c] {
                    min[c] = v;
                }
                if v > max[c] {
                    max[c] = v;
                }
            }
        }

        // Channels that never saw a number.
        for (lo, hi) in min.iter_mut().zip(max.iter_mut()) {
            if *lo > *hi {
                *lo = f32::NAN;
                *hi = f32::NAN;
            }
        }

        MinMaxScaler { min, max }
    }

    /// Fit on `data` and scale it in place, returning the fitted bounds.
    pub fn fit_transform<S, D>(data: &mut ArrayBase<S, D>) -> Self
    where
        S: DataMut<Elem = f32>,
        D: Dimension,
    {
        let scaler = Self::fit(data);
        scaler.transform(data);
        scaler
    }

    /// Scale `data` in place: `(x - min) / (max - min)` per channel.
    ///
    /// # Panics
    ///
    /// Panics if the last axis of `data` does not have
    /// [`channels`](Self::channels) entries.
    pub fn transform<S, D>(&self, data: &mut ArrayBase<S, D>)
    where
        S: DataMut<Elem = f32>,
        D: Dimension,
    {
        self.apply(data, |v, lo, hi| {
            let range = hi - lo;
            if range == 0.0 && !v.is_nan() {
                0.0
            } else {
                (v - lo) / range
            }
        });
    }

    /// Undo [`transform`](Self::transform): `x * (max - min) + min` per
    /// channel.
    ///
    /// # Panics
    ///
    /// Same as [`transform`](Self::transform).
    pub fn inverse_transform<S, D>(&self, data: &mut ArrayBase<S, D>)
    where
        S: DataMut<Elem = f32>,
        D: Dimension,
    {
        self.apply(data, |v, lo, hi| v * (hi - lo) + lo);
    }

    /// Per-channel minimum.
    pub fn min(&self) -> ArrayView1<'_, f32> {
        self.min.view()
    }

    /// Per-channel maximum.
    pub fn max(&self) -> ArrayView1<'_, f32> {
        self.max.view()
    }

    /// Number of channels the scaler was fitted on.
    pub fn channels(&self) -> usize {
        self.min.len()
    }

    fn apply<S, D, F>(&self, data: &mut ArrayBase<S, D>, f: F)
    where
        S: DataMut<Elem = f32>,
        D: Dimension,
        F: Fn(f32, f32, f32) -> f32,
    {
        let Some(last) = data.ndim().checked_sub(1) else {
            return;
        };
        assert_eq!(
            data.len_of(Axis(last)),
            self.channels(),
            "channel count mismatch"
        );
        for mut lane in data.lanes_mut(Axis(last)) {
            for (c, v) in lane.iter_mut().enumerate() {
                *v = f(*v, self.min[c], self.max[c]);
            }
        }
    }
}
