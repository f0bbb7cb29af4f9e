//! Stencil access macros
//!
//! The collision and recovery passes index flat `[cell * Q + k]` buffers in
//! their innermost loops. Indices there are derived from interior ranges, so
//! release builds skip the bounds check while debug builds keep it.
//!
//! ```rust
//! use lbm_engine::fast;
//!
//! let f = vec![0.25f32; 18];
//! let cell = 1;
//! let v = *fast!(f, [cell * 9 + 3]);
//! assert_eq!(v, 0.25);
//!
//! let mut rho = vec![0.0f32; 2];
//! fast!(rho, [cell] = 1.0);
//! fast!(rho, [cell] += 0.5);
//! assert_eq!(rho[cell], 1.5);
//! ```

/// Bounds-checked in debug, `get_unchecked` in release.
///
/// Callers must only pass indices derived from the grid's own dimensions.
#[macro_export]
macro_rules! fast {
    // Read: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};

    // Accumulate: fast!(slice, [index] += value)
    ($slice:expr, [$index:expr] += $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] += $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) += $val; }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn reads_distribution_slot() {
        let f: Vec<f32> = (0..18).map(|v| v as f32).collect();
        assert_eq!(*fast!(f, [9 + 4]), 13.0);
    }

    #[test]
    fn writes_and_accumulates() {
        let mut rho = vec![0.0f32; 4];
        fast!(rho, [2] = 1.0);
        fast!(rho, [2] += 0.25);
        assert_eq!(rho, vec![0.0, 0.0, 1.25, 0.0]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_panics_in_debug() {
        let f = vec![0.0f32; 9];
        let _ = *fast!(f, [9]);
    }
}
