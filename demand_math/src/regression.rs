//! Ordinary least squares over a single regressor

use crate::{MathError, Result};

/// Fitted straight line `y = intercept + slope * x`
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresFit {
    slope: f64,
    intercept: f64,
    observations: usize,
    x_mean: f64,
    /// Sum of squared deviations of x from its mean
    sxx: f64,
    residual_std_error: f64,
}

impl LeastSquaresFit {
    /// Fit a line through paired observations
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x has {} values but y has {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for a least-squares fit".to_string(),
            ));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            sxy += (x - x_mean) * (y - y_mean);
            sxx += (x - x_mean) * (x - x_mean);
        }

        if sxx.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let residual_ss: f64 = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (y - (intercept + slope * x)).powi(2))
            .sum();
        let dof = xs.len() - 2;
        let residual_std_error = if dof > 0 {
            (residual_ss / dof as f64).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            slope,
            intercept,
            observations: xs.len(),
            x_mean,
            sxx,
            residual_std_error,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Residual degrees of freedom (`n - 2`)
    pub fn degrees_of_freedom(&self) -> usize {
        self.observations - 2
    }

    /// Standard deviation of the residuals
    pub fn residual_std_error(&self) -> f64 {
        self.residual_std_error
    }

    /// Point estimate at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Standard error for a new observation at `x`
    ///
    /// Grows with the distance from the centre of the fitted data.
    pub fn prediction_std_error(&self, x: f64) -> f64 {
        let n = self.observations as f64;
        let leverage = (x - self.x_mean).powi(2) / self.sxx;
        self.residual_std_error * (1.0 + 1.0 / n + leverage).sqrt()
    }
}
