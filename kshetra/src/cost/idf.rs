//! Importance density function (IDF) files.
//!
//! One feature per line:
//!
//! ```text
//! # comment
//! gaussian <x> <y> <sigma> <peak>
//! ```

use std::path::Path;

use super::oracle::OracleError;

/// Isotropic Gaussian bump of importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianFeature {
    /// Center x in world units
    pub x: f64,
    /// Center y in world units
    pub y: f64,
    /// Standard deviation in world units
    pub sigma: f64,
    /// Density at the center
    pub peak: f64,
}

impl GaussianFeature {
    /// Density contributed at `(x, y)`.
    #[inline]
    pub fn density(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        self.peak * (-(dx * dx + dy * dy) / (2.0 * self.sigma * self.sigma)).exp()
    }
}

/// Sum of Gaussian features over the world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldIdf {
    features: Vec<GaussianFeature>,
}

impl WorldIdf {
    /// Read and parse an IDF file.
    pub fn load(path: &Path) -> Result<Self, OracleError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OracleError::Io(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse `gaussian <x> <y> <sigma> <peak>` lines; `#` starts a comment.
    pub fn parse(contents: &str) -> Result<Self, OracleError> {
        let mut features = Vec::new();
        for (i, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            features.push(parse_feature(line).map_err(|reason| OracleError::MalformedIdf {
                line: i + 1,
                reason,
            })?);
        }

        if features.is_empty() {
            return Err(OracleError::NoFeatures);
        }
        Ok(Self { features })
    }

    /// Parsed features in file order.
    pub fn features(&self) -> &[GaussianFeature] {
        &self.features
    }

    /// Importance at `(x, y)`.
    pub fn density(&self, x: f64, y: f64) -> f64 {
        self.features.iter().map(|f| f.density(x, y)).sum()
    }
}

fn parse_feature(line: &str) -> Result<GaussianFeature, String> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("gaussian") => {}
        Some(kind) => return Err(format!("unknown feature kind '{}'", kind)),
        None => return Err("empty line".to_string()),
    }

    let nums = parts
        .map(|p| p.parse::<f64>().map_err(|_| format!("'{}' is not a number", p)))
        .collect::<Result<Vec<f64>, String>>()?;
    let [x, y, sigma, peak] = nums[..] else {
        return Err(format!("expected 4 values, found {}", nums.len()));
    };

    if nums.iter().any(|v| !v.is_finite()) {
        return Err("values must be finite".to_string());
    }
    if sigma <= 0.0 {
        return Err(format!("sigma must be positive (got {})", sigma));
    }
    Ok(GaussianFeature { x, y, sigma, peak })
}
