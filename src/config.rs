//! C12: run configuration. Validates every construction-time parameter up
//! front (§7's `InvalidParameter` conditions) so that a constructed
//! `Config` is always runnable.

use std::path::PathBuf;

use crate::error::{Result, SketchError};

/// Which frequency sketch a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchKind {
    CountSketch,
    Tower,
}

/// `(d, w)` sizing for a sketch or CMCU tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub d: usize,
    pub w: usize,
}

impl Dims {
    pub fn validated(d: usize, w: usize) -> Result<Self> {
        if d == 0 {
            return Err(SketchError::InvalidParameter("d"));
        }
        if w == 0 {
            return Err(SketchError::InvalidParameter("w"));
        }
        Ok(Dims { d, w })
    }
}

/// Per-tier `(d, w)` sizing for a Tower Sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerDims {
    pub tier8: Dims,
    pub tier16: Dims,
    pub tier32: Dims,
}

/// A validated bundle of run parameters. Only constructible through
/// [`Config::new_count_sketch`] / [`Config::new_tower`], both of which
/// enforce every `InvalidParameter` condition up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub k: usize,
    pub phi: f64,
    pub input_dir: PathBuf,
    pub sketch_kind: SketchKind,
    pub count_sketch_dims: Option<Dims>,
    pub tower_dims: Option<TowerDims>,
    pub build_ground_truth: bool,
}

impl Config {
    /// Validates `k` and `phi` and builds a `Config` for a Count Sketch run.
    pub fn new_count_sketch(
        k: usize,
        phi: f64,
        input_dir: impl Into<PathBuf>,
        d: usize,
        w: usize,
        build_ground_truth: bool,
    ) -> Result<Self> {
        validate_k(k)?;
        validate_phi(phi)?;
        let dims = Dims::validated(d, w)?;
        Ok(Config {
            k,
            phi,
            input_dir: input_dir.into(),
            sketch_kind: SketchKind::CountSketch,
            count_sketch_dims: Some(dims),
            tower_dims: None,
            build_ground_truth,
        })
    }

    /// Validates `k` and `phi` and builds a `Config` for a Tower Sketch run.
    pub fn new_tower(
        k: usize,
        phi: f64,
        input_dir: impl Into<PathBuf>,
        tier8: (usize, usize),
        tier16: (usize, usize),
        tier32: (usize, usize),
        build_ground_truth: bool,
    ) -> Result<Self> {
        validate_k(k)?;
        validate_phi(phi)?;
        let dims = TowerDims {
            tier8: Dims::validated(tier8.0, tier8.1)?,
            tier16: Dims::validated(tier16.0, tier16.1)?,
            tier32: Dims::validated(tier32.0, tier32.1)?,
        };
        Ok(Config {
            k,
            phi,
            input_dir: input_dir.into(),
            sketch_kind: SketchKind::Tower,
            count_sketch_dims: None,
            tower_dims: Some(dims),
            build_ground_truth,
        })
    }
}

fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(SketchError::InvalidParameter("k"));
    }
    Ok(())
}

fn validate_phi(phi: f64) -> Result<()> {
    if !(phi > 0.0 && phi < 1.0) {
        return Err(SketchError::InvalidParameter("phi"));
    }
    Ok(())
}
