// Copyright @yucwang 2026

use std::fmt;

/// Setup-time failures. Everything here is reported before a frame starts;
/// tracing itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroCanvas { width: usize, height: usize },
    InvalidViewport(&'static str),
    DegenerateRay,
    InvalidSphere { index: usize, reason: &'static str },
    InvalidLight { index: usize, reason: &'static str },
    SphereIndexOutOfRange(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCanvas { width, height } => {
                write!(f, "canvas must be non-empty, got {}x{}", width, height)
            }
            ConfigError::InvalidViewport(reason) => write!(f, "invalid viewport: {}", reason),
            ConfigError::DegenerateRay => write!(f, "ray direction must be finite and non-zero"),
            ConfigError::InvalidSphere { index, reason } => {
                write!(f, "invalid sphere #{}: {}", index, reason)
            }
            ConfigError::InvalidLight { index, reason } => {
                write!(f, "invalid light #{}: {}", index, reason)
            }
            ConfigError::SphereIndexOutOfRange(index) => {
                write!(f, "no sphere with index {}", index)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
