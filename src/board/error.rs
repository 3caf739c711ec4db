//! Error types for table initialization, position construction and move application.

use std::fmt;

use super::types::{Move, Square};

/// Slider class a magic table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    Bishop,
    Rook,
}

impl fmt::Display for SliderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderKind::Bishop => write!(f, "bishop"),
            SliderKind::Rook => write!(f, "rook"),
        }
    }
}

/// Error type for precomputed table construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// No collision-free magic multiplier was found within the attempt budget
    MagicSearchExhausted {
        square: Square,
        slider: SliderKind,
        attempts: u32,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::MagicSearchExhausted {
                square,
                slider,
                attempts,
            } => write!(
                f,
                "no {slider} magic found for {square} after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for InitError {}

/// Error type for position construction and move application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A position was requested before the shared tables were initialized
    NotInitialized,
    /// The supplied placement or state violates a position invariant
    InvalidPosition { reason: String },
    /// The move cannot be applied to this position for the given color
    IllegalMoveApplied { mv: Move, reason: String },
}

impl PositionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PositionError::InvalidPosition {
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(mv: Move, reason: impl Into<String>) -> Self {
        PositionError::IllegalMoveApplied {
            mv,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NotInitialized => {
                write!(f, "tables not initialized; call brahma_core::init() first")
            }
            PositionError::InvalidPosition { reason } => {
                write!(f, "Invalid position: {reason}")
            }
            PositionError::IllegalMoveApplied { mv, reason } => {
                write!(f, "Illegal move '{mv}': {reason}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
