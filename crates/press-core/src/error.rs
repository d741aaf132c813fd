//! # Error Types
//!
//! Domain-specific error types for press-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  press-core errors (this file)                                         │
//! │  ├── PricingError     - Why a configuration could not be priced        │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  press-data errors (separate crate)                                    │
//! │  └── DataError        - Table loading / config file failures           │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → DataError → caller / UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (material code, limits, etc.)
//! 3. Errors are enum variants, never String
//! 4. The engine never returns a partial breakdown alongside an error

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Reasons a product configuration could not be priced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The configuration is incomplete or internally inconsistent.
    ///
    /// ## When This Occurs
    /// - A required option is missing (fold type on a brochure)
    /// - An option value is unknown to the tables (unsupported coating)
    /// - A paper of the wrong kind was chosen (cover stock as booklet text)
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// Quantity falls outside the product's allowed range or step.
    ///
    /// ## User Workflow
    /// ```text
    /// Postcards, qty 50
    ///      │
    ///      ▼
    /// constraints: min 100, max 5000
    ///      │
    ///      ▼
    /// QuantityOutOfRange { product: "postcards", min: 100, max: 5000, requested: 50 }
    ///      │
    ///      ▼
    /// UI shows: "postcards quantity must be between 100 and 5000"
    /// ```
    #[error("{product} quantity must be between {min} and {max} (requested {requested})")]
    QuantityOutOfRange {
        product: String,
        min: u32,
        max: u32,
        requested: u32,
    },

    /// A paper or material code is not in the catalog.
    #[error("Material not found: {code}")]
    MaterialNotFound { code: String },

    /// Trim size plus bleed does not fit the press sheet.
    ///
    /// The limits reported are the largest *trim* size that fits.
    #[error("Size exceeds maximum of {max_width}\" x {max_height}\"")]
    DimensionTooLarge { max_width: f64, max_height: f64 },

    /// A trim dimension is below the minimum.
    #[error("Dimensions must be at least {min}\"")]
    DimensionTooSmall { min: f64 },

    /// Neither dynamic imposition nor the fallback table gives a yield.
    #[error("No imposition data for size {size}")]
    ImpositionUnavailable { size: String },

    /// Pricing tables have not been loaded yet.
    ///
    /// ## When This Occurs
    /// - A quote is requested before the table provider finished loading
    /// - The cached tables were cleared and not reloaded
    #[error("Pricing data is not loaded yet")]
    PricingDataUnavailable,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before any strategy runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be a multiple of some step.
    #[error("{field} must be a multiple of {step}")]
    NotMultipleOf { field: String, step: u32 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable size code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that cannot be set together.
    #[error("{first} and {second} cannot both be set")]
    Conflicting { first: String, second: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
