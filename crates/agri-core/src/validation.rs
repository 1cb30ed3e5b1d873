//! # Validation Module
//!
//! Input validation for listing forms, cart edits and lookups.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Slider bounds, required fields                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: agri-hub commands                                            │
//! │  ├── Role capability checks                                            │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── price > 0, quantity > 0, distance ≥ 0 (raises InvalidInput)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agri_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Alphonso Mangoes").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{NewProduct, ProductUpdate};
use crate::{MAX_AVAILABLE_QUANTITY, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, 200)
}

/// Validates a listing description. May be empty; at most 2000 characters.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().chars().count() > 2000 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 2000,
        });
    }
    Ok(())
}

/// Validates a category label. Must not be empty; at most 50 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, 50)
}

/// Validates the free-text farm location.
pub fn validate_location(location: &str) -> ValidationResult<()> {
    validate_text("location", location, 200)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates an email address.
///
/// Only the shape is checked: one `@`, a non-empty local part and a dotted
/// domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: change quantity                                                  │
/// │                                                                         │
/// │  User types 5 ──► validate_quantity(5) ← THIS FUNCTION                 │
/// │                        │                                                │
/// │                        ├── qty <= 0?  → "quantity must be positive"     │
/// │                        ├── qty > 999? → "quantity must be between ..."  │
/// │                        └── OK → stock check → update cart               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the quantity a farmer lists as available. Zero is allowed
/// (sold out).
pub fn validate_available_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_AVAILABLE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "available_quantity".to_string(),
            min: 0,
            max: MAX_AVAILABLE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a listing price. Unlike a POS, free produce is not allowed:
/// the pricing engine rejects a zero base price.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price_per_unit".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before adding a new line.
///
/// ## Rules
/// - Must be below MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates every field of a new listing.
pub fn validate_new_product(form: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&form.name)?;
    validate_description(&form.description)?;
    validate_category(&form.category)?;
    validate_price(form.price_per_unit)?;
    validate_available_quantity(form.available_quantity)?;
    validate_location(&form.location_text)?;
    Ok(())
}

/// Validates only the fields an update sets.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name(name)?;
    }
    if let Some(description) = &update.description {
        validate_description(description)?;
    }
    if let Some(category) = &update.category {
        validate_category(category)?;
    }
    if let Some(price) = update.price_per_unit {
        validate_price(price)?;
    }
    if let Some(qty) = update.available_quantity {
        validate_available_quantity(qty)?;
    }
    if let Some(location) = &update.location_text {
        validate_location(location)?;
    }
    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use agri_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("farmer-1").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
