use tracing::{debug, error, info, warn};

/// Logs request start with consistent format
pub fn log_api_start(endpoint: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("API_START: {} - {}", endpoint, d),
        None => info!("API_START: {}", endpoint),
    }
}

/// Logs request completion with consistent format
pub fn log_api_success(endpoint: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("API_SUCCESS: {} - {}", endpoint, d),
        None => info!("API_SUCCESS: {}", endpoint),
    }
}

/// Logs request errors with consistent format
pub fn log_api_error(endpoint: &str, error: &str) {
    error!("API_ERROR: {} - {}", endpoint, error);
}

/// Logs validation errors with consistent format
pub fn log_validation_error(endpoint: &str, field: &str, value: &str, error: &str) {
    warn!(
        "VALIDATION_ERROR: {} - field '{}' value '{}' invalid: {}",
        endpoint, field, value, error
    );
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
