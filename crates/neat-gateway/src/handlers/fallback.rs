use crate::error::AppError;

pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

pub async fn invalid_method_handler() -> AppError {
    AppError::InvalidMethod
}
