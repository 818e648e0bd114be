use crate::domain::models::{
    CreateInstrumentRequest, Direction, Status, UpdateInstrumentRequest,
};
use crate::error::AppError;
use rust_decimal::Decimal;

const MAX_NUMBER_LENGTH: usize = 64;
const MAX_NAME_LENGTH: usize = 200;
const MAX_NOTES_LENGTH: usize = 1000;

fn minimum_amount() -> Decimal {
    Decimal::new(1, 2)
}

pub fn validate_create_request(
    req: &CreateInstrumentRequest,
    direction: Direction,
) -> Result<(), AppError> {
    validate_number(&req.number)?;
    validate_amount(req.amount)?;
    validate_name(&req.counterparty_name, direction.counterparty_role())?;
    validate_name(&req.bank_name, "bank")?;
    if let Some(status) = &req.status {
        validate_status(status, direction)?;
    }
    if let Some(notes) = &req.notes {
        validate_notes(notes)?;
    }
    Ok(())
}

/// Checks every field present in the patch with the same rules as creation.
pub fn validate_update_request(
    req: &UpdateInstrumentRequest,
    direction: Direction,
) -> Result<(), AppError> {
    if let Some(number) = &req.number {
        validate_number(number)?;
    }
    if let Some(amount) = req.amount {
        validate_amount(amount)?;
    }
    if let Some(name) = &req.counterparty_name {
        validate_name(name, direction.counterparty_role())?;
    }
    if let Some(bank) = &req.bank_name {
        validate_name(bank, "bank")?;
    }
    if let Some(status) = &req.status {
        validate_status(status, direction)?;
    }
    if let Some(notes) = &req.notes {
        validate_notes(notes)?;
    }
    Ok(())
}

fn validate_number(number: &str) -> Result<(), AppError> {
    if number.trim().is_empty() {
        return Err(AppError::Validation(
            "Instrument number must not be empty".into(),
        ));
    }

    if number.chars().count() > MAX_NUMBER_LENGTH {
        return Err(AppError::Validation(format!(
            "Instrument number must not exceed {} characters",
            MAX_NUMBER_LENGTH
        )));
    }

    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount < minimum_amount() {
        return Err(AppError::Validation(
            "Amount must be at least 0.01".into(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str, field: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "The {} name must not be empty",
            field
        )));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "The {} name must not exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

fn validate_status(status: &Status, direction: Direction) -> Result<(), AppError> {
    if !status.is_valid_for(direction) {
        return Err(AppError::Validation(format!(
            "Status {} is not allowed for {} instruments",
            status, direction
        )));
    }
    Ok(())
}

fn validate_notes(notes: &str) -> Result<(), AppError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(AppError::Validation(format!(
            "Notes must not exceed {} characters",
            MAX_NOTES_LENGTH
        )));
    }
    Ok(())
}
