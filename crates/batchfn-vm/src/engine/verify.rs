//! Binding verification run before every dispatched call.

use batchfn_core::{IndexMask, Signature};

use super::error::BindError;
use super::params::{ParamSlot, Params};

/// Check one bound slot against the signature position it fills.
pub(crate) fn check_slot(
    signature: &Signature,
    index: usize,
    slot: &ParamSlot<'_>,
) -> Result<(), BindError> {
    let expected = signature.param_type(index);
    let (Some(category), Some(ty)) = (slot.category(), slot.type_desc()) else {
        return Err(BindError::AlreadyTaken {
            function: signature.name().to_string(),
            index,
            name: signature.param_name(index).to_string(),
        });
    };
    if category != expected.category() {
        return Err(BindError::CategoryMismatch {
            function: signature.name().to_string(),
            index,
            name: signature.param_name(index).to_string(),
            expected: expected.category(),
            actual: category,
        });
    }
    if ty != expected.type_desc() {
        return Err(BindError::TypeMismatch {
            function: signature.name().to_string(),
            index,
            name: signature.param_name(index).to_string(),
            expected: expected.type_desc(),
            actual: ty,
        });
    }
    Ok(())
}

/// Verify that `params` fits `signature` and that every container can address
/// every index in `mask`.
pub fn verify_params(
    signature: &Signature,
    params: &Params<'_>,
    mask: &IndexMask<'_>,
) -> Result<(), BindError> {
    let slots = params.slots();
    if slots.len() != signature.len() {
        return Err(BindError::ArityMismatch {
            function: signature.name().to_string(),
            expected: signature.len(),
            actual: slots.len(),
        });
    }

    let required = mask.min_array_size();
    for (index, slot) in slots.iter().enumerate() {
        check_slot(signature, index, slot)?;
        if slot.len() < required {
            return Err(BindError::TooSmall {
                function: signature.name().to_string(),
                index,
                name: signature.param_name(index).to_string(),
                len: slot.len(),
                required,
            });
        }
    }
    Ok(())
}
