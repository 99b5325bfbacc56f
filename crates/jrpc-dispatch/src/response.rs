//! Response assembly from a batch outcome.

use crate::codec;
use crate::envelope::ResultEnvelope;
use crate::errors::DispatchError;
use crate::fault::Fault;
use crate::scheduler::BatchOutcome;

/// Renders a batch outcome to response bytes.
///
/// A timed-out batch collapses to a single timeout envelope with a null id.
/// Otherwise framing follows the number of results.
///
/// # Errors
///
/// Returns [`DispatchError::SerializeResponse`] if serialization fails.
pub fn assemble(outcome: &BatchOutcome) -> Result<Vec<u8>, DispatchError> {
    if outcome.is_timed_out() {
        return codec::render(&[ResultEnvelope::failure(Fault::timeout(), None)]);
    }
    codec::render(outcome.results())
}
