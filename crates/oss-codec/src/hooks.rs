//! Post-processing steps run after the declarative serialization pass.
//!
//! A hook sees the request model and the request description built so far
//! and may rewrite headers, parameters or body, or fail the call. Hooks run
//! in the order the caller lists them.

use sha2::{Digest, Sha256};

use crate::config::CodecConfig;
use crate::errors::{CodecError, CodecResult};
use crate::operation::OperationInput;

pub type SerdeHook<M> = fn(&M, &mut OperationInput, &CodecConfig) -> CodecResult<()>;

pub const CONTENT_SHA256_HEADER: &str = "x-oss-content-sha256";

pub fn run_hooks<M>(
    request: &M,
    input: &mut OperationInput,
    hooks: &[SerdeHook<M>],
    config: &CodecConfig,
) -> CodecResult<()> {
    for hook in hooks {
        hook(request, input, config)?;
    }
    Ok(())
}

/// Enforces that exactly one of two mutually exclusive encodings was given.
pub fn exactly_one(
    legacy: &str,
    legacy_present: bool,
    current: &str,
    current_present: bool,
) -> CodecResult<()> {
    if legacy_present == current_present {
        return Err(CodecError::AmbiguousEncoding {
            legacy: legacy.to_string(),
            current: current.to_string(),
        });
    }
    Ok(())
}

/// Sets `x-oss-content-sha256` to the hex digest of the final body.
pub fn add_content_sha256<M>(
    _request: &M,
    input: &mut OperationInput,
    _config: &CodecConfig,
) -> CodecResult<()> {
    let body = input.body.as_deref().unwrap_or_default();
    let digest = hex::encode(Sha256::digest(body));
    input.headers.insert(CONTENT_SHA256_HEADER, &digest)
}
