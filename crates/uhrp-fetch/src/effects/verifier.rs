//! The integrity boundary: candidate bodies are returned only after their
//! digest matches the requested address.

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::time::Instant;
use tracing::{debug, warn};
use uhrp_address::ContentAddress;
use uhrp_verify::{Hasher, Sha256Hasher, digests_match};

use crate::classify::is_success_status;
use crate::data::{CandidateHost, TransportMetadata};
use crate::effects::HttpClient;
use crate::error::{CandidateFailure, FailureReason, UhrpError};

/// Upper bound on buffer space reserved from an advertised `Content-Length`.
const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// Body of a candidate whose digest matched.
#[derive(Debug, Clone)]
pub struct VerifiedFetch {
    pub url:       String,
    pub bytes:     Bytes,
    pub transport: TransportMetadata,
}

/// Fetch one candidate and check its body against `address`.
///
/// The body is hashed while it streams in. `max_bytes` bounds both the
/// advertised length and the bytes actually read.
pub async fn fetch_candidate<C: HttpClient>(
    client: &C,
    address: &ContentAddress,
    url: &str,
    max_bytes: Option<u64>,
) -> Result<VerifiedFetch, FailureReason> {
    let response = client
        .get(url)
        .await
        .map_err(|e| FailureReason::Transport(e.to_string()))?;

    if !is_success_status(response.status) {
        return Err(FailureReason::HttpStatus(response.status));
    }

    if let (Some(limit), Some(advertised)) = (max_bytes, response.transport.content_length)
        && advertised > limit
    {
        return Err(FailureReason::TooLarge { limit });
    }

    let mut body = response.body;
    let mut hasher = Sha256Hasher::new();
    let prealloc = response.transport.content_length.unwrap_or_default().min(MAX_PREALLOC);
    let mut buffer = BytesMut::with_capacity(usize::try_from(prealloc).unwrap_or_default());

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| FailureReason::Transport(e.to_string()))?;
        if let Some(limit) = max_bytes
            && (buffer.len() + chunk.len()) as u64 > limit
        {
            return Err(FailureReason::TooLarge { limit });
        }
        hasher.update(&chunk);
        buffer.extend_from_slice(&chunk);
    }

    let actual = hasher.finalize_array();
    if !digests_match(address.digest(), &actual) {
        return Err(FailureReason::DigestMismatch {
            expected: hex::encode(address.digest()),
            actual:   hex::encode(actual),
        });
    }

    Ok(VerifiedFetch {
        url:       url.to_string(),
        bytes:     buffer.freeze(),
        transport: response.transport,
    })
}

/// Try `candidates` strictly in order; the first verified body wins.
///
/// Transport errors, error statuses, oversized bodies and digest mismatches
/// all skip to the next candidate. Only when every candidate has failed is
/// `AllCandidatesExhausted` returned. A passed `deadline` stops the walk with
/// `DeadlineExceeded`.
pub async fn fetch_and_verify<C: HttpClient>(
    client: &C,
    address: &ContentAddress,
    candidates: &[CandidateHost],
    max_bytes: Option<u64>,
    deadline: Option<Instant>,
) -> Result<VerifiedFetch, UhrpError> {
    let mut failures = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        debug!(%address, url = %candidate.url, rank = candidate.rank, "trying candidate");

        let attempt = fetch_candidate(client, address, &candidate.url, max_bytes);
        let outcome = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, attempt)
                .await
                .map_err(|_| UhrpError::DeadlineExceeded {
                    address: address.to_string(),
                })?,
            None => attempt.await,
        };

        match outcome {
            Ok(fetched) => {
                debug!(%address, url = %fetched.url, bytes = fetched.bytes.len(), "candidate verified");
                return Ok(fetched);
            }
            Err(reason) => {
                warn!(%address, url = %candidate.url, %reason, "candidate rejected");
                failures.push(CandidateFailure {
                    url: candidate.url.clone(),
                    reason,
                });
            }
        }
    }

    Err(UhrpError::AllCandidatesExhausted {
        address: address.to_string(),
        failures,
    })
}
