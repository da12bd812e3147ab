//! Weighted-random link selection.
//!
//! Selection probability for link *i* is `weight_i / total`. Link order only
//! matters for the rounding fallback, never for the distribution.

use rand::Rng;
use serde_json::json;

use crate::domain::entities::Link;
use crate::error::AppError;

/// Source of uniform draws in `[0, 1)`.
///
/// Implemented for every [`rand::Rng`], so callers can pass `rand::rng()` in
/// production and a seeded `StdRng` or a fixed-draw double in tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Picks one link URL with probability proportional to its weight.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `links` is empty, no weight is positive,
/// or a weight is not finite. Finite weights whose sum overflows `f64` are
/// rescaled rather than rejected.
pub fn pick<'a, R>(links: &'a [Link], rng: &mut R) -> Result<&'a str, AppError>
where
    R: RandomSource + ?Sized,
{
    let Some(last) = links.last() else {
        return Err(AppError::bad_request("no links", json!({})));
    };

    let mut scale = 1.0;
    let mut total: f64 = links.iter().map(|l| l.weight).sum();
    if total.is_infinite() && links.iter().all(|l| l.weight.is_finite()) {
        // Finite weights whose sum overflows: rescale against the largest one.
        scale = links.iter().map(|l| l.weight).fold(0.0, f64::max);
        total = links.iter().map(|l| l.weight / scale).sum();
    }
    if !(total > 0.0 && total.is_finite()) {
        return Err(AppError::bad_request(
            "no positive weight",
            json!({ "total_weight": total.to_string() }),
        ));
    }

    let r = rng.next_unit() * total;

    let mut cumulative = 0.0;
    for link in links {
        cumulative += link.weight / scale;
        if r < cumulative {
            return Ok(&link.url);
        }
    }

    // r == total after rounding
    Ok(&last.url)
}
