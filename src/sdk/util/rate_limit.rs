use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Nominatim's public usage policy allows one request per second.
pub fn nominatim_limiter() -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::MIN)))
}

pub fn per_minute_limiter(requests: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(requests)))
}
