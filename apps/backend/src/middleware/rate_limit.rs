//! Per-client token-bucket rate limiting.
//!
//! [`RateLimiter`] owns the bucket map. Every check is one read-modify-write
//! under the map lock. Idle clients are evicted by a background sweeper
//! started with [`RateLimiter::start_sweeper`]; the returned
//! [`SweeperHandle`] stops it, and dropping the handle cancels it too.
//!
//! Time comes from `tokio::time::Instant`, so tests drive it with paused
//! time.

use std::collections::HashMap;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Bucket capacity; a new client may make this many requests at once.
    pub burst: u32,
    /// One token is restored per interval.
    pub refill_every: Duration,
    pub sweep_every: Duration,
    /// Clients unseen for longer than this are evicted by the sweeper.
    pub idle_ttl: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: 100,
            refill_every: Duration::from_secs(60),
            sweep_every: Duration::from_secs(60),
            idle_ttl: Duration::from_secs(3 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

/// Cloneable handle to the shared bucket map.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn check(&self, key: &str) -> Decision {
        let now = Instant::now();
        let capacity = f64::from(self.config.burst);
        let refill_secs = self.config.refill_every.as_secs_f64();

        let mut buckets = self.buckets.lock();
        let bucket = buckets.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        });

        if refill_secs > 0.0 {
            let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
            bucket.tokens = (bucket.tokens + elapsed / refill_secs).min(capacity);
        } else {
            bucket.tokens = capacity;
        }
        bucket.last_refill = now;
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Decision::Allowed {
                remaining: bucket.tokens.floor() as u32,
            }
        } else {
            let missing = 1.0 - bucket.tokens;
            Decision::Limited {
                retry_after: self.config.refill_every.mul_f64(missing),
            }
        }
    }

    /// Evict clients idle for longer than `idle_ttl`. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let ttl = self.config.idle_ttl;
        let mut buckets = self.buckets.lock();
        let before = buckets.len();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_seen) <= ttl);
        before - buckets.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().len()
    }

    /// Spawn the periodic sweeper on the current tokio runtime.
    pub fn start_sweeper(&self) -> SweeperHandle {
        let limiter = self.clone();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let period = self.config.sweep_every;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let evicted = limiter.sweep();
                        if evicted > 0 {
                            debug!(evicted, remaining = limiter.tracked_clients(), "rate limiter sweep");
                        }
                    }
                }
            }
            info!("rate limiter sweeper stopped");
        });

        SweeperHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Owns the sweeper task. Dropping cancels it.
#[derive(Debug)]
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Cancel the sweeper and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "rate limiter sweeper ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Middleware applying the application's [`RateLimiter`], keyed by the real
/// client IP.
pub struct RateLimit;

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware { service }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let decision = match req.app_data::<web::Data<AppState>>() {
            Some(state) => Ok(state.rate_limiter.check(&client)),
            None => Err(AppError::internal("AppState not registered")),
        };

        match decision {
            Ok(Decision::Allowed { .. }) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Ok(Decision::Limited { retry_after }) => Box::pin(async move {
                security::rate_limit_hit(&client, req.path());
                let err = AppError::TooManyRequests { retry_after };
                Ok(req.into_response(err.error_response()).map_into_right_body())
            }),
            Err(err) => Box::pin(async move {
                Ok(req.into_response(err.error_response()).map_into_right_body())
            }),
        }
    }
}
